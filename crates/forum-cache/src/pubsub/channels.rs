//! Pub/Sub channel naming

/// Default channel for outbound notification deliveries
pub const DELIVERY_CHANNEL: &str = "notifications:delivery";

/// Pub/Sub channel types
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PubSubChannel {
    /// Shared queue consumed by delivery workers (e-mail and the like)
    Delivery,
    Custom(String),
}

impl PubSubChannel {
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Delivery => DELIVERY_CHANNEL.to_string(),
            Self::Custom(name) => name.clone(),
        }
    }

    /// Parse a channel name back to a `PubSubChannel`
    #[must_use]
    pub fn parse(name: &str) -> Self {
        if name == DELIVERY_CHANNEL {
            Self::Delivery
        } else {
            Self::Custom(name.to_string())
        }
    }
}

impl std::fmt::Display for PubSubChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_names() {
        assert_eq!(PubSubChannel::Delivery.name(), "notifications:delivery");
        assert_eq!(PubSubChannel::Custom("hello".into()).to_string(), "hello");
    }

    #[test]
    fn test_channel_parse() {
        assert_eq!(PubSubChannel::parse("notifications:delivery"), PubSubChannel::Delivery);
        // configured delivery channels other than the default pass through as-is
        assert_eq!(
            PubSubChannel::parse("notifications:user:9"),
            PubSubChannel::Custom("notifications:user:9".into())
        );
    }
}
