//! Notification entity - who acted on whom

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationVerb {
    Commented,
    Replied,
}

impl NotificationVerb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Commented => "commented",
            Self::Replied => "replied",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "commented" => Some(Self::Commented),
            "replied" => Some(Self::Replied),
            _ => None,
        }
    }
}

impl fmt::Display for NotificationVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entry in a recipient's notification feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: Snowflake,
    pub actor_id: Snowflake,
    pub recipient_id: Snowflake,
    pub verb: NotificationVerb,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(
        id: Snowflake,
        actor_id: Snowflake,
        recipient_id: Snowflake,
        verb: NotificationVerb,
        description: String,
    ) -> Self {
        Self {
            id,
            actor_id,
            recipient_id,
            verb,
            description,
            created_at: Utc::now(),
        }
    }

    #[inline]
    pub fn is_self_notification(&self) -> bool {
        self.actor_id == self.recipient_id
    }
}
