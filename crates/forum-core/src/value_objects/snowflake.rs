//! Snowflake ids - time-ordered 64-bit identifiers for every forum record
//!
//! Layout, most significant bits first:
//! - 41 bits: milliseconds since [`Snowflake::EPOCH`]
//! - 10 bits: worker id (0-1023)
//! - 12 bits: per-millisecond sequence (0-4095)
//!
//! The zero id is reserved. Thread addressing fields (`be_mid`, `root`,
//! `parent`) travel as `0` on the wire when they point at nothing.

use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const WORKER_BITS: u32 = 10;
const SEQUENCE_BITS: u32 = 12;
const SEQUENCE_MASK: i64 = (1 << SEQUENCE_BITS) - 1;
const MAX_WORKER_ID: u16 = (1 << WORKER_BITS) - 1;

/// Time-ordered record identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Snowflake(i64);

impl Snowflake {
    /// Forum epoch: 2020-01-01 00:00:00 UTC (milliseconds)
    pub const EPOCH: i64 = 1_577_836_800_000;

    /// The reserved "no record" id
    pub const NONE: Self = Self(0);

    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// `None` for the reserved zero id, `Some(self)` otherwise
    #[inline]
    pub const fn non_zero(self) -> Option<Self> {
        if self.0 == 0 {
            None
        } else {
            Some(self)
        }
    }

    /// Milliseconds since the Unix epoch encoded in this id
    #[inline]
    pub fn timestamp_millis(&self) -> i64 {
        (self.0 >> (WORKER_BITS + SEQUENCE_BITS)) + Self::EPOCH
    }

    /// Creation time encoded in this id
    pub fn created_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.timestamp_millis()).unwrap_or_default()
    }

    pub fn parse(s: &str) -> Result<Self, SnowflakeParseError> {
        s.trim()
            .parse::<i64>()
            .map(Snowflake)
            .map_err(|_| SnowflakeParseError::InvalidFormat)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SnowflakeParseError {
    #[error("invalid id format")]
    InvalidFormat,
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Snowflake {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<Snowflake> for i64 {
    fn from(id: Snowflake) -> Self {
        id.0
    }
}

impl std::str::FromStr for Snowflake {
    type Err = SnowflakeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Snowflake::parse(s)
    }
}

// Ids go out as JSON strings so JavaScript clients never lose precision.
impl Serialize for Snowflake {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Int(i64),
            Str(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Int(id) => Ok(Snowflake(id)),
            Repr::Str(s) => Snowflake::parse(&s).map_err(serde::de::Error::custom),
        }
    }
}

/// Lock-free id generator
///
/// The last issued `(millisecond, sequence)` pair lives in one atomic word.
/// When the sequence overflows within a millisecond the generator borrows
/// from the next millisecond instead of spinning, so ids stay unique and
/// strictly increasing per worker.
pub struct SnowflakeGenerator {
    worker_id: u16,
    state: AtomicI64,
}

impl SnowflakeGenerator {
    /// # Panics
    /// Panics if `worker_id` does not fit in 10 bits.
    pub fn new(worker_id: u16) -> Self {
        assert!(worker_id <= MAX_WORKER_ID, "worker id must be < 1024");
        Self {
            worker_id,
            state: AtomicI64::new(0),
        }
    }

    pub fn generate(&self) -> Snowflake {
        loop {
            let now = Self::elapsed_millis();
            let prev = self.state.load(Ordering::Acquire);
            let next = if now > prev >> SEQUENCE_BITS {
                now << SEQUENCE_BITS
            } else {
                prev + 1
            };

            if self
                .state
                .compare_exchange_weak(prev, next, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                let millis = next >> SEQUENCE_BITS;
                let sequence = next & SEQUENCE_MASK;
                return Snowflake(
                    (millis << (WORKER_BITS + SEQUENCE_BITS))
                        | (i64::from(self.worker_id) << SEQUENCE_BITS)
                        | sequence,
                );
            }
        }
    }

    pub fn worker_id(&self) -> u16 {
        self.worker_id
    }

    fn elapsed_millis() -> i64 {
        (Utc::now().timestamp_millis() - Snowflake::EPOCH).max(0)
    }
}

impl Default for SnowflakeGenerator {
    fn default() -> Self {
        Self::new(0)
    }
}
