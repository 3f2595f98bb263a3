//! User entity - a forum account with a reputation score

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Forum user
///
/// `points` is the reputation score. It is never clamped and may go negative
/// after moderation deductions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    pub email: String,
    pub profile: Option<String>,
    pub points: i64,
    pub is_staff: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: Snowflake, username: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            username,
            email,
            profile: None,
            points: 0,
            is_staff: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Same user with moderation rights
    #[must_use]
    pub fn with_staff(mut self) -> Self {
        self.is_staff = true;
        self
    }

    #[inline]
    pub fn is_staff(&self) -> bool {
        self.is_staff
    }

    /// Apply a point delta and return the new balance
    pub fn apply_points(&mut self, delta: i64) -> i64 {
        self.points += delta;
        self.updated_at = Utc::now();
        self.points
    }
}
