//! Comment entity - top-level comments and threaded replies

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Where a comment sits in its article's thread tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadPosition {
    /// Starts a thread (`root = 0`, `parent = 0`)
    Root,
    /// Inside the thread started by `root`, directly under `parent`
    Reply { root: Snowflake, parent: Snowflake },
}

impl ThreadPosition {
    /// Interpret wire ids where `0` means "none"
    pub fn from_ids(root: Snowflake, parent: Snowflake) -> Result<Self, DomainError> {
        match (root.non_zero(), parent.non_zero()) {
            (None, None) => Ok(Self::Root),
            (Some(root), Some(parent)) => Ok(Self::Reply { root, parent }),
            (None, Some(_)) => Err(DomainError::InvalidThread(
                "a reply with a parent must name its root".to_string(),
            )),
            (Some(_), None) => Err(DomainError::InvalidThread(
                "a comment without a parent cannot have a root".to_string(),
            )),
        }
    }

    pub fn root(&self) -> Option<Snowflake> {
        match self {
            Self::Root => None,
            Self::Reply { root, .. } => Some(*root),
        }
    }

    pub fn parent(&self) -> Option<Snowflake> {
        match self {
            Self::Root => None,
            Self::Reply { parent, .. } => Some(*parent),
        }
    }
}

/// Forum comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Snowflake,
    pub article_id: Snowflake,
    pub author_id: Snowflake,
    pub content: String,
    pub like_count: i64,
    /// User this comment is addressed to
    pub be_mid: Option<Snowflake>,
    pub root: Option<Snowflake>,
    pub parent: Option<Snowflake>,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl Comment {
    /// New top-level comment
    pub fn new(id: Snowflake, article_id: Snowflake, author_id: Snowflake, content: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            article_id,
            author_id,
            content,
            like_count: 0,
            be_mid: None,
            root: None,
            parent: None,
            created_at: now,
            modified_at: now,
        }
    }

    /// New reply addressed to `be_mid` at `position`
    pub fn new_reply(
        id: Snowflake,
        article_id: Snowflake,
        author_id: Snowflake,
        content: String,
        be_mid: Snowflake,
        position: ThreadPosition,
    ) -> Self {
        let mut comment = Self::new(id, article_id, author_id, content);
        comment.be_mid = Some(be_mid);
        comment.root = position.root();
        comment.parent = position.parent();
        comment
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// The thread this comment belongs to (its own id for a root)
    pub fn thread_id(&self) -> Snowflake {
        self.root.unwrap_or(self.id)
    }

    /// Reference used as the description of notifications about this comment
    pub fn locator(&self) -> String {
        format!("comment:{}", self.id)
    }
}

/// Prefix `content` with an `@username ` mention tag
pub fn compose_mention(username: &str, content: &str) -> String {
    format!("@{username} {content}")
}
