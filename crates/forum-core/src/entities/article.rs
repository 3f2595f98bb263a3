//! Article entity

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Forum article
///
/// Articles are never removed. `alive = false` marks a soft-deleted article,
/// which ordinary read paths must treat as missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub id: Snowflake,
    pub title: String,
    pub body: String,
    pub author_id: Snowflake,
    pub alive: bool,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl Article {
    pub fn new(id: Snowflake, author_id: Snowflake, title: String, body: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            title,
            body,
            author_id,
            alive: true,
            created_at: now,
            modified_at: now,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    #[inline]
    pub fn is_author(&self, user_id: Snowflake) -> bool {
        self.author_id == user_id
    }

    pub fn soft_delete(&mut self) {
        self.alive = false;
        self.modified_at = Utc::now();
    }
}

/// Listing filter for alive articles
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleFilter {
    /// Exact title match
    pub title: Option<String>,
    /// Exact body match
    pub body: Option<String>,
    /// Case-insensitive substring over title and body
    pub search: Option<String>,
}

impl ArticleFilter {
    pub fn matches(&self, article: &Article) -> bool {
        if let Some(title) = &self.title {
            if &article.title != title {
                return false;
            }
        }
        if let Some(body) = &self.body {
            if &article.body != body {
                return false;
            }
        }
        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => {
                let term = term.to_lowercase();
                article.title.to_lowercase().contains(&term)
                    || article.body.to_lowercase().contains(&term)
            }
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Article {
        Article::new(
            Snowflake::new(10),
            Snowflake::new(1),
            "Rust ownership".into(),
            "Borrowing explained".into(),
        )
    }

    #[test]
    fn test_soft_delete() {
        let mut article = sample();
        assert!(article.is_alive());
        article.soft_delete();
        assert!(!article.is_alive());
        assert!(article.is_author(Snowflake::new(1)));
    }

    #[test]
    fn test_filter() {
        let article = sample();
        assert!(ArticleFilter::default().matches(&article));

        let search = ArticleFilter {
            search: Some("BORROW".into()),
            ..Default::default()
        };
        assert!(search.matches(&article));

        let title = ArticleFilter {
            title: Some("Rust".into()),
            ..Default::default()
        };
        assert!(!title.matches(&article));
    }
}
