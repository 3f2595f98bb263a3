//! View counter
//!
//! Approximate per-article view tally. Counts live only in the cache and are
//! not tied to the article row; a slow or failing cache yields no count
//! rather than an error.

use forum_core::Snowflake;
use tracing::{instrument, warn};

use super::context::ServiceContext;

pub struct ViewCounter<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ViewCounter<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Count one view and return the post-increment value
    ///
    /// The first view of an article returns 1. `None` means the cache did
    /// not answer within the configured timeout or failed.
    #[instrument(skip(self))]
    pub async fn record_view(&self, article_id: Snowflake) -> Option<i64> {
        let timeout = self.ctx.view_config().timeout();
        match tokio::time::timeout(timeout, self.ctx.view_store().incr(article_id)).await {
            Ok(Ok(count)) => Some(count),
            Ok(Err(e)) => {
                warn!(article_id = %article_id, error = %e, "View counter increment failed");
                None
            }
            Err(_) => {
                warn!(
                    article_id = %article_id,
                    timeout_ms = self.ctx.view_config().timeout_ms,
                    "View counter increment timed out"
                );
                None
            }
        }
    }
}
