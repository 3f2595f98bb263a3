//! Readiness probes over the persistence and cache ports

use tracing::warn;

use crate::dto::ReadinessResponse;

use super::context::ServiceContext;

pub struct HealthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> HealthService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    pub async fn readiness(&self) -> ReadinessResponse {
        let database = match self.ctx.transactions().ping().await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Database readiness probe failed");
                false
            }
        };
        let cache = match self.ctx.view_store().ping().await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Cache readiness probe failed");
                false
            }
        };
        ReadinessResponse::ready(database, cache)
    }
}
