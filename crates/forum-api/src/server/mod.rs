//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use axum::Router;
use forum_cache::RedisPool;
use forum_common::{AppConfig, AppError};
use forum_db::{create_pool, run_migrations, PoolTimeouts};
use forum_service::ServiceContext;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::apply_middleware_with_config;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let api = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    );

    health_routes().merge(api).with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&config.database, PoolTimeouts::default())
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    info!("Connecting to Redis...");
    let redis_pool =
        RedisPool::from_config(&config.redis).map_err(|e| AppError::Cache(e.to_string()))?;
    info!("Redis pool created");

    let service_context = ServiceContext::production(pool, redis_pool, &config);

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server on an already-bound listener
pub async fn run_server(app: Router, listener: TcpListener) -> Result<(), AppError> {
    if let Ok(addr) = listener.local_addr() {
        info!("Server listening on http://{}", addr);
    }

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();

    let state = create_app_state(config).await?;
    let app = create_app(state);

    info!("Starting HTTP server on {}", addr);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    run_server(app, listener).await
}
