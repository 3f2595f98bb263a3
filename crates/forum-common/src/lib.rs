//! # forum-common
//!
//! Shared configuration, error handling and telemetry.

pub mod config;
pub mod error;
pub mod telemetry;

pub use config::{
    AppConfig, AppSettings, ConfigError, CorsConfig, DatabaseConfig, Environment,
    NotificationConfig, RateLimitConfig, RedisConfig, ServerConfig, SnowflakeConfig,
    ViewCounterConfig,
};
pub use error::{domain_status, AppError, AppResult, ErrorResponse};
pub use telemetry::{init_tracing, try_init_tracing, TracingConfig, TracingError};
