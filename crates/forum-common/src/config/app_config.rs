//! Application configuration structs
//!
//! Loaded from environment variables, with `.env` support via `dotenvy`.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub views: ViewCounterConfig,
    pub notifications: NotificationConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub snowflake: SnowflakeConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default)]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Redis configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    #[serde(default = "default_redis_max_connections")]
    pub max_connections: u32,
}

/// Article view counter settings
#[derive(Debug, Clone, Deserialize)]
pub struct ViewCounterConfig {
    #[serde(default = "default_view_key_prefix")]
    pub key_prefix: String,
    #[serde(default = "default_view_timeout_ms")]
    pub timeout_ms: u64,
}

impl ViewCounterConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ViewCounterConfig {
    fn default() -> Self {
        Self {
            key_prefix: default_view_key_prefix(),
            timeout_ms: default_view_timeout_ms(),
        }
    }
}

/// Notification delivery queue settings
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationConfig {
    #[serde(default = "default_notification_channel")]
    pub channel: String,
    #[serde(default = "default_publish_timeout_ms")]
    pub publish_timeout_ms: u64,
}

impl NotificationConfig {
    #[must_use]
    pub fn publish_timeout(&self) -> Duration {
        Duration::from_millis(self.publish_timeout_ms)
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            channel: default_notification_channel(),
            publish_timeout_ms: default_publish_timeout_ms(),
        }
    }
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Snowflake ID generator configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnowflakeConfig {
    #[serde(default)]
    pub worker_id: u16,
}

fn default_app_name() -> String {
    "forum-server".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_redis_max_connections() -> u32 {
    10
}

fn default_view_key_prefix() -> String {
    "article_views:".to_string()
}

fn default_view_timeout_ms() -> u64 {
    250
}

fn default_notification_channel() -> String {
    "notifications:delivery".to_string()
}

fn default_publish_timeout_ms() -> u64 {
    500
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a required variable is missing or a value does
    /// not parse
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is fine
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup
    ///
    /// # Errors
    /// Same as [`AppConfig::from_env`]
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(lookup);

        Ok(Self {
            app: AppSettings {
                name: vars.string_or("APP_NAME", default_app_name),
                env: match vars.get("APP_ENV") {
                    Some(raw) => Environment::parse(&raw)
                        .ok_or(ConfigError::InvalidValue("APP_ENV", raw))?,
                    None => Environment::default(),
                },
            },
            api: ServerConfig {
                host: vars.string_or("API_HOST", default_host),
                port: vars.required("API_PORT")?,
            },
            database: DatabaseConfig {
                url: vars.required("DATABASE_URL")?,
                max_connections: vars.parse_or("DATABASE_MAX_CONNECTIONS", default_max_connections)?,
                min_connections: vars.parse_or("DATABASE_MIN_CONNECTIONS", default_min_connections)?,
            },
            redis: RedisConfig {
                url: vars.required("REDIS_URL")?,
                max_connections: vars
                    .parse_or("REDIS_MAX_CONNECTIONS", default_redis_max_connections)?,
            },
            views: ViewCounterConfig {
                key_prefix: vars.string_or("VIEW_COUNTER_KEY_PREFIX", default_view_key_prefix),
                timeout_ms: vars.parse_or("VIEW_COUNTER_TIMEOUT_MS", default_view_timeout_ms)?,
            },
            notifications: NotificationConfig {
                channel: vars.string_or("NOTIFICATION_CHANNEL", default_notification_channel),
                publish_timeout_ms: vars
                    .parse_or("NOTIFICATION_PUBLISH_TIMEOUT_MS", default_publish_timeout_ms)?,
            },
            rate_limit: RateLimitConfig {
                requests_per_second: vars
                    .parse_or("RATE_LIMIT_REQUESTS_PER_SECOND", default_requests_per_second)?,
                burst: vars.parse_or("RATE_LIMIT_BURST", default_burst)?,
            },
            cors: CorsConfig {
                allowed_origins: vars
                    .get("CORS_ALLOWED_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|o| !o.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            snowflake: SnowflakeConfig {
                worker_id: vars.parse_or("WORKER_ID", || 0)?,
            },
        })
    }
}

struct Vars<F>(F);

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    fn string_or(&self, key: &str, default: fn() -> String) -> String {
        self.get(key).unwrap_or_else(default)
    }

    fn required<T: FromStr>(&self, key: &'static str) -> Result<T, ConfigError> {
        let raw = self.get(key).ok_or(ConfigError::MissingVar(key))?;
        raw.trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, raw))
    }

    fn parse_or<T: FromStr>(
        &self,
        key: &'static str,
        default: impl FnOnce() -> T,
    ) -> Result<T, ConfigError> {
        match self.get(key) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(key, raw)),
            None => Ok(default()),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
