//! Tracing and logging setup
//!
//! `RUST_LOG` wins when set; otherwise the configured level applies.

use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter, Layer, Registry,
};

use crate::config::Environment;

/// Tracing configuration options
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub level: Level,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
    /// Log span open/close events
    pub span_events: bool,
    pub file_line: bool,
    pub thread_names: bool,
    pub thread_ids: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            json: false,
            span_events: false,
            file_line: true,
            thread_names: false,
            thread_ids: false,
        }
    }
}

impl TracingConfig {
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: Level::DEBUG,
            span_events: true,
            thread_names: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn production() -> Self {
        Self {
            json: true,
            file_line: false,
            ..Self::default()
        }
    }

    /// Pick the preset matching a deployment environment
    #[must_use]
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development => Self::development(),
            Environment::Staging | Environment::Production => Self::production(),
        }
    }

    fn span_events(&self) -> FmtSpan {
        if self.span_events {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }

    fn fmt_layer(&self) -> Box<dyn Layer<Registry> + Send + Sync> {
        let layer = fmt::layer()
            .with_file(self.file_line)
            .with_line_number(self.file_line)
            .with_thread_names(self.thread_names)
            .with_thread_ids(self.thread_ids)
            .with_span_events(self.span_events());

        if self.json {
            layer.json().boxed()
        } else {
            layer.boxed()
        }
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.level.to_string()))
    }

    fn try_init(&self) -> Result<(), TryInitError> {
        tracing_subscriber::registry()
            .with(self.fmt_layer())
            .with(self.env_filter())
            .try_init()
    }
}

/// Install the global subscriber
///
/// # Panics
/// Panics if a global subscriber is already installed.
pub fn init_tracing(config: &TracingConfig) {
    if let Err(err) = config.try_init() {
        panic!("failed to install tracing subscriber: {err}");
    }
}

/// Install the global subscriber, reporting instead of panicking when one
/// is already installed
///
/// # Errors
/// Returns [`TracingError::AlreadyInitialized`] on a second call.
pub fn try_init_tracing(config: &TracingConfig) -> Result<(), TracingError> {
    config
        .try_init()
        .map_err(|_| TracingError::AlreadyInitialized)
}

/// Tracing initialization errors
#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("Tracing subscriber already initialized")]
    AlreadyInitialized,
}
