//! Structured logging infrastructure for Folio

use crate::error::{FolioError, Result};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

/// Output format of the log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line, colored output for development
    #[default]
    Pretty,
    /// Single-line output
    Compact,
    /// Newline-delimited JSON for log shippers
    Json,
}

/// Configuration for the logging system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "folio_i18n=trace")
    pub level: String,
    /// Output format
    pub format: LogFormat,
    /// Optional file path for log output
    pub file_path: Option<String>,
    /// Whether to include span open/close events
    pub include_spans: bool,
    /// Whether to include target module information
    pub include_targets: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            file_path: None,
            include_spans: false,
            include_targets: true,
        }
    }
}

impl LoggingConfig {
    /// Development preset: pretty output at debug level
    pub fn development() -> Self {
        Self {
            level: "debug".to_string(),
            include_spans: true,
            ..Self::default()
        }
    }

    /// Production preset: JSON lines at info level
    pub fn production(log_file: Option<String>) -> Self {
        Self {
            format: LogFormat::Json,
            file_path: log_file,
            ..Self::default()
        }
    }

    /// Build the environment filter, falling back to `info` when the
    /// configured directive does not parse
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.level).unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

fn build_layer(config: &LoggingConfig) -> Result<BoxedLayer> {
    let span_events = if config.include_spans {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let file = match &config.file_path {
        Some(path) => Some(
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?,
        ),
        None => None,
    };

    let base = fmt::layer()
        .with_span_events(span_events)
        .with_target(config.include_targets);

    let layer: BoxedLayer = match (config.format, file) {
        (LogFormat::Json, Some(file)) => Box::new(base.json().with_writer(Mutex::new(file))),
        (LogFormat::Json, None) => Box::new(base.json().with_writer(std::io::stderr)),
        (LogFormat::Compact, Some(file)) => Box::new(
            base.compact()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        ),
        (LogFormat::Compact, None) => Box::new(base.compact().with_writer(std::io::stderr)),
        (LogFormat::Pretty, Some(file)) => Box::new(
            base.pretty()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        ),
        (LogFormat::Pretty, None) => Box::new(base.pretty().with_writer(std::io::stderr)),
    };

    Ok(layer)
}

/// Initialize the tracing subscriber with the given configuration
///
/// Fails if a global subscriber has already been installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let layer = build_layer(config)?;

    tracing_subscriber::registry()
        .with(layer)
        .with(config.env_filter())
        .try_init()
        .map_err(|e| FolioError::config_with_source("failed to install log subscriber", e))
}
