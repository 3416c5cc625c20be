//! Configuration loading utilities

use crate::SiteConfig;
use folio_common::FolioError;
use folio_i18n::Locale;
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming an explicit configuration file
pub const CONFIG_PATH_VAR: &str = "FOLIO_CONFIG_PATH";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for FolioError {
    fn from(err: ConfigError) -> Self {
        Self::config_with_source(err.to_string(), err)
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SiteConfig, ConfigError> {
        debug!("Reading configuration from {}", path.as_ref().display());
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::load_from_str(&content, |var| env::var(var).ok())
    }

    /// Parse YAML, apply overrides from `lookup` and validate
    pub fn load_from_str<F>(content: &str, lookup: F) -> Result<SiteConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: SiteConfig = serde_yaml::from_str(content)?;
        Self::apply_overrides(&mut config, lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the environment and the usual file locations.
    ///
    /// Checks `FOLIO_CONFIG_PATH`, then `config.yaml`, then `config.yml`, and
    /// falls back to defaults with environment overrides.
    pub fn load() -> Result<SiteConfig, ConfigError> {
        let config = if let Ok(config_path) = env::var(CONFIG_PATH_VAR) {
            Self::load_config(&config_path)?
        } else if Path::new("config.yaml").exists() {
            Self::load_config("config.yaml")?
        } else if Path::new("config.yml").exists() {
            Self::load_config("config.yml")?
        } else {
            info!("No configuration file found, using defaults");
            let mut config = SiteConfig::default();
            Self::apply_overrides(&mut config, |var| env::var(var).ok())?;
            config.validate()?;
            config
        };

        Ok(config)
    }

    /// Load configuration from a specific file, or the default locations
    pub fn load_from(path: Option<&Path>) -> Result<SiteConfig, ConfigError> {
        match path {
            Some(path) => Self::load_config(path),
            None => Self::load(),
        }
    }

    /// Apply `FOLIO_*` overrides looked up through `lookup`
    pub fn apply_overrides<F>(config: &mut SiteConfig, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(base_url) = lookup("FOLIO_BASE_URL") {
            config.site.base_url = base_url;
        }

        if let Some(locale) = lookup("FOLIO_DEFAULT_LOCALE") {
            config.i18n.default_locale =
                Locale::from_code(&locale).map_err(|e| ConfigError::EnvParseError {
                    var: "FOLIO_DEFAULT_LOCALE".to_string(),
                    source: Box::new(e),
                })?;
        }

        if let Some(dir) = lookup("FOLIO_MESSAGES_DIR") {
            config.i18n.messages_dir = dir.into();
        }

        if let Some(currency) = lookup("FOLIO_CURRENCY") {
            config.i18n.currency = currency.trim().to_ascii_uppercase();
        }

        if let Some(endpoint) = lookup("FOLIO_LEADS_ENDPOINT") {
            config.leads.endpoint = Some(endpoint).filter(|e| !e.is_empty());
        }

        if let Some(api_key) = lookup("FOLIO_LEADS_API_KEY") {
            config.leads.api_key = Some(api_key).filter(|k| !k.is_empty());
        }

        if let Some(timeout) = lookup("FOLIO_LEADS_TIMEOUT") {
            config.leads.timeout_seconds =
                timeout.trim().parse().map_err(|e| ConfigError::EnvParseError {
                    var: "FOLIO_LEADS_TIMEOUT".to_string(),
                    source: Box::new(e),
                })?;
        }

        if let Some(level) = lookup("FOLIO_LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(())
    }
}
