//! Configuration schema definitions using serde.

use folio_common::LoggingConfig;
use folio_i18n::Locale;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for the Folio site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Public site settings.
    pub site: SiteSection,
    /// Localization settings.
    pub i18n: I18nConfig,
    /// Lead submission backend.
    pub leads: LeadsConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Public site settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSection {
    /// Site name used in page titles.
    pub name: String,
    /// Absolute base URL, e.g. `https://example.com`.
    pub base_url: String,
    /// Locale-independent page paths listed in the sitemap.
    pub pages: Vec<String>,
}

/// Localization settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct I18nConfig {
    /// Locale whose bundle is canonical and complete.
    pub default_locale: Locale,
    /// Directory holding one `<locale>.json` bundle per locale.
    pub messages_dir: PathBuf,
    /// ISO 4217 currency code for formatted amounts.
    pub currency: String,
}

/// Lead submission backend settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadsConfig {
    /// Base URL of the hosted REST backend; lead submission is disabled
    /// when unset.
    pub endpoint: Option<String>,
    /// API key sent with each request.
    pub api_key: Option<String>,
    /// Table the leads are inserted into.
    pub table: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl LeadsConfig {
    /// Whether an endpoint is configured.
    pub const fn is_enabled(&self) -> bool {
        self.endpoint.is_some()
    }
}
