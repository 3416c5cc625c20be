//! Default values for every configuration section.

use crate::schema::{I18nConfig, LeadsConfig, SiteConfig, SiteSection};
use folio_common::LoggingConfig;
use folio_i18n::{Locale, DEFAULT_CURRENCY};

/// Default page paths, without locale prefix.
pub const DEFAULT_PAGES: &[&str] = &["/", "/projects", "/about", "/contact"];

/// Default lead table name.
pub const DEFAULT_LEADS_TABLE: &str = "leads";

/// Default lead request timeout.
pub const DEFAULT_LEADS_TIMEOUT_SECONDS: u64 = 10;

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site: SiteSection::default(),
            i18n: I18nConfig::default(),
            leads: LeadsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            name: "Folio".to_string(),
            base_url: "http://localhost:3000".to_string(),
            pages: DEFAULT_PAGES.iter().map(ToString::to_string).collect(),
        }
    }
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_locale: Locale::default(),
            messages_dir: "messages".into(),
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl Default for LeadsConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            table: DEFAULT_LEADS_TABLE.to_string(),
            timeout_seconds: DEFAULT_LEADS_TIMEOUT_SECONDS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SiteConfig::default();
        assert_eq!(config.i18n.default_locale, Locale::English);
        assert_eq!(config.i18n.currency, "EUR");
        assert_eq!(config.site.pages.len(), DEFAULT_PAGES.len());
        assert!(!config.leads.is_enabled());
        assert_eq!(config.leads.timeout_seconds, 10);
    }
}
