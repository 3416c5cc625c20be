//! Runtime validation of a loaded configuration.

use crate::loader::ConfigError;
use crate::schema::SiteConfig;
use url::Url;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, reporting every problem at once.
    pub fn validate(config: &SiteConfig) -> Result<(), ConfigError> {
        let mut problems = Vec::new();

        if !is_http_url(&config.site.base_url) {
            problems.push(format!(
                "site.base_url must be an absolute http(s) URL, got '{}'",
                config.site.base_url
            ));
        }

        if config.site.name.trim().is_empty() {
            problems.push("site.name cannot be empty".to_string());
        }

        for page in &config.site.pages {
            if !page.starts_with('/') {
                problems.push(format!("site.pages entry '{page}' must start with '/'"));
            }
        }

        let currency = &config.i18n.currency;
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
            problems.push(format!(
                "i18n.currency must be a 3-letter uppercase ISO 4217 code, got '{currency}'"
            ));
        }

        if let Some(endpoint) = &config.leads.endpoint {
            if !is_http_url(endpoint) {
                problems.push(format!(
                    "leads.endpoint must be an absolute http(s) URL, got '{endpoint}'"
                ));
            }
            if config.leads.api_key.as_deref().map_or(true, str::is_empty) {
                problems.push("leads.api_key is required when leads.endpoint is set".to_string());
            }
        }

        if config.leads.table.trim().is_empty() {
            problems.push("leads.table cannot be empty".to_string());
        }

        if config.leads.timeout_seconds == 0 {
            problems.push("leads.timeout_seconds must be greater than zero".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(problems))
        }
    }
}

fn is_http_url(value: &str) -> bool {
    Url::parse(value).is_ok_and(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
}

impl SiteConfig {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigValidator::validate(self)
    }
}
