//! Application-wide error types using thiserror.

use crate::leads::LeadError;
use folio_common::FolioError;
use folio_config::ConfigError;
use folio_i18n::{FormatError, I18nError};

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum SiteError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Message bundle or locale error.
    #[error("Localization error: {0}")]
    I18n(#[from] I18nError),

    /// Formatting failed in both the requested and the default locale.
    #[error("Formatting error: {0}")]
    Format(#[from] FormatError),

    /// Lead validation or storage error.
    #[error("Lead error: {0}")]
    Lead(#[from] LeadError),

    /// The path does not name a configured page.
    #[error("No page at '{0}'")]
    PageNotFound(String),
}

impl From<SiteError> for FolioError {
    fn from(err: SiteError) -> Self {
        match err {
            SiteError::Config(e) => e.into(),
            SiteError::I18n(e) => e.into(),
            SiteError::Format(e) => e.into(),
            SiteError::Lead(LeadError::Validation { field, reason }) => {
                Self::validation(reason, Some(field.to_string()))
            }
            SiteError::Lead(LeadError::Rejected { status, body }) => Self::network(body, Some(status)),
            SiteError::Lead(e) => Self::network(e.to_string(), None),
            SiteError::PageNotFound(path) => {
                Self::validation(format!("No page at '{path}'"), Some("path".to_string()))
            }
        }
    }
}

/// Result type for the site application.
pub type SiteResult<T> = Result<T, SiteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lead_validation_maps_to_user_error() {
        let err: FolioError = SiteError::from(LeadError::Validation {
            field: "email",
            reason: "is required".into(),
        })
        .into();
        assert!(err.is_user_error());
        assert_eq!(err.category(), "validation");
    }

    #[test]
    fn test_exit_code_separates_bad_input_from_failures() {
        let not_found: FolioError = SiteError::PageNotFound("/blog".into()).into();
        assert_eq!(not_found.exit_code(), 2);

        let missing: FolioError = SiteError::from(I18nError::MissingBundle {
            locale: folio_i18n::Locale::German,
        })
        .into();
        assert_eq!(missing.category(), "localization");
        assert_eq!(missing.exit_code(), 1);

        let disabled: FolioError = SiteError::from(LeadError::Disabled).into();
        assert_eq!(disabled.category(), "network");
    }

    #[test]
    fn test_rejection_keeps_status() {
        let err: FolioError = SiteError::from(LeadError::Rejected {
            status: 503,
            body: "unavailable".into(),
        })
        .into();
        assert!(matches!(
            err,
            FolioError::Network {
                status_code: Some(503),
                ..
            }
        ));
    }
}
