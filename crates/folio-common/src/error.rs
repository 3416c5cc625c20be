//! Error types and utilities for Folio

use thiserror::Error;

/// Result type alias for Folio operations
pub type Result<T> = std::result::Result<T, FolioError>;

/// Workspace-wide error type
///
/// Library crates keep their own precise error enums; this type is what
/// they collapse into at the binary boundary.
#[derive(Error, Debug)]
pub enum FolioError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Network related errors (lead backend, etc.)
    #[error("Network error: {message}")]
    Network {
        message: String,
        status_code: Option<u16>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internationalization and localization errors
    #[error("Localization error: {message}")]
    Localization {
        message: String,
        locale: Option<String>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Validation errors for user input or data
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl FolioError {
    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new network error
    pub fn network(msg: impl Into<String>, status_code: Option<u16>) -> Self {
        Self::Network {
            message: msg.into(),
            status_code,
            source: None,
        }
    }

    /// Create a new localization error with source
    pub fn localization_with_source(
        msg: impl Into<String>,
        locale: Option<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Localization {
            message: msg.into(),
            locale,
            source: Some(Box::new(source)),
        }
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>, field: Option<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field,
        }
    }

    /// Whether the error was caused by bad caller input rather than the
    /// environment
    pub const fn is_user_error(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Process exit code for the error: `2` for bad input, `1` otherwise
    pub const fn exit_code(&self) -> u8 {
        if self.is_user_error() {
            2
        } else {
            1
        }
    }

    /// Category name used in structured log fields
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Config { .. } => "config",
            Self::Io(_) => "io",
            Self::Network { .. } => "network",
            Self::Localization { .. } => "localization",
            Self::Validation { .. } => "validation",
            Self::Serialization(_) => "serialization",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_display_messages() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "config.yaml");
        assert_eq!(
            FolioError::config_with_source("missing base_url", io).to_string(),
            "Configuration error: missing base_url"
        );
        assert_eq!(
            FolioError::validation("too long", Some("name".into())).to_string(),
            "Validation error: too long"
        );
    }

    #[test]
    fn test_source_is_preserved() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = FolioError::localization_with_source("bundle missing", Some("fr".into()), io);
        assert!(err.source().is_some());
        assert_eq!(err.category(), "localization");
    }

    #[test]
    fn test_user_error_classification() {
        assert!(FolioError::validation("bad email", None).is_user_error());
        assert!(!FolioError::network("timeout", None).is_user_error());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(FolioError::validation("bad email", None).exit_code(), 2);
        assert_eq!(FolioError::network("timeout", Some(503)).exit_code(), 1);
    }
}
