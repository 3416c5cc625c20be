//! Error types for internationalization operations

use crate::Locale;
use folio_common::FolioError;
use thiserror::Error;

/// Errors that can occur while loading or resolving message bundles
#[derive(Error, Debug)]
pub enum I18nError {
    /// The requested locale is not part of the supported set
    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),

    /// A supported locale has no bundle
    #[error("No message bundle loaded for locale {locale}")]
    MissingBundle { locale: Locale },

    /// A bundle document has a value that is neither a string nor a group
    #[error("Invalid message bundle for {locale} at '{path}': {reason}")]
    InvalidBundle {
        locale: Locale,
        path: String,
        reason: String,
    },

    /// Failed to read a bundle file
    #[error("Failed to load resource file {path}: {source}")]
    ResourceLoadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A bundle file is not valid JSON
    #[error("Failed to parse message bundle {path}: {source}")]
    BundleParseError {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for i18n operations
pub type I18nResult<T> = Result<T, I18nError>;

impl I18nError {
    /// Locale the error refers to, when there is one
    pub fn locale(&self) -> Option<String> {
        match self {
            Self::UnsupportedLocale(tag) => Some(tag.clone()),
            Self::MissingBundle { locale } | Self::InvalidBundle { locale, .. } => {
                Some(locale.short_code().to_string())
            }
            Self::ResourceLoadError { .. } | Self::BundleParseError { .. } => None,
        }
    }
}

impl From<I18nError> for FolioError {
    fn from(err: I18nError) -> Self {
        let locale = err.locale();
        Self::localization_with_source(err.to_string(), locale, err)
    }
}

/// A locale-specific formatting primitive rejected its input or locale.
///
/// Recoverable: the formatter retries with the default locale and never
/// hands this to callers on its own.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatterFailure {
    /// No formatting data for the locale tag
    #[error("no formatting data for locale '{0}'")]
    UnsupportedLocale(String),

    /// Locale data for the tag could not be loaded
    #[error("no locale data for '{tag}': {reason}")]
    DataUnavailable { tag: String, reason: String },

    /// The timestamp could not be parsed
    #[error("invalid timestamp '{0}'")]
    InvalidTimestamp(String),

    /// Currency amounts must be finite
    #[error("cannot format non-finite amount {0}")]
    NonFiniteAmount(f64),
}

/// Formatting failed for the requested locale and again for the default
/// locale. This is a configuration error, not a per-request one.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    /// The default-locale retry failed
    #[error("formatting failed for '{requested}' and for default locale {default}: {cause}")]
    Fatal {
        /// Tag the caller asked for
        requested: String,
        /// Default locale used for the retry
        default: Locale,
        /// Why the requested locale failed
        requested_failure: FormatterFailure,
        /// Why the default locale failed
        #[source]
        cause: FormatterFailure,
    },
}

/// Result type for the public formatting API
pub type FormatResult<T> = Result<T, FormatError>;

impl From<FormatError> for FolioError {
    fn from(err: FormatError) -> Self {
        let FormatError::Fatal { default, .. } = &err;
        let locale = Some(default.short_code().to_string());
        Self::localization_with_source(err.to_string(), locale, err)
    }
}
