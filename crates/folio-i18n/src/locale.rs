//! Locale management and utilities

use crate::error::{I18nError, I18nResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use unic_langid::LanguageIdentifier;

/// Supported locales
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
)]
pub enum Locale {
    #[default]
    #[serde(rename = "en", alias = "en-US")]
    English,
    #[serde(rename = "es", alias = "es-ES")]
    Spanish,
    #[serde(rename = "fr", alias = "fr-FR")]
    French,
    #[serde(rename = "de", alias = "de-DE")]
    German,
}

impl Locale {
    /// Get the region-qualified language tag for this locale
    pub const fn code(&self) -> &'static str {
        match self {
            Self::English => "en-US",
            Self::Spanish => "es-ES",
            Self::French => "fr-FR",
            Self::German => "de-DE",
        }
    }

    /// Get the short language code for this locale, as used in URLs
    pub const fn short_code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Spanish => "es",
            Self::French => "fr",
            Self::German => "de",
        }
    }

    const fn region(&self) -> &'static str {
        match self {
            Self::English => "US",
            Self::Spanish => "ES",
            Self::French => "FR",
            Self::German => "DE",
        }
    }

    /// Parse a locale from a language tag.
    ///
    /// Accepts the short code (`es`) or the region-qualified tag in either
    /// separator style (`es-ES`, `es_ES`), case-insensitively. A tag whose
    /// region differs from the supported one (`es-MX`) is rejected.
    pub fn from_code(code: &str) -> I18nResult<Self> {
        let unsupported = || I18nError::UnsupportedLocale(code.to_string());
        let langid: LanguageIdentifier = code.trim().parse().map_err(|_| unsupported())?;

        let locale = Self::from_language(langid.language.as_str()).ok_or_else(unsupported)?;
        match langid.region {
            Some(region) if !region.as_str().eq_ignore_ascii_case(locale.region()) => {
                Err(unsupported())
            }
            _ => Ok(locale),
        }
    }

    /// Match on the language subtag alone, ignoring region and script
    pub fn from_language(language: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|locale| locale.short_code().eq_ignore_ascii_case(language))
    }

    /// Convert to a `unic_langid` identifier
    pub fn to_language_identifier(&self) -> LanguageIdentifier {
        // The tags above are all well-formed BCP 47.
        self.code().parse().unwrap_or_default()
    }

    /// Get all supported locales
    pub fn all() -> Vec<Self> {
        vec![Self::English, Self::Spanish, Self::French, Self::German]
    }

    /// Get the display name for this locale, in its own language
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Spanish => "Español",
            Self::French => "Français",
            Self::German => "Deutsch",
        }
    }

    /// Get the bundle file name for this locale
    pub fn resource_file(&self) -> String {
        format!("{}.json", self.short_code())
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_code())
    }
}

impl FromStr for Locale {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_and_full_codes() {
        assert_eq!(Locale::from_code("es").unwrap(), Locale::Spanish);
        assert_eq!(Locale::from_code("fr-FR").unwrap(), Locale::French);
        assert_eq!(Locale::from_code("de_DE").unwrap(), Locale::German);
        assert_eq!(Locale::from_code("EN-us").unwrap(), Locale::English);
    }

    #[test]
    fn test_rejects_unsupported() {
        assert!(matches!(
            Locale::from_code("it"),
            Err(I18nError::UnsupportedLocale(tag)) if tag == "it"
        ));
        assert!(Locale::from_code("es-MX").is_err());
        assert!(Locale::from_code("").is_err());
        assert!(Locale::from_code("not a tag").is_err());
    }

    #[test]
    fn test_roundtrip_codes() {
        for locale in Locale::all() {
            assert_eq!(Locale::from_code(locale.code()).unwrap(), locale);
            assert_eq!(Locale::from_code(locale.short_code()).unwrap(), locale);
            assert_eq!(locale.to_language_identifier().to_string(), locale.code());
        }
    }

    #[test]
    fn test_serde_uses_short_code() {
        assert_eq!(serde_json::to_string(&Locale::French).unwrap(), "\"fr\"");
        let parsed: Locale = serde_json::from_str("\"es-ES\"").unwrap();
        assert_eq!(parsed, Locale::Spanish);
    }

    #[test]
    fn test_resource_file() {
        assert_eq!(Locale::German.resource_file(), "de.json");
        assert_eq!(Locale::default(), Locale::English);
    }
}
