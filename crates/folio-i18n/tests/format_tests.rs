//! Integration tests for locale-aware formatting

use folio_common::test_utils::mock_timestamp;
use folio_i18n::{FormatError, FormatterFailure, Locale, LocaleFormatter};

fn formatter() -> LocaleFormatter {
    LocaleFormatter::new(Locale::English, "EUR")
}

#[test]
fn test_spanish_number_uses_comma_decimal() {
    assert_eq!(formatter().format_number("es", 1234.56).unwrap(), "1234,56");
}

#[test]
fn test_french_date_contains_month_name() {
    let formatted = formatter()
        .format_date("fr", "2024-07-01T00:00:00.000Z")
        .unwrap();
    assert!(formatted.to_lowercase().contains("juillet"), "{formatted}");
}

#[test]
fn test_english_currency_contains_symbol_or_code() {
    let formatted = formatter().format_currency("en", 1999.99).unwrap();
    assert!(
        formatted.contains('€') || formatted.contains("EUR"),
        "{formatted}"
    );
}

#[test]
fn test_rfc3339_timestamp_formats_per_locale() {
    let published = mock_timestamp(2024, 12, 25, 9, 0, 0).to_rfc3339();
    let formatter = formatter();
    assert_eq!(formatter.format_date("en", &published).unwrap(), "December 25, 2024");
    assert_eq!(formatter.format_date("de", &published).unwrap(), "25. Dezember 2024");
}

#[test]
fn test_regional_tags_use_regional_number_data() {
    let formatter = formatter();
    assert_eq!(formatter.format_number("en-GB", 1234.5).unwrap(), "1,234.5");
    assert_eq!(formatter.format_number("es-MX", 0.25).unwrap(), "0.25");
    assert_eq!(formatter.format_number("es-ES", 0.25).unwrap(), "0,25");
}

#[test]
fn test_default_language_failure_is_fatal_without_retry() {
    let err = formatter()
        .format_date("en-GB", "not a date")
        .unwrap_err();
    let FormatError::Fatal {
        requested_failure,
        cause,
        ..
    } = err;
    assert_eq!(requested_failure, cause);
}

#[test]
fn test_with_fallback_returns_default_result() {
    let result = formatter().with_fallback("fr", |tag| {
        if tag.starts_with("fr") {
            Err(FormatterFailure::UnsupportedLocale(tag.to_string()))
        } else {
            Ok(format!("formatted in {tag}"))
        }
    });
    assert_eq!(result.unwrap(), "formatted in en-US");
}

#[test]
fn test_unknown_locale_formats_like_default() {
    let formatter = formatter();
    assert_eq!(
        formatter.format_number("pt-BR", 1234.56).unwrap(),
        formatter.format_number("en", 1234.56).unwrap()
    );
    assert_eq!(
        formatter
            .format_date("zz", "2024-07-01T00:00:00Z")
            .unwrap(),
        "July 1, 2024"
    );
}

#[test]
fn test_invalid_timestamp_is_fatal() {
    let err = formatter().format_date("es", "31/12/2024").unwrap_err();
    assert!(matches!(
        err,
        FormatError::Fatal {
            default: Locale::English,
            cause: FormatterFailure::InvalidTimestamp(_),
            ..
        }
    ));
}

#[test]
fn test_every_supported_locale_formats() {
    let formatter = formatter();
    for locale in Locale::all() {
        assert!(formatter.format_number(locale.code(), 1.5).is_ok());
        assert!(formatter.format_currency(locale.short_code(), 10.0).is_ok());
        assert!(formatter
            .format_date(locale.code(), "2024-01-15T12:00:00Z")
            .is_ok());
    }
}
