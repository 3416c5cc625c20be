//! Locale-aware date, number and currency formatting
//!
//! The `try_format_*` functions are the raw primitives: they fail with a
//! [`FormatterFailure`] when the locale tag has no formatting data or the
//! input is malformed. [`LocaleFormatter`] wraps them in the fallback policy:
//! a failure for the requested tag is retried with the default locale, and
//! only a failure of that retry reaches the caller, as [`FormatError`].

use crate::error::{FormatError, FormatResult, FormatterFailure};
use crate::Locale;
use chrono::{DateTime, NaiveDate, Utc};
use fixed_decimal::{Decimal, FloatPrecision};
use icu::decimal::{
    options::{DecimalFormatterOptions, GroupingStrategy},
    DecimalFormatter,
};
use tracing::warn;
use unic_langid::LanguageIdentifier;

/// Maximum fraction digits for plain numbers
const MAX_FRACTION_DIGITS: i16 = 3;

/// Default ISO 4217 currency for amounts
pub const DEFAULT_CURRENCY: &str = "EUR";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SymbolPosition {
    /// `€1,999.99`
    Prefix,
    /// `1999,99 €`
    Suffix,
}

/// A locale tag accepted for formatting: the supported locale its language
/// maps to, and the full tag as an ICU locale so regional data applies.
struct FormatLocale {
    locale: Locale,
    icu: icu::locale::Locale,
}

impl FormatLocale {
    fn parse(tag: &str) -> Result<Self, FormatterFailure> {
        let unsupported = || FormatterFailure::UnsupportedLocale(tag.to_string());
        let langid: LanguageIdentifier = tag.trim().parse().map_err(|_| unsupported())?;
        let locale = Locale::from_language(langid.language.as_str()).ok_or_else(unsupported)?;
        let icu_locale: icu::locale::Locale =
            langid.to_string().parse().map_err(|_| unsupported())?;
        Ok(Self {
            locale,
            icu: icu_locale,
        })
    }

    const fn date_style(&self) -> (&'static str, chrono::Locale) {
        match self.locale {
            Locale::English => ("%B %-d, %Y", chrono::Locale::en_US),
            Locale::Spanish => ("%-d de %B de %Y", chrono::Locale::es_ES),
            Locale::French => ("%-d %B %Y", chrono::Locale::fr_FR),
            Locale::German => ("%-d. %B %Y", chrono::Locale::de_DE),
        }
    }

    const fn symbol_position(&self) -> SymbolPosition {
        match self.locale {
            Locale::English => SymbolPosition::Prefix,
            Locale::Spanish | Locale::French | Locale::German => SymbolPosition::Suffix,
        }
    }

    /// ICU decimal formatter with the locale's own minimum-grouping rule
    fn decimal_formatter(&self, tag: &str) -> Result<DecimalFormatter, FormatterFailure> {
        let mut options = DecimalFormatterOptions::default();
        options.grouping_strategy = Some(GroupingStrategy::Auto);
        DecimalFormatter::try_new(self.icu.clone().into(), options).map_err(|e| {
            FormatterFailure::DataUnavailable {
                tag: tag.to_string(),
                reason: e.to_string(),
            }
        })
    }
}

/// Whether `tag` names `locale`'s language
pub(crate) fn tag_language_is(tag: &str, locale: Locale) -> bool {
    FormatLocale::parse(tag).is_ok_and(|parsed| parsed.locale == locale)
}

fn parse_timestamp(iso: &str) -> Result<DateTime<Utc>, FormatterFailure> {
    let trimmed = iso.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| FormatterFailure::InvalidTimestamp(iso.to_string()))
}

/// Format an ISO-8601 timestamp (or bare `YYYY-MM-DD` date) as a long date
/// with month names in the locale's language, rendered in UTC.
pub fn try_format_date(tag: &str, iso_timestamp: &str) -> Result<String, FormatterFailure> {
    let (pattern, date_locale) = FormatLocale::parse(tag)?.date_style();
    let timestamp = parse_timestamp(iso_timestamp)?;
    Ok(timestamp.format_localized(pattern, date_locale).to_string())
}

/// Format a number with the locale's separators and up to three fraction
/// digits, trailing zeros trimmed.
pub fn try_format_number(tag: &str, value: f64) -> Result<String, FormatterFailure> {
    let locale = FormatLocale::parse(tag)?;
    if value.is_nan() {
        return Ok("NaN".to_string());
    }
    if value.is_infinite() {
        return Ok(if value < 0.0 { "-∞" } else { "∞" }.to_string());
    }

    let formatter = locale.decimal_formatter(tag)?;
    render_decimal(&formatter, value, 0, MAX_FRACTION_DIGITS)
}

/// Format a currency amount with the ISO code's symbol (or the code itself
/// when it has none) placed per locale convention.
pub fn try_format_currency(
    tag: &str,
    value: f64,
    currency: &str,
) -> Result<String, FormatterFailure> {
    let locale = FormatLocale::parse(tag)?;
    if !value.is_finite() {
        return Err(FormatterFailure::NonFiniteAmount(value));
    }

    let digits = currency_digits(currency);
    let formatter = locale.decimal_formatter(tag)?;
    let amount = render_decimal(&formatter, value.abs(), digits, digits)?;
    let symbol = currency_symbol(currency).unwrap_or(currency);
    let sign = if value < 0.0 && has_nonzero_digit(&amount) {
        "-"
    } else {
        ""
    };

    Ok(match locale.symbol_position() {
        SymbolPosition::Prefix if symbol.chars().all(char::is_alphabetic) => {
            format!("{sign}{symbol}\u{a0}{amount}")
        }
        SymbolPosition::Prefix => format!("{sign}{symbol}{amount}"),
        SymbolPosition::Suffix => format!("{sign}{amount}\u{a0}{symbol}"),
    })
}

fn currency_symbol(code: &str) -> Option<&'static str> {
    match code {
        "EUR" => Some("€"),
        "USD" => Some("$"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        _ => None,
    }
}

fn currency_digits(code: &str) -> i16 {
    match code {
        "JPY" | "KRW" | "CLP" => 0,
        _ => 2,
    }
}

fn has_nonzero_digit(formatted: &str) -> bool {
    formatted.chars().any(|c| c.is_ascii_digit() && c != '0')
}

/// Render a finite value through ICU with between `min_fraction` and
/// `max_fraction` fraction digits. The sign is rendered as ASCII `-` and
/// dropped when the value rounds to zero.
fn render_decimal(
    formatter: &DecimalFormatter,
    value: f64,
    min_fraction: i16,
    max_fraction: i16,
) -> Result<String, FormatterFailure> {
    let mut decimal = Decimal::try_from_f64(value.abs(), FloatPrecision::RoundTrip)
        .map_err(|_| FormatterFailure::NonFiniteAmount(value))?;

    if *decimal.magnitude_range().start() < -max_fraction {
        decimal.round(-max_fraction);
    }
    decimal.trim_end();
    decimal.pad_end(-min_fraction);

    let digits = formatter.format(&decimal).to_string();
    if value < 0.0 && has_nonzero_digit(&digits) {
        Ok(format!("-{digits}"))
    } else {
        Ok(digits)
    }
}

/// Formats values for a locale tag, retrying with the default locale when
/// the tag's formatter fails.
#[derive(Debug, Clone)]
pub struct LocaleFormatter {
    default_locale: Locale,
    currency: String,
}

impl LocaleFormatter {
    /// Create a formatter with a default locale and ISO 4217 currency code
    pub fn new(default_locale: Locale, currency: impl Into<String>) -> Self {
        Self {
            default_locale,
            currency: currency.into().to_ascii_uppercase(),
        }
    }

    /// Get the default locale
    pub const fn default_locale(&self) -> Locale {
        self.default_locale
    }

    /// Currency used by [`Self::format_currency`]
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Run `op` for `tag`; on failure retry once with the default locale.
    ///
    /// The requested failure is logged and swallowed. A failing retry means
    /// the default locale itself cannot format, which is reported as
    /// [`FormatError::Fatal`]. A tag in the default locale's language is not
    /// retried: its failure is already the default locale's.
    pub fn with_fallback<F>(&self, tag: &str, op: F) -> FormatResult<String>
    where
        F: Fn(&str) -> Result<String, FormatterFailure>,
    {
        let requested_failure = match op(tag) {
            Ok(formatted) => return Ok(formatted),
            Err(failure) => failure,
        };

        if tag_language_is(tag, self.default_locale) {
            return Err(FormatError::Fatal {
                requested: tag.to_string(),
                default: self.default_locale,
                cause: requested_failure.clone(),
                requested_failure,
            });
        }

        let default_tag = self.default_locale.code();
        warn!(
            "Formatting failed for locale '{}' ({}), retrying with default locale {}",
            tag, requested_failure, self.default_locale
        );

        op(default_tag).map_err(|cause| FormatError::Fatal {
            requested: tag.to_string(),
            default: self.default_locale,
            requested_failure,
            cause,
        })
    }

    /// Format a timestamp as a long localized date
    pub fn format_date(&self, tag: &str, iso_timestamp: &str) -> FormatResult<String> {
        self.with_fallback(tag, |t| try_format_date(t, iso_timestamp))
    }

    /// Format a number with locale separators
    pub fn format_number(&self, tag: &str, value: f64) -> FormatResult<String> {
        self.with_fallback(tag, |t| try_format_number(t, value))
    }

    /// Format an amount in the configured currency
    pub fn format_currency(&self, tag: &str, value: f64) -> FormatResult<String> {
        self.with_fallback(tag, |t| try_format_currency(t, value, &self.currency))
    }
}

impl Default for LocaleFormatter {
    fn default() -> Self {
        Self::new(Locale::default(), DEFAULT_CURRENCY)
    }
}
