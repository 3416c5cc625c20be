//! Mapping between URL paths and locales
//!
//! Every public URL carries its locale as the first path segment
//! (`/es/projects`). Paths without a recognised prefix belong to the
//! default locale.

use folio_i18n::Locale;
use tracing::trace;

/// Splits and builds locale-prefixed paths
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleRouter {
    default_locale: Locale,
}

impl LocaleRouter {
    /// Create a router for the given default locale
    pub const fn new(default_locale: Locale) -> Self {
        Self { default_locale }
    }

    /// Get the default locale
    pub const fn default_locale(&self) -> Locale {
        self.default_locale
    }

    /// Split a request path into its locale and the locale-independent rest.
    ///
    /// `/es/projects` gives `(Spanish, "/projects")`, `/es` gives
    /// `(Spanish, "/")`, and `/projects` gives `(default, "/projects")`.
    pub fn split_path<'a>(&self, path: &'a str) -> (Locale, &'a str) {
        let trimmed = path.strip_prefix('/').unwrap_or(path);
        let (segment, rest) = match trimmed.find('/') {
            Some(idx) => (&trimmed[..idx], &trimmed[idx..]),
            None => (trimmed, "/"),
        };

        match Locale::from_code(segment) {
            Ok(locale) if !segment.is_empty() => {
                trace!("Routed {} to locale {}", path, locale);
                (locale, rest)
            }
            _ => (self.default_locale, if path.is_empty() { "/" } else { path }),
        }
    }

    /// Build the public path of a page for a locale
    pub fn localized_path(&self, locale: Locale, page: &str) -> String {
        let page = page.trim_start_matches('/');
        if page.is_empty() {
            format!("/{}", locale.short_code())
        } else {
            format!("/{}/{}", locale.short_code(), page)
        }
    }

    /// Public paths of a page in every supported locale
    pub fn alternates(&self, page: &str) -> Vec<(Locale, String)> {
        Locale::all()
            .into_iter()
            .map(|locale| (locale, self.localized_path(locale, page)))
            .collect()
    }

    /// Pick the best supported locale from an `Accept-Language` header.
    ///
    /// Entries are tried by descending quality; an exact tag match wins
    /// over a language-only match within the same entry. Falls back to the
    /// default locale.
    pub fn negotiate(&self, accept_language: &str) -> Locale {
        let mut ranges: Vec<(&str, f32)> = accept_language
            .split(',')
            .filter_map(parse_language_range)
            .filter(|(_, quality)| *quality > 0.0)
            .collect();
        ranges.sort_by(|a, b| b.1.total_cmp(&a.1));

        ranges
            .into_iter()
            .filter(|(tag, _)| *tag != "*")
            .find_map(|(tag, _)| {
                Locale::from_code(tag).ok().or_else(|| {
                    let language = tag.split(['-', '_']).next().unwrap_or(tag);
                    Locale::from_language(language)
                })
            })
            .unwrap_or(self.default_locale)
    }
}

fn parse_language_range(entry: &str) -> Option<(&str, f32)> {
    let mut parts = entry.split(';').map(str::trim);
    let tag = parts.next().filter(|tag| !tag.is_empty())?;

    let mut quality = 1.0;
    for param in parts {
        if let Some(value) = param.strip_prefix("q=") {
            quality = value.trim().parse().ok()?;
        }
    }
    Some((tag, quality))
}

impl Default for LocaleRouter {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}
