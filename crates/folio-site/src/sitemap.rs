//! Sitemap generation for every page in every locale

use crate::routing::LocaleRouter;
use chrono::NaiveDate;
use folio_i18n::Locale;
use serde::Serialize;
use std::fmt::Write as _;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";

/// An alternate-language link of a sitemap entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alternate {
    /// `hreflang` value (`en-US`, or `x-default`)
    pub hreflang: String,
    /// Absolute URL
    pub href: String,
}

/// One `<url>` of the sitemap
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SitemapEntry {
    /// Absolute URL of the page
    pub loc: String,
    /// Locale of the page
    pub locale: Locale,
    /// The same page in every locale, plus `x-default`
    pub alternates: Vec<Alternate>,
}

/// Sitemap over a fixed list of locale-independent page paths
#[derive(Debug, Clone)]
pub struct Sitemap {
    base_url: String,
    pages: Vec<String>,
    router: LocaleRouter,
    lastmod: Option<NaiveDate>,
}

impl Sitemap {
    /// Create a sitemap; trailing slashes on `base_url` are ignored
    pub fn new<I, S>(base_url: &str, pages: I, router: LocaleRouter) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            pages: pages.into_iter().map(Into::into).collect(),
            router,
            lastmod: None,
        }
    }

    /// Stamp every entry with a last-modified date
    #[must_use]
    pub fn with_lastmod(mut self, date: NaiveDate) -> Self {
        self.lastmod = Some(date);
        self
    }

    fn absolute(&self, locale: Locale, page: &str) -> String {
        format!("{}{}", self.base_url, self.router.localized_path(locale, page))
    }

    /// One entry per page × locale, pages in configured order
    pub fn entries(&self) -> Vec<SitemapEntry> {
        let mut entries = Vec::with_capacity(self.pages.len() * Locale::all().len());

        for page in &self.pages {
            let mut alternates: Vec<Alternate> = Locale::all()
                .into_iter()
                .map(|locale| Alternate {
                    hreflang: locale.code().to_string(),
                    href: self.absolute(locale, page),
                })
                .collect();
            alternates.push(Alternate {
                hreflang: "x-default".to_string(),
                href: self.absolute(self.router.default_locale(), page),
            });

            for locale in Locale::all() {
                entries.push(SitemapEntry {
                    loc: self.absolute(locale, page),
                    locale,
                    alternates: alternates.clone(),
                });
            }
        }

        entries
    }

    /// Render the sitemaps.org XML document
    pub fn to_xml(&self) -> String {
        let mut xml = String::new();
        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        let _ = writeln!(xml, "<urlset xmlns=\"{SITEMAP_NS}\" xmlns:xhtml=\"{XHTML_NS}\">");

        for entry in self.entries() {
            xml.push_str("  <url>\n");
            let _ = writeln!(xml, "    <loc>{}</loc>", escape_xml(&entry.loc));
            if let Some(date) = self.lastmod {
                let _ = writeln!(xml, "    <lastmod>{}</lastmod>", date.format("%Y-%m-%d"));
            }
            for alternate in &entry.alternates {
                let _ = writeln!(
                    xml,
                    "    <xhtml:link rel=\"alternate\" hreflang=\"{}\" href=\"{}\"/>",
                    alternate.hreflang,
                    escape_xml(&alternate.href)
                );
            }
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }
}

fn escape_xml(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sitemap() -> Sitemap {
        Sitemap::new(
            "https://ada.example/",
            ["/", "/projects"],
            LocaleRouter::new(Locale::English),
        )
    }

    #[test]
    fn test_entry_per_page_and_locale() {
        let entries = sitemap().entries();
        assert_eq!(entries.len(), 2 * Locale::all().len());
        assert_eq!(entries[0].loc, "https://ada.example/en");
        assert_eq!(entries[1].loc, "https://ada.example/es");
        assert_eq!(entries[4].loc, "https://ada.example/en/projects");
    }

    #[test]
    fn test_alternates_include_x_default() {
        let entry = &sitemap().entries()[5];
        assert_eq!(entry.locale, Locale::Spanish);
        let x_default = entry.alternates.last().unwrap();
        assert_eq!(x_default.hreflang, "x-default");
        assert_eq!(x_default.href, "https://ada.example/en/projects");
        assert!(entry
            .alternates
            .iter()
            .any(|a| a.hreflang == "fr-FR" && a.href == "https://ada.example/fr/projects"));
    }

    #[test]
    fn test_xml_output() {
        let xml = sitemap()
            .with_lastmod(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap())
            .to_xml();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset"));
        assert_eq!(xml.matches("<url>").count(), 8);
        assert!(xml.contains("<loc>https://ada.example/de/projects</loc>"));
        assert!(xml.contains("<lastmod>2024-07-01</lastmod>"));
        assert!(xml.contains("hreflang=\"x-default\" href=\"https://ada.example/en\""));
        assert!(xml.trim_end().ends_with("</urlset>"));
    }

    #[test]
    fn test_escapes_urls() {
        let xml = Sitemap::new("https://a.example", ["/q?a=1&b=2"], LocaleRouter::default()).to_xml();
        assert!(xml.contains("/en/q?a=1&amp;b=2"));
        assert!(!xml.contains("&b="));
    }
}
