//! The site facade: configuration, message resolution, formatting and
//! routing wired together for rendering pages.

use crate::error::{SiteError, SiteResult};
use crate::leads::{LeadService, RestLeadStore};
use crate::routing::LocaleRouter;
use crate::sitemap::{Alternate, Sitemap};
use folio_config::SiteConfig;
use folio_i18n::{
    BundleLoader, FallbackIndicator, Locale, LocaleFormatter, MessageResolver, ResolvedMessages,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

/// Message key of the page title
const TITLE_KEY: &str = "meta.title";

/// Fallback state of a rendered page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackSummary {
    /// Whether any text is shown in the default locale
    pub has_fallback: bool,
    /// Number of keys shown in the default locale
    pub count: usize,
    /// Localized notice, absent when nothing fell back
    pub notice: Option<String>,
}

impl FallbackSummary {
    fn of(resolved: &ResolvedMessages) -> Self {
        let indicator = FallbackIndicator::from_resolved(resolved);
        Self {
            has_fallback: indicator.has_fallback(),
            count: indicator.count(),
            notice: indicator.notice(resolved),
        }
    }
}

/// Everything a template needs to render one page
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContext {
    /// Locale the page is rendered in
    pub locale: Locale,
    /// Locale-independent page path, e.g. `/projects`
    pub page: String,
    /// Absolute URL of this page
    pub canonical: String,
    /// Page title in the page's locale
    pub title: String,
    /// Resolved messages and their fallback keys
    pub messages: ResolvedMessages,
    /// Fallback indicator state
    pub fallback: FallbackSummary,
    /// The page in every locale
    pub alternates: Vec<Alternate>,
}

/// The localized site.
///
/// Built once at startup; every method takes `&self`, so it can be shared
/// behind an [`Arc`] between request handlers.
#[derive(Debug, Clone)]
pub struct Site {
    config: Arc<SiteConfig>,
    resolver: Arc<MessageResolver>,
    formatter: LocaleFormatter,
    router: LocaleRouter,
}

impl Site {
    /// Build the site from configuration, loading bundles from
    /// `i18n.messages_dir`
    pub fn from_config(config: SiteConfig) -> SiteResult<Self> {
        config.validate()?;

        let loader = BundleLoader::new(&config.i18n.messages_dir);
        let resolver = MessageResolver::from_loader(config.i18n.default_locale, &loader)?;
        Ok(Self::new(config, resolver))
    }

    /// Build the site from configuration and an already loaded resolver
    pub fn new(config: SiteConfig, resolver: MessageResolver) -> Self {
        let default_locale = resolver.default_locale();
        let formatter = LocaleFormatter::new(default_locale, &config.i18n.currency);
        info!(
            "Site '{}' ready at {} (default locale {}, {} pages)",
            config.site.name,
            config.site.base_url,
            default_locale,
            config.site.pages.len()
        );

        Self {
            config: Arc::new(config),
            resolver: Arc::new(resolver),
            formatter,
            router: LocaleRouter::new(default_locale),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Get the message resolver
    pub fn resolver(&self) -> &MessageResolver {
        &self.resolver
    }

    /// Get the formatter
    pub const fn formatter(&self) -> &LocaleFormatter {
        &self.formatter
    }

    /// Get the router
    pub const fn router(&self) -> &LocaleRouter {
        &self.router
    }

    fn base_url(&self) -> &str {
        self.config.site.base_url.trim_end_matches('/')
    }

    /// Build the context for a request path such as `/es/projects`
    pub fn page(&self, path: &str) -> SiteResult<PageContext> {
        let (locale, page) = self.router.split_path(path);
        self.page_for(locale, page)
    }

    /// Build the context for a page in a locale
    pub fn page_for(&self, locale: Locale, page: &str) -> SiteResult<PageContext> {
        let page = normalize_page(page);
        if !self.config.site.pages.iter().any(|p| normalize_page(p) == page) {
            debug!("Unknown page {} requested", page);
            return Err(SiteError::PageNotFound(page));
        }

        let messages = self.resolver.resolve(locale)?;
        let alternates = self
            .router
            .alternates(&page)
            .into_iter()
            .map(|(alt_locale, path)| Alternate {
                hreflang: alt_locale.code().to_string(),
                href: format!("{}{}", self.base_url(), path),
            })
            .collect();

        Ok(PageContext {
            locale,
            canonical: format!("{}{}", self.base_url(), self.router.localized_path(locale, &page)),
            title: messages.t(TITLE_KEY),
            fallback: FallbackSummary::of(&messages),
            messages,
            alternates,
            page,
        })
    }

    /// Sitemap over the configured pages
    pub fn sitemap(&self) -> Sitemap {
        Sitemap::new(
            &self.config.site.base_url,
            self.config.site.pages.iter().cloned(),
            self.router,
        )
    }

    /// Lead service backed by the configured REST backend
    pub fn lead_service(&self) -> SiteResult<LeadService<RestLeadStore>> {
        let store = RestLeadStore::from_config(&self.config.leads)?;
        Ok(LeadService::new(store))
    }
}

fn normalize_page(page: &str) -> String {
    let trimmed = page.trim_matches('/');
    format!("/{trimmed}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_i18n::MessageBundle;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn site() -> Site {
        let en = json!({
            "meta": { "title": "Portfolio" },
            "home": { "title": "Hello", "bio": "Engineer" },
            "fallback": { "notice": "{count} texts are in English" }
        });
        let es = json!({
            "meta": { "title": "Portafolio" },
            "home": { "title": "Hola", "bio": "Ingeniera" },
            "fallback": { "notice": "{count} textos están en inglés" }
        });
        let fr = json!({ "meta": { "title": "Portfolio" }, "home": { "title": "Bonjour" } });

        let bundles = vec![
            MessageBundle::from_value(Locale::English, &en).unwrap(),
            MessageBundle::from_value(Locale::Spanish, &es).unwrap(),
            MessageBundle::from_value(Locale::French, &fr).unwrap(),
            MessageBundle::from_value(Locale::German, &json!({})).unwrap(),
        ];
        let resolver = MessageResolver::new(Locale::English, bundles).unwrap();

        let mut config = SiteConfig::default();
        config.site.base_url = "https://ada.example/".to_string();
        Site::new(config, resolver)
    }

    #[test]
    fn test_page_in_complete_locale() {
        let page = site().page("/es").unwrap();
        assert_eq!(page.locale, Locale::Spanish);
        assert_eq!(page.page, "/");
        assert_eq!(page.canonical, "https://ada.example/es");
        assert_eq!(page.title, "Portafolio");
        assert!(!page.fallback.has_fallback);
        assert_eq!(page.fallback.notice, None);
    }

    #[test]
    fn test_page_with_fallback() {
        let page = site().page("/fr/projects").unwrap();
        assert_eq!(page.messages.t("home.bio"), "Engineer");
        assert!(page.fallback.has_fallback);
        assert_eq!(page.fallback.count, 2);
        assert_eq!(page.fallback.notice.as_deref(), Some("2 texts are in English"));
        assert_eq!(page.alternates.len(), Locale::all().len());
        assert!(page
            .alternates
            .iter()
            .any(|a| a.hreflang == "de-DE" && a.href == "https://ada.example/de/projects"));
    }

    #[test]
    fn test_unprefixed_path_uses_default_locale() {
        let page = site().page("/about/").unwrap();
        assert_eq!(page.locale, Locale::English);
        assert_eq!(page.page, "/about");
        assert!(page.messages.fallback_keys().is_empty());
    }

    #[test]
    fn test_unknown_page() {
        let err = site().page("/es/blog").unwrap_err();
        assert!(matches!(err, SiteError::PageNotFound(ref p) if p == "/blog"));
    }

    #[test]
    fn test_page_context_serializes_camel_case() {
        let value = serde_json::to_value(site().page("/de/contact").unwrap()).unwrap();
        assert_eq!(value["locale"], "de");
        assert_eq!(value["fallback"]["hasFallback"], true);
        assert!(value["messages"]["fallbackKeys"].is_array());
    }

    #[test]
    fn test_lead_service_disabled_without_endpoint() {
        assert!(matches!(
            site().lead_service().unwrap_err(),
            SiteError::Lead(crate::leads::LeadError::Disabled)
        ));
    }

    #[test]
    fn test_sitemap_uses_configured_pages() {
        let site = site();
        assert_eq!(
            site.sitemap().entries().len(),
            site.config().site.pages.len() * Locale::all().len()
        );
    }
}
