//! Checks the shipped message bundles in the workspace `messages/` directory

use folio_i18n::{BundleLoader, FallbackIndicator, Locale, MessageResolver};
use std::path::PathBuf;

fn messages_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../messages")
}

fn shipped_resolver() -> MessageResolver {
    MessageResolver::from_loader(Locale::English, &BundleLoader::new(messages_dir()))
        .expect("shipped bundles should load")
}

#[test]
fn test_all_shipped_bundles_load() {
    let bundles = BundleLoader::new(messages_dir()).load_all().unwrap();
    assert_eq!(bundles.len(), Locale::all().len());
}

#[test]
fn test_core_keys_resolve_in_every_locale() {
    let resolver = shipped_resolver();
    let keys = [
        "meta.title",
        "nav.home",
        "nav.contact",
        "home.title",
        "home.bio",
        "contact.form.submit",
        "footer.rights",
        "fallback.badge",
        "fallback.notice",
    ];

    for locale in Locale::all() {
        let resolved = resolver.resolve(locale).unwrap();
        for key in keys {
            let text = resolved.get(key);
            assert!(
                text.is_some_and(|t| !t.is_empty()),
                "'{key}' empty for {locale}"
            );
        }
    }
}

#[test]
fn test_spanish_is_complete() {
    let coverage = shipped_resolver().coverage(Locale::Spanish).unwrap();
    assert!(coverage.is_complete(), "{coverage:?}");
}

#[test]
fn test_french_notice_reports_untranslated_bio() {
    let resolver = shipped_resolver();
    let resolved = resolver.resolve(Locale::French).unwrap();
    let indicator = FallbackIndicator::from_resolved(&resolved);

    assert!(resolved.is_fallback("home.bio"));
    assert!(indicator.has_fallback());
    let notice = indicator.notice(&resolved).unwrap();
    assert!(notice.starts_with(&indicator.count().to_string()), "{notice}");
    assert!(notice.contains("anglais"));
}

#[test]
fn test_placeholders_render() {
    let resolved = shipped_resolver().resolve(Locale::German).unwrap();
    assert_eq!(
        resolved.t_with("home.greeting", &[("name", "Ada")]),
        "Hallo, ich bin Ada"
    );
}
