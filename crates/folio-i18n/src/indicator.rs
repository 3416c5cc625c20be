//! Derivation of the "auto-fallback" notice shown next to partially
//! translated pages

use crate::resolver::{FallbackKeys, ResolvedMessages};
use serde::Serialize;

/// Message key of the localized notice text. The text may use a `{count}`
/// placeholder.
pub const NOTICE_KEY: &str = "fallback.notice";

/// Read-only view over a resolved tree's fallback metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackIndicator<'a> {
    has_fallback: bool,
    count: usize,
    #[serde(skip)]
    keys: &'a FallbackKeys,
}

impl<'a> FallbackIndicator<'a> {
    /// Build from fallback metadata
    pub fn from_keys(keys: &'a FallbackKeys) -> Self {
        Self {
            has_fallback: !keys.is_empty(),
            count: keys.len(),
            keys,
        }
    }

    /// Build from a resolved tree
    pub fn from_resolved(resolved: &'a ResolvedMessages) -> Self {
        Self::from_keys(resolved.fallback_keys())
    }

    /// Whether any key was filled from the default locale
    pub const fn has_fallback(&self) -> bool {
        self.has_fallback
    }

    /// Number of keys filled from the default locale
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Human-readable count, e.g. `"1 key"` or `"12 keys"`
    pub fn label(&self) -> String {
        match self.count {
            1 => "1 key".to_string(),
            n => format!("{n} keys"),
        }
    }

    /// The fallback keys themselves
    pub const fn keys(&self) -> &'a FallbackKeys {
        self.keys
    }

    /// Localized notice text, or `None` when the notice should stay hidden.
    ///
    /// Uses [`NOTICE_KEY`] from `messages`, falling back to the English label
    /// when the key is absent.
    pub fn notice(&self, messages: &ResolvedMessages) -> Option<String> {
        if !self.has_fallback {
            return None;
        }
        let count = self.count.to_string();
        Some(match messages.get(NOTICE_KEY) {
            Some(_) => messages.t_with(NOTICE_KEY, &[("count", &count)]),
            None => format!("Auto-fallback: {} shown in the default language", self.label()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Locale, MessageBundle, MessageResolver};
    use serde_json::json;

    fn resolver(with_notice: bool) -> MessageResolver {
        let mut en = json!({ "home": { "title": "Hello", "bio": "Bio" } });
        if with_notice {
            en["fallback"] = json!({ "notice": "{count} texts are not translated yet" });
        }
        let bundles = Locale::all().into_iter().map(|locale| {
            let value = if locale == Locale::English {
                en.clone()
            } else {
                json!({ "home": { "title": "Titre" } })
            };
            MessageBundle::from_value(locale, &value).unwrap()
        });
        MessageResolver::new(Locale::English, bundles).unwrap()
    }

    #[test]
    fn test_hidden_without_fallback() {
        let resolved = resolver(true).resolve(Locale::English).unwrap();
        let indicator = FallbackIndicator::from_resolved(&resolved);
        assert!(!indicator.has_fallback());
        assert_eq!(indicator.count(), 0);
        assert_eq!(indicator.label(), "0 keys");
        assert_eq!(indicator.notice(&resolved), None);
    }

    #[test]
    fn test_counts_fallback_keys() {
        let resolved = resolver(false).resolve(Locale::French).unwrap();
        let indicator = FallbackIndicator::from_resolved(&resolved);
        assert!(indicator.has_fallback());
        assert_eq!(indicator.count(), 1);
        assert_eq!(indicator.label(), "1 key");
        assert_eq!(indicator.keys().as_slice(), &["home.bio"]);
        assert_eq!(
            indicator.notice(&resolved).unwrap(),
            "Auto-fallback: 1 key shown in the default language"
        );
    }

    #[test]
    fn test_localized_notice() {
        let resolved = resolver(true).resolve(Locale::German).unwrap();
        let indicator = FallbackIndicator::from_resolved(&resolved);
        // The notice key itself is untranslated, so it counts too.
        assert_eq!(indicator.count(), 2);
        assert_eq!(
            indicator.notice(&resolved).unwrap(),
            "2 texts are not translated yet"
        );
    }

    #[test]
    fn test_serializes_flags() {
        let keys = FallbackKeys::new();
        let value = serde_json::to_value(FallbackIndicator::from_keys(&keys)).unwrap();
        assert_eq!(value, json!({ "hasFallback": false, "count": 0 }));
    }
}
