//! Merging a requested locale's bundle with the default locale's bundle
//!
//! The default bundle defines the canonical key set. Resolution walks it
//! depth-first and, for each leaf, takes the requested locale's string when
//! it exists and is non-empty. Every other leaf is filled from the default
//! bundle and its dotted path is recorded in [`FallbackKeys`].

use crate::bundle::{join_path, MessageBundle, MessageNode, MessageTree};
use crate::error::{I18nError, I18nResult};
use crate::resource::BundleLoader;
use crate::Locale;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info};

/// Dotted key paths that were filled from the default locale.
///
/// Ordered by first encounter during traversal; each path appears once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FallbackKeys(Vec<String>);

impl FallbackKeys {
    /// Create an empty set
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Record a path; returns `false` if it was already present
    pub fn insert(&mut self, path: String) -> bool {
        if self.0.contains(&path) {
            return false;
        }
        self.0.push(path);
        true
    }

    /// Whether a path was filled from the default locale
    pub fn contains(&self, path: &str) -> bool {
        self.0.iter().any(|key| key == path)
    }

    /// Number of fallback keys
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no key was filled from the default locale
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate in first-encountered order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Paths as a slice
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a FallbackKeys {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A resolved message tree for one locale, with its fallback metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedMessages {
    locale: Locale,
    messages: MessageTree,
    fallback_keys: FallbackKeys,
}

impl ResolvedMessages {
    /// Locale that was requested
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// The merged tree
    pub const fn tree(&self) -> &MessageTree {
        &self.messages
    }

    /// Keys that came from the default locale
    pub const fn fallback_keys(&self) -> &FallbackKeys {
        &self.fallback_keys
    }

    /// Whether a key's value came from the default locale
    pub fn is_fallback(&self, key: &str) -> bool {
        self.fallback_keys.contains(key)
    }

    /// Look up a string by dotted path
    pub fn get(&self, key: &str) -> Option<&str> {
        self.messages.text(key)
    }

    /// Translate a key. Unknown keys render as the key itself.
    pub fn t(&self, key: &str) -> String {
        self.get(key).map_or_else(
            || {
                debug!("Unknown message key '{}' for locale {}", key, self.locale);
                key.to_string()
            },
            str::to_string,
        )
    }

    /// Translate a key and substitute `{name}` placeholders.
    ///
    /// `{{` and `}}` produce literal braces; placeholders without a matching
    /// argument are left as written.
    pub fn t_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        interpolate(&self.t(key), args)
    }

    /// Split into the tree and the fallback metadata
    pub fn into_parts(self) -> (MessageTree, FallbackKeys) {
        (self.messages, self.fallback_keys)
    }
}

fn interpolate(template: &str, args: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find(['{', '}']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if tail.starts_with("{{") || tail.starts_with("}}") {
            out.push_str(&tail[..1]);
            rest = &tail[2..];
            continue;
        }

        if tail.starts_with('{') {
            if let Some(end) = tail.find('}') {
                let name = &tail[1..end];
                match args.iter().find(|(arg, _)| *arg == name) {
                    Some((_, value)) => out.push_str(value),
                    None => out.push_str(&tail[..=end]),
                }
                rest = &tail[end + 1..];
                continue;
            }
        }

        out.push_str(&tail[..1]);
        rest = &tail[1..];
    }

    out.push_str(rest);
    out
}

/// Translation coverage of one locale against the default bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Coverage {
    /// Locale measured
    pub locale: Locale,
    /// Leaves with a usable translation
    pub translated: usize,
    /// Leaves in the default bundle
    pub total: usize,
}

impl Coverage {
    /// Fraction of translated leaves, `1.0` for an empty default bundle
    #[allow(clippy::cast_precision_loss)]
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.translated as f64 / self.total as f64
        }
    }

    /// Whether every default key is translated
    pub const fn is_complete(&self) -> bool {
        self.translated == self.total
    }
}

/// Resolves message trees for locales against a default locale.
///
/// Holds the loaded bundles; construct one and pass it by reference to
/// whatever renders pages.
#[derive(Debug, Clone)]
pub struct MessageResolver {
    default_locale: Locale,
    bundles: HashMap<Locale, MessageBundle>,
}

impl MessageResolver {
    /// Create a resolver from bundles. Every supported locale must have one.
    ///
    /// A later bundle for the same locale replaces an earlier one.
    pub fn new<I>(default_locale: Locale, bundles: I) -> I18nResult<Self>
    where
        I: IntoIterator<Item = MessageBundle>,
    {
        let bundles: HashMap<Locale, MessageBundle> = bundles
            .into_iter()
            .map(|bundle| (bundle.locale(), bundle))
            .collect();

        if let Some(locale) = Locale::all().into_iter().find(|l| !bundles.contains_key(l)) {
            return Err(I18nError::MissingBundle { locale });
        }

        info!(
            "MessageResolver initialized with default locale {} ({} keys)",
            default_locale,
            bundles[&default_locale].tree().leaf_count()
        );

        Ok(Self {
            default_locale,
            bundles,
        })
    }

    /// Load every bundle through `loader` and build a resolver
    pub fn from_loader(default_locale: Locale, loader: &BundleLoader) -> I18nResult<Self> {
        Self::new(default_locale, loader.load_all()?)
    }

    /// Get the default locale
    pub const fn default_locale(&self) -> Locale {
        self.default_locale
    }

    /// Get the raw bundle for a locale
    pub fn bundle(&self, locale: Locale) -> I18nResult<&MessageBundle> {
        self.bundles
            .get(&locale)
            .ok_or(I18nError::MissingBundle { locale })
    }

    /// Resolve the message tree for `locale`
    pub fn resolve(&self, locale: Locale) -> I18nResult<ResolvedMessages> {
        let default = self.bundle(self.default_locale)?;

        if locale == self.default_locale {
            debug!("Resolved default locale {} without fallback", locale);
            return Ok(ResolvedMessages {
                locale,
                messages: default.tree().clone(),
                fallback_keys: FallbackKeys::new(),
            });
        }

        let requested = self.bundle(locale)?;
        let mut fallback_keys = FallbackKeys::new();
        let messages = merge(
            default.tree(),
            Some(requested.tree()),
            "",
            &mut fallback_keys,
        );

        debug!(
            "Resolved locale {}: {} keys from default locale {}",
            locale,
            fallback_keys.len(),
            self.default_locale
        );

        Ok(ResolvedMessages {
            locale,
            messages,
            fallback_keys,
        })
    }

    /// Resolve from a language tag, failing for tags outside the supported set
    pub fn resolve_tag(&self, tag: &str) -> I18nResult<ResolvedMessages> {
        self.resolve(Locale::from_code(tag)?)
    }

    /// Measure how much of the default bundle `locale` translates
    pub fn coverage(&self, locale: Locale) -> I18nResult<Coverage> {
        let resolved = self.resolve(locale)?;
        let total = resolved.tree().leaf_count();
        Ok(Coverage {
            locale,
            translated: total - resolved.fallback_keys().len(),
            total,
        })
    }
}

fn merge(
    default: &MessageTree,
    requested: Option<&MessageTree>,
    prefix: &str,
    fallback_keys: &mut FallbackKeys,
) -> MessageTree {
    let mut merged = MessageTree::new();

    for (key, node) in default.iter() {
        let path = join_path(prefix, key);
        let candidate = requested.and_then(|tree| tree.get(key));

        let resolved = match node {
            MessageNode::Text(default_text) => match candidate {
                Some(MessageNode::Text(text)) if !text.is_empty() => MessageNode::Text(text.clone()),
                _ => {
                    fallback_keys.insert(path);
                    MessageNode::Text(default_text.clone())
                }
            },
            MessageNode::Group(default_group) => {
                let requested_group = candidate.and_then(MessageNode::as_group);
                MessageNode::Group(merge(default_group, requested_group, &path, fallback_keys))
            }
        };

        merged.insert(key.clone(), resolved);
    }

    merged
}
