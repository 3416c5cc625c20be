//! Message bundles: ordered trees of translatable strings

use crate::error::{I18nError, I18nResult};
use crate::Locale;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// Separator between segments of a dotted key path
pub const KEY_SEPARATOR: char = '.';

/// A node in a message tree: either a translatable string or a nested group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MessageNode {
    Text(String),
    Group(MessageTree),
}

impl MessageNode {
    /// The string value, if this node is a leaf
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Group(_) => None,
        }
    }

    /// The nested tree, if this node is a group
    pub const fn as_group(&self) -> Option<&MessageTree> {
        match self {
            Self::Group(tree) => Some(tree),
            Self::Text(_) => None,
        }
    }
}

/// Ordered mapping from key segment to node. Iteration follows document
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MessageTree {
    entries: IndexMap<String, MessageNode>,
}

impl MessageTree {
    /// Create an empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node under a single key segment, keeping the original
    /// position when the key already exists
    pub fn insert(&mut self, key: impl Into<String>, node: MessageNode) {
        self.entries.insert(key.into(), node);
    }

    /// Get a direct child by key segment
    pub fn get(&self, key: &str) -> Option<&MessageNode> {
        self.entries.get(key)
    }

    /// Look up a node by dotted path (`home.hero.title`)
    pub fn lookup(&self, path: &str) -> Option<&MessageNode> {
        let mut segments = path.split(KEY_SEPARATOR);
        let mut node = self.entries.get(segments.next()?)?;
        for segment in segments {
            node = node.as_group()?.entries.get(segment)?;
        }
        Some(node)
    }

    /// Look up a string leaf by dotted path
    pub fn text(&self, path: &str) -> Option<&str> {
        self.lookup(path).and_then(MessageNode::as_text)
    }

    /// Iterate over direct children in order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &MessageNode)> {
        self.entries.iter()
    }

    /// Number of direct children
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the tree has no children
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All leaves as `(dotted path, value)` pairs, depth-first in document
    /// order
    pub fn leaves(&self) -> Vec<(String, &str)> {
        let mut out = Vec::new();
        self.collect_leaves("", &mut out);
        out
    }

    /// Number of string leaves in the whole tree
    pub fn leaf_count(&self) -> usize {
        self.entries
            .values()
            .map(|node| match node {
                MessageNode::Text(_) => 1,
                MessageNode::Group(tree) => tree.leaf_count(),
            })
            .sum()
    }

    fn collect_leaves<'a>(&'a self, prefix: &str, out: &mut Vec<(String, &'a str)>) {
        for (key, node) in &self.entries {
            let path = join_path(prefix, key);
            match node {
                MessageNode::Text(text) => out.push((path, text)),
                MessageNode::Group(tree) => tree.collect_leaves(&path, out),
            }
        }
    }

    /// Build a tree from a parsed JSON document
    pub fn from_json(locale: Locale, value: &Value) -> I18nResult<Self> {
        let object = value.as_object().ok_or_else(|| I18nError::InvalidBundle {
            locale,
            path: String::new(),
            reason: format!("expected an object at the root, found {}", json_kind(value)),
        })?;
        Self::from_object(locale, object, "")
    }

    fn from_object(
        locale: Locale,
        object: &serde_json::Map<String, Value>,
        prefix: &str,
    ) -> I18nResult<Self> {
        let mut tree = Self::new();
        for (key, value) in object {
            let path = join_path(prefix, key);
            if key.is_empty() || key.contains(KEY_SEPARATOR) {
                return Err(I18nError::InvalidBundle {
                    locale,
                    path,
                    reason: "key segments must be non-empty and contain no '.'".to_string(),
                });
            }

            let node = match value {
                Value::String(text) => MessageNode::Text(text.clone()),
                Value::Object(child) => MessageNode::Group(Self::from_object(locale, child, &path)?),
                other => {
                    return Err(I18nError::InvalidBundle {
                        locale,
                        path,
                        reason: format!("expected a string or an object, found {}", json_kind(other)),
                    })
                }
            };
            tree.insert(key.clone(), node);
        }
        Ok(tree)
    }
}

/// Join a prefix and a key segment into a dotted path
pub(crate) fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}{KEY_SEPARATOR}{key}")
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// The full set of translatable strings for one locale
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBundle {
    locale: Locale,
    tree: MessageTree,
}

impl MessageBundle {
    /// Wrap an already-built tree
    pub const fn new(locale: Locale, tree: MessageTree) -> Self {
        Self { locale, tree }
    }

    /// Build a bundle from a parsed JSON document
    pub fn from_value(locale: Locale, value: &Value) -> I18nResult<Self> {
        Ok(Self::new(locale, MessageTree::from_json(locale, value)?))
    }

    /// Parse a bundle from JSON text; `origin` names the source in errors
    pub fn from_json_str(locale: Locale, json: &str, origin: &str) -> I18nResult<Self> {
        let value: Value = serde_json::from_str(json).map_err(|source| I18nError::BundleParseError {
            path: origin.to_string(),
            source,
        })?;
        Self::from_value(locale, &value)
    }

    /// Locale this bundle belongs to
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// The message tree
    pub const fn tree(&self) -> &MessageTree {
        &self.tree
    }

    /// Look up a string by dotted path
    pub fn text(&self, path: &str) -> Option<&str> {
        self.tree.text(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> MessageBundle {
        MessageBundle::from_value(
            Locale::English,
            &json!({
                "nav": { "home": "Home", "contact": "Contact" },
                "home": { "title": "Hi", "hero": { "cta": "Hire me" } },
                "footer": "Bye"
            }),
        )
        .unwrap()
    }

    #[test]
    fn test_lookup_by_dotted_path() {
        let bundle = sample();
        assert_eq!(bundle.text("home.hero.cta"), Some("Hire me"));
        assert_eq!(bundle.text("footer"), Some("Bye"));
        assert_eq!(bundle.text("home.hero"), None);
        assert!(bundle.tree().lookup("home.hero").unwrap().as_group().is_some());
        assert_eq!(bundle.text("home.missing"), None);
        assert_eq!(bundle.text("footer.deeper"), None);
    }

    #[test]
    fn test_leaves_follow_document_order() {
        let bundle = sample();
        let paths: Vec<String> = bundle.tree().leaves().into_iter().map(|(p, _)| p).collect();
        assert_eq!(
            paths,
            vec!["nav.home", "nav.contact", "home.title", "home.hero.cta", "footer"]
        );
        assert_eq!(bundle.tree().leaf_count(), 5);
    }

    #[test]
    fn test_rejects_non_string_leaf() {
        let err = MessageBundle::from_value(Locale::French, &json!({ "home": { "count": 3 } }))
            .unwrap_err();
        match err {
            I18nError::InvalidBundle { locale, path, reason } => {
                assert_eq!(locale, Locale::French);
                assert_eq!(path, "home.count");
                assert!(reason.contains("a number"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_dotted_key_and_non_object_root() {
        assert!(MessageBundle::from_value(Locale::English, &json!({ "a.b": "x" })).is_err());
        assert!(MessageBundle::from_value(Locale::English, &json!(["x"])).is_err());
    }

    #[test]
    fn test_parse_error_names_origin() {
        let err = MessageBundle::from_json_str(Locale::Spanish, "{ nope", "messages/es.json")
            .unwrap_err();
        assert!(err.to_string().contains("messages/es.json"));
    }

    #[test]
    fn test_serializes_back_to_nested_json() {
        let value = serde_json::to_value(sample().tree()).unwrap();
        assert_eq!(value["home"]["hero"]["cta"], "Hire me");
    }
}
