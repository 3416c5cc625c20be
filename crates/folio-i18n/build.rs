//! Build script for folio-i18n crate
//!
//! Validates the workspace message bundles at compile time:
//! - every bundle is a JSON object whose leaves are strings
//! - key segments are non-empty and contain no '.'
//! - placeholders used by a translation also exist in the English text
//!
//! Keys missing from a translation are allowed (they fall back at runtime)
//! and are only reported as warnings.

use std::collections::{BTreeMap, BTreeSet};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use serde_json::Value;

const REFERENCE_LOCALE: &str = "en";

/// Flatten a bundle into `dotted path -> text`
fn flatten(value: &Value, prefix: &str, out: &mut BTreeMap<String, String>) -> Result<(), String> {
    let object = value
        .as_object()
        .ok_or_else(|| format!("'{}' must be an object", display_path(prefix)))?;

    for (key, child) in object {
        if key.is_empty() || key.contains('.') {
            return Err(format!("invalid key segment '{key}' under '{}'", display_path(prefix)));
        }
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match child {
            Value::String(text) => {
                out.insert(path, text.clone());
            }
            Value::Object(_) => flatten(child, &path, out)?,
            _ => return Err(format!("'{path}' must be a string or an object")),
        }
    }
    Ok(())
}

fn display_path(prefix: &str) -> &str {
    if prefix.is_empty() {
        "<root>"
    } else {
        prefix
    }
}

/// Extract `{name}` placeholders, skipping `{{` escapes
fn placeholders(text: &str) -> BTreeSet<String> {
    let mut names = BTreeSet::new();
    let mut rest = text;
    while let Some(start) = rest.find('{') {
        let tail = &rest[start..];
        if tail.starts_with("{{") {
            rest = &tail[2..];
            continue;
        }
        match tail.find('}') {
            Some(end) => {
                names.insert(tail[1..end].to_string());
                rest = &tail[end + 1..];
            }
            None => break,
        }
    }
    names
}

/// Validate a single bundle file
fn load_bundle(path: &Path) -> Result<BTreeMap<String, String>, String> {
    let content =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let value: Value = serde_json::from_str(&content)
        .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))?;

    let mut messages = BTreeMap::new();
    flatten(&value, "", &mut messages).map_err(|e| format!("{}: {}", path.display(), e))?;
    Ok(messages)
}

/// Find all bundle files
fn find_bundles(messages_dir: &Path) -> Result<BTreeMap<String, PathBuf>, String> {
    let mut bundles = BTreeMap::new();

    for entry in fs::read_dir(messages_dir)
        .map_err(|e| format!("Failed to read messages directory: {e}"))?
    {
        let path = entry
            .map_err(|e| format!("Failed to read directory entry: {e}"))?
            .path();
        if path.extension().and_then(|ext| ext.to_str()) == Some("json") {
            if let Some(locale) = path.file_stem().and_then(|stem| stem.to_str()) {
                bundles.insert(locale.to_string(), path.clone());
            }
        }
    }

    Ok(bundles)
}

/// Main validation function
fn validate_bundles() -> Result<(), String> {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").map_err(|_| "CARGO_MANIFEST_DIR not set")?;
    let messages_dir = Path::new(&manifest_dir).join("../../messages");

    println!("cargo:rerun-if-changed={}", messages_dir.display());

    if !messages_dir.exists() {
        println!(
            "cargo:warning=Messages directory not found, skipping bundle validation: {}",
            messages_dir.display()
        );
        return Ok(());
    }

    let mut all_messages = BTreeMap::new();
    let mut errors = Vec::new();

    for (locale, path) in find_bundles(&messages_dir)? {
        match load_bundle(&path) {
            Ok(messages) => {
                all_messages.insert(locale, messages);
            }
            Err(e) => errors.push(e),
        }
    }

    if !errors.is_empty() {
        return Err(errors.join("\n"));
    }

    let Some(reference) = all_messages.get(REFERENCE_LOCALE) else {
        return Err(format!("missing reference bundle {REFERENCE_LOCALE}.json"));
    };

    for (locale, messages) in &all_messages {
        if locale == REFERENCE_LOCALE {
            continue;
        }

        let missing = reference
            .keys()
            .filter(|key| messages.get(*key).map_or(true, String::is_empty))
            .count();
        if missing > 0 {
            println!("cargo:warning={locale}: {missing} keys will fall back to {REFERENCE_LOCALE}");
        }

        for (key, text) in messages {
            match reference.get(key) {
                None => println!("cargo:warning={locale}: extra key '{key}' is ignored"),
                Some(reference_text) => {
                    let expected = placeholders(reference_text);
                    let unknown: Vec<_> = placeholders(text).difference(&expected).cloned().collect();
                    if !unknown.is_empty() {
                        errors.push(format!(
                            "{locale}: '{key}' uses placeholders {unknown:?} not present in {REFERENCE_LOCALE}"
                        ));
                    }
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors.join("\n"))
    }
}

fn main() {
    if let Err(e) = validate_bundles() {
        eprintln!("Message bundle validation failed:\n{e}");
        process::exit(1);
    }
}
