//! Loading of message bundle files from disk

use crate::bundle::MessageBundle;
use crate::error::{I18nError, I18nResult};
use crate::Locale;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Loads one JSON bundle per locale from a messages directory
/// (`<base_dir>/<short_code>.json`).
#[derive(Debug, Clone)]
pub struct BundleLoader {
    base_dir: PathBuf,
}

impl BundleLoader {
    /// Create a loader rooted at the given directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    /// Path of the bundle file for a locale
    pub fn path_for(&self, locale: Locale) -> PathBuf {
        self.base_dir.join(locale.resource_file())
    }

    /// Load and parse the bundle for one locale
    pub fn load(&self, locale: Locale) -> I18nResult<MessageBundle> {
        let path = self.path_for(locale);
        let shown = path.to_string_lossy().to_string();

        debug!("Loading message bundle: {}", shown);

        let content = fs::read_to_string(&path).map_err(|source| I18nError::ResourceLoadError {
            path: shown.clone(),
            source,
        })?;

        let bundle = MessageBundle::from_json_str(locale, &content, &shown)?;
        debug!(
            "Loaded {} messages for locale {}",
            bundle.tree().leaf_count(),
            locale
        );
        Ok(bundle)
    }

    /// Load the bundles of every supported locale.
    ///
    /// Fails on the first locale whose bundle is missing or malformed.
    pub fn load_all(&self) -> I18nResult<Vec<MessageBundle>> {
        let bundles = Locale::all()
            .into_iter()
            .map(|locale| self.load(locale))
            .collect::<I18nResult<Vec<_>>>()?;

        info!(
            "Loaded {} message bundles from {}",
            bundles.len(),
            self.base_dir.display()
        );
        Ok(bundles)
    }

    /// Get the base directory for bundles
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

impl Default for BundleLoader {
    fn default() -> Self {
        Self::new("messages")
    }
}
