//! Provider configuration file.
//!
//! ```yaml
//! bundle_dir: ./i18n
//! locale: de_DE                     # omit to follow the process default locale
//! fallback_to_default_locale: true
//! cache_bundles: true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use parlance_core::Locale;
use serde::Deserialize;
use tracing::debug;

use crate::loader::DirectoryBundleLoader;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderConfig {
    /// Directory holding the bundle files.
    pub bundle_dir: PathBuf,
    /// Fixed locale; `None` follows the process default locale.
    pub locale: Option<String>,
    pub fallback_to_default_locale: bool,
    pub cache_bundles: bool,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            bundle_dir: PathBuf::from("i18n"),
            locale: None,
            fallback_to_default_locale: true,
            cache_bundles: true,
        }
    }
}

impl ProviderConfig {
    /// Reads a YAML configuration file. A relative `bundle_dir` is taken
    /// relative to the file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading provider config from: {}", path.display());
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut config = Self::from_yaml_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        if config.bundle_dir.is_relative() {
            if let Some(parent) = path.parent() {
                config.bundle_dir = parent.join(&config.bundle_dir);
            }
        }
        Ok(config)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        let config: Self = serde_yaml_ng::from_str(contents)?;
        config.parsed_locale()?;
        Ok(config)
    }

    /// The configured locale, if any.
    pub fn parsed_locale(&self) -> Result<Option<Locale>> {
        self.locale
            .as_deref()
            .map(|tag| {
                tag.parse::<Locale>()
                    .with_context(|| format!("Invalid locale in provider config: '{tag}'"))
            })
            .transpose()
    }

    pub fn loader(&self) -> DirectoryBundleLoader {
        let loader = DirectoryBundleLoader::new(self.bundle_dir.clone());
        if self.cache_bundles {
            loader
        } else {
            loader.without_cache()
        }
    }
}
