//! Bundle storage backends.
//!
//! A loader answers for one bundle name and one exact locale; it does no
//! locale fallback of its own (see `LocalizedBundle`). `Ok(None)` is the
//! ordinary "no such bundle" answer, `Err` a storage failure.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use parlance_core::{Locale, SourceError};
use tracing::{debug, instrument, trace, warn};

use crate::bundle::Bundle;
use crate::properties::parse_properties;
use crate::yaml::parse_yaml_bundle;

/// Overrides the directory used by [`DirectoryBundleLoader::from_env`].
pub const BUNDLE_DIR_ENV: &str = "PARLANCE_BUNDLE_DIR";

const DEFAULT_BUNDLE_DIR: &str = "i18n";

/// File extensions probed for a bundle, in order.
const BUNDLE_EXTENSIONS: [&str; 3] = ["properties", "yaml", "yml"];

pub trait BundleLoader: Send + Sync {
    fn load(&self, name: &str, locale: &Locale) -> Result<Option<Arc<Bundle>>, SourceError>;
}

impl<L> BundleLoader for Arc<L>
where
    L: BundleLoader + ?Sized,
{
    fn load(&self, name: &str, locale: &Locale) -> Result<Option<Arc<Bundle>>, SourceError> {
        (**self).load(name, locale)
    }
}

/// Bundles registered in code, typically from `include_str!` sources.
#[derive(Debug, Default)]
pub struct MemoryBundleLoader {
    bundles: HashMap<(String, Locale), Arc<Bundle>>,
}

impl MemoryBundleLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a bundle, replacing any earlier one with the same name and locale.
    pub fn insert(&mut self, bundle: Bundle) {
        let key = (bundle.name().to_string(), bundle.locale().clone());
        self.bundles.insert(key, Arc::new(bundle));
    }

    pub fn with_bundle(mut self, bundle: Bundle) -> Self {
        self.insert(bundle);
        self
    }

    /// Parses `.properties` text and registers it.
    pub fn with_properties(
        self,
        name: &str,
        locale: Locale,
        text: &str,
    ) -> Result<Self, SourceError> {
        let messages = parse_properties(name, text)?;
        Ok(self.with_bundle(Bundle::new(name, locale, messages)))
    }

    /// Parses YAML text and registers it.
    pub fn with_yaml(self, name: &str, locale: Locale, text: &str) -> Result<Self, SourceError> {
        let messages = parse_yaml_bundle(name, text)?;
        Ok(self.with_bundle(Bundle::new(name, locale, messages)))
    }

    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }
}

impl BundleLoader for MemoryBundleLoader {
    fn load(&self, name: &str, locale: &Locale) -> Result<Option<Arc<Bundle>>, SourceError> {
        Ok(self
            .bundles
            .get(&(name.to_string(), locale.clone()))
            .cloned())
    }
}

type BundleCache = RwLock<HashMap<(String, Locale), Arc<Bundle>>>;

/// Reads bundles from files below a root directory.
///
/// Bundle `app::ui::Messages` at locale `de_DE` is looked up as
/// `<root>/app/ui/Messages_de_DE.properties`, then `.yaml`, then `.yml`;
/// the root locale drops the `_<tag>` suffix. Dots in the name are path
/// separators too, so `app.ui.Messages` maps to the same files.
///
/// Parsed files are kept per name and locale unless caching is disabled, so
/// the cache never outgrows the bundle files on disk. Absent files are probed
/// again on every load and failures are never cached.
#[derive(Debug)]
pub struct DirectoryBundleLoader {
    root: PathBuf,
    cache: Option<BundleCache>,
}

impl DirectoryBundleLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: Some(RwLock::new(HashMap::new())),
        }
    }

    /// Reads every lookup from disk again.
    pub fn without_cache(mut self) -> Self {
        self.cache = None;
        self
    }

    /// Uses `$PARLANCE_BUNDLE_DIR`, or `./i18n` when it is unset.
    pub fn from_env() -> Self {
        let root = env::var(BUNDLE_DIR_ENV).unwrap_or_else(|_| DEFAULT_BUNDLE_DIR.to_string());
        Self::new(root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of `name` at `locale` without the file extension.
    fn base_path(&self, name: &str, locale: &Locale) -> PathBuf {
        let relative = name.replace("::", "/").replace('.', "/");
        let relative = relative.trim_start_matches('/');
        let tag = locale.tag();
        let file_stem = if tag.is_empty() {
            relative.to_string()
        } else {
            format!("{relative}_{tag}")
        };
        self.root.join(file_stem)
    }

    fn read_bundle(&self, name: &str, locale: &Locale) -> Result<Option<Bundle>, SourceError> {
        let base = self.base_path(name, locale);

        for extension in BUNDLE_EXTENSIONS {
            let path = base.with_extension(extension);
            let text = match fs::read_to_string(&path) {
                Ok(text) => text,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => {
                    return Err(SourceError::Io {
                        bundle: name.to_string(),
                        source: e,
                    })
                }
            };

            debug!("Loading bundle '{}' from {}", name, path.display());
            let parsed = if extension == "properties" {
                parse_properties(name, &text)
            } else {
                parse_yaml_bundle(name, &text)
            };
            let messages = parsed.inspect_err(|e| warn!("{}", e))?;
            return Ok(Some(Bundle::new(name, locale.clone(), messages)));
        }

        trace!("No bundle file for '{}' at {}", name, base.display());
        Ok(None)
    }
}

impl BundleLoader for DirectoryBundleLoader {
    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn load(&self, name: &str, locale: &Locale) -> Result<Option<Arc<Bundle>>, SourceError> {
        let Some(cache) = &self.cache else {
            return Ok(self.read_bundle(name, locale)?.map(Arc::new));
        };

        let key = (name.to_string(), locale.clone());
        {
            let cache = cache.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(cached) = cache.get(&key) {
                return Ok(Some(Arc::clone(cached)));
            }
        }

        let Some(loaded) = self.read_bundle(name, locale)?.map(Arc::new) else {
            return Ok(None);
        };
        cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, Arc::clone(&loaded));
        Ok(Some(loaded))
    }
}
