//! A message source that searches an ordered list of bundles.

use std::fmt;
use std::sync::Arc;

use parlance_core::{default_locale, LocaleProvider, MessageSource, SourceError};
use tracing::trace;

use crate::bundle::LocalizedBundle;
use crate::loader::BundleLoader;

/// Searches bundles in order for the locale reported by its locale provider;
/// the first bundle that has the key wins.
///
/// The locale is asked for on every lookup, so a provider that follows the
/// process default locale switches bundles as soon as the default changes.
/// A missing bundle or key moves on to the next name; any other load
/// failure aborts the lookup.
pub struct ChainedBundleMessageSource {
    bundle_names: Vec<String>,
    locale_provider: Arc<dyn LocaleProvider>,
    loader: Arc<dyn BundleLoader>,
    fallback_to_default_locale: bool,
}

impl ChainedBundleMessageSource {
    pub fn new(
        bundle_names: Vec<String>,
        locale_provider: Arc<dyn LocaleProvider>,
        loader: Arc<dyn BundleLoader>,
    ) -> Self {
        Self {
            bundle_names,
            locale_provider,
            loader,
            fallback_to_default_locale: true,
        }
    }

    /// Controls whether the process default locale is tried when a bundle
    /// has nothing specific for the requested locale. On by default.
    pub fn with_default_locale_fallback(mut self, enabled: bool) -> Self {
        self.fallback_to_default_locale = enabled;
        self
    }

    pub fn bundle_names(&self) -> &[String] {
        &self.bundle_names
    }
}

impl fmt::Debug for ChainedBundleMessageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainedBundleMessageSource")
            .field("bundle_names", &self.bundle_names)
            .field("fallback_to_default_locale", &self.fallback_to_default_locale)
            .finish_non_exhaustive()
    }
}

impl MessageSource for ChainedBundleMessageSource {
    fn lookup(&self, key: &str) -> Result<Option<String>, SourceError> {
        let locale = self.locale_provider.current_locale();
        let fallback = self.fallback_to_default_locale.then(default_locale);

        for name in &self.bundle_names {
            let Some(bundle) =
                LocalizedBundle::resolve(self.loader.as_ref(), name, &locale, fallback.as_ref())?
            else {
                trace!("Bundle '{}' not found for locale '{}'", name, locale);
                continue;
            };
            if let Some(pattern) = bundle.get(key) {
                trace!("Key '{}' found in bundle '{}'", key, name);
                return Ok(Some(pattern.to_string()));
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::Bundle;
    use crate::loader::MemoryBundleLoader;
    use parlance_core::{FixedLocaleProvider, Locale};
    use std::sync::Mutex;

    fn loader() -> Arc<MemoryBundleLoader> {
        Arc::new(
            MemoryBundleLoader::new()
                .with_bundle(Bundle::from_pairs(
                    "Child",
                    Locale::root(),
                    [("shared", "from child"), ("child_only", "child")],
                ))
                .with_bundle(Bundle::from_pairs(
                    "Child",
                    Locale::language_only("de"),
                    [("shared", "vom Kind")],
                ))
                .with_bundle(Bundle::from_pairs(
                    "Parent",
                    Locale::root(),
                    [("shared", "from parent"), ("parent_only", "parent")],
                )),
        )
    }

    fn source(names: &[&str], locale: Locale) -> ChainedBundleMessageSource {
        ChainedBundleMessageSource::new(
            names.iter().map(|n| n.to_string()).collect(),
            Arc::new(FixedLocaleProvider::new(locale)),
            loader(),
        )
        .with_default_locale_fallback(false)
    }

    #[test]
    fn test_earlier_bundles_shadow_later_ones() {
        let source = source(&["Child", "Parent"], Locale::root());
        assert_eq!(source.lookup("shared").unwrap().as_deref(), Some("from child"));
        assert_eq!(source.lookup("parent_only").unwrap().as_deref(), Some("parent"));
        assert_eq!(source.lookup("child_only").unwrap().as_deref(), Some("child"));
        assert_eq!(source.lookup("nowhere").unwrap(), None);
    }

    #[test]
    fn test_missing_bundles_are_skipped() {
        let source = source(&["Missing", "Parent"], Locale::root());
        assert_eq!(source.lookup("shared").unwrap().as_deref(), Some("from parent"));
    }

    #[test]
    fn test_locale_is_read_per_lookup() {
        let current = Arc::new(Mutex::new(Locale::root()));
        let reader = Arc::clone(&current);
        let provider = move || reader.lock().unwrap().clone();

        let source = ChainedBundleMessageSource::new(
            vec!["Child".to_string()],
            Arc::new(provider),
            loader(),
        )
        .with_default_locale_fallback(false);

        assert_eq!(source.lookup("shared").unwrap().as_deref(), Some("from child"));
        *current.lock().unwrap() = Locale::language_only("de");
        assert_eq!(source.lookup("shared").unwrap().as_deref(), Some("vom Kind"));
    }

    #[test]
    fn test_duplicate_names_are_searched_again() {
        let source = source(&["Parent", "Parent"], Locale::root());
        assert_eq!(source.bundle_names().len(), 2);
        assert_eq!(source.lookup("parent_only").unwrap().as_deref(), Some("parent"));
    }
}
