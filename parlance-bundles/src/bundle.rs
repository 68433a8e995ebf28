//! Bundles and locale fallback across bundle files.

use std::sync::Arc;

use indexmap::IndexMap;
use parlance_core::{Locale, SourceError};
use tracing::trace;

use crate::loader::BundleLoader;

/// Messages of one bundle for one exact locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    name: String,
    locale: Locale,
    messages: IndexMap<String, String>,
}

impl Bundle {
    pub fn new(
        name: impl Into<String>,
        locale: Locale,
        messages: IndexMap<String, String>,
    ) -> Self {
        Self {
            name: name.into(),
            locale,
            messages,
        }
    }

    pub fn from_pairs<K, V>(
        name: impl Into<String>,
        locale: Locale,
        pairs: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let messages = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::new(name, locale, messages)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.messages.keys().map(String::as_str)
    }
}

/// A bundle as seen from a requested locale: the existing files for the
/// locale's candidates, most specific first, with the root bundle last.
///
/// For `de_DE` the layers are `Name_de_DE`, `Name_de`, `Name` (whichever
/// exist). When no locale-specific layer exists, the fallback locale's
/// candidates are tried before settling on the root bundle alone. A request
/// for the root locale itself never falls back.
#[derive(Debug, Clone)]
pub struct LocalizedBundle {
    name: String,
    locale: Locale,
    layers: Vec<Arc<Bundle>>,
}

impl LocalizedBundle {
    /// Collects the layers for `name` at `locale`. `Ok(None)` means no file
    /// exists for any candidate, which callers treat as "not found".
    pub fn resolve(
        loader: &dyn BundleLoader,
        name: &str,
        locale: &Locale,
        fallback: Option<&Locale>,
    ) -> Result<Option<Self>, SourceError> {
        let mut layers = load_specific_layers(loader, name, locale)?;

        if layers.is_empty() && !locale.is_root() {
            if let Some(fallback) = fallback.filter(|fallback| *fallback != locale) {
                trace!(
                    "No '{}' bundle for locale '{}', trying fallback '{}'",
                    name,
                    locale,
                    fallback
                );
                layers = load_specific_layers(loader, name, fallback)?;
            }
        }

        if let Some(root) = loader.load(name, &Locale::root())? {
            layers.push(root);
        }

        if layers.is_empty() {
            return Ok(None);
        }

        Ok(Some(Self {
            name: name.to_string(),
            locale: locale.clone(),
            layers,
        }))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The locale that was requested, not necessarily the one that matched.
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Locales of the layers actually found, most specific first.
    pub fn layer_locales(&self) -> Vec<&Locale> {
        self.layers.iter().map(|layer| layer.locale()).collect()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.layers.iter().find_map(|layer| layer.get(key))
    }
}

fn load_specific_layers(
    loader: &dyn BundleLoader,
    name: &str,
    locale: &Locale,
) -> Result<Vec<Arc<Bundle>>, SourceError> {
    let mut layers = Vec::new();
    for candidate in locale.candidates() {
        if candidate.is_root() {
            continue;
        }
        if let Some(bundle) = loader.load(name, &candidate)? {
            layers.push(bundle);
        }
    }
    Ok(layers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::MemoryBundleLoader;

    fn loader() -> MemoryBundleLoader {
        MemoryBundleLoader::new()
            .with_bundle(Bundle::from_pairs(
                "app.Messages",
                Locale::root(),
                [("greeting", "Hello"), ("farewell", "Bye"), ("only_root", "root")],
            ))
            .with_bundle(Bundle::from_pairs(
                "app.Messages",
                Locale::language_only("de"),
                [("greeting", "Hallo"), ("farewell", "Tschüss")],
            ))
            .with_bundle(Bundle::from_pairs(
                "app.Messages",
                Locale::new("de", "AT", ""),
                [("greeting", "Servus")],
            ))
            .with_bundle(Bundle::from_pairs(
                "app.Messages",
                Locale::language_only("fi"),
                [("greeting", "Hei")],
            ))
    }

    #[test]
    fn test_layers_most_specific_first() {
        let loader = loader();
        let bundle =
            LocalizedBundle::resolve(&loader, "app.Messages", &Locale::new("de", "AT", ""), None)
                .unwrap()
                .unwrap();

        assert_eq!(bundle.get("greeting"), Some("Servus"));
        assert_eq!(bundle.get("farewell"), Some("Tschüss"));
        assert_eq!(bundle.get("only_root"), Some("root"));
        assert_eq!(bundle.get("missing"), None);
        assert_eq!(bundle.layer_locales().len(), 3);
    }

    #[test]
    fn test_fallback_locale_used_when_nothing_specific_exists() {
        let loader = loader();
        let fi = Locale::language_only("fi");

        let bundle = LocalizedBundle::resolve(
            &loader,
            "app.Messages",
            &Locale::language_only("sv"),
            Some(&fi),
        )
        .unwrap()
        .unwrap();
        assert_eq!(bundle.get("greeting"), Some("Hei"));
        assert_eq!(bundle.get("farewell"), Some("Bye"));

        let without_fallback =
            LocalizedBundle::resolve(&loader, "app.Messages", &Locale::language_only("sv"), None)
                .unwrap()
                .unwrap();
        assert_eq!(without_fallback.get("greeting"), Some("Hello"));
    }

    #[test]
    fn test_root_request_never_falls_back() {
        let loader = loader();
        let de = Locale::language_only("de");

        let bundle = LocalizedBundle::resolve(&loader, "app.Messages", &Locale::root(), Some(&de))
            .unwrap()
            .unwrap();
        assert_eq!(bundle.get("greeting"), Some("Hello"));
        assert_eq!(bundle.layer_locales(), vec![&Locale::root()]);
    }

    #[test]
    fn test_fallback_ignored_when_locale_has_its_own_bundle() {
        let loader = loader();
        let fi = Locale::language_only("fi");

        let bundle = LocalizedBundle::resolve(
            &loader,
            "app.Messages",
            &Locale::new("de", "DE", ""),
            Some(&fi),
        )
        .unwrap()
        .unwrap();
        assert_eq!(bundle.get("greeting"), Some("Hallo"));
    }

    #[test]
    fn test_unknown_bundle_is_not_found() {
        let loader = loader();
        let result =
            LocalizedBundle::resolve(&loader, "app.Other", &Locale::language_only("de"), None)
                .unwrap();
        assert!(result.is_none());
    }
}
