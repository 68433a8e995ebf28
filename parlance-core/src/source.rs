//! The `MessageSource` abstraction and two in-memory implementations.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use indexmap::IndexMap;

use crate::error::SourceError;

/// Turns a message key into a pattern.
///
/// `Ok(None)` means the key is unknown to this source, which is a normal
/// outcome. `Err` is reserved for backend failures (unreadable or malformed
/// storage) and is propagated to the caller unchanged.
///
/// Implementations that mutate their contents must synchronize internally;
/// callers never lock around `lookup`.
pub trait MessageSource: Send + Sync {
    fn lookup(&self, key: &str) -> Result<Option<String>, SourceError>;
}

impl<S> MessageSource for Arc<S>
where
    S: MessageSource + ?Sized,
{
    fn lookup(&self, key: &str) -> Result<Option<String>, SourceError> {
        (**self).lookup(key)
    }
}

/// Immutable key → pattern map, kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct StaticMessageSource {
    messages: IndexMap<String, String>,
}

impl StaticMessageSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_message(mut self, key: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.messages.insert(key.into(), pattern.into());
        self
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

impl<K, V> FromIterator<(K, V)> for StaticMessageSource
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            messages: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl MessageSource for StaticMessageSource {
    fn lookup(&self, key: &str) -> Result<Option<String>, SourceError> {
        Ok(self.messages.get(key).cloned())
    }
}

/// Mutable map-backed source. Messages may be changed while providers and
/// contract implementations hold it; every lookup sees the latest contents.
#[derive(Debug, Default)]
pub struct SharedMessageSource {
    messages: RwLock<HashMap<String, String>>,
}

impl SharedMessageSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_message(&self, key: impl Into<String>, pattern: impl Into<String>) {
        self.messages
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), pattern.into());
    }

    /// Removes a message, returning the previous pattern if there was one.
    pub fn remove_message(&self, key: &str) -> Option<String> {
        self.messages
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
    }

    pub fn clear(&self) {
        self.messages
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl MessageSource for SharedMessageSource {
    fn lookup(&self, key: &str) -> Result<Option<String>, SourceError> {
        Ok(self
            .messages
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_source_lookup() {
        let source = StaticMessageSource::new()
            .with_message("foo", "The Foo Message")
            .with_message("bar", "The Bar Message");

        assert_eq!(source.lookup("foo").unwrap().as_deref(), Some("The Foo Message"));
        assert_eq!(source.lookup("missing").unwrap(), None);
        assert_eq!(source.keys().collect::<Vec<_>>(), vec!["foo", "bar"]);
    }

    #[test]
    fn test_static_source_from_iterator() {
        let source: StaticMessageSource = [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(source.len(), 2);
        assert_eq!(source.lookup("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_shared_source_sees_updates_through_arc() {
        let shared = Arc::new(SharedMessageSource::new());
        let as_source: Arc<dyn MessageSource> = shared.clone();

        assert_eq!(as_source.lookup("greeting").unwrap(), None);

        shared.set_message("greeting", "Hello");
        assert_eq!(as_source.lookup("greeting").unwrap().as_deref(), Some("Hello"));

        assert_eq!(shared.remove_message("greeting").as_deref(), Some("Hello"));
        assert_eq!(as_source.lookup("greeting").unwrap(), None);
    }
}
