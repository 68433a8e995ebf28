//! Strategies for choosing the locale of a lookup.

use crate::locale::{default_locale, Locale};

/// Supplies the locale to use for a lookup. Called once per lookup, so an
/// implementation may return a different locale every time.
pub trait LocaleProvider: Send + Sync {
    fn current_locale(&self) -> Locale;
}

/// Always answers with the same locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedLocaleProvider {
    locale: Locale,
}

impl FixedLocaleProvider {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }
}

impl LocaleProvider for FixedLocaleProvider {
    fn current_locale(&self) -> Locale {
        self.locale.clone()
    }
}

/// Follows the process default locale, read at call time rather than at
/// construction time.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultLocaleProvider;

impl LocaleProvider for DefaultLocaleProvider {
    fn current_locale(&self) -> Locale {
        default_locale()
    }
}

/// Any thread-safe closure can pick the locale, e.g. from a request context.
impl<F> LocaleProvider for F
where
    F: Fn() -> Locale + Send + Sync,
{
    fn current_locale(&self) -> Locale {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::set_default_locale;
    use serial_test::serial;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_fixed_provider_never_changes() {
        let provider = FixedLocaleProvider::new(Locale::language_only("de"));
        assert_eq!(provider.current_locale(), Locale::language_only("de"));
        assert_eq!(provider.current_locale(), Locale::language_only("de"));
    }

    #[test]
    #[serial]
    fn test_default_provider_reads_at_call_time() {
        let previous = default_locale();
        let provider = DefaultLocaleProvider;

        set_default_locale(Locale::language_only("fi"));
        assert_eq!(provider.current_locale(), Locale::language_only("fi"));

        set_default_locale(Locale::language_only("de"));
        assert_eq!(provider.current_locale(), Locale::language_only("de"));

        set_default_locale(previous);
    }

    #[test]
    fn test_closure_provider_is_consulted_per_call() {
        let calls = AtomicUsize::new(0);
        let provider = || {
            if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Locale::language_only("en")
            } else {
                Locale::language_only("fr")
            }
        };

        assert_eq!(provider.current_locale().language(), "en");
        assert_eq!(provider.current_locale().language(), "fr");
    }
}
