//! Locale identifiers and the process-wide default locale.
//!
//! A `Locale` is a language / country / variant triple. Bundles are looked up
//! along `Locale::candidates()`, most specific first, ending with the root
//! locale.
//!
//! The default locale starts out as whatever `LC_ALL`, `LC_MESSAGES` or `LANG`
//! name (first non-empty wins) and can be replaced at runtime with
//! [`set_default_locale`]. Readers always see the current value.

use std::env;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use std::sync::{PoisonError, RwLock};

use once_cell::sync::Lazy;
use tracing::{debug, warn};

use crate::error::LocaleParseError;

/// Environment variables consulted for the initial default locale, in order.
const LOCALE_ENV_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

static DEFAULT_LOCALE: Lazy<RwLock<Locale>> = Lazy::new(|| RwLock::new(locale_from_env()));

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Locale {
    language: String,
    country: String,
    variant: String,
}

impl Locale {
    /// Builds a locale, normalizing case (`DE` becomes `de`, `de` country becomes `DE`).
    pub fn new(
        language: impl Into<String>,
        country: impl Into<String>,
        variant: impl Into<String>,
    ) -> Self {
        Self {
            language: language.into().to_ascii_lowercase(),
            country: country.into().to_ascii_uppercase(),
            variant: variant.into(),
        }
    }

    pub fn language_only(language: impl Into<String>) -> Self {
        Self::new(language, "", "")
    }

    /// The empty locale every candidate list ends with.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.language.is_empty() && self.country.is_empty() && self.variant.is_empty()
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn variant(&self) -> &str {
        &self.variant
    }

    /// Underscore-joined form used in bundle file names: `de_DE`, `de`, `en_US_POSIX`.
    /// Empty for the root locale.
    pub fn tag(&self) -> String {
        let mut tag = self.language.clone();
        if !self.country.is_empty() || !self.variant.is_empty() {
            tag.push('_');
            tag.push_str(&self.country);
        }
        if !self.variant.is_empty() {
            tag.push('_');
            tag.push_str(&self.variant);
        }
        tag
    }

    /// Lookup order for this locale: `de_DE_X`, `de_DE`, `de`, root.
    pub fn candidates(&self) -> Vec<Locale> {
        let mut candidates = Vec::with_capacity(4);
        if !self.variant.is_empty() {
            candidates.push(self.clone());
        }
        if !self.country.is_empty() {
            candidates.push(Locale::new(self.language.clone(), self.country.clone(), ""));
        }
        if !self.language.is_empty() {
            candidates.push(Locale::language_only(self.language.clone()));
        }
        candidates.push(Locale::root());
        candidates
    }
}

impl Display for Locale {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for Locale {
    type Err = LocaleParseError;

    /// Accepts `de`, `de_DE`, `de-DE`, `en_US_POSIX` and POSIX environment
    /// values such as `de_DE.UTF-8@euro`. `C` and `POSIX` are the root locale.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let without_modifier = trimmed.split('@').next().unwrap_or_default();
        let stripped = without_modifier.split('.').next().unwrap_or_default();

        if stripped.is_empty() || stripped == "C" || stripped == "POSIX" {
            return Ok(Locale::root());
        }

        let mut parts = stripped.splitn(3, ['_', '-']);
        let language = parts.next().unwrap_or_default();
        let country = parts.next().unwrap_or_default();
        let variant = parts.next().unwrap_or_default();

        if !language.chars().all(|c| c.is_ascii_alphabetic()) || language.len() > 8 {
            return Err(LocaleParseError {
                input: input.to_string(),
                reason: "language must be up to 8 ASCII letters",
            });
        }
        if !country.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(LocaleParseError {
                input: input.to_string(),
                reason: "country must be ASCII letters or digits",
            });
        }

        Ok(Locale::new(language, country, variant))
    }
}

/// Returns the current process default locale.
pub fn default_locale() -> Locale {
    DEFAULT_LOCALE
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Replaces the process default locale. Providers that follow the default
/// locale pick the new value up on their next lookup.
pub fn set_default_locale(locale: Locale) {
    debug!("Default locale set to '{}'", locale);
    *DEFAULT_LOCALE
        .write()
        .unwrap_or_else(PoisonError::into_inner) = locale;
}

/// Re-reads the default locale from the environment and returns it.
pub fn reload_default_locale_from_env() -> Locale {
    let locale = locale_from_env();
    set_default_locale(locale.clone());
    locale
}

fn locale_from_env() -> Locale {
    for var in LOCALE_ENV_VARS {
        let Ok(value) = env::var(var) else {
            continue;
        };
        if value.is_empty() {
            continue;
        }
        return match value.parse() {
            Ok(locale) => {
                debug!("Default locale '{}' taken from {}", locale, var);
                locale
            }
            Err(e) => {
                warn!("Ignoring {}: {}", var, e);
                Locale::root()
            }
        };
    }
    Locale::root()
}
