//! parlance-core
//!
//! Foundation layer for parlance: locales and the providers that pick them,
//! the `MessageSource` abstraction that turns keys into patterns, and the
//! positional formatter applied to resolved patterns.

pub mod error;
pub mod format;
pub mod locale;
pub mod locale_provider;
pub mod source;

pub use error::{FormatError, LocaleParseError, SourceError};
pub use format::format_positional;
pub use locale::{default_locale, reload_default_locale_from_env, set_default_locale, Locale};
pub use locale_provider::{DefaultLocaleProvider, FixedLocaleProvider, LocaleProvider};
pub use source::{MessageSource, SharedMessageSource, StaticMessageSource};
