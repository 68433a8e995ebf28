//! parlance-bundles
//!
//! Bundle storage for parlance. A bundle is a named, locale-scoped set of
//! message patterns. Loaders fetch one bundle for one exact locale;
//! `LocalizedBundle` stacks the candidates for a requested locale, and
//! `ChainedBundleMessageSource` searches several bundle names in order.

pub mod bundle;
pub mod chained;
pub mod config;
pub mod loader;
pub mod properties;
pub mod yaml;

pub use bundle::{Bundle, LocalizedBundle};
pub use chained::ChainedBundleMessageSource;
pub use config::ProviderConfig;
pub use loader::{BundleLoader, DirectoryBundleLoader, MemoryBundleLoader, BUNDLE_DIR_ENV};
