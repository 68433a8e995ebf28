//! `MessagesProvider`: the factory for contract implementations.

use std::fmt;
use std::sync::Arc;

use parlance_bundles::{
    BundleLoader, ChainedBundleMessageSource, DirectoryBundleLoader, ProviderConfig,
};
use parlance_core::{
    DefaultLocaleProvider, FixedLocaleProvider, Locale, LocaleProvider, MessageSource,
};
use tracing::{debug, instrument, warn};

use crate::contract::{ContractDescriptor, MessageContract};
use crate::error::Result;
use crate::messages::Messages;
use crate::validator::MessageContractValidator;

/// Where messages come from. Fixed for the provider's lifetime.
enum SourceStrategy {
    /// One source shared by every contract created.
    Explicit(Arc<dyn MessageSource>),
    /// A bundle chain per contract, built from its inheritance.
    Bundles {
        locale_provider: Arc<dyn LocaleProvider>,
        loader: Arc<dyn BundleLoader>,
        fallback_to_default_locale: bool,
    },
}

/// Creates contract implementations bound to a message source.
///
/// ```
/// use parlance::{message_contract, MessagesProvider, StaticMessageSource};
///
/// message_contract! {
///     pub contract Greetings {
///         fn hello(name: &str) -> String;
///         #[default("Goodbye!")]
///         fn goodbye() -> String;
///     }
/// }
///
/// let source = StaticMessageSource::new().with_message("hello", "Hello, {0}!");
/// let messages: Greetings = MessagesProvider::new(source).create().unwrap();
///
/// assert_eq!(messages.hello("Ada").unwrap(), "Hello, Ada!");
/// assert_eq!(messages.goodbye().unwrap(), "Goodbye!");
/// ```
pub struct MessagesProvider {
    strategy: SourceStrategy,
}

impl MessagesProvider {
    /// Every lookup goes to `source`, whatever the contract.
    pub fn new(source: impl MessageSource + 'static) -> Self {
        Self::from_shared_source(Arc::new(source))
    }

    pub fn from_shared_source(source: Arc<dyn MessageSource>) -> Self {
        Self {
            strategy: SourceStrategy::Explicit(source),
        }
    }

    /// Bundles from `$PARLANCE_BUNDLE_DIR` (or `./i18n`) in the process
    /// default locale, read at every lookup.
    pub fn for_default_locale() -> Self {
        Self::with_locale_provider(DefaultLocaleProvider)
    }

    /// Bundles from `$PARLANCE_BUNDLE_DIR` (or `./i18n`) in a fixed locale.
    pub fn for_locale(locale: Locale) -> Self {
        Self::with_locale_provider(FixedLocaleProvider::new(locale))
    }

    pub fn with_locale_provider(locale_provider: impl LocaleProvider + 'static) -> Self {
        Self {
            strategy: SourceStrategy::Bundles {
                locale_provider: Arc::new(locale_provider),
                loader: Arc::new(DirectoryBundleLoader::from_env()),
                fallback_to_default_locale: true,
            },
        }
    }

    /// Builds a bundle-backed provider from a configuration file's contents.
    pub fn from_config(config: &ProviderConfig) -> anyhow::Result<Self> {
        let provider = match config.parsed_locale()? {
            Some(locale) => Self::for_locale(locale),
            None => Self::for_default_locale(),
        };
        Ok(provider
            .with_loader(config.loader())
            .with_default_locale_fallback(config.fallback_to_default_locale))
    }

    /// Replaces the bundle backend. Has no effect on a provider built around
    /// an explicit message source.
    pub fn with_loader(mut self, new_loader: impl BundleLoader + 'static) -> Self {
        let new_loader: Arc<dyn BundleLoader> = Arc::new(new_loader);
        match &mut self.strategy {
            SourceStrategy::Bundles { loader, .. } => *loader = new_loader,
            SourceStrategy::Explicit(_) => {
                warn!("Ignoring bundle loader: provider uses an explicit message source")
            }
        }
        self
    }

    /// See `ChainedBundleMessageSource::with_default_locale_fallback`. Has no
    /// effect on a provider built around an explicit message source.
    pub fn with_default_locale_fallback(mut self, enabled: bool) -> Self {
        match &mut self.strategy {
            SourceStrategy::Bundles {
                fallback_to_default_locale,
                ..
            } => *fallback_to_default_locale = enabled,
            SourceStrategy::Explicit(_) => {
                warn!("Ignoring locale fallback setting: provider uses an explicit message source")
            }
        }
        self
    }

    /// Validates `C` and returns a fresh implementation of it.
    pub fn create<C: MessageContract>(&self) -> Result<C> {
        self.bind(C::descriptor()).map(C::from_messages)
    }

    /// Validates a contract description and binds it to this provider's
    /// source. Nothing is cached between calls.
    #[instrument(skip_all, fields(contract = %contract.name()))]
    pub fn bind(&self, contract: &'static ContractDescriptor) -> Result<Messages> {
        MessageContractValidator::validate(contract)?;
        Ok(Messages::new(contract, self.source_for(contract)))
    }

    fn source_for(&self, contract: &ContractDescriptor) -> Arc<dyn MessageSource> {
        match &self.strategy {
            SourceStrategy::Explicit(source) => {
                debug!("Using explicit message source");
                Arc::clone(source)
            }
            SourceStrategy::Bundles {
                locale_provider,
                loader,
                fallback_to_default_locale,
            } => {
                let chain = contract.bundle_chain();
                debug!("Using bundle chain {:?}", chain);
                Arc::new(
                    ChainedBundleMessageSource::new(
                        chain,
                        Arc::clone(locale_provider),
                        Arc::clone(loader),
                    )
                    .with_default_locale_fallback(*fallback_to_default_locale),
                )
            }
        }
    }
}

impl fmt::Debug for MessagesProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = match self.strategy {
            SourceStrategy::Explicit(_) => "explicit source",
            SourceStrategy::Bundles { .. } => "bundles",
        };
        f.debug_struct("MessagesProvider").field("mode", &mode).finish()
    }
}
