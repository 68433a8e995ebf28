//! parlance
//!
//! Typed message contracts. A contract declares text-producing operations;
//! `MessagesProvider` validates it and hands back an implementation whose
//! every call looks the operation's key up in a message source, falls back
//! to the declared default, and formats the result with the call's
//! arguments.
//!
//! Sources are either supplied directly (`MessagesProvider::new`) or built
//! from bundles named after the contract and its ancestors, localized for a
//! locale chosen at lookup time.
//!
//! A generated type only has methods for the operations its own contract
//! declares. Operations inherited from a parent contract are called through
//! `view::<Parent>()`, which resolves them through the child's source and
//! bundle chain, or by name through `Messages::invoke`:
//!
//! ```
//! use parlance::{message_contract, MessageContract, MessagesProvider, StaticMessageSource};
//!
//! message_contract! {
//!     pub contract Common {
//!         fn ok() -> String;
//!     }
//! }
//!
//! message_contract! {
//!     pub contract Dialog: Common {
//!         fn title() -> String;
//!     }
//! }
//!
//! let source = StaticMessageSource::new()
//!     .with_message("ok", "OK")
//!     .with_message("title", "Save changes?");
//! let dialog: Dialog = MessagesProvider::new(source).create().unwrap();
//!
//! assert_eq!(dialog.title().unwrap(), "Save changes?");
//! assert_eq!(dialog.view::<Common>().unwrap().ok().unwrap(), "OK");
//! assert_eq!(dialog.messages().invoke("ok", &[]).unwrap(), "OK");
//! ```

#[macro_use]
mod macros;

pub mod contract;
pub mod error;
pub mod messages;
pub mod provider;
pub mod resolver;
pub mod validator;

pub use contract::{
    ContractDescriptor, ContractShape, DescriptorFn, MessageContract, OperationDescriptor, Param,
    ReturnType, RootContract, ROOT_CONTRACT_NAME,
};
pub use error::{MessageError, Result};
pub use messages::Messages;
pub use provider::MessagesProvider;
pub use resolver::{missing_key_placeholder, MessageResolver};
pub use validator::MessageContractValidator;

pub use parlance_bundles::{
    Bundle, BundleLoader, ChainedBundleMessageSource, DirectoryBundleLoader, LocalizedBundle,
    MemoryBundleLoader, ProviderConfig, BUNDLE_DIR_ENV,
};
pub use parlance_core::{
    default_locale, format_positional, reload_default_locale_from_env, set_default_locale,
    DefaultLocaleProvider, FixedLocaleProvider, FormatError, Locale, LocaleParseError,
    LocaleProvider, MessageSource, SharedMessageSource, SourceError, StaticMessageSource,
};

#[doc(hidden)]
pub mod __private {
    pub use once_cell::sync::Lazy;
}
