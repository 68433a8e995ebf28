use parlance_core::{FormatError, SourceError};
use thiserror::Error;

/// Errors surfaced by contract creation and message calls.
///
/// A key that no source knows is not an error; it resolves to the
/// `???key???` placeholder instead.
#[derive(Error, Debug)]
pub enum MessageError {
    #[error("Invalid message contract '{contract}': {reason}")]
    InvalidContract { contract: String, reason: String },
    #[error("Failed to format message '{key}': {source}")]
    Format {
        key: String,
        #[source]
        source: FormatError,
    },
    #[error("Failed to look up message '{key}': {source}")]
    Source {
        key: String,
        #[source]
        source: SourceError,
    },
    #[error("Contract '{contract}' has no operation named '{operation}'")]
    UnknownOperation { contract: String, operation: String },
    #[error("Contract '{target}' is not part of the '{contract}' contract chain")]
    NotInChain { contract: String, target: String },
}

pub type Result<T> = std::result::Result<T, MessageError>;
