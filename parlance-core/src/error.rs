//! Error types shared by every parlance layer.

use thiserror::Error;

/// A pattern could not be formatted with the supplied arguments.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Unterminated placeholder starting at offset {position} in pattern '{pattern}'")]
    UnterminatedPlaceholder { pattern: String, position: usize },
    #[error("Invalid placeholder '{{{placeholder}}}' in pattern '{pattern}'")]
    InvalidIndex { pattern: String, placeholder: String },
    #[error("Pattern '{pattern}' references argument {index} but only {supplied} were supplied")]
    MissingArgument {
        pattern: String,
        index: usize,
        supplied: usize,
    },
    #[error("Unsupported format style '{style}' for argument {index} in pattern '{pattern}'")]
    UnsupportedStyle {
        pattern: String,
        index: String,
        style: String,
    },
    #[error("Unterminated quote starting at offset {position} in pattern '{pattern}'")]
    UnterminatedQuote { pattern: String, position: usize },
}

/// A message backend failed for a reason other than "key not found".
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("I/O error reading bundle '{bundle}': {source}")]
    Io {
        bundle: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed bundle '{bundle}' at line {line}: {reason}")]
    Malformed {
        bundle: String,
        line: usize,
        reason: String,
    },
    #[error("Invalid YAML in bundle '{bundle}': {reason}")]
    Yaml { bundle: String, reason: String },
    #[error("Message source failure: {0}")]
    Backend(String),
}

/// A locale string could not be understood.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid locale '{input}': {reason}")]
pub struct LocaleParseError {
    pub input: String,
    pub reason: &'static str,
}
