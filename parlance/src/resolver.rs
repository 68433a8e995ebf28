//! Call-time message resolution.
//!
//! Order: the message source, then the operation's declared default, then the
//! `???key???` placeholder. Only a pattern that came from the source or the
//! default is formatted, and only when arguments were supplied.

use std::fmt::Display;

use parlance_core::{format_positional, MessageSource};
use tracing::debug;

use crate::contract::OperationDescriptor;
use crate::error::{MessageError, Result};

/// Text returned for a key that neither the source nor a default provides.
pub fn missing_key_placeholder(key: &str) -> String {
    format!("???{key}???")
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MessageResolver;

impl MessageResolver {
    /// Resolves one operation call against `source`.
    pub fn resolve_operation(
        operation: &OperationDescriptor,
        args: &[&dyn Display],
        source: &dyn MessageSource,
    ) -> Result<String> {
        Self::resolve(
            operation.resolved_key(),
            operation.declared_default(),
            args,
            source,
        )
    }

    pub fn resolve(
        key: &str,
        declared_default: Option<&str>,
        args: &[&dyn Display],
        source: &dyn MessageSource,
    ) -> Result<String> {
        let found = source.lookup(key).map_err(|e| MessageError::Source {
            key: key.to_string(),
            source: e,
        })?;

        let pattern = match (found, declared_default) {
            (Some(pattern), _) => pattern,
            (None, Some(default)) => {
                debug!("Message '{}' not found, using declared default", key);
                default.to_string()
            }
            (None, None) => {
                debug!("Message '{}' not found and has no default", key);
                return Ok(missing_key_placeholder(key));
            }
        };

        if args.is_empty() {
            return Ok(pattern);
        }

        format_positional(&pattern, args).map_err(|e| MessageError::Format {
            key: key.to_string(),
            source: e,
        })
    }
}
