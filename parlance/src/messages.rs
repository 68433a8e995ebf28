//! The bound handle behind every contract implementation.

use std::fmt::{self, Debug, Display};
use std::sync::Arc;

use parlance_core::MessageSource;

use crate::contract::{ContractDescriptor, MessageContract};
use crate::error::{MessageError, Result};
use crate::resolver::MessageResolver;

/// A contract description bound to a message source.
///
/// Cheap to clone and holds no state besides the two references; every call
/// resolves afresh against the source.
#[derive(Clone)]
pub struct Messages {
    contract: &'static ContractDescriptor,
    source: Arc<dyn MessageSource>,
}

impl Messages {
    pub(crate) fn new(contract: &'static ContractDescriptor, source: Arc<dyn MessageSource>) -> Self {
        Self { contract, source }
    }

    pub fn descriptor(&self) -> &'static ContractDescriptor {
        self.contract
    }

    pub fn source(&self) -> &Arc<dyn MessageSource> {
        &self.source
    }

    /// Calls `operation` (declared on the contract or inherited) with
    /// positional arguments.
    pub fn invoke(&self, operation: &str, args: &[&dyn Display]) -> Result<String> {
        let descriptor = self.contract.find_operation(operation).ok_or_else(|| {
            MessageError::UnknownOperation {
                contract: self.contract.name().to_string(),
                operation: operation.to_string(),
            }
        })?;
        MessageResolver::resolve_operation(descriptor, args, self.source.as_ref())
    }

    /// Views this handle as an ancestor contract. The ancestor's operations
    /// resolve through the same source, and so through this contract's
    /// bundle chain.
    pub fn view<P: MessageContract>(&self) -> Result<P> {
        let target = P::descriptor();
        if !self.contract.is_or_extends(target) {
            return Err(MessageError::NotInChain {
                contract: self.contract.name().to_string(),
                target: target.name().to_string(),
            });
        }
        Ok(P::from_messages(Self::new(target, Arc::clone(&self.source))))
    }
}

impl Debug for Messages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Messages")
            .field("contract", &self.contract.name())
            .finish_non_exhaustive()
    }
}
