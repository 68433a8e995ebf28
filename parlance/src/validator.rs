//! Contract shape validation, run once per `create`.

use std::ptr;

use tracing::debug;

use crate::contract::{ContractDescriptor, ContractShape};
use crate::error::{MessageError, Result};

#[derive(Debug, Clone, Copy, Default)]
pub struct MessageContractValidator;

impl MessageContractValidator {
    /// Rejects a contract that is not a pure interface, that has an operation
    /// not returning `String` (own or inherited), that declares an operation
    /// twice, or whose inheritance graph has a cycle.
    pub fn validate(contract: &ContractDescriptor) -> Result<()> {
        let mut path = Vec::new();
        check(contract, contract, &mut path)?;
        debug!("Contract '{}' validated", contract.name());
        Ok(())
    }
}

fn check<'a>(
    top: &ContractDescriptor,
    contract: &'a ContractDescriptor,
    path: &mut Vec<&'a ContractDescriptor>,
) -> Result<()> {
    let invalid = |reason: String| MessageError::InvalidContract {
        contract: top.name().to_string(),
        reason,
    };

    if path.iter().any(|seen| ptr::eq(*seen, contract)) {
        return Err(invalid(format!(
            "inheritance cycle through '{}'",
            contract.name()
        )));
    }

    if contract.shape() == ContractShape::Concrete {
        return Err(invalid(format!(
            "'{}' is a concrete type, not an interface",
            contract.name()
        )));
    }

    if let Some(duplicate) = contract.duplicate_operations().first() {
        return Err(invalid(format!(
            "operation '{}' is declared more than once in '{}'",
            duplicate,
            contract.name()
        )));
    }

    for operation in contract.operations() {
        if !operation.return_type().is_text() {
            return Err(invalid(format!(
                "operation '{}::{}' returns `{}` instead of `String`",
                contract.name(),
                operation.name(),
                operation.return_type().type_name()
            )));
        }
    }

    path.push(contract);
    for parent in contract.parents() {
        check(top, parent, path)?;
    }
    path.pop();
    Ok(())
}
