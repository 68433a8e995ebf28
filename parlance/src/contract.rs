//! Message contract descriptions.
//!
//! A contract is a named set of message operations plus the contracts it
//! extends. Each operation carries its lookup metadata (explicit key, default
//! pattern) and its declared signature, fixed when the contract is described.
//! `message_contract!` builds these descriptions; they can also be assembled
//! by hand with the builder methods below.

use std::ptr;

use indexmap::IndexMap;
use once_cell::sync::Lazy;

use crate::messages::Messages;

/// Accessor for a contract's static description, used for `extends` links.
pub type DescriptorFn = fn() -> &'static ContractDescriptor;

/// Name of the root marker contract.
pub const ROOT_CONTRACT_NAME: &str = "parlance::RootContract";

/// A type generated for (or written against) a contract description.
pub trait MessageContract: Sized {
    fn descriptor() -> &'static ContractDescriptor;

    /// Wraps a bound handle. Called by `MessagesProvider::create` after the
    /// contract has been validated.
    fn from_messages(messages: Messages) -> Self;

    fn messages(&self) -> &Messages;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractShape {
    /// Pure declaration of operations.
    Interface,
    /// Carries state or behaviour of its own; never a valid contract.
    Concrete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnType {
    Text,
    Unit,
    Other(String),
}

impl ReturnType {
    /// Classifies a type as written in source, e.g. `stringify!(Vec<String>)`.
    pub fn from_type_name(name: &str) -> Self {
        let compact: String = name.chars().filter(|c| !c.is_whitespace()).collect();
        match compact.as_str() {
            "String" | "std::string::String" | "::std::string::String"
            | "alloc::string::String" => ReturnType::Text,
            "" | "()" => ReturnType::Unit,
            _ => ReturnType::Other(compact),
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, ReturnType::Text)
    }

    pub fn type_name(&self) -> &str {
        match self {
            ReturnType::Text => "String",
            ReturnType::Unit => "()",
            ReturnType::Other(name) => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub type_name: String,
}

/// One message-producing operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDescriptor {
    name: String,
    key: Option<String>,
    default_pattern: Option<String>,
    params: Vec<Param>,
    returns: ReturnType,
}

impl OperationDescriptor {
    /// A text-returning operation without parameters, key or default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: None,
            default_pattern: None,
            params: Vec::new(),
            returns: ReturnType::Text,
        }
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn default_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.default_pattern = Some(pattern.into());
        self
    }

    pub fn param(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.params.push(Param {
            name: name.into(),
            type_name: type_name.into(),
        });
        self
    }

    pub fn returns(mut self, returns: ReturnType) -> Self {
        self.returns = returns;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn explicit_key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn declared_default(&self) -> Option<&str> {
        self.default_pattern.as_deref()
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn return_type(&self) -> &ReturnType {
        &self.returns
    }

    /// The lookup key: the explicit key when declared, else the operation name.
    pub fn resolved_key(&self) -> &str {
        self.key.as_deref().unwrap_or(&self.name)
    }
}

/// Static description of a message contract.
#[derive(Debug, Clone)]
pub struct ContractDescriptor {
    name: String,
    bundle: String,
    shape: ContractShape,
    operations: IndexMap<String, OperationDescriptor>,
    duplicate_operations: Vec<String>,
    extends: Vec<DescriptorFn>,
    root: bool,
}

impl ContractDescriptor {
    /// A contract whose bundle name defaults to its own name.
    pub fn interface(name: impl Into<String>) -> Self {
        Self::with_shape(name.into(), ContractShape::Interface)
    }

    /// Description of a concrete type. Always rejected by the validator;
    /// exists so that callers describing arbitrary types get a clear error.
    pub fn concrete(name: impl Into<String>) -> Self {
        Self::with_shape(name.into(), ContractShape::Concrete)
    }

    fn with_shape(name: String, shape: ContractShape) -> Self {
        Self {
            bundle: name.clone(),
            name,
            shape,
            operations: IndexMap::new(),
            duplicate_operations: Vec::new(),
            extends: Vec::new(),
            root: false,
        }
    }

    pub fn bundle(mut self, bundle: impl Into<String>) -> Self {
        self.bundle = bundle.into();
        self
    }

    pub fn operation(mut self, operation: OperationDescriptor) -> Self {
        if self.operations.contains_key(operation.name()) {
            self.duplicate_operations.push(operation.name().to_string());
            return self;
        }
        self.operations.insert(operation.name().to_string(), operation);
        self
    }

    pub fn extends(mut self, parent: DescriptorFn) -> Self {
        self.extends.push(parent);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bundle_name(&self) -> &str {
        &self.bundle
    }

    pub fn shape(&self) -> ContractShape {
        self.shape
    }

    pub fn is_root(&self) -> bool {
        self.root
    }

    /// Operations declared directly on this contract, in declaration order.
    pub fn operations(&self) -> impl Iterator<Item = &OperationDescriptor> {
        self.operations.values()
    }

    pub fn duplicate_operations(&self) -> &[String] {
        &self.duplicate_operations
    }

    /// Directly extended contracts, in declaration order.
    pub fn parents(&self) -> impl Iterator<Item = &'static ContractDescriptor> + '_ {
        self.extends.iter().map(|parent| parent())
    }

    /// Finds an operation on this contract or, depth-first, on its ancestors.
    pub fn find_operation(&self, name: &str) -> Option<&OperationDescriptor> {
        let mut path = Vec::new();
        find_operation_in(self, name, &mut path)
    }

    /// Whether `other` is this contract or one of its ancestors.
    pub fn is_or_extends(&self, other: &ContractDescriptor) -> bool {
        let mut found = false;
        self.walk(&mut |contract| {
            found |= ptr::eq(contract, other);
        });
        found
    }

    /// Bundle names to search for this contract: itself first, then each
    /// extended contract in declaration order, depth-first. The root marker
    /// contributes nothing, and a contract reached twice is listed twice.
    pub fn bundle_chain(&self) -> Vec<String> {
        let mut chain = Vec::new();
        self.walk(&mut |contract| {
            if !contract.is_root() {
                chain.push(contract.bundle.clone());
            }
        });
        chain
    }

    /// Depth-first, self-first visit of the inheritance graph. A contract
    /// already on the current path is not entered again, so a cyclic
    /// description terminates (the validator rejects it separately).
    fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a ContractDescriptor)) {
        let mut path = Vec::new();
        walk_from(self, visit, &mut path);
    }
}

fn walk_from<'a>(
    contract: &'a ContractDescriptor,
    visit: &mut dyn FnMut(&'a ContractDescriptor),
    path: &mut Vec<&'a ContractDescriptor>,
) {
    if path.iter().any(|seen| ptr::eq(*seen, contract)) {
        return;
    }
    visit(contract);
    path.push(contract);
    for parent in contract.parents() {
        walk_from(parent, visit, path);
    }
    path.pop();
}

fn find_operation_in<'a>(
    contract: &'a ContractDescriptor,
    name: &str,
    path: &mut Vec<&'a ContractDescriptor>,
) -> Option<&'a OperationDescriptor> {
    if path.iter().any(|seen| ptr::eq(*seen, contract)) {
        return None;
    }
    if let Some(operation) = contract.operations.get(name) {
        return Some(operation);
    }
    path.push(contract);
    let found = contract
        .parents()
        .find_map(|parent| find_operation_in(parent, name, path));
    path.pop();
    found
}

static ROOT_DESCRIPTOR: Lazy<ContractDescriptor> = Lazy::new(|| ContractDescriptor {
    root: true,
    ..ContractDescriptor::interface(ROOT_CONTRACT_NAME)
});

/// The root marker every declared contract ultimately extends. It has no
/// operations and no bundle of its own.
#[derive(Debug, Clone)]
pub struct RootContract {
    messages: Messages,
}

impl MessageContract for RootContract {
    fn descriptor() -> &'static ContractDescriptor {
        &ROOT_DESCRIPTOR
    }

    fn from_messages(messages: Messages) -> Self {
        Self { messages }
    }

    fn messages(&self) -> &Messages {
        &self.messages
    }
}
