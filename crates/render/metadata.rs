//! Read-only view of what is known about the contracts and events that show up
//! in a trace.

use std::{collections::BTreeMap, collections::HashMap, fmt};

use dapptrace_abi::AbiType;
use ethereum_types::{H32, H256};
use serde::{Deserialize, Serialize};

use crate::trace::Trace;

/// Placeholder when the executing contract is unknown or came without a source map.
pub const NO_SOURCE_MAP: &str = "<no source map>";
/// Placeholder when the source map has no position for the current op.
pub const SOURCE_NOT_FOUND: &str = "<source not found>";

pub trait Metadata {
    fn contract_by_hash(&self, code_hash: &H256) -> Option<&ContractInfo>;

    fn event_by_topic(&self, topic: &H256) -> Option<&EventInfo>;

    fn source_location(&self, trace: &Trace) -> SourceLocation {
        match self.contract_by_hash(&trace.code_hash) {
            Some(contract) => contract.source_location(trace.op_index),
            None => SourceLocation::Unresolved(NO_SOURCE_MAP.to_owned()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    Unresolved(String),
    Resolved(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractInfo {
    /// Composite `path:Name` identifier as emitted by the compiler.
    pub name: String,
    #[serde(default)]
    pub methods: BTreeMap<H32, MethodInfo>,
    /// Source position of every op, indexed by op index.
    #[serde(default)]
    pub source_map: Vec<Option<SourcePosition>>,
}

impl ContractInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_method(mut self, selector: H32, method: MethodInfo) -> Self {
        self.methods.insert(selector, method);
        self
    }

    pub fn with_source_map(mut self, source_map: Vec<Option<SourcePosition>>) -> Self {
        self.source_map = source_map;
        self
    }

    pub fn display_name(&self) -> &str {
        contract_name_part(&self.name)
    }

    pub fn source_path(&self) -> &str {
        contract_path_part(&self.name)
    }

    pub fn method_signature(&self, selector: &H32) -> Option<&str> {
        self.methods
            .get(selector)
            .map(|method| method.signature.as_str())
    }

    pub fn method_output_type(&self, selector: &H32) -> Option<&AbiType> {
        self.methods.get(selector)?.output.as_ref()
    }

    pub fn source_location(&self, op_index: usize) -> SourceLocation {
        if self.source_map.is_empty() {
            return SourceLocation::Unresolved(NO_SOURCE_MAP.to_owned());
        }
        match self.source_map.get(op_index) {
            Some(Some(position)) => SourceLocation::Resolved(position.to_string()),
            _ => SourceLocation::Unresolved(SOURCE_NOT_FOUND.to_owned()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodInfo {
    /// e.g. `transfer(address,uint256)`
    pub signature: String,
    #[serde(default)]
    pub output: Option<AbiType>,
}

impl MethodInfo {
    pub fn new(signature: impl Into<String>, output: Option<AbiType>) -> Self {
        Self {
            signature: signature.into(),
            output,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcePosition {
    pub file: String,
    pub line: usize,
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventInfo {
    pub name: String,
    pub fields: Vec<EventField>,
}

impl EventInfo {
    /// Types of the fields stored in the log data, in declaration order.
    pub fn non_indexed_types(&self) -> Vec<AbiType> {
        self.fields
            .iter()
            .filter(|field| !field.indexed)
            .map(|field| field.abi_type.clone())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventField {
    #[serde(rename = "type")]
    pub abi_type: AbiType,
    #[serde(default)]
    pub indexed: bool,
}

/// `Name` out of a `path:Name` identifier.
pub fn contract_name_part(identifier: &str) -> &str {
    identifier
        .split_once(':')
        .map_or(identifier, |(_, name)| name)
}

/// `path` out of a `path:Name` identifier.
pub fn contract_path_part(identifier: &str) -> &str {
    identifier
        .split_once(':')
        .map_or(identifier, |(path, _)| path)
}

/// In-memory [`Metadata`], loadable from a JSON snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetadataStore {
    #[serde(default)]
    pub contracts: HashMap<H256, ContractInfo>,
    #[serde(default)]
    pub events: HashMap<H256, EventInfo>,
}

impl MetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contract(mut self, code_hash: H256, contract: ContractInfo) -> Self {
        self.contracts.insert(code_hash, contract);
        self
    }

    pub fn with_event(mut self, topic: H256, event: EventInfo) -> Self {
        self.events.insert(topic, event);
        self
    }
}

impl Metadata for MetadataStore {
    fn contract_by_hash(&self, code_hash: &H256) -> Option<&ContractInfo> {
        self.contracts.get(code_hash)
    }

    fn event_by_topic(&self, topic: &H256) -> Option<&EventInfo> {
        self.events.get(topic)
    }
}
