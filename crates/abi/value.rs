use bytes::Bytes;
use ethereum_types::{Address, U256};

use crate::types::AbiType;

/// A decoded ABI value.
///
/// Integers keep the raw 256-bit word they were decoded from. For signed
/// integers that word is the two's complement encoding; the sign is only
/// recovered when the value is formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiValue {
    Uint(usize, U256),
    Int(usize, U256),
    Bool(bool),
    Address(Address),
    FixedBytes(Bytes),
    Bytes(Bytes),
    String(String),
    /// Element type and elements of a `T[N]`.
    FixedArray(AbiType, Vec<AbiValue>),
    /// Element type and elements of a `T[]`.
    Array(AbiType, Vec<AbiValue>),
    Tuple(Vec<AbiValue>),
}

impl AbiValue {
    pub fn abi_type(&self) -> AbiType {
        match self {
            AbiValue::Uint(bits, _) => AbiType::Uint(*bits),
            AbiValue::Int(bits, _) => AbiType::Int(*bits),
            AbiValue::Bool(_) => AbiType::Bool,
            AbiValue::Address(_) => AbiType::Address,
            AbiValue::FixedBytes(bytes) => AbiType::FixedBytes(bytes.len()),
            AbiValue::Bytes(_) => AbiType::Bytes,
            AbiValue::String(_) => AbiType::String,
            AbiValue::FixedArray(element, values) => {
                AbiType::FixedArray(values.len(), Box::new(element.clone()))
            }
            AbiValue::Array(element, _) => AbiType::Array(Box::new(element.clone())),
            AbiValue::Tuple(values) => AbiType::Tuple(values.iter().map(Self::abi_type).collect()),
        }
    }
}
