//! Execution traces as produced by the interpreter. Nothing in this crate
//! builds or modifies them; they are only read while rendering.

use bytes::Bytes;
use ethereum_types::{Address, H32, H256, U256};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single trace entry, tagged with where in the code it was recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    /// Index of the op being executed when the entry was recorded.
    pub op_index: usize,
    /// Code hash of the contract that was executing.
    pub code_hash: H256,
    pub data: TraceData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceData {
    /// Free-form label.
    Entry(String),
    Frame(FrameContext),
    Event(Event),
    Query(Fetch),
    Return {
        #[serde(with = "crate::serde_utils::bytes")]
        output: Bytes,
        context: FrameContext,
    },
    Error(VmError),
}

/// The frame a call or create runs in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameContext {
    Call {
        /// Code hash of the callee.
        code_hash: H256,
        /// Address the callee runs at.
        address: Address,
        /// `None` when the calldata is too short to carry a selector.
        selector: Option<H32>,
        #[serde(with = "crate::serde_utils::bytes")]
        calldata: Bytes,
        depth: usize,
    },
    Create {
        code_hash: H256,
        /// Address of the account being created.
        address: Address,
        depth: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    #[serde(with = "crate::serde_utils::bytes")]
    pub data: Bytes,
    pub topics: Vec<H256>,
}

/// Data the interpreter suspended on, waiting for it to be fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fetch {
    Contract { address: Address },
    Slot { address: Address, slot: U256 },
}

/// Reason a frame halted abnormally.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VmError {
    #[error("Revert")]
    Revert(#[serde(with = "crate::serde_utils::bytes")] Bytes),
    #[error("OutOfGas")]
    OutOfGas,
    #[error("StackUnderrun")]
    StackUnderrun,
    #[error("StackLimitExceeded")]
    StackLimitExceeded,
    #[error("BadJumpDestination")]
    BadJumpDestination,
    #[error("UnrecognizedOpcode 0x{0:02x}")]
    UnrecognizedOpcode(u8),
    #[error("StateChangeWhileStatic")]
    StateChangeWhileStatic,
    #[error("CallDepthLimitReached")]
    CallDepthLimitReached,
    #[error("BalanceTooLow: needed {needed}, available {available}")]
    BalanceTooLow { needed: U256, available: U256 },
    #[error("InvalidMemoryAccess")]
    InvalidMemoryAccess,
    #[error("PrecompileFailure")]
    PrecompileFailure,
}

/// A trace entry together with the entries recorded beneath it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceTree {
    pub trace: Trace,
    #[serde(default)]
    pub children: Vec<TraceTree>,
}

impl TraceTree {
    pub fn leaf(trace: Trace) -> Self {
        Self {
            trace,
            children: Vec::new(),
        }
    }

    pub fn with_children(trace: Trace, children: Vec<TraceTree>) -> Self {
        Self { trace, children }
    }
}
