use ethereum_types::U256;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum DecodeError {
    #[error("Buffer too short: needed {needed} bytes at offset {offset}, only {available} available")]
    OutOfBounds {
        offset: usize,
        needed: usize,
        available: usize,
    },
    #[error("Offset {0} points outside the buffer")]
    InvalidOffset(U256),
    #[error("Length {0} exceeds the remaining buffer")]
    InvalidLength(U256),
    #[error("Invalid UTF-8 in string value: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

impl DecodeError {
    pub fn out_of_bounds(offset: usize, needed: usize, available: usize) -> Self {
        Self::OutOfBounds {
            offset,
            needed,
            available,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum TypeParseError {
    #[error("Unknown type `{0}`")]
    Unknown(String),
    #[error("Invalid integer bit width in `{0}`")]
    InvalidBitWidth(String),
    #[error("Invalid fixed bytes size in `{0}`")]
    InvalidBytesSize(String),
    #[error("Invalid array length in `{0}`")]
    InvalidArrayLength(String),
    #[error("Unbalanced brackets in `{0}`")]
    Unbalanced(String),
    #[error("Empty tuple type")]
    EmptyTuple,
    #[error("Type nested deeper than {0} levels")]
    TooDeep(usize),
}
