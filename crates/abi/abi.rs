//! Decoding and pretty-printing of Ethereum contract ABI values.
//!
//! The crate is split the same way the data flows: [`types`] describes what a
//! buffer is supposed to contain, [`decode`] turns raw head/tail encoded bytes
//! into an [`AbiValue`] tree, and [`format`]/[`print`] turn those trees (or bare
//! words and byte strings) into text.

pub mod decode;
pub mod error;
pub mod format;
pub mod print;
pub mod signature;
pub mod types;
pub mod value;

pub use decode::{decode, decode_calldata};
pub use error::{DecodeError, TypeParseError};
pub use format::Signedness;
pub use print::{print_array, print_value, print_values};
pub use types::AbiType;
pub use value::AbiValue;
