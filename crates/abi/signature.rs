//! Method and error signatures, e.g. `transfer(address,uint256)`.

use keccak_hash::keccak;

use crate::{
    error::TypeParseError,
    types::{AbiType, parse_param, split_top_level},
};

/// Signature of the error that `require(cond, "reason")` and `revert("reason")` produce.
pub const ERROR_STRING_SIGNATURE: &str = "Error(string)";

/// First four bytes of the keccak hash of `signature`.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak(signature.trim().as_bytes());
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&hash.as_bytes()[..4]);
    selector
}

pub fn error_string_selector() -> [u8; 4] {
    selector(ERROR_STRING_SIGNATURE)
}

/// The part of a signature before its parameter list.
pub fn method_name(signature: &str) -> &str {
    let signature = signature.trim();
    let signature = signature.strip_prefix("function ").unwrap_or(signature);
    signature
        .split_once('(')
        .map_or(signature, |(name, _)| name)
        .trim()
}

/// Parameter types of a signature. Fails if any single parameter does not parse.
pub fn parse_param_types(signature: &str) -> Result<Vec<AbiType>, TypeParseError> {
    let signature = signature.trim();
    let (_, params) = signature
        .split_once('(')
        .ok_or_else(|| TypeParseError::Unbalanced(signature.to_owned()))?;
    let params = params
        .strip_suffix(')')
        .ok_or_else(|| TypeParseError::Unbalanced(signature.to_owned()))?;
    split_top_level(params)?
        .into_iter()
        .map(parse_param)
        .collect()
}
