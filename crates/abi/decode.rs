use bytes::Bytes;
use ethereum_types::{Address, U256};
use std::iter;
use tracing::trace;

use crate::{
    error::DecodeError,
    format::format_string,
    types::{AbiType, WORD_SIZE},
    value::AbiValue,
};

/// Decodes `buf` as the head/tail encoding of a sequence of values of `types`.
///
/// Every static value sits in the head, one slot after the other. Dynamic values
/// leave an offset in the head which is relative to the start of `buf` and points
/// to their tail.
pub fn decode(types: &[AbiType], buf: &[u8]) -> Result<Vec<AbiValue>, DecodeError> {
    let mut budget = Budget::new(buf.len());
    decode_sequence(types, buf, &mut budget)
}

/// Like [`decode`], skipping the 4-byte method selector in front of `calldata`.
pub fn decode_calldata(types: &[AbiType], calldata: &[u8]) -> Result<Vec<AbiValue>, DecodeError> {
    let args = calldata
        .get(4..)
        .ok_or_else(|| DecodeError::out_of_bounds(0, 4, calldata.len()))?;
    decode(types, args)
}

/// Bytes a decoding run may still account for.
///
/// Every scalar, offset and length word is charged a full word and packed data
/// its length, once it has been read, so a canonical encoding never costs more
/// than its own size.
/// Offsets may alias, and without this bound a small buffer could expand into
/// a value tree that grows exponentially with the nesting depth.
struct Budget {
    remaining: usize,
}

impl Budget {
    fn new(len: usize) -> Self {
        Self { remaining: len }
    }

    fn charge(&mut self, cost: usize) -> Result<(), DecodeError> {
        let Some(remaining) = self.remaining.checked_sub(cost) else {
            trace!(cost, remaining = self.remaining, "Decoding budget exhausted");
            return Err(DecodeError::InvalidLength(U256::from(cost)));
        };
        self.remaining = remaining;
        Ok(())
    }
}

fn decode_sequence<'a, I>(
    types: I,
    buf: &[u8],
    budget: &mut Budget,
) -> Result<Vec<AbiValue>, DecodeError>
where
    I: IntoIterator<Item = &'a AbiType>,
{
    let mut head = 0usize;
    let mut values = Vec::new();
    for abi_type in types {
        let value = if abi_type.is_dynamic() {
            let offset = read_offset(buf, head)?;
            budget.charge(WORD_SIZE)?;
            decode_tail(abi_type, &buf[offset..], budget)?
        } else {
            decode_static(abi_type, buf, head, budget)?
        };
        values.push(value);
        head = head.saturating_add(abi_type.head_size());
    }
    Ok(values)
}

fn decode_static(
    abi_type: &AbiType,
    buf: &[u8],
    at: usize,
    budget: &mut Budget,
) -> Result<AbiValue, DecodeError> {
    let value = match abi_type {
        AbiType::Uint(bits) => {
            AbiValue::Uint(*bits, U256::from_big_endian(charged_word(buf, at, budget)?))
        }
        AbiType::Int(bits) => {
            AbiValue::Int(*bits, U256::from_big_endian(charged_word(buf, at, budget)?))
        }
        AbiType::Bool => AbiValue::Bool(charged_word(buf, at, budget)?.iter().any(|b| *b != 0)),
        AbiType::Address => {
            AbiValue::Address(Address::from_slice(&charged_word(buf, at, budget)?[12..]))
        }
        AbiType::FixedBytes(size) => {
            let word = charged_word(buf, at, budget)?;
            AbiValue::FixedBytes(Bytes::copy_from_slice(&word[..(*size).min(WORD_SIZE)]))
        }
        AbiType::FixedArray(len, element) => {
            let rest = buf
                .get(at..)
                .ok_or_else(|| DecodeError::out_of_bounds(at, 0, buf.len()))?;
            ensure_room(*len, element, rest.len())?;
            AbiValue::FixedArray(
                (**element).clone(),
                decode_sequence(iter::repeat_n(&**element, *len), rest, budget)?,
            )
        }
        AbiType::Tuple(fields) => {
            let rest = buf
                .get(at..)
                .ok_or_else(|| DecodeError::out_of_bounds(at, 0, buf.len()))?;
            AbiValue::Tuple(decode_sequence(fields, rest, budget)?)
        }
        // Reached only when a dynamic type is decoded in place, i.e. from its own tail.
        AbiType::Bytes | AbiType::String | AbiType::Array(_) => {
            let rest = buf
                .get(at..)
                .ok_or_else(|| DecodeError::out_of_bounds(at, 0, buf.len()))?;
            decode_tail(abi_type, rest, budget)?
        }
    };
    Ok(value)
}

/// Decodes a dynamic value whose tail starts at the beginning of `tail`.
fn decode_tail(
    abi_type: &AbiType,
    tail: &[u8],
    budget: &mut Budget,
) -> Result<AbiValue, DecodeError> {
    match abi_type {
        AbiType::Bytes => {
            let data = read_packed(tail, budget)?;
            Ok(AbiValue::Bytes(Bytes::copy_from_slice(data)))
        }
        AbiType::String => Ok(AbiValue::String(format_string(read_packed(tail, budget)?)?)),
        AbiType::Array(element) => {
            let len = read_length(tail)?;
            budget.charge(WORD_SIZE)?;
            let elements = &tail[WORD_SIZE..];
            ensure_room(len, element, elements.len())?;
            Ok(AbiValue::Array(
                (**element).clone(),
                decode_sequence(iter::repeat_n(&**element, len), elements, budget)?,
            ))
        }
        AbiType::FixedArray(len, element) => {
            ensure_room(*len, element, tail.len())?;
            Ok(AbiValue::FixedArray(
                (**element).clone(),
                decode_sequence(iter::repeat_n(&**element, *len), tail, budget)?,
            ))
        }
        AbiType::Tuple(fields) => Ok(AbiValue::Tuple(decode_sequence(fields, tail, budget)?)),
        AbiType::Uint(_)
        | AbiType::Int(_)
        | AbiType::Bool
        | AbiType::Address
        | AbiType::FixedBytes(_) => decode_static(abi_type, tail, 0, budget),
    }
}

/// A scalar's head slot, charged against the budget.
fn charged_word<'a>(
    buf: &'a [u8],
    at: usize,
    budget: &mut Budget,
) -> Result<&'a [u8], DecodeError> {
    let word = read_word(buf, at)?;
    budget.charge(WORD_SIZE)?;
    Ok(word)
}

fn read_word(buf: &[u8], at: usize) -> Result<&[u8], DecodeError> {
    at.checked_add(WORD_SIZE)
        .and_then(|end| buf.get(at..end))
        .ok_or_else(|| DecodeError::out_of_bounds(at, WORD_SIZE, buf.len()))
}

/// Reads the head slot at `at` as an offset into `buf`.
fn read_offset(buf: &[u8], at: usize) -> Result<usize, DecodeError> {
    let offset = U256::from_big_endian(read_word(buf, at)?);
    if offset > U256::from(buf.len()) {
        trace!(%offset, len = buf.len(), "Offset points outside the buffer");
        return Err(DecodeError::InvalidOffset(offset));
    }
    Ok(offset.as_usize())
}

/// Reads the length word at the start of a tail. The word itself is known to
/// be present once this returns.
fn read_length(tail: &[u8]) -> Result<usize, DecodeError> {
    let len = U256::from_big_endian(read_word(tail, 0)?);
    if len > U256::from(tail.len() - WORD_SIZE) {
        trace!(%len, remaining = tail.len() - WORD_SIZE, "Length word exceeds the tail");
        return Err(DecodeError::InvalidLength(len));
    }
    Ok(len.as_usize())
}

/// Length-prefixed byte data, as used by `bytes` and `string`.
fn read_packed<'a>(tail: &'a [u8], budget: &mut Budget) -> Result<&'a [u8], DecodeError> {
    let len = read_length(tail)?;
    budget.charge(WORD_SIZE.saturating_add(len))?;
    Ok(&tail[WORD_SIZE..WORD_SIZE + len])
}

/// Rejects element counts that cannot possibly fit in what is left of the buffer,
/// before anything is allocated for them.
fn ensure_room(len: usize, element: &AbiType, available: usize) -> Result<(), DecodeError> {
    let needed = len.saturating_mul(element.head_size().max(1));
    if needed > available {
        trace!(len, needed, available, "Element count cannot fit in the buffer");
        return Err(DecodeError::InvalidLength(U256::from(len)));
    }
    Ok(())
}
