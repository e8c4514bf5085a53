//! Text rendering of bare words and byte strings.
//!
//! Every function here is total except [`format_string`], which refuses to
//! turn invalid UTF-8 into text.

use std::fmt::Display;

use ethereum_types::{Address, U256};
use keccak_hash::keccak;

/// Rendered in place of the cheat-code address when it shows up as a number.
pub const CHEAT_ADDRESS_TAG: &str = "<hevm cheat address>";
pub const MAX_UINT256_TAG: &str = "MAX_UINT256";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signedness {
    Signed,
    Unsigned,
}

/// The address test contracts call to reach the cheat codes: the low 20 bytes of
/// `keccak256("hevm cheat code")`.
pub fn cheat_code_address() -> Address {
    let hash = keccak(b"hevm cheat code");
    Address::from_slice(&hash.as_bytes()[12..])
}

/// Decimal rendering of a 256-bit word.
///
/// Sentinels are matched against the raw word before the sign is applied, so
/// the all-ones word is `MAX_UINT256` whatever the signedness.
pub fn format_decimal(word: U256, signedness: Signedness) -> String {
    if word == U256::from_big_endian(cheat_code_address().as_bytes()) {
        return CHEAT_ADDRESS_TAG.to_owned();
    }
    if word == U256::MAX {
        return MAX_UINT256_TAG.to_owned();
    }
    if signedness == Signedness::Signed && word.bit(255) {
        let magnitude = (!word).overflowing_add(U256::one()).0;
        return format!("-{magnitude}");
    }
    word.to_string()
}

/// Inserts a comma every three digits, counting from the right. A leading sign is kept.
pub fn humanize_integer<T: Display>(value: T) -> String {
    let text = value.to_string();
    let (sign, digits) = match text.strip_prefix(['-', '+']) {
        Some(digits) => (&text[..1], digits),
        None => ("", text.as_str()),
    };
    let len = digits.chars().count();
    let mut out = String::with_capacity(text.len() + len / 3);
    out.push_str(sign);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn is_printable(bytes: &[u8]) -> bool {
    std::str::from_utf8(bytes).is_ok_and(|text| !text.chars().any(char::is_control))
}

/// `bytes` without its trailing zero padding.
pub fn strip_trailing_zeros(bytes: &[u8]) -> &[u8] {
    let end = bytes.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
    &bytes[..end]
}

/// Quoted text if the unpadded bytes are printable, hex of the padded input otherwise.
pub fn format_bytes(bytes: &[u8]) -> String {
    let stripped = strip_trailing_zeros(bytes);
    if is_printable(stripped) {
        format!("{:?}", String::from_utf8_lossy(stripped))
    } else {
        format_hex(bytes)
    }
}

pub fn format_string(bytes: &[u8]) -> Result<String, std::str::Utf8Error> {
    std::str::from_utf8(strip_trailing_zeros(bytes)).map(str::to_owned)
}

pub fn format_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}
