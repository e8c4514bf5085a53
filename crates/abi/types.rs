use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error};

use crate::error::TypeParseError;

/// Size of a head slot, and of every length/offset word.
pub const WORD_SIZE: usize = 32;

/// Deepest nesting of arrays and tuples the type parser accepts.
pub const MAX_TYPE_DEPTH: usize = 64;

/// Type descriptor for a single ABI value.
///
/// Integer variants carry their bit width, [`AbiType::FixedBytes`] its size in
/// bytes and [`AbiType::FixedArray`] its element count.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AbiType {
    Uint(usize),
    Int(usize),
    Bool,
    Address,
    FixedBytes(usize),
    Bytes,
    String,
    FixedArray(usize, Box<AbiType>),
    Array(Box<AbiType>),
    Tuple(Vec<AbiType>),
}

impl AbiType {
    /// Dynamic types are stored behind an offset in the head of the enclosing sequence.
    pub fn is_dynamic(&self) -> bool {
        match self {
            AbiType::Bytes | AbiType::String | AbiType::Array(_) => true,
            AbiType::FixedArray(_, element) => element.is_dynamic(),
            AbiType::Tuple(fields) => fields.iter().any(AbiType::is_dynamic),
            AbiType::Uint(_)
            | AbiType::Int(_)
            | AbiType::Bool
            | AbiType::Address
            | AbiType::FixedBytes(_) => false,
        }
    }

    /// Number of bytes this type occupies in the head of the enclosing sequence.
    pub fn head_size(&self) -> usize {
        if self.is_dynamic() {
            return WORD_SIZE;
        }
        match self {
            AbiType::FixedArray(len, element) => len.saturating_mul(element.head_size()),
            AbiType::Tuple(fields) => fields
                .iter()
                .fold(0usize, |acc, field| acc.saturating_add(field.head_size())),
            _ => WORD_SIZE,
        }
    }
}

impl fmt::Display for AbiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbiType::Uint(bits) => write!(f, "uint{bits}"),
            AbiType::Int(bits) => write!(f, "int{bits}"),
            AbiType::Bool => f.write_str("bool"),
            AbiType::Address => f.write_str("address"),
            AbiType::FixedBytes(size) => write!(f, "bytes{size}"),
            AbiType::Bytes => f.write_str("bytes"),
            AbiType::String => f.write_str("string"),
            AbiType::FixedArray(len, element) => write!(f, "{element}[{len}]"),
            AbiType::Array(element) => write!(f, "{element}[]"),
            AbiType::Tuple(fields) => {
                f.write_str("(")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{field}")?;
                }
                f.write_str(")")
            }
        }
    }
}

impl FromStr for AbiType {
    type Err = TypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_type(s, 0)
    }
}

fn parse_type(s: &str, depth: usize) -> Result<AbiType, TypeParseError> {
    if depth > MAX_TYPE_DEPTH {
        return Err(TypeParseError::TooDeep(MAX_TYPE_DEPTH));
    }
    let s = s.trim();

    // Array suffixes bind last: `(uint8,bool)[2][]` is a dynamic array of `(uint8,bool)[2]`.
    if let Some(body) = s.strip_suffix(']') {
        let open = body
            .rfind('[')
            .ok_or_else(|| TypeParseError::Unbalanced(s.to_owned()))?;
        let element = parse_type(&body[..open], depth + 1)?;
        let len = body[open + 1..].trim();
        if len.is_empty() {
            return Ok(AbiType::Array(Box::new(element)));
        }
        let len: usize = len
            .parse()
            .map_err(|_| TypeParseError::InvalidArrayLength(s.to_owned()))?;
        if len == 0 {
            return Err(TypeParseError::InvalidArrayLength(s.to_owned()));
        }
        return Ok(AbiType::FixedArray(len, Box::new(element)));
    }

    if let Some(body) = s.strip_prefix("tuple(").or_else(|| s.strip_prefix('(')) {
        let body = body
            .strip_suffix(')')
            .ok_or_else(|| TypeParseError::Unbalanced(s.to_owned()))?;
        let fields = split_top_level(body)?
            .into_iter()
            .map(|field| parse_param_at(field, depth + 1))
            .collect::<Result<Vec<_>, _>>()?;
        if fields.is_empty() {
            return Err(TypeParseError::EmptyTuple);
        }
        return Ok(AbiType::Tuple(fields));
    }

    match s {
        "bool" => Ok(AbiType::Bool),
        "address" => Ok(AbiType::Address),
        "string" => Ok(AbiType::String),
        "bytes" => Ok(AbiType::Bytes),
        "uint" => Ok(AbiType::Uint(256)),
        "int" => Ok(AbiType::Int(256)),
        _ => {
            if let Some(bits) = s.strip_prefix("uint") {
                parse_bit_width(bits, s).map(AbiType::Uint)
            } else if let Some(bits) = s.strip_prefix("int") {
                parse_bit_width(bits, s).map(AbiType::Int)
            } else if let Some(size) = s.strip_prefix("bytes") {
                match size.parse::<usize>() {
                    Ok(size) if (1..=WORD_SIZE).contains(&size) => {
                        Ok(AbiType::FixedBytes(size))
                    }
                    _ => Err(TypeParseError::InvalidBytesSize(s.to_owned())),
                }
            } else {
                Err(TypeParseError::Unknown(s.to_owned()))
            }
        }
    }
}

fn parse_bit_width(bits: &str, whole: &str) -> Result<usize, TypeParseError> {
    match bits.parse::<usize>() {
        Ok(bits) if bits > 0 && bits <= 256 && bits % 8 == 0 => Ok(bits),
        _ => Err(TypeParseError::InvalidBitWidth(whole.to_owned())),
    }
}

/// Parses a single parameter declaration, dropping its name and any data
/// location or `indexed` keyword, e.g. `uint256[] memory amounts`.
pub fn parse_param(param: &str) -> Result<AbiType, TypeParseError> {
    parse_param_at(param, 0)
}

fn parse_param_at(param: &str, depth: usize) -> Result<AbiType, TypeParseError> {
    let param = param.trim();
    let mut nesting = 0usize;
    for (i, c) in param.char_indices() {
        match c {
            '(' | '[' => nesting += 1,
            ')' | ']' => nesting = nesting.saturating_sub(1),
            c if c.is_whitespace() && nesting == 0 => return parse_type(&param[..i], depth),
            _ => {}
        }
    }
    parse_type(param, depth)
}

/// Splits a comma-separated parameter list at the commas that are not nested
/// inside a tuple or array. An empty (or blank) list yields no parameters.
pub fn split_top_level(list: &str) -> Result<Vec<&str>, TypeParseError> {
    if list.trim().is_empty() {
        return Ok(Vec::new());
    }
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in list.char_indices() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| TypeParseError::Unbalanced(list.to_owned()))?;
            }
            ',' if depth == 0 => {
                parts.push(&list[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(TypeParseError::Unbalanced(list.to_owned()));
    }
    parts.push(&list[start..]);
    Ok(parts)
}

impl Serialize for AbiType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for AbiType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(|e: TypeParseError| D::Error::custom(e.to_string()))
    }
}
