use crate::{
    format::{Signedness, format_bytes, format_decimal, format_hex},
    value::AbiValue,
};

pub fn print_value(value: &AbiValue) -> String {
    match value {
        AbiValue::Uint(_, word) => format_decimal(*word, Signedness::Unsigned),
        AbiValue::Int(_, word) => format_decimal(*word, Signedness::Signed),
        AbiValue::Bool(b) => b.to_string(),
        AbiValue::Address(address) => format_hex(address.as_bytes()),
        // Only fixed-size bytes get the printable-text heuristic.
        AbiValue::FixedBytes(bytes) => format_bytes(bytes),
        AbiValue::Bytes(bytes) => format_hex(bytes),
        AbiValue::String(text) => format!("{text:?}"),
        AbiValue::FixedArray(_, values) | AbiValue::Array(_, values) => print_array(values),
        AbiValue::Tuple(values) => print_values(values),
    }
}

/// `(a, b, c)`
pub fn print_values(values: &[AbiValue]) -> String {
    format!("({})", join(values))
}

/// `[a, b, c]`
pub fn print_array(values: &[AbiValue]) -> String {
    format!("[{}]", join(values))
}

fn join(values: &[AbiValue]) -> String {
    values
        .iter()
        .map(print_value)
        .collect::<Vec<_>>()
        .join(", ")
}
