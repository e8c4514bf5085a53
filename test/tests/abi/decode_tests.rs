use dapptrace_abi::{
    AbiType, AbiValue, DecodeError, Signedness, decode, format::format_decimal, print_value,
    print_values,
};
use dapptrace_test::{concat, padded, word};
use ethereum_types::U256;

#[test]
fn static_integers_round_trip_to_decimal() {
    let words = [
        U256::zero(),
        U256::from(1),
        U256::from(u64::MAX),
        U256::one() << 200,
        U256::MAX - U256::one(),
    ];
    let buf: Vec<u8> = words.iter().flat_map(|w| w.to_big_endian()).collect();
    let types = vec![AbiType::Uint(256); words.len()];

    let values = decode(&types, &buf).unwrap();
    for (value, expected) in values.iter().zip(words) {
        assert_eq!(print_value(value), expected.to_string());
        assert_eq!(
            print_value(value),
            format_decimal(expected, Signedness::Unsigned)
        );
    }
}

#[test]
fn signed_integers_are_interpreted_when_printed() {
    let minus_two = (!U256::from(2)).overflowing_add(U256::one()).0;
    let buf = concat(&[&minus_two.to_big_endian(), &word(2)]);
    let values = decode(&[AbiType::Int(8), AbiType::Int(256)], &buf).unwrap();
    assert_eq!(values[0], AbiValue::Int(8, minus_two));
    assert_eq!(print_values(&values), "(-2, 2)");
}

#[test]
fn dynamic_array_of_strings() {
    // string[]: offset, length, then one head per element relative to the elements' start.
    let buf = concat(&[
        &word(0x20),
        &word(2),
        &word(0x40),
        &word(0x80),
        &word(1),
        &padded(b"a"),
        &word(2),
        &padded(b"bc"),
    ]);
    let values = decode(&[AbiType::Array(Box::new(AbiType::String))], &buf).unwrap();
    assert_eq!(print_values(&values), "([\"a\", \"bc\"])");
}

#[test]
fn tuple_with_dynamic_member_is_indirected() {
    let buf = concat(&[&word(0x20), &word(7), &word(0x40), &word(3), &padded(b"abc")]);
    let types = [AbiType::Tuple(vec![AbiType::Uint(256), AbiType::String])];
    let values = decode(&types, &buf).unwrap();
    assert_eq!(
        values,
        vec![AbiValue::Tuple(vec![
            AbiValue::Uint(256, U256::from(7)),
            AbiValue::String("abc".to_owned()),
        ])]
    );
}

#[test]
fn fixed_array_of_dynamic_elements() {
    // (string[2], bool): the array is a single offset slot followed by the bool head.
    let buf = concat(&[
        &word(0x40),
        &word(1),
        &word(0x40),
        &word(0x80),
        &word(1),
        &padded(b"x"),
        &word(1),
        &padded(b"y"),
    ]);
    let types = ["string[2]".parse::<AbiType>().unwrap(), AbiType::Bool];
    let values = decode(&types, &buf).unwrap();
    assert_eq!(print_values(&values), "([\"x\", \"y\"], true)");
}

#[test]
fn static_fixed_array_is_inline() {
    let buf = concat(&[&word(1), &word(2), &word(3), &word(4)]);
    let types = ["uint8[3]".parse::<AbiType>().unwrap(), AbiType::Uint(8)];
    let values = decode(&types, &buf).unwrap();
    assert_eq!(print_values(&values), "([1, 2, 3], 4)");
}

#[test]
fn string_length_past_end_is_a_decode_failure() {
    let buf = concat(&[&word(0x20), &word(64), &padded(b"too short")]);
    assert!(matches!(
        decode(&[AbiType::String], &buf),
        Err(DecodeError::InvalidLength(_))
    ));
}

#[test]
fn nested_offset_past_end_is_a_decode_failure() {
    let buf = concat(&[&word(0x20), &word(1), &word(0x400)]);
    assert!(matches!(
        decode(&[AbiType::Array(Box::new(AbiType::Bytes))], &buf),
        Err(DecodeError::InvalidOffset(_))
    ));
}

#[test]
fn empty_input_decodes_to_nothing() {
    assert_eq!(decode(&[], &[]).unwrap(), vec![]);
    assert!(decode(&[AbiType::Bool], &[]).is_err());
}
