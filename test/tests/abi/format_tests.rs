use dapptrace_abi::format::{
    CHEAT_ADDRESS_TAG, Signedness, cheat_code_address, format_bytes, format_decimal, format_hex,
    format_string, humanize_integer, is_printable,
};
use ethereum_types::U256;
use hex_literal::hex;

#[test]
fn all_ones_word_is_max_uint256() {
    assert_eq!(format_decimal(U256::MAX, Signedness::Unsigned), "MAX_UINT256");
}

#[test]
fn cheat_code_address_is_tagged() {
    let word = U256::from_big_endian(&hex!("7109709ecfa91a80626ff3989d68f67f5b1dd12d"));
    assert_eq!(word, U256::from_big_endian(cheat_code_address().as_bytes()));
    assert_eq!(format_decimal(word, Signedness::Unsigned), CHEAT_ADDRESS_TAG);
}

#[test]
fn zero_and_plain_numbers() {
    assert_eq!(format_decimal(U256::zero(), Signedness::Unsigned), "0");
    assert_eq!(
        format_decimal(U256::from(1_000_000_007u64), Signedness::Unsigned),
        "1000000007"
    );
}

#[test]
fn thousands_separators() {
    assert_eq!(humanize_integer(1234567), "1,234,567");
    assert_eq!(humanize_integer(12), "12");
    assert_eq!(humanize_integer(-1234), "-1,234");
    assert_eq!(humanize_integer(0), "0");
}

#[test]
fn padded_printable_bytes_render_as_text() {
    let mut data = b"DAI".to_vec();
    data.extend_from_slice(&[0; 29]);
    assert_eq!(format_bytes(&data), "\"DAI\"");
}

#[test]
fn binary_bytes_render_unstripped_hex() {
    let data = hex!("01ff000000");
    assert!(!is_printable(&data));
    assert_eq!(format_bytes(&data), "0x01ff000000");
}

#[test]
fn strings_are_strict_about_utf8() {
    assert_eq!(format_string(b"gm\0\0").unwrap(), "gm");
    assert!(format_string(&hex!("c328")).is_err());
    assert_eq!(format_hex(&[]), "0x");
}
