use dapptrace_abi::{
    AbiType, decode,
    format::{CHEAT_ADDRESS_TAG, MAX_UINT256_TAG, cheat_code_address},
    print_value, print_values,
};
use dapptrace_test::word;
use ethereum_types::U256;
use proptest::{
    collection::vec, prelude::*, proptest, test_runner::Config as ProptestConfig,
};

fn static_type() -> impl Strategy<Value = AbiType> {
    prop_oneof![
        (1usize..=32).prop_map(|n| AbiType::Uint(n * 8)),
        (1usize..=32).prop_map(|n| AbiType::Int(n * 8)),
        Just(AbiType::Bool),
        Just(AbiType::Address),
    ]
}

/// A list of static types together with one random head word per type.
fn static_types_with_words() -> impl Strategy<Value = (Vec<AbiType>, Vec<[u8; 32]>)> {
    vec(static_type(), 0..16).prop_flat_map(|types| {
        let n = types.len();
        (Just(types), vec(any::<[u8; 32]>(), n))
    })
}

fn any_type() -> impl Strategy<Value = AbiType> {
    let leaf = prop_oneof![
        static_type(),
        (1usize..=32).prop_map(AbiType::FixedBytes),
        Just(AbiType::Bytes),
        Just(AbiType::String),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(|t| AbiType::Array(Box::new(t))),
            (1usize..4, inner.clone()).prop_map(|(len, t)| AbiType::FixedArray(len, Box::new(t))),
            vec(inner, 1..4).prop_map(AbiType::Tuple),
        ]
    })
}

/// Mostly small words, so that offsets and lengths often land inside the buffer,
/// followed by a ragged tail.
fn encoded_bytes() -> impl Strategy<Value = Vec<u8>> {
    (
        vec(
            prop_oneof![(0u64..0x200).prop_map(word), any::<[u8; 32]>()],
            0..24,
        ),
        vec(any::<u8>(), 0..32),
    )
        .prop_map(|(words, ragged)| {
            let mut buf = words.concat();
            buf.extend(ragged);
            buf
        })
}

fn expected_decimal(abi_type: &AbiType, word: U256) -> String {
    if word == U256::from_big_endian(cheat_code_address().as_bytes()) {
        return CHEAT_ADDRESS_TAG.to_owned();
    }
    if word == U256::MAX {
        return MAX_UINT256_TAG.to_owned();
    }
    match abi_type {
        AbiType::Int(_) if word.bit(255) => format!("-{}", U256::MAX - word + U256::one()),
        _ => word.to_string(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn proptest_static_values_print_as_their_words((types, words) in static_types_with_words()) {
        let buf = words.concat();
        let values = decode(&types, &buf);
        prop_assert!(values.is_ok());
        let values = values.unwrap();
        prop_assert_eq!(values.len(), types.len());

        for ((abi_type, word), value) in types.iter().zip(&words).zip(&values) {
            let word = U256::from_big_endian(word);
            let expected = match abi_type {
                AbiType::Uint(_) | AbiType::Int(_) => expected_decimal(abi_type, word),
                AbiType::Bool => (!word.is_zero()).to_string(),
                _ => format!("0x{}", hex::encode(&word.to_big_endian()[12..])),
            };
            prop_assert_eq!(print_value(value), expected);
        }
    }

    #[test]
    fn proptest_decode_never_panics(types in vec(any_type(), 0..4), buf in encoded_bytes()) {
        if let Ok(values) = decode(&types, &buf) {
            prop_assert_eq!(values.len(), types.len());
            print_values(&values);
        }
    }
}
