use bytes::Bytes;
use dapptrace_abi::signature::selector;
use dapptrace_render::{
    ContractInfo, Fetch, FrameContext, MetadataStore, MethodInfo, PlainPainter, SourcePosition,
    Trace, TraceData, TraceTree, render_forest,
};
use dapptrace_test::{concat, word};
use ethereum_types::{Address, H32, H256, U256};

fn foo() -> H256 {
    H256::repeat_byte(0xf0)
}

fn metadata() -> MetadataStore {
    let position = |line| {
        Some(SourcePosition {
            file: "src/Foo.sol".to_owned(),
            line,
        })
    };
    MetadataStore::new().with_contract(
        foo(),
        ContractInfo::new("src/Foo.sol:Foo")
            .with_method(
                H32::from(selector("bar(uint256)")),
                MethodInfo::new("bar(uint256)", Some("bool".parse().unwrap())),
            )
            .with_source_map(vec![position(3), None, position(9)]),
    )
}

fn at(code_hash: H256, op_index: usize, data: TraceData) -> Trace {
    Trace {
        op_index,
        code_hash,
        data,
    }
}

fn sample_forest() -> Vec<TraceTree> {
    let sel = selector("bar(uint256)");
    let context = FrameContext::Call {
        code_hash: foo(),
        address: Address::from_low_u64_be(0xf00),
        selector: Some(H32::from(sel)),
        calldata: Bytes::from(concat(&[&sel, &word(5)])),
        depth: 0,
    };
    vec![
        TraceTree::with_children(
            at(foo(), 0, TraceData::Frame(context.clone())),
            vec![
                TraceTree::leaf(at(
                    foo(),
                    1,
                    TraceData::Query(Fetch::Slot {
                        address: Address::from_low_u64_be(0xf00),
                        slot: U256::from(1),
                    }),
                )),
                TraceTree::leaf(at(
                    foo(),
                    2,
                    TraceData::Return {
                        output: Bytes::copy_from_slice(&word(1)),
                        context,
                    },
                )),
            ],
        ),
        TraceTree::leaf(at(H256::zero(), 0, TraceData::Entry("done".to_owned()))),
    ]
}

#[test]
fn renders_forest_with_locations() {
    let rendered = render_forest(&metadata(), &sample_forest(), &PlainPainter);
    let expected = [
        "call Foo::bar(5) (src/Foo.sol:3)",
        "├─ fetch storage slot 0x1 from 0x0000000000000000000000000000000000000f00 <source not found>",
        "└─ ← bool true (src/Foo.sol:9)",
        "done <no source map>",
    ];
    assert_eq!(rendered.lines().collect::<Vec<_>>(), expected);
}

#[test]
fn empty_forest_renders_nothing() {
    assert_eq!(render_forest(&metadata(), &[], &PlainPainter), "");
}

#[test]
fn forest_survives_json_snapshot() {
    let forest = sample_forest();
    let json = serde_json::to_string(&forest).unwrap();
    let loaded: Vec<TraceTree> = serde_json::from_str(&json).unwrap();
    assert_eq!(loaded, forest);
    assert_eq!(
        render_forest(&metadata(), &loaded, &PlainPainter),
        render_forest(&metadata(), &forest, &PlainPainter)
    );
}

#[test]
fn deep_nesting_keeps_pipes_for_open_siblings() {
    let entry = |label: &str| at(H256::zero(), 0, TraceData::Entry(label.to_owned()));
    let forest = vec![TraceTree::with_children(
        entry("a"),
        vec![
            TraceTree::with_children(
                entry("b"),
                vec![TraceTree::with_children(
                    entry("c"),
                    vec![TraceTree::leaf(entry("d"))],
                )],
            ),
            TraceTree::leaf(entry("e")),
        ],
    )];
    let rendered = render_forest(&MetadataStore::new(), &forest, &PlainPainter);
    let labels: Vec<&str> = rendered
        .lines()
        .map(|line| line.trim_end_matches(" <no source map>"))
        .collect();
    assert_eq!(
        labels,
        ["a", "├─ b", "│  └─ c", "│     └─ d", "└─ e"]
    );
}
