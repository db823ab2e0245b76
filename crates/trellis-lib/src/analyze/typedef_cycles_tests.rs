use crate::diagnostics::DiagnosticKind;
use crate::test_utils::*;
use crate::types::TYPE_I32;

#[test]
fn two_typedefs_naming_each_other() {
    let files = vec![
        FileBuilder::new("a.thrift")
            .typedef("B", "A")
            .typedef("A", "B")
            .build(),
    ];

    let (_, diagnostics) = link_unchecked(files);
    assert_eq!(diagnostics.len(), 1);
    insta::assert_snapshot!(
        diagnostics.render(),
        @"error at a.thrift:1:1: cyclic typedef: `A` -> `B` -> `A` (related: `B` is declared here at a.thrift:2:1) (hint: a typedef must eventually name a non-typedef type)"
    );
}

#[test]
fn typedef_naming_itself() {
    let files = vec![FileBuilder::new("a.thrift").typedef("Loop", "Loop").build()];

    insta::assert_snapshot!(
        expect_invalid(files),
        @"error at a.thrift:1:1: cyclic typedef: `Loop` -> `Loop` (hint: a typedef must eventually name a non-typedef type)"
    );
}

#[test]
fn cycle_through_collection_parameter() {
    let files = vec![
        FileBuilder::new("a.thrift")
            .typedef("map<string, list<Tree>>", "Tree")
            .build(),
    ];

    insta::assert_snapshot!(
        expect_invalid(files),
        @"error at a.thrift:1:1: cyclic typedef: `Tree` -> `Tree` (hint: a typedef must eventually name a non-typedef type)"
    );
}

#[test]
fn cycle_across_files() {
    let files = vec![
        FileBuilder::new("a.thrift")
            .include("b.thrift")
            .typedef("b.Right", "Left")
            .build(),
        FileBuilder::new("b.thrift")
            .include("a.thrift")
            .typedef("a.Left", "Right")
            .build(),
    ];

    let (_, diagnostics) = link_unchecked(files);
    assert_eq!(diagnostics.count_of(DiagnosticKind::CyclicTypedef), 1);
    assert_eq!(diagnostics.len(), 1);
}

#[test]
fn each_cycle_is_reported_once() {
    let files = vec![
        FileBuilder::new("a.thrift")
            .typedef("B", "A")
            .typedef("A", "B")
            .typedef("D", "C")
            .typedef("C", "D")
            .typedef("A", "Tail")
            .build(),
    ];

    let (_, diagnostics) = link_unchecked(files);
    assert_eq!(diagnostics.count_of(DiagnosticKind::CyclicTypedef), 2);
    assert_eq!(diagnostics.len(), 2);
}

#[test]
fn typedef_chain_resolves_to_base_type() {
    let files = vec![
        FileBuilder::new("a.thrift")
            .typedef("B", "C")
            .typedef("A", "B")
            .typedef("i32", "A")
            .build(),
    ];

    let schema = expect_valid(files);
    let c = schema.find_type("C").unwrap();
    assert_eq!(schema.graph().true_type(c), Some(TYPE_I32));
}

#[test]
fn recursive_struct_is_not_a_typedef_cycle() {
    let files = vec![
        FileBuilder::new("a.thrift")
            .typedef("list<Node>", "Children")
            .structure("Node", vec![field(1, "Children", "children")])
            .build(),
    ];

    let schema = expect_valid(files);
    assert_eq!(schema.typedefs().len(), 1);
}
