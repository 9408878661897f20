//! Leaf Enumeration Tests
//!
//! ## Scenarios Covered
//!
//! 1. Depth-first enumeration of a mixed nested list
//! 2. Root leaves for null, scalar and empty values
//! 3. Folding empty containers into null leaves
//! 4. Leaf paths survive a serde round trip in raw form
//! 5. Enumeration order is stable between calls

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{boxed_ints, ints};
use deepeq_core::traversal::{enumerate_folded, resolve};
use deepeq_core::{enumerate, LeafPath, NodeKind, Value};

fn raw(paths: &[LeafPath]) -> Vec<Vec<i64>> {
    paths.iter().map(LeafPath::to_raw).collect()
}

#[test]
fn test_enumerate_mixed_nested_list() {
    // GIVEN [1, [2, 3], null, []]
    let value = Value::list([
        Value::Int(1),
        ints(&[2, 3]),
        Value::Null,
        Value::list([]),
    ]);

    // WHEN enumerated
    let paths = enumerate(&value);

    // THEN leaves appear depth-first with their tags
    assert_eq!(
        raw(&paths),
        vec![
            vec![0, 0],
            vec![1, 0, 0],
            vec![1, 1, 0],
            vec![2, -1],
            vec![3, -2],
        ]
    );
    assert_eq!(paths[3].kind(), NodeKind::Null);
    assert_eq!(paths[4].kind(), NodeKind::EmptyContainer);
}

#[test]
fn test_root_leaves() {
    assert_eq!(enumerate(&Value::Null), vec![LeafPath::root(NodeKind::Null)]);
    assert_eq!(enumerate(&Value::from("s")), vec![LeafPath::root(NodeKind::Normal)]);
    assert_eq!(
        enumerate(&Value::set([])),
        vec![LeafPath::root(NodeKind::EmptyContainer)]
    );
}

#[test]
fn test_leaf_count_matches_structure() {
    let value = Value::list([ints(&[1, 2, 3]), boxed_ints(&[None, Some(4)]), Value::list([])]);
    assert_eq!(enumerate(&value).len(), 6);
}

#[test]
fn test_folding_reports_empty_as_null() {
    let value = Value::list([ints(&[]), Value::Null]);
    let folded = enumerate_folded(&value, true);
    assert!(folded.iter().all(|path| path.kind() == NodeKind::Null));
    assert_eq!(enumerate_folded(&value, false), enumerate(&value));
}

#[test]
fn test_every_path_resolves() {
    let value = Value::list([Value::Int(1), ints(&[2, 3]), Value::Null, Value::list([])]);
    for path in enumerate(&value) {
        assert!(resolve(&value, path.indexes()).is_some(), "unresolved {}", path);
    }
}

#[test]
fn test_paths_serde_round_trip() {
    let value = Value::list([Value::Int(1), Value::list([Value::Null])]);
    let paths = enumerate(&value);

    let json = serde_json::to_string(&paths).unwrap();
    assert_eq!(json, "[[0,0],[1,0,-1]]");

    let back: Vec<LeafPath> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, paths);
}

#[test]
fn test_enumeration_is_stable() {
    let value = Value::set([Value::from("b"), Value::from("a"), Value::list([Value::Int(1)])]);
    assert_eq!(enumerate(&value), enumerate(&value.clone()));
}

#[test]
fn test_set_enumeration_is_independent_of_insertion_order() {
    let a = Value::set([Value::from("b"), Value::list([Value::Int(1)]), Value::from("a")]);
    let b = Value::set([Value::list([Value::Int(1)]), Value::from("a"), Value::from("b")]);
    assert_eq!(enumerate(&a), enumerate(&b));
    // Strings rank before lists: two scalar leaves, then the nested one
    assert_eq!(enumerate(&a).last().map(|p| p.indexes().to_vec()), Some(vec![2, 0]));
}
