use std::borrow::Cow;

use deepeq_core_types::NodeKind;

use crate::model::{ArrayValue, Value};
use crate::traversal::leaf_path::LeafPath;

/// Enumerate the leaf paths of `value`, depth-first in element order
///
/// A null yields a `Null` leaf, a non-container a `Normal` leaf, a
/// zero-length container an `EmptyContainer` leaf; non-empty containers
/// recurse into each element.
pub fn enumerate(value: &Value) -> Vec<LeafPath> {
    enumerate_folded(value, false)
}

/// As [`enumerate`], but with `fold_empty` set empty containers are reported
/// as `Null` leaves
pub fn enumerate_folded(value: &Value, fold_empty: bool) -> Vec<LeafPath> {
    let mut paths = Vec::new();
    let mut prefix = Vec::new();
    walk(value, &mut prefix, fold_empty, &mut paths);
    paths
}

fn walk(value: &Value, prefix: &mut Vec<usize>, fold_empty: bool, out: &mut Vec<LeafPath>) {
    let empty_kind = if fold_empty {
        NodeKind::Null
    } else {
        NodeKind::EmptyContainer
    };

    match value {
        Value::Null => out.push(LeafPath::new(prefix.clone(), NodeKind::Null)),
        Value::Array(array) if array.is_empty() => out.push(LeafPath::new(prefix.clone(), empty_kind)),
        Value::List(_) | Value::Set(_) if value.container_len() == Some(0) => {
            out.push(LeafPath::new(prefix.clone(), empty_kind))
        }
        // Unboxed elements can never be null or containers
        Value::Array(array) if !matches!(array, ArrayValue::Ref { .. }) => {
            for index in 0..array.len() {
                prefix.push(index);
                out.push(LeafPath::new(prefix.clone(), NodeKind::Normal));
                prefix.pop();
            }
        }
        Value::Array(ArrayValue::Ref { elements, .. }) | Value::List(elements) => {
            walk_elements(elements, prefix, fold_empty, out)
        }
        Value::Set(set) => walk_elements(set.as_slice(), prefix, fold_empty, out),
        _ => out.push(LeafPath::new(prefix.clone(), NodeKind::Normal)),
    }
}

fn walk_elements(
    elements: &[Value],
    prefix: &mut Vec<usize>,
    fold_empty: bool,
    out: &mut Vec<LeafPath>,
) {
    for (index, element) in elements.iter().enumerate() {
        prefix.push(index);
        walk(element, prefix, fold_empty, out);
        prefix.pop();
    }
}

/// Walk `indexes` down from `root`
///
/// Returns `None` if an index is out of range or a step lands on a
/// non-container.
pub fn resolve<'a>(root: &'a Value, indexes: &[usize]) -> Option<Cow<'a, Value>> {
    let mut current = Cow::Borrowed(root);
    for &index in indexes {
        current = match current {
            Cow::Borrowed(value) => value.child(index)?,
            // Materialized unboxed elements are scalars
            Cow::Owned(_) => return None,
        };
    }
    Some(current)
}
