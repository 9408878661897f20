//! Canonical total order over values
//!
//! Orders by variant first, then by content. Floating point goes through
//! `total_cmp`, so two floats compare `Equal` exactly when their bit patterns
//! match. `canonical_cmp(a, b) == Equal` holds exactly when `a == b`, which
//! lets sets sort and deduplicate in one pass.

use std::borrow::Borrow;
use std::cmp::Ordering;

use crate::model::value::{ObjectValue, Value};

fn rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Byte(_) => 2,
        Value::Char(_) => 3,
        Value::Short(_) => 4,
        Value::Int(_) => 5,
        Value::Long(_) => 6,
        Value::Float(_) => 7,
        Value::Double(_) => 8,
        Value::Str(_) => 9,
        Value::Enum { .. } => 10,
        Value::Object(_) => 11,
        Value::Array(_) => 12,
        Value::List(_) => 13,
        Value::Set(_) => 14,
    }
}

pub fn canonical_cmp(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Byte(x), Value::Byte(y)) => x.cmp(y),
        (Value::Char(x), Value::Char(y)) => x.cmp(y),
        (Value::Short(x), Value::Short(y)) => x.cmp(y),
        (Value::Int(x), Value::Int(y)) => x.cmp(y),
        (Value::Long(x), Value::Long(y)) => x.cmp(y),
        (Value::Float(x), Value::Float(y)) => x.total_cmp(y),
        (Value::Double(x), Value::Double(y)) => x.total_cmp(y),
        (Value::Str(x), Value::Str(y)) => x.cmp(y),
        (
            Value::Enum {
                type_name: tx,
                variant: vx,
            },
            Value::Enum {
                type_name: ty,
                variant: vy,
            },
        ) => tx.cmp(ty).then_with(|| vx.cmp(vy)),
        (Value::Object(x), Value::Object(y)) => cmp_objects(x, y),
        // Same array type implies the same storage variant
        (Value::Array(x), Value::Array(y)) => x
            .array_type()
            .cmp(&y.array_type())
            .then_with(|| cmp_elements(x.iter(), y.iter())),
        (Value::List(x), Value::List(y)) => cmp_elements(x, y),
        (Value::Set(x), Value::Set(y)) => cmp_elements(x.iter(), y.iter()),
        _ => rank(a).cmp(&rank(b)),
    }
}

fn cmp_objects(x: &ObjectValue, y: &ObjectValue) -> Ordering {
    x.class.cmp(&y.class).then_with(|| {
        let mut xs = x.fields.iter();
        let mut ys = y.fields.iter();
        loop {
            match (xs.next(), ys.next()) {
                (None, None) => return Ordering::Equal,
                (None, Some(_)) => return Ordering::Less,
                (Some(_), None) => return Ordering::Greater,
                (Some((nx, vx)), Some((ny, vy))) => {
                    let ord = nx.cmp(ny).then_with(|| canonical_cmp(vx, vy));
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
            }
        }
    })
}

/// Lexicographic; a strict prefix sorts first
fn cmp_elements<A, B>(a: impl IntoIterator<Item = A>, b: impl IntoIterator<Item = B>) -> Ordering
where
    A: Borrow<Value>,
    B: Borrow<Value>,
{
    let mut a = a.into_iter();
    let mut b = b.into_iter();
    loop {
        match (a.next(), b.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = canonical_cmp(x.borrow(), y.borrow());
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}
