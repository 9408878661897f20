//! Property Tests
//!
//! ## Properties Covered
//!
//! 1. Reflexivity under every strategy
//! 2. Serial, parallel and auto scheduling agree
//! 3. Differing leaf path sequences are never equal
//! 4. Null/empty strategies are monotone: SameTypeOnly ⊆ BetweenAssignableTypes ⊆ TypeIgnored
//! 5. Primitive arrays of every kind round-trip through their boxed
//!    equivalents, floats bit for bit

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{boxed_ints, engine, reference_array};
use deepeq_core::traversal::enumerate_folded;
use deepeq_core::{enumerate, EqualityStrategy, PrimitiveKind, TypeDesc, Value};
use proptest::prelude::*;

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(Value::Int),
        any::<i64>().prop_map(Value::Long),
        (-1.0e6f64..1.0e6).prop_map(Value::Double),
        "[a-z]{0,4}".prop_map(Value::Str),
    ]
}

fn value() -> impl Strategy<Value = Value> {
    scalar().prop_recursive(4, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::List),
            prop::collection::vec(any::<i32>(), 0..6).prop_map(Value::from),
            prop::collection::vec(prop::option::of(any::<i32>()), 0..6)
                .prop_map(|values| boxed_ints(&values)),
            prop::collection::vec(inner.clone(), 0..4)
                .prop_map(|elements| reference_array(TypeDesc::Object, elements)),
            prop::collection::vec(inner, 0..4).prop_map(|elements| Value::set(elements)),
        ]
    })
}

fn strategy() -> impl Strategy<Value = EqualityStrategy> {
    prop::sample::select(EqualityStrategy::ALL.to_vec())
}

const DECLARED: [TypeDesc; 4] = [
    TypeDesc::Object,
    TypeDesc::Number,
    TypeDesc::Boxed(PrimitiveKind::Int),
    TypeDesc::String,
];

/// List whose slots are `T[]{null}` (null leaf) or `T[]{}` (empty leaf)
fn typed_slots(slots: &[(bool, usize)]) -> Value {
    Value::list(slots.iter().map(|&(null, ty)| {
        let component = DECLARED[ty % DECLARED.len()].clone();
        let elements = if null { vec![Value::Null] } else { Vec::new() };
        reference_array(component, elements)
    }))
}

/// A primitive array of any kind, tagged with its kind
fn primitive_array() -> impl Strategy<Value = (PrimitiveKind, Value)> {
    use prop::collection::vec;
    prop_oneof![
        vec(any::<bool>(), 0..32).prop_map(|v| (PrimitiveKind::Boolean, Value::from(v))),
        vec(any::<i8>(), 0..32).prop_map(|v| (PrimitiveKind::Byte, Value::from(v))),
        vec(any::<char>(), 0..32).prop_map(|v| (PrimitiveKind::Char, Value::from(v))),
        vec(any::<i16>(), 0..32).prop_map(|v| (PrimitiveKind::Short, Value::from(v))),
        vec(any::<i32>(), 0..32).prop_map(|v| (PrimitiveKind::Int, Value::from(v))),
        vec(any::<i64>(), 0..32).prop_map(|v| (PrimitiveKind::Long, Value::from(v))),
        vec(any::<f32>(), 0..32).prop_map(|v| (PrimitiveKind::Float, Value::from(v))),
        vec(any::<f64>(), 0..32).prop_map(|v| (PrimitiveKind::Double, Value::from(v))),
    ]
}

/// `kind[]` -> boxed `kind[]` -> `kind[]` gives back the original
fn round_trip(kind: PrimitiveKind, original: &Value) -> Result<(), TestCaseError> {
    let engine = engine();
    let boxed = engine.convert(original, &TypeDesc::Boxed(kind).with_rank(1));
    prop_assert!(boxed.is_some(), "{:?} array did not box", kind);
    let boxed = boxed.unwrap();
    prop_assert!(engine.equals(original, &boxed));

    let back = engine.convert(&boxed, &TypeDesc::Primitive(kind).with_rank(1));
    prop_assert_eq!(back.as_ref(), Some(original));
    Ok(())
}

proptest! {
    #[test]
    fn test_reflexivity(x in value(), strategy in strategy()) {
        let engine = engine();
        prop_assert!(engine.value_equals_serial(&x, &x.clone(), strategy));
        prop_assert!(engine.value_equals_parallel(&x, &x.clone(), strategy));
    }

    #[test]
    fn test_scheduling_equivalence(a in value(), b in value(), strategy in strategy()) {
        let engine = engine();
        let serial = engine.value_equals_serial(&a, &b, strategy);
        prop_assert_eq!(serial, engine.value_equals_parallel(&a, &b, strategy));
        prop_assert_eq!(serial, engine.value_equals_auto(&a, &b, strategy));
    }

    #[test]
    fn test_shape_short_circuit(a in value(), b in value(), strategy in strategy()) {
        let engine = engine();
        let fold = strategy == EqualityStrategy::EmptyAsNull;
        if enumerate_folded(&a, fold) != enumerate_folded(&b, fold) {
            prop_assert!(!engine.value_equals_serial(&a, &b, strategy));
        }
        if strategy != EqualityStrategy::EmptyAsNull && enumerate(&a) != enumerate(&b) {
            prop_assert!(!engine.value_equals_auto(&a, &b, strategy));
        }
    }

    #[test]
    fn test_strategy_monotonicity(
        shape in prop::collection::vec((any::<bool>(), 0usize..4, 0usize..4), 1..8)
    ) {
        let engine = engine();
        let left: Vec<(bool, usize)> = shape.iter().map(|&(null, l, _)| (null, l)).collect();
        let right: Vec<(bool, usize)> = shape.iter().map(|&(null, _, r)| (null, r)).collect();
        let (a, b) = (typed_slots(&left), typed_slots(&right));

        let same = engine.value_equals_serial(&a, &b, EqualityStrategy::SameTypeOnly);
        let between = engine.value_equals_serial(&a, &b, EqualityStrategy::BetweenAssignableTypes);
        let ignored = engine.value_equals_serial(&a, &b, EqualityStrategy::TypeIgnored);

        prop_assert!(!same || between);
        prop_assert!(!between || ignored);
        prop_assert!(ignored);
    }

    #[test]
    fn test_primitive_array_round_trip((kind, original) in primitive_array()) {
        round_trip(kind, &original)?;
    }
}

#[test]
fn test_round_trip_covers_every_primitive_kind() {
    let engine = engine();
    for kind in PrimitiveKind::ALL {
        let zeroed = Value::Array(
            engine
                .registry()
                .get_operators(&TypeDesc::Primitive(kind))
                .new_array(3),
        );
        round_trip(kind, &zeroed).unwrap();
    }
}

#[test]
fn test_float_round_trip_keeps_bit_patterns() {
    let payload_nan = f32::from_bits(0x7fc0_1234);
    round_trip(
        PrimitiveKind::Float,
        &Value::from(vec![payload_nan, -0.0f32, 0.0, f32::INFINITY, f32::MIN_POSITIVE / 2.0]),
    )
    .unwrap();
    round_trip(
        PrimitiveKind::Double,
        &Value::from(vec![f64::from_bits(0x7ff8_0000_0000_beef), -0.0f64, f64::NEG_INFINITY]),
    )
    .unwrap();
}
