//! Logging facility tests
//!
//! ## Scenarios Covered
//! - start/end/error macros emit the canonical `op`/`event` fields
//! - error events carry `err.kind` and `err.code`
//! - engine operations log boundaries with their domain fields

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{engine, ints};
use deepeq_core::errors::{DeepEqError, ExErrorKind};
use deepeq_core::logging_facility::schema::{EVENT_END, EVENT_END_ERROR, EVENT_START};
use deepeq_core::logging_facility::test_capture::init_test_capture;
use deepeq_core::{log_op_end, log_op_error, log_op_start};
use deepeq_core::{EqualityStrategy, OperatorRegistry, PrimitiveKind, Scheduling, TypeDesc, Value};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    capture.assert_event_exists(op_name, EVENT_START);
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let end_events = capture.events_for(op_name, EVENT_END);
    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(end_events[0].field("duration_ms"), Some("42"));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = DeepEqError::IndexOutOfBounds { index: 3, len: 1 };
    log_op_error!(op_name, err, duration_ms = 1);

    let error_events = capture.events_for(op_name, EVENT_END_ERROR);
    assert_eq!(error_events.len(), 1, "Should have exactly one error event");
    assert_eq!(error_events[0].field("err.code"), Some("ERR_INDEX_OUT_OF_BOUNDS"));
    assert!(error_events[0].field("err.message").is_some_and(|m| !m.is_empty()));
    assert_eq!(
        error_events[0].field("err.kind"),
        Some(format!("{:?}", ExErrorKind::IndexOutOfBounds).as_str())
    );
}

#[test]
fn test_domain_fields_follow_canonical_fields() {
    let capture = init_test_capture();
    let op_name = "test_domain_fields_unique_4";

    log_op_start!(op_name, type_name = "int[]", element_count = 3);
    log_op_end!(op_name, duration_ms = 0, result = true);

    let start = &capture.events_for(op_name, EVENT_START)[0];
    assert_eq!(start.field("type_name"), Some("int[]"));
    assert_eq!(start.field("element_count"), Some("3"));
    assert_eq!(start.level, tracing::Level::DEBUG);

    let end = &capture.events_for(op_name, EVENT_END)[0];
    assert_eq!(end.field("result"), Some("true"));
}

#[test]
#[should_panic(expected = "Expected event")]
fn test_capture_assert_event_exists_fails() {
    let capture = init_test_capture();
    capture.assert_event_exists("nonexistent_op_truly_unique_999", EVENT_START);
}

#[test]
fn test_value_equals_emits_boundaries_with_leaf_count() {
    let capture = init_test_capture();
    let engine = engine();

    // 4,321 leaves: distinctive enough to find among concurrent tests
    let values: Vec<i32> = (0..4_321).collect();
    let a = Value::list([ints(&values)]);
    let b = Value::list([ints(&values)]);
    assert!(engine.value_equals(&a, &b, EqualityStrategy::TypeIgnored, Scheduling::Serial));

    let ends = capture.count_events(|e| {
        e.is("value_equals", EVENT_END)
            && e.field("leaf_count") == Some("4321")
            && e.field("result") == Some("true")
            && e.field("parallel") == Some("false")
    });
    assert_eq!(ends, 1);
    capture.assert_event_exists("value_equals", EVENT_START);
}

#[test]
fn test_convert_emits_type_fields() {
    let capture = init_test_capture();
    let engine = engine();

    let source = Value::Array(deepeq_core::ArrayValue::Short(vec![1, 2]));
    let target = TypeDesc::Boxed(PrimitiveKind::Short).with_rank(1);
    assert!(engine.convert(&source, &target).is_some());

    let starts = capture.count_events(|e| {
        e.is("convert", EVENT_START)
            && e.field("type_name") == Some("short[]")
            && e.field("target_type") == Some("Short[]")
    });
    assert_eq!(starts, 1);
}

#[test]
fn test_null_operator_lookup_logs_error() {
    let capture = init_test_capture();
    let registry = OperatorRegistry::new();

    assert!(registry.operators_of(&Value::Null).is_err());

    let errors = capture.events_for("operators_of", EVENT_END_ERROR);
    assert!(!errors.is_empty());
    assert_eq!(errors[0].field("err.code"), Some("ERR_INVALID_ARGUMENT"));
}
