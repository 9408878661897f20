//! Operation boundary macros
//!
//! Every engine operation brackets its work with a start and an end event
//! carrying the canonical `component`/`op`/`event` fields, plus whatever
//! domain fields the call site appends. Boundaries log at debug level; a
//! failed operation logs `end_error` at error level with the stable
//! `err.code` of its [`ExError`](crate::errors::ExError).

/// Start of an operation, with optional domain fields
///
/// ```
/// # use deepeq_core::log_op_start;
/// # let target = "Integer[]";
/// log_op_start!("convert", type_name = "int[]", target_type = %target);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)+)?) => {
        $crate::logging_facility::tracing::debug!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::schema::EVENT_START
            $(, $($field)+)?
        )
    };
}

/// Successful end of an operation; `duration_ms` comes first
///
/// ```
/// # use deepeq_core::log_op_end;
/// let started = std::time::Instant::now();
/// log_op_end!(
///     "value_equals",
///     duration_ms = started.elapsed().as_millis() as u64,
///     leaf_count = 4,
///     result = true
/// );
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)+)?) => {
        $crate::logging_facility::tracing::debug!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::schema::EVENT_END,
            duration_ms = $duration
            $(, $($field)+)?
        )
    };
}

/// Failed operation: converts `$err` into an `ExError` and records its kind,
/// code and message
///
/// ```
/// # use deepeq_core::{log_op_error, errors::DeepEqError};
/// let err = DeepEqError::ElementTypeMismatch {
///     expected: "Integer".to_string(),
///     found: "String".to_string(),
/// };
/// log_op_error!("set_element", err, duration_ms = 0, index = 2);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)+)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::logging_facility::tracing::error!(
            component = module_path!(),
            op = $op,
            event = $crate::logging_facility::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            err.message = ex_err.message()
            $(, $($field)+)?
        )
    }};
}
