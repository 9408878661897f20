//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Type and structure identifiers
pub const FIELD_TYPE_NAME: &str = "type_name";
pub const FIELD_TARGET_TYPE: &str = "target_type";
pub const FIELD_SCHEDULING: &str = "scheduling";

// Collection sizes
pub const FIELD_LEAF_COUNT: &str = "leaf_count";
pub const FIELD_ELEMENT_COUNT: &str = "element_count";

// Outcome
pub const FIELD_RESULT: &str = "result";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
