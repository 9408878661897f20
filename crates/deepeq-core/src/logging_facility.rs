//! Structured logging facility for deepeq
//!
//! - `init(profile)` installs a process-wide subscriber once
//! - `log_op_start!`, `log_op_end!` and `log_op_error!` emit operation
//!   boundaries with the canonical fields from [`schema`]
//! - `test_capture` records events in memory for assertions
//!
//! Equality checks sit in hot comparison loops, so operation boundaries are
//! emitted at debug level; only contract violations reach error level.
//! Registry and conversion cache misses log at trace.
//!
//! # Usage
//!
//! ```rust
//! use deepeq_core::logging_facility::{init, Profile};
//! use deepeq_core::{Engine, Value};
//!
//! init(Profile::Production);
//! Engine::default().equals(&Value::Int(1), &Value::Int(1));
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use deepeq_core_types::schema;
pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};

#[doc(hidden)]
pub use tracing;
