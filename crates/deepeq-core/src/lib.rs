//! deepeq core - structural deep equality for dynamically typed values
//!
//! This crate provides:
//! - A value/type model with a primitive/boxed split, arrays of any rank,
//!   lists and sets
//! - A lazily populated registry of per-type array operators
//! - An equivalence/conversion table between primitive, boxed and reference
//!   array types
//! - Leaf path enumeration and per-leaf comparison under configurable
//!   null/empty-container strategies
//! - Structural equality with serial, parallel or threshold-based scheduling
//!
//! # Usage
//!
//! ```rust
//! use deepeq_core::{Engine, EngineConfig, Value};
//!
//! let engine = Engine::new(EngineConfig::default());
//! let a = Value::from(vec![1i32, 2, 3]);
//! let b = Value::list([Value::Int(1), Value::Int(2), Value::Int(3)]);
//! assert!(engine.equals(&a, &b));
//! ```

pub mod logging_facility;

pub mod config;
pub mod conversion;
pub mod engine;
pub mod equality;
pub mod errors;
pub mod memo;
pub mod model;
pub mod registry;
pub mod traversal;

// Re-export commonly used types
pub use config::EngineConfig;
pub use conversion::{ConversionBundle, ConversionKind, ConversionTable, Equivalence};
pub use deepeq_core_types::{EqualityStrategy, NodeKind, Scheduling};
pub use engine::Engine;
pub use equality::{Difference, EqualityPolicy};
pub use errors::{DeepEqError, ExError, ExErrorKind, Result};
pub use model::{ArrayValue, ClassDesc, ObjectValue, PrimitiveKind, SetValue, TypeDesc, Value};
pub use registry::{OperatorBundle, OperatorRegistry};
pub use traversal::LeafPath;

/// Structural equality on the process-wide engine
pub fn value_equals(a: &Value, b: &Value) -> bool {
    Engine::global().equals(a, b)
}

/// Leaf paths of `value`
pub fn enumerate(value: &Value) -> Vec<LeafPath> {
    traversal::enumerate(value)
}
