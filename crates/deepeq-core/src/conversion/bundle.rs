//! Converter bundles
//!
//! A converter is a function from a value to `Option<Value>`; `None` means
//! "not convertible" and is never an error. Each bundle exposes the same
//! converter under the three scheduling variants. Only element-wise array
//! converters actually distinguish them.

use std::sync::Arc;

use deepeq_core_types::Scheduling;

use crate::model::Value;

pub type ConvertFn = Arc<dyn Fn(&Value, Scheduling) -> Option<Value> + Send + Sync>;

/// How a pairwise conversion was derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversionKind {
    /// Same type
    Identity,
    /// Primitive/boxed counterpart, propagated through array dimensions
    Equivalent,
    /// Target is assignable from source
    Upcast,
    /// Source is assignable from target; checked against the runtime value
    Downcast,
    /// Two array types whose components convert
    Elementwise,
    /// No relationship; always yields `None`
    Impossible,
}

#[derive(Clone)]
pub struct ConversionBundle {
    kind: ConversionKind,
    convert: ConvertFn,
}

impl ConversionBundle {
    pub fn new(kind: ConversionKind, convert: ConvertFn) -> Self {
        Self { kind, convert }
    }

    /// Returns every value unchanged
    pub fn identity(kind: ConversionKind) -> Self {
        Self::new(kind, Arc::new(|value, _| Some(value.clone())))
    }

    pub fn impossible() -> Self {
        Self::new(ConversionKind::Impossible, Arc::new(|_, _| None))
    }

    pub fn kind(&self) -> ConversionKind {
        self.kind
    }

    pub fn is_possible(&self) -> bool {
        self.kind != ConversionKind::Impossible
    }

    pub fn apply(&self, value: &Value, scheduling: Scheduling) -> Option<Value> {
        (self.convert)(value, scheduling)
    }

    pub fn serial(&self, value: &Value) -> Option<Value> {
        self.apply(value, Scheduling::Serial)
    }

    pub fn parallel(&self, value: &Value) -> Option<Value> {
        self.apply(value, Scheduling::Parallel)
    }

    /// Parallel when the element count reaches the table's threshold
    pub fn auto(&self, value: &Value) -> Option<Value> {
        self.apply(value, Scheduling::Auto)
    }
}

impl std::fmt::Debug for ConversionBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversionBundle")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}
