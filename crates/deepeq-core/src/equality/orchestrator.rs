//! Structural equality
//!
//! `value_equals` runs in three stages:
//!
//! 1. Fast path: nulls, scalars, container-ness mismatches and arrays with
//!    incompatible component types resolve without enumeration.
//! 2. Shape check: both operands must enumerate to the same leaf path
//!    sequence.
//! 3. Leaf dispatch: every path is evaluated with
//!    [`Engine::node_equals`], serially (stopping at the first failure) or
//!    across the rayon pool.
//!
//! None of these stages fail: mismatches of any kind are `false`.

use std::fmt;
use std::time::Instant;

use deepeq_core_types::Scheduling;
use rayon::prelude::*;

use crate::engine::Engine;
use crate::equality::policy::EqualityPolicy;
use crate::errors::{DeepEqError, Result};
use crate::model::Value;
use crate::traversal::{enumerate_folded, LeafPath};
use crate::{log_op_end, log_op_start};

/// Why two values are unequal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Difference {
    /// Resolved by the fast path
    Root,
    /// Leaf path sequences differ
    Shape {
        left_leaves: usize,
        right_leaves: usize,
    },
    /// First leaf, in enumeration order, that compares unequal
    Leaf(LeafPath),
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difference::Root => f.write_str("values differ at the root"),
            Difference::Shape {
                left_leaves,
                right_leaves,
            } => write!(
                f,
                "shapes differ ({} leaves vs {} leaves)",
                left_leaves, right_leaves
            ),
            Difference::Leaf(path) => write!(f, "leaf {} differs", path),
        }
    }
}

impl Engine {
    /// Structural equality under the configured default policy, auto
    /// scheduling
    pub fn equals(&self, a: &Value, b: &Value) -> bool {
        self.value_equals(a, b, self.default_policy(), Scheduling::Auto)
    }

    pub fn value_equals(
        &self,
        a: &Value,
        b: &Value,
        policy: impl Into<EqualityPolicy>,
        scheduling: Scheduling,
    ) -> bool {
        let policy = policy.into();
        if let Some(resolved) = self.simple_value_equals(a, b, &policy) {
            return resolved;
        }

        let start = Instant::now();
        log_op_start!("value_equals", scheduling = %scheduling);

        let paths = match self.check_shape(a, b, &policy) {
            Ok(paths) => paths,
            Err(err) => {
                tracing::trace!(error = %err, "shape check failed");
                log_op_end!(
                    "value_equals",
                    duration_ms = start.elapsed().as_millis() as u64,
                    result = false
                );
                return false;
            }
        };

        let parallel = scheduling.is_parallel(paths.len(), self.config().parallel_threshold);
        let result = if parallel {
            paths
                .par_iter()
                .all(|path| self.node_equals(a, b, path, policy))
        } else {
            paths.iter().all(|path| self.node_equals(a, b, path, policy))
        };

        log_op_end!(
            "value_equals",
            duration_ms = start.elapsed().as_millis() as u64,
            leaf_count = paths.len(),
            parallel = parallel,
            result = result
        );
        result
    }

    pub fn value_equals_serial(&self, a: &Value, b: &Value, policy: impl Into<EqualityPolicy>) -> bool {
        self.value_equals(a, b, policy, Scheduling::Serial)
    }

    pub fn value_equals_parallel(&self, a: &Value, b: &Value, policy: impl Into<EqualityPolicy>) -> bool {
        self.value_equals(a, b, policy, Scheduling::Parallel)
    }

    pub fn value_equals_auto(&self, a: &Value, b: &Value, policy: impl Into<EqualityPolicy>) -> bool {
        self.value_equals(a, b, policy, Scheduling::Auto)
    }

    /// Resolve without enumeration where possible; `None` means a full
    /// structural comparison is needed
    pub fn simple_value_equals(&self, a: &Value, b: &Value, policy: &EqualityPolicy) -> Option<bool> {
        if std::ptr::eq(a, b) {
            return Some(true);
        }
        match (a, b) {
            (Value::Null, Value::Null) => Some(true),
            (Value::Null, other) | (other, Value::Null) => {
                Some(policy.folds_empty_into_null() && other.container_len() == Some(0))
            }
            _ if a.is_container() != b.is_container() => Some(false),
            _ if !a.is_container() => Some(a == b),
            (Value::Array(left), Value::Array(right)) => {
                let compatible = self
                    .registry()
                    .types_compatible(&left.component_type(), &right.component_type());
                (!compatible).then_some(false)
            }
            _ => None,
        }
    }

    /// Enumerate both operands and require identical path sequences
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` carrying both leaf counts.
    pub fn check_shape(&self, a: &Value, b: &Value, policy: &EqualityPolicy) -> Result<Vec<LeafPath>> {
        let fold = policy.folds_empty_into_null();
        let left = enumerate_folded(a, fold);
        let right = enumerate_folded(b, fold);
        if left != right {
            return Err(DeepEqError::ShapeMismatch {
                left_leaves: left.len(),
                right_leaves: right.len(),
            });
        }
        Ok(left)
    }

    /// Serial comparison that reports where `a` and `b` diverge
    ///
    /// `None` exactly when [`Engine::value_equals_serial`] is `true`.
    pub fn first_difference(
        &self,
        a: &Value,
        b: &Value,
        policy: impl Into<EqualityPolicy>,
    ) -> Option<Difference> {
        let policy = policy.into();
        if let Some(resolved) = self.simple_value_equals(a, b, &policy) {
            return (!resolved).then_some(Difference::Root);
        }

        match self.check_shape(a, b, &policy) {
            Ok(paths) => paths
                .into_iter()
                .find(|path| !self.node_equals(a, b, path, policy))
                .map(Difference::Leaf),
            Err(DeepEqError::ShapeMismatch {
                left_leaves,
                right_leaves,
            }) => Some(Difference::Shape {
                left_leaves,
                right_leaves,
            }),
            Err(_) => Some(Difference::Root),
        }
    }
}
