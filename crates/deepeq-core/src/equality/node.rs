//! Per-leaf comparison
//!
//! Paths are pure coordinates, so each evaluation re-walks both operands
//! from the root. Evaluations share nothing mutable and can run on any
//! thread in any order.

use deepeq_core_types::{EqualityStrategy, NodeKind};

use crate::engine::Engine;
use crate::equality::policy::EqualityPolicy;
use crate::model::{TypeDesc, Value};
use crate::traversal::{resolve, LeafPath};

impl Engine {
    /// Compare the leaf at `path` in `a` and `b`
    ///
    /// - `Normal`: ordinary value equality of the two leaves, with no
    ///   numeric coercion (`Int(1)` and `Double(1.0)` differ).
    /// - `Null`: a root-level null always matches; otherwise the declared
    ///   slot types of the two parent containers are compared under
    ///   `policy.null`.
    /// - `EmptyContainer`: the runtime types of the two empty containers
    ///   are compared under `policy.empty`.
    ///
    /// A path that does not resolve in both operands is unequal.
    pub fn node_equals(
        &self,
        a: &Value,
        b: &Value,
        path: &LeafPath,
        policy: impl Into<EqualityPolicy>,
    ) -> bool {
        let policy = policy.into();
        match path.kind() {
            NodeKind::Null => {
                if path.is_root() {
                    return true;
                }
                match (slot_type(a, path), slot_type(b, path)) {
                    (Some(left), Some(right)) => self.declared_types_match(&left, &right, policy.null),
                    _ => false,
                }
            }
            NodeKind::EmptyContainer => match (container_type(a, path), container_type(b, path)) {
                (Some(left), Some(right)) => self.declared_types_match(&left, &right, policy.empty),
                _ => false,
            },
            NodeKind::Normal => match (resolve(a, path.indexes()), resolve(b, path.indexes())) {
                (Some(left), Some(right)) => left == right,
                _ => false,
            },
        }
    }

    fn declared_types_match(&self, left: &TypeDesc, right: &TypeDesc, strategy: EqualityStrategy) -> bool {
        match strategy {
            EqualityStrategy::TypeIgnored | EqualityStrategy::EmptyAsNull => true,
            EqualityStrategy::BetweenAssignableTypes => self.registry().types_compatible(left, right),
            EqualityStrategy::SameTypeOnly => left == right,
        }
    }
}

/// Declared element type of the container holding a non-root leaf
fn slot_type(root: &Value, path: &LeafPath) -> Option<TypeDesc> {
    resolve(root, path.parent_indexes()?)?.slot_type()
}

/// Runtime type of the (empty) container at the leaf itself
fn container_type(root: &Value, path: &LeafPath) -> Option<TypeDesc> {
    resolve(root, path.indexes())?.runtime_type()
}
