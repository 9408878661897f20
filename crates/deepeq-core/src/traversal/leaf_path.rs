//! Leaf path coordinates
//!
//! A leaf path is the sequence of child indexes from the root to a leaf plus
//! a [`NodeKind`] tag. Paths hold no references into the value they were
//! computed from, so they can be compared, ordered, sent across threads and
//! serialized.
//!
//! The raw form is a flat `i64` sequence: the indexes followed by the tag's
//! sentinel (`0` Normal, `-1` Null, `-2` EmptyContainer). The tag is always
//! the last element.

use std::fmt;

use deepeq_core_types::NodeKind;
use serde::{Deserialize, Serialize};

use crate::errors::DeepEqError;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<i64>", try_from = "Vec<i64>")]
pub struct LeafPath {
    indexes: Vec<usize>,
    kind: NodeKind,
}

impl LeafPath {
    pub fn new(indexes: Vec<usize>, kind: NodeKind) -> Self {
        Self { indexes, kind }
    }

    /// Path of a root leaf (the value itself is null, scalar or empty)
    pub fn root(kind: NodeKind) -> Self {
        Self::new(Vec::new(), kind)
    }

    pub fn indexes(&self) -> &[usize] {
        &self.indexes
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Number of raw elements; a root leaf has depth 1
    pub fn depth(&self) -> usize {
        self.indexes.len() + 1
    }

    pub fn is_root(&self) -> bool {
        self.indexes.is_empty()
    }

    /// Indexes of the container holding this leaf, `None` for a root leaf
    pub fn parent_indexes(&self) -> Option<&[usize]> {
        self.indexes.split_last().map(|(_, parent)| parent)
    }

    pub fn to_raw(&self) -> Vec<i64> {
        let mut raw: Vec<i64> = self.indexes.iter().map(|&i| i as i64).collect();
        raw.push(self.kind.sentinel());
        raw
    }
}

impl From<LeafPath> for Vec<i64> {
    fn from(path: LeafPath) -> Self {
        path.to_raw()
    }
}

impl TryFrom<Vec<i64>> for LeafPath {
    type Error = DeepEqError;

    fn try_from(raw: Vec<i64>) -> Result<Self, Self::Error> {
        let (&tag, indexes) = raw.split_last().ok_or_else(|| DeepEqError::InvalidLeafPath {
            reason: "empty path has no tag".to_string(),
        })?;

        let kind = NodeKind::from_sentinel(tag).ok_or_else(|| DeepEqError::InvalidLeafPath {
            reason: format!("{} is not a node tag", tag),
        })?;

        let indexes = indexes
            .iter()
            .map(|&index| {
                usize::try_from(index).map_err(|_| DeepEqError::InvalidLeafPath {
                    reason: format!("negative index {} before the tag", index),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { indexes, kind })
    }
}

impl fmt::Display for LeafPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for index in &self.indexes {
            write!(f, "{}, ", index)?;
        }
        write!(f, "{}]", self.kind)
    }
}
