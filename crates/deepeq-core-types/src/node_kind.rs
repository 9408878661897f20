//! Leaf classification tags
//!
//! A leaf path ends in a `NodeKind` tag rather than an index. The tag has an
//! out-of-band integer encoding so that a raw path can be stored as a flat
//! sequence of integers: indexes are non-negative, tags use 0 and two distinct
//! negative sentinels.

use serde::{Deserialize, Serialize};

/// Classification of a leaf position inside a nested structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// The position holds a real, non-container value
    Normal,
    /// The position holds an absent reference
    Null,
    /// The position holds a zero-length array or collection
    EmptyContainer,
}

impl NodeKind {
    pub const NORMAL_SENTINEL: i64 = 0;
    pub const NULL_SENTINEL: i64 = -1;
    pub const EMPTY_CONTAINER_SENTINEL: i64 = -2;

    /// Get the sentinel used for this tag in a raw path
    pub fn sentinel(&self) -> i64 {
        match self {
            NodeKind::Normal => Self::NORMAL_SENTINEL,
            NodeKind::Null => Self::NULL_SENTINEL,
            NodeKind::EmptyContainer => Self::EMPTY_CONTAINER_SENTINEL,
        }
    }

    /// Decode a sentinel, returning `None` for anything that is not a tag
    pub fn from_sentinel(raw: i64) -> Option<Self> {
        match raw {
            Self::NORMAL_SENTINEL => Some(NodeKind::Normal),
            Self::NULL_SENTINEL => Some(NodeKind::Null),
            Self::EMPTY_CONTAINER_SENTINEL => Some(NodeKind::EmptyContainer),
            _ => None,
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            NodeKind::Normal => "Normal",
            NodeKind::Null => "Null",
            NodeKind::EmptyContainer => "EmptyContainer",
        };
        f.write_str(name)
    }
}
