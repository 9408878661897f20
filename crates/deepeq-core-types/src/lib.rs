//! Core types shared across deepeq facilities
//!
//! This crate provides the vocabulary used by the equality engine, its
//! configuration and its logging facility:
//!
//! - **Leaf classification**: `NodeKind` and its out-of-band sentinel encoding
//! - **Policies**: `EqualityStrategy` and `Scheduling`
//! - **Schema constants**: Canonical field keys and event names

pub mod node_kind;
pub mod policy;
pub mod schema;

pub use node_kind::NodeKind;
pub use policy::{EqualityStrategy, ParsePolicyError, Scheduling};
