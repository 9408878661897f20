//! Leaf enumeration and path resolution

pub mod enumerate;
pub mod leaf_path;

pub use enumerate::{enumerate, enumerate_folded, resolve};
pub use leaf_path::LeafPath;
