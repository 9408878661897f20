//! Leaf-level and structural equality

pub mod node;
pub mod orchestrator;
pub mod policy;

pub use orchestrator::Difference;
pub use policy::EqualityPolicy;
