pub mod array;
pub mod order;
pub mod types;
pub mod value;

pub use array::ArrayValue;
pub use types::{ClassDesc, PrimitiveKind, TypeDesc};
pub use order::canonical_cmp;
pub use value::{ObjectValue, SetValue, Value};
