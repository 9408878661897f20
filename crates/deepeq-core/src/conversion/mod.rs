//! Equivalence/conversion table and converter bundles

pub mod bundle;
pub mod table;

pub use bundle::{ConversionBundle, ConversionKind, ConvertFn};
pub use table::{ConversionTable, Equivalence};
