// Domain layer: the roster records and their collection. No external
// dependencies beyond std and the crate's own error/validation types.

pub mod collection;
pub mod model;
