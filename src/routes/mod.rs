pub mod health_checks;
pub(crate) mod product;
pub(crate) mod relation;

pub use health_checks::*;
