pub mod product;
pub mod query;
pub mod relation;

pub use product::*;
pub use query::ProductQuery;
pub use relation::RelationForm;
