pub mod product;
pub mod relation;

pub use product::Product;
pub use relation::Relation;
