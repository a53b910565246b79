pub mod product;
pub mod relation;
pub mod user;
