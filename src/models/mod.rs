mod product;
mod relation;
mod user;

pub use product::*;
pub use relation::*;
pub use user::*;
