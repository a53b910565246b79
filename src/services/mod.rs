pub mod access_policy;
pub mod rating;

pub use access_policy::{Decision, Operation};
pub use rating::RatingError;
