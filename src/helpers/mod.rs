pub(crate) mod access;
pub(crate) mod json;

pub(crate) use access::enforce;
pub use json::*;
