mod f_anonym;
mod f_token;

pub use f_anonym::anonym;
pub use f_token::try_token;
