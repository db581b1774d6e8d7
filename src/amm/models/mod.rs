pub mod quote;
pub mod token;

pub use quote::*;
pub use token::*;
