//! Credentials and request signing.

pub mod secret;
pub mod token;

pub use secret::*;
pub use token::*;
