//! Webhook parsing.

pub mod parser;

pub use parser::*;
