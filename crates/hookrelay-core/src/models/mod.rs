//! Domain models for the webhook relay.

pub mod hook;
pub mod provider;

pub use hook::*;
pub use provider::*;
