//! Hookrelay Core Library
//!
//! Provider registry, hook parsing, and upstream forwarding for the webhook relay.

pub mod crypto;
pub mod error;
pub mod models;
pub mod providers;
pub mod proxy;
pub mod webhook;

pub use error::{RelayError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
