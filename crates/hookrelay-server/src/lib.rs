//! Hookrelay server library.
//!
//! This library exposes the server components for use in integration tests.

pub mod cli;
pub mod parser;
pub mod routes;
pub mod state;

pub use cli::Cli;
pub use routes::router;
pub use state::AppState;

// Re-export hookrelay_core for convenience
pub use hookrelay_core;

// Test utilities are available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
