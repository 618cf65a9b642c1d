//! Application state for the relay server.

use hookrelay_core::proxy::Proxy;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Relay configuration and outbound client.
    pub proxy: Arc<Proxy>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(proxy: Proxy) -> Self {
        Self {
            proxy: Arc::new(proxy),
        }
    }
}
