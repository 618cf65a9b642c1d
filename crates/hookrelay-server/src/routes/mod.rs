//! HTTP route handlers.

pub mod health;
pub mod relay;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Builds the relay router.
///
/// `GET /health` and `GET /version` are served locally; every `POST`
/// (including to those two paths) goes through the relay pipeline.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check).post(relay::proxy_request))
        .route("/version", get(health::version).post(relay::proxy_request))
        .route("/", post(relay::proxy_request))
        .route("/{*path}", post(relay::proxy_request))
        .with_state(state)
}
