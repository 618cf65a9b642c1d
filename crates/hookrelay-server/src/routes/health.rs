//! Liveness and version endpoints.

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;

/// Fixed body returned by the health check.
pub const HEALTH_BODY: &str = "I'm Healthy and I know it! ;) ";

#[derive(Serialize)]
struct VersionResponse {
    version: &'static str,
    name: &'static str,
}

/// GET /health
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, HEALTH_BODY)
}

/// GET /version
pub async fn version() -> impl IntoResponse {
    Json(VersionResponse {
        version: hookrelay_core::VERSION,
        name: "hookrelayd",
    })
}
