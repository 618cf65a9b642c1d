//! Reads inbound requests into hooks.

use axum::extract::Request;
use hookrelay_core::{
    RelayError, Result, crypto::MAX_WEBHOOK_SIZE, models::Hook, providers::Provider,
    webhook::parse_hook,
};

/// Buffers the request body (at most [`MAX_WEBHOOK_SIZE`] bytes) and parses it
/// into a [`Hook`] for `provider`.
pub async fn parse(request: Request, provider: &Provider) -> Result<Hook> {
    let (parts, body) = request.into_parts();

    let payload = axum::body::to_bytes(body, MAX_WEBHOOK_SIZE)
        .await
        .map_err(|e| RelayError::BodyRead(e.to_string()))?;

    parse_hook(&parts.headers, payload, provider)
}
