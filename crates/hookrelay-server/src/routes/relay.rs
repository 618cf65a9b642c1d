//! Webhook relay handler.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::parser;
use crate::state::AppState;

/// Validates an inbound webhook and forwards it upstream.
///
/// POST /{*path}
///
/// Each step either passes or ends the request with a plain-text error:
/// path not allowed (403), provider unavailable (500), unparseable hook
/// (400), bad signature (400), transport failure (500), upstream status
/// of 400 or above (same status). On success the caller gets an empty 200.
pub async fn proxy_request(State(state): State<AppState>, request: Request) -> Response {
    let proxy = &state.proxy;
    let uri = request.uri().clone();
    let path = uri.path().to_string();
    let upstream = format!("{}{}", proxy.upstream_url(), path);

    tracing::info!(%uri, %upstream, "Proxying request");

    // 1. Path allow-list
    if !proxy.is_path_allowed(&path) {
        tracing::warn!(%path, "Not allowed to proxy path");
        return (
            StatusCode::FORBIDDEN,
            format!("Not allowed to proxy path: '{}'", path),
        )
            .into_response();
    }

    // 2. Provider for this request
    let provider = match proxy.provider() {
        Ok(provider) => provider,
        Err(e) => {
            tracing::error!(
                provider = proxy.provider_name(),
                error = %e,
                "Failed to create provider"
            );
            return (StatusCode::INTERNAL_SERVER_ERROR, "Error creating Provider").into_response();
        }
    };

    // 3. Parse (reads the body)
    let hook = match parser::parse(request, &provider).await {
        Ok(hook) => hook,
        Err(e) => {
            tracing::warn!(%path, provider = %provider.kind(), error = %e, "Failed to parse hook");
            return (
                StatusCode::BAD_REQUEST,
                format!("Error parsing Hook: {}", e),
            )
                .into_response();
        }
    };

    // 4. Signature
    if !provider.validate(&hook) {
        tracing::warn!(
            %path,
            provider = %provider.kind(),
            signature_present = hook.signature.is_some(),
            "Hook signature validation failed"
        );
        return (StatusCode::BAD_REQUEST, "Error validating Hook").into_response();
    }

    // 5. Forward
    let response = match proxy.redirect(Some(&hook), &path).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(%uri, %upstream, error = %e, "Failed to redirect hook upstream");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error Redirecting '{}' to upstream '{}'", uri, upstream),
            )
                .into_response();
        }
    };

    // 6. Upstream outcome
    let status = response.status();
    if status.as_u16() >= 400 {
        tracing::warn!(%uri, %upstream, %status, "Upstream rejected redirected hook");
        return (
            status,
            format!(
                "Error Redirecting '{}' to upstream '{}' Upstream Redirect Status: {}",
                uri, upstream, status
            ),
        )
            .into_response();
    }

    tracing::info!(
        %uri,
        %upstream,
        %status,
        event = hook.header_str(provider.event_header()).unwrap_or("unknown"),
        "Redirected incoming request"
    );
    StatusCode::OK.into_response()
}
