//! Builds a [`Hook`] from an inbound delivery.

use bytes::Bytes;
use reqwest::header::HeaderMap;

use crate::crypto::MAX_WEBHOOK_SIZE;
use crate::error::{RelayError, Result};
use crate::models::Hook;
use crate::providers::Provider;

/// Parses an already-buffered delivery into a [`Hook`].
///
/// All inbound headers are kept. The provider decides the replay method and
/// where the signature material lives; its event header must be present.
/// The payload is moved in untouched.
pub fn parse_hook(headers: &HeaderMap, payload: Bytes, provider: &Provider) -> Result<Hook> {
    if payload.len() > MAX_WEBHOOK_SIZE {
        return Err(RelayError::BodyRead(format!(
            "payload of {} bytes exceeds limit of {} bytes",
            payload.len(),
            MAX_WEBHOOK_SIZE
        )));
    }

    let event_header = provider.event_header();
    if headers
        .get(event_header)
        .is_none_or(|v| v.as_bytes().iter().all(u8::is_ascii_whitespace))
    {
        return Err(RelayError::MissingHeader(event_header.to_string()));
    }

    Ok(Hook {
        request_method: provider.request_method(),
        headers: headers.clone(),
        signature: provider.extract_signature(headers),
        payload,
    })
}
