//! Normalized webhook delivery.

use bytes::Bytes;
use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};

/// One inbound webhook delivery, ready to be validated and replayed upstream.
///
/// Built once per request by the parser and only read afterwards.
#[derive(Debug, Clone)]
pub struct Hook {
    /// Method used when replaying upstream, as declared by the provider.
    pub request_method: Method,
    /// Every header received with the delivery.
    pub headers: HeaderMap,
    /// Exact copy of the inbound request body.
    pub payload: Bytes,
    /// Signature material located by the provider (`None` if the sender sent none).
    pub signature: Option<String>,
}

impl Hook {
    /// Returns the original Content-Type header, if the sender supplied one.
    pub fn content_type(&self) -> Option<&HeaderValue> {
        self.headers.get(CONTENT_TYPE)
    }

    /// Returns a header value as a string, ignoring values that are not visible ASCII.
    pub fn header_str(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}
