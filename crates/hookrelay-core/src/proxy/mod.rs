//! Upstream forwarding.
//!
//! The [`Proxy`] holds the relay configuration and the shared outbound
//! client. Both are read-only after construction, so one instance serves
//! every request concurrently.

use std::borrow::Cow;
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderName};
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::error::{RelayError, Result};
use crate::models::Hook;
use crate::providers::Provider;

/// Total time allowed for one upstream delivery.
pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(60);

/// Scheme assumed when the upstream URL does not name one.
pub const DEFAULT_SCHEME: &str = "http";

/// Headers the outbound client computes itself for the new connection.
const TRANSPORT_HEADERS: &[&str] = &[
    "host",
    "content-length",
    "connection",
    "keep-alive",
    "proxy-connection",
    "transfer-encoding",
    "te",
    "trailer",
    "upgrade",
];

/// Webhook relay bound to one upstream and one provider.
#[derive(Debug)]
pub struct Proxy {
    provider: String,
    upstream_url: String,
    allowed_paths: Vec<String>,
    secret: SecretString,
    client: reqwest::Client,
}

impl Proxy {
    /// Creates a relay after validating its configuration.
    ///
    /// `allowed_paths` of `None` is rejected; `Some` of an empty list allows
    /// every path.
    pub fn new(
        upstream_url: &str,
        allowed_paths: Option<Vec<String>>,
        provider: &str,
        secret: &str,
    ) -> Result<Self> {
        if secret.trim().is_empty() {
            return Err(RelayError::Configuration(
                "Cannot create Proxy with empty secret".to_string(),
            ));
        }
        if upstream_url.trim().is_empty() {
            return Err(RelayError::Configuration(
                "Cannot create Proxy with empty upstream URL".to_string(),
            ));
        }
        if provider.trim().is_empty() {
            return Err(RelayError::Configuration(
                "Cannot create Proxy with empty provider".to_string(),
            ));
        }
        let Some(allowed_paths) = allowed_paths else {
            return Err(RelayError::Configuration(
                "Cannot create Proxy with unset allowed paths".to_string(),
            ));
        };

        let client = reqwest::Client::builder()
            .timeout(UPSTREAM_TIMEOUT)
            .build()
            .map_err(|e| {
                RelayError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            provider: provider.to_string(),
            upstream_url: upstream_url.to_string(),
            allowed_paths,
            secret: SecretString::from(secret),
            client,
        })
    }

    /// Configured provider name.
    pub fn provider_name(&self) -> &str {
        &self.provider
    }

    /// Configured upstream base URL.
    pub fn upstream_url(&self) -> &str {
        &self.upstream_url
    }

    /// Configured allow-list. Empty means every path is allowed.
    pub fn allowed_paths(&self) -> &[String] {
        &self.allowed_paths
    }

    /// Builds a fresh provider for the configured name and secret.
    pub fn provider(&self) -> Result<Provider> {
        Provider::new(&self.provider, self.secret.expose_secret())
    }

    /// Checks `path` against the allow-list.
    ///
    /// `path` is percent-decoded first. Both sides are then trimmed of
    /// whitespace and of one trailing `/` before an exact comparison, so
    /// `/foo` matches `/foo/` but not `/foo/bar`.
    pub fn is_path_allowed(&self, path: &str) -> bool {
        if self.allowed_paths.is_empty() {
            return true;
        }

        // Paths that do not decode to UTF-8 are compared as received
        let decoded = urlencoding::decode(path).unwrap_or(Cow::Borrowed(path));
        let path = normalize_path(&decoded);
        self.allowed_paths
            .iter()
            .any(|allowed| normalize_path(allowed) == path)
    }

    /// Resolves the upstream target for `path`.
    ///
    /// The path is appended to the base URL as a string. A base without a
    /// scheme gets `http://`; only the base decides that, never the path.
    pub fn upstream_target(&self, path: &str) -> Result<Url> {
        let raw = if self.upstream_url.contains("://") {
            format!("{}{}", self.upstream_url, path)
        } else {
            format!("{}://{}{}", DEFAULT_SCHEME, self.upstream_url, path)
        };

        Url::parse(&raw).map_err(|source| RelayError::InvalidUrl { url: raw, source })
    }

    /// Replays `hook` to the upstream at `path` and returns its raw response.
    ///
    /// Content-Type goes first, then every hook header is appended, so the
    /// content type is sent twice when present. Transport headers such as
    /// `Host` and `Content-Length` are left to the client.
    pub async fn redirect(&self, hook: Option<&Hook>, path: &str) -> Result<reqwest::Response> {
        let hook = hook.ok_or(RelayError::NilHook)?;
        let target = self.upstream_target(path)?;

        let mut request = self
            .client
            .request(hook.request_method.clone(), target)
            .body(hook.payload.clone());

        if let Some(content_type) = hook.content_type() {
            request = request.header(CONTENT_TYPE, content_type.clone());
        }

        for (name, value) in hook.headers.iter() {
            if is_transport_header(name) {
                continue;
            }
            request = request.header(name.clone(), value.clone());
        }

        Ok(request.send().await?)
    }
}

fn normalize_path(path: &str) -> &str {
    let path = path.trim();
    path.strip_suffix('/').unwrap_or(path)
}

fn is_transport_header(name: &HeaderName) -> bool {
    TRANSPORT_HEADERS.contains(&name.as_str())
}
