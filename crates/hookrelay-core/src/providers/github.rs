//! GitHub webhook deliveries.
//!
//! GitHub signs the raw body with HMAC-SHA256 and sends the digest as
//! `X-Hub-Signature-256: sha256=<hex>`.

use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};

use crate::crypto::verify_github_signature;
use crate::models::Hook;

/// GitHub-style provider.
#[derive(Debug)]
pub struct GitHubProvider {
    secret: SecretString,
}

impl GitHubProvider {
    pub const EVENT_HEADER: &'static str = "X-GitHub-Event";
    pub const SIGNATURE_HEADER: &'static str = "X-Hub-Signature-256";
    pub const REQUEST_METHOD: Method = Method::POST;

    /// Creates a provider bound to the webhook secret.
    pub fn new(secret: &str) -> Self {
        Self {
            secret: SecretString::from(secret),
        }
    }

    /// Recomputes the payload HMAC and compares it to the transmitted one.
    pub fn validate(&self, hook: &Hook) -> bool {
        let Some(signature) = hook.signature.as_deref() else {
            tracing::debug!("GitHub hook carries no {} header", Self::SIGNATURE_HEADER);
            return false;
        };

        verify_github_signature(self.secret.expose_secret(), signature, &hook.payload)
    }
}
