//! GitLab webhook deliveries.
//!
//! GitLab does not sign the body. It sends the configured secret token
//! verbatim in `X-Gitlab-Token`, so validation is a token comparison.

use reqwest::Method;
use secrecy::{ExposeSecret, SecretString};

use crate::crypto::verify_token;
use crate::models::Hook;

/// GitLab-style provider.
#[derive(Debug)]
pub struct GitLabProvider {
    secret: SecretString,
}

impl GitLabProvider {
    pub const EVENT_HEADER: &'static str = "X-Gitlab-Event";
    pub const SIGNATURE_HEADER: &'static str = "X-Gitlab-Token";
    pub const REQUEST_METHOD: Method = Method::POST;

    /// Creates a provider bound to the webhook secret token.
    pub fn new(secret: &str) -> Self {
        Self {
            secret: SecretString::from(secret),
        }
    }

    /// Compares the transmitted token with the secret in constant time.
    pub fn validate(&self, hook: &Hook) -> bool {
        match hook.signature.as_deref() {
            Some(token) => verify_token(self.secret.expose_secret(), token),
            None => {
                tracing::debug!("GitLab hook carries no {} header", Self::SIGNATURE_HEADER);
                false
            }
        }
    }
}
