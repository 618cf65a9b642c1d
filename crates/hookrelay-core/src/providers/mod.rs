//! Webhook provider registry.
//!
//! A [`Provider`] knows how one vendor delivers webhooks: which header names
//! the event, where the signature lives, and how to check it against the
//! shared secret. The set of vendors is closed; adding one means adding a
//! variant here and to [`ProviderKind`].

pub mod github;
pub mod gitlab;

use reqwest::Method;
use reqwest::header::HeaderMap;

use crate::error::{RelayError, Result};
use crate::models::{Hook, ProviderKind};

pub use github::GitHubProvider;
pub use gitlab::GitLabProvider;

/// A webhook vendor bound to the deployment's shared secret.
#[derive(Debug)]
pub enum Provider {
    GitHub(GitHubProvider),
    GitLab(GitLabProvider),
}

impl Provider {
    /// Creates the provider registered under `name`.
    ///
    /// Fails with [`RelayError::EmptySecret`] if `secret` is blank and with
    /// [`RelayError::UnknownProvider`] if `name` is not an exact match for a
    /// known vendor.
    pub fn new(name: &str, secret: &str) -> Result<Self> {
        if secret.trim().is_empty() {
            return Err(RelayError::EmptySecret);
        }

        let provider = match name.parse::<ProviderKind>()? {
            ProviderKind::GitHub => Provider::GitHub(GitHubProvider::new(secret)),
            ProviderKind::GitLab => Provider::GitLab(GitLabProvider::new(secret)),
        };
        Ok(provider)
    }

    /// Returns which vendor this provider handles.
    pub fn kind(&self) -> ProviderKind {
        match self {
            Provider::GitHub(_) => ProviderKind::GitHub,
            Provider::GitLab(_) => ProviderKind::GitLab,
        }
    }

    /// Method used when replaying the hook upstream.
    pub fn request_method(&self) -> Method {
        match self {
            Provider::GitHub(_) => GitHubProvider::REQUEST_METHOD,
            Provider::GitLab(_) => GitLabProvider::REQUEST_METHOD,
        }
    }

    /// Header carrying the vendor's event type. Required on every delivery.
    pub fn event_header(&self) -> &'static str {
        match self {
            Provider::GitHub(_) => GitHubProvider::EVENT_HEADER,
            Provider::GitLab(_) => GitLabProvider::EVENT_HEADER,
        }
    }

    /// Header carrying the signature material.
    pub fn signature_header(&self) -> &'static str {
        match self {
            Provider::GitHub(_) => GitHubProvider::SIGNATURE_HEADER,
            Provider::GitLab(_) => GitLabProvider::SIGNATURE_HEADER,
        }
    }

    /// Locates the signature material in the inbound headers.
    pub fn extract_signature(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get(self.signature_header())
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Checks the hook's signature against the shared secret.
    ///
    /// Returns `false` for any mismatch, including missing or malformed
    /// signature material.
    pub fn validate(&self, hook: &Hook) -> bool {
        match self {
            Provider::GitHub(p) => p.validate(hook),
            Provider::GitLab(p) => p.validate(hook),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_known_providers() {
        let github = Provider::new("github", "secret").unwrap();
        assert_eq!(github.kind(), ProviderKind::GitHub);
        assert_eq!(github.event_header(), "X-GitHub-Event");

        let gitlab = Provider::new("gitlab", "secret").unwrap();
        assert_eq!(gitlab.kind(), ProviderKind::GitLab);
        assert_eq!(gitlab.signature_header(), "X-Gitlab-Token");
    }

    #[test]
    fn test_new_rejects_unknown_name() {
        assert!(matches!(
            Provider::new("bitbucket", "secret"),
            Err(RelayError::UnknownProvider(name)) if name == "bitbucket"
        ));
        assert!(matches!(
            Provider::new("", "secret"),
            Err(RelayError::UnknownProvider(_))
        ));
        assert!(matches!(
            Provider::new("GITHUB", "secret"),
            Err(RelayError::UnknownProvider(_))
        ));
    }

    #[test]
    fn test_new_rejects_blank_secret() {
        for (name, secret) in [("github", ""), ("gitlab", "  \t")] {
            let result = Provider::new(name, secret);
            assert!(matches!(result, Err(RelayError::EmptySecret)));
        }
    }

    #[test]
    fn test_both_vendors_replay_with_post() {
        for name in ["github", "gitlab"] {
            let provider = Provider::new(name, "s").unwrap();
            assert_eq!(provider.request_method(), Method::POST);
        }
    }

    #[test]
    fn test_extract_signature() {
        let provider = Provider::new("github", "secret").unwrap();

        let mut headers = HeaderMap::new();
        assert_eq!(provider.extract_signature(&headers), None);

        headers.insert("X-Hub-Signature-256", "  ".parse().unwrap());
        assert_eq!(provider.extract_signature(&headers), None);

        headers.insert("X-Hub-Signature-256", "sha256=abc".parse().unwrap());
        let signature = provider.extract_signature(&headers);
        assert_eq!(signature.as_deref(), Some("sha256=abc"));
    }
}
