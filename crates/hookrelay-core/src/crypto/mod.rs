//! Cryptographic utilities for webhook signature verification.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Maximum webhook payload size (10MB).
pub const MAX_WEBHOOK_SIZE: usize = 10 * 1024 * 1024;

/// Prefix GitHub puts in front of the hex digest in `X-Hub-Signature-256`.
pub const GITHUB_SIGNATURE_PREFIX: &str = "sha256=";

/// Computes HMAC-SHA256 of data with the given key and returns as hex string.
pub fn hmac_sha256_hex(key: &[u8], data: &[u8]) -> String {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(data);
    let result = mac.finalize();
    hex::encode(result.into_bytes())
}

/// Builds the `X-Hub-Signature-256` header value GitHub would send for `body`.
pub fn github_signature(secret: &str, body: &[u8]) -> String {
    format!(
        "{}{}",
        GITHUB_SIGNATURE_PREFIX,
        hmac_sha256_hex(secret.as_bytes(), body)
    )
}

/// Verifies a GitHub webhook signature using constant-time comparison.
///
/// GitHub sends signatures in the format `sha256=<hex>`.
pub fn verify_github_signature(secret: &str, signature: &str, body: &[u8]) -> bool {
    let Some(provided_signature) = signature.strip_prefix(GITHUB_SIGNATURE_PREFIX) else {
        return false;
    };

    // Hex digests are compared lowercase; GitHub never sends uppercase
    let computed = hmac_sha256_hex(secret.as_bytes(), body);

    constant_time_eq(provided_signature.as_bytes(), computed.as_bytes())
}

/// Verifies a shared token (GitLab style) against the secret in constant time.
pub fn verify_token(secret: &str, token: &str) -> bool {
    constant_time_eq(secret.as_bytes(), token.as_bytes())
}

/// Constant-time equality comparison.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_github_signature_verification() {
        let secret = "test-secret";
        let body = b"test body";
        let signature = github_signature(secret, body);

        assert!(verify_github_signature(secret, &signature, body));
        assert!(!verify_github_signature(secret, "sha256=invalid", body));
        assert!(!verify_github_signature("wrong-secret", &signature, body));
        assert!(!verify_github_signature(secret, &signature, b"tampered"));
    }

    #[test]
    fn test_github_signature_requires_prefix() {
        let secret = "test-secret";
        let body = b"test body";
        let raw_hex = hmac_sha256_hex(secret.as_bytes(), body);

        assert!(!verify_github_signature(secret, &raw_hex, body));
        let sha1_prefixed = format!("sha1={}", raw_hex);
        assert!(!verify_github_signature(secret, &sha1_prefixed, body));
        assert!(!verify_github_signature(secret, "", body));
    }

    #[test]
    fn test_empty_body_signature() {
        let signature = github_signature("secret", b"");
        assert!(verify_github_signature("secret", &signature, b""));
    }

    #[test]
    fn test_token_verification() {
        assert!(verify_token("gitlab-token", "gitlab-token"));
        assert!(!verify_token("gitlab-token", "gitlab-tokem"));
        assert!(!verify_token("gitlab-token", "gitlab"));
        assert!(!verify_token("gitlab-token", ""));
    }

    #[test]
    fn test_known_hmac_vector() {
        // RFC 4231 test case 2
        let digest = hmac_sha256_hex(b"Jefe", b"what do ya want for nothing?");
        assert_eq!(
            digest,
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }
}
