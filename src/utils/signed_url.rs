//! Time-limited download links signed with HMAC-SHA256.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Route that serves signed downloads.
pub const DOWNLOAD_PATH: &str = "/api/file/download";

/// Signs and checks download links for stored documents.
///
/// The signature covers `"<key>:<expires>"`, so neither the key nor the expiry
/// can be altered without invalidating the link.
#[derive(Clone)]
pub struct UrlSigner {
    secret: Vec<u8>,
    ttl_seconds: i64,
}

impl UrlSigner {
    pub fn new(secret: impl Into<Vec<u8>>, ttl_seconds: i64) -> Self {
        Self {
            secret: secret.into(),
            ttl_seconds,
        }
    }

    fn mac(&self, key: &str, expires: i64) -> HmacSha256 {
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).expect("HMAC accepts any key length");
        mac.update(key.as_bytes());
        mac.update(b":");
        mac.update(expires.to_string().as_bytes());
        mac
    }

    /// Hex-encoded signature for `key` expiring at `expires`.
    pub fn signature(&self, key: &str, expires: i64) -> String {
        hex::encode(self.mac(key, expires).finalize().into_bytes())
    }

    /// Builds a relative download URL valid for the configured TTL from `now`.
    pub fn sign(&self, key: &str, now: i64) -> String {
        let expires = now + self.ttl_seconds;
        format!(
            "{DOWNLOAD_PATH}?key={key}&expires={expires}&signature={}",
            self.signature(key, expires)
        )
    }

    /// Checks a presented signature in constant time and rejects expired links.
    pub fn verify(&self, key: &str, expires: i64, signature: &str, now: i64) -> bool {
        if now > expires {
            return false;
        }
        let Ok(presented) = hex::decode(signature) else {
            return false;
        };
        self.mac(key, expires).verify_slice(&presented).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> UrlSigner {
        UrlSigner::new("test-url-secret", 60)
    }

    fn query_param<'a>(url: &'a str, name: &str) -> &'a str {
        let query = url.split_once('?').unwrap().1;
        query
            .split('&')
            .find_map(|pair| pair.strip_prefix(&format!("{name}=")))
            .unwrap()
    }

    #[test]
    fn test_signed_url_verifies_within_ttl() {
        let url = signer().sign("u1/license-1.pdf", 1_000);

        assert!(url.starts_with("/api/file/download?key=u1/license-1.pdf&expires=1060"));
        let sig = query_param(&url, "signature");
        assert_eq!(sig.len(), 64);
        assert!(signer().verify("u1/license-1.pdf", 1060, sig, 1_030));
    }

    #[test]
    fn test_expired_link_rejected() {
        let sig = signer().signature("k", 1060);
        assert!(signer().verify("k", 1060, &sig, 1060));
        assert!(!signer().verify("k", 1060, &sig, 1061));
    }

    #[test]
    fn test_tampered_key_or_expiry_rejected() {
        let sig = signer().signature("u1/a.pdf", 1060);
        assert!(!signer().verify("u2/a.pdf", 1060, &sig, 1000));
        assert!(!signer().verify("u1/a.pdf", 9999, &sig, 1000));
    }

    #[test]
    fn test_garbage_signature_rejected() {
        assert!(!signer().verify("k", 1060, "zz-not-hex", 1000));
        assert!(!signer().verify("k", 1060, "", 1000));
    }

    #[test]
    fn test_secret_matters() {
        let other = UrlSigner::new("another-secret", 60);
        assert_ne!(signer().signature("k", 1), other.signature("k", 1));
    }
}
