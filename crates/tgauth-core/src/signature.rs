//! Key derivation and HMAC signing of check-strings.
//!
//! Key: `sha256(secret)`. Signature: `hex(hmac_sha256(key, check_string))`,
//! lowercase.

use std::fmt;

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use tgauth_canonical::{check_string, AssertionRecord};

use crate::config::{ApplicationSecret, VerifierConfig};

type HmacSha256 = Hmac<Sha256>;

/// Error raised by the MAC primitive.
#[derive(thiserror::Error, Debug)]
pub enum SignatureError {
    /// The HMAC implementation refused the key.
    #[error("MAC key rejected: {0}")]
    InvalidKey(String),
}

/// 256-bit MAC key derived from the application secret.
#[derive(Clone)]
pub struct SigningKey([u8; 32]);

impl SigningKey {
    /// Derives the key as the SHA-256 digest of the secret's UTF-8 bytes.
    pub fn derive(secret: &ApplicationSecret) -> Self {
        Self(Sha256::digest(secret.expose().as_bytes()).into())
    }

    /// Derives the key for a verifier configuration.
    pub fn from_config(config: &VerifierConfig) -> Self {
        Self::derive(config.application_secret())
    }

    fn mac(&self) -> Result<HmacSha256, SignatureError> {
        HmacSha256::new_from_slice(&self.0).map_err(|e| SignatureError::InvalidKey(e.to_string()))
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey(<redacted>)")
    }
}

/// Computes the lowercase hex HMAC-SHA-256 of `check_string`.
pub fn compute_signature(key: &SigningKey, check_string: &str) -> Result<String, SignatureError> {
    let mut mac = key.mac()?;
    mac.update(check_string.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Computes the `hash` a widget would attach to `record`.
///
/// The record's own `hash` is ignored.
pub fn sign(record: &AssertionRecord, key: &SigningKey) -> Result<String, SignatureError> {
    compute_signature(key, &check_string(record))
}

/// Constant-time comparison of a computed signature with a claimed one.
///
/// Lengths are not hidden; the content is.
pub fn signatures_match(computed: &str, claimed: &str) -> bool {
    computed.as_bytes().ct_eq(claimed.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(secret: &str) -> SigningKey {
        SigningKey::derive(&ApplicationSecret::new(secret).unwrap())
    }

    #[test]
    fn key_is_sha256_of_secret() {
        let k = key("testsecret");
        let expected: [u8; 32] = Sha256::digest(b"testsecret").into();
        assert_eq!(k.0, expected);
    }

    #[test]
    fn signature_is_lowercase_hex_of_64_chars() {
        let sig = compute_signature(&key("testsecret"), "auth_date=1\nid=2").unwrap();
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn different_secrets_give_different_signatures() {
        let a = compute_signature(&key("one"), "id=1").unwrap();
        let b = compute_signature(&key("two"), "id=1").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn comparison_is_exact() {
        assert!(signatures_match("abcd", "abcd"));
        assert!(!signatures_match("abcd", "abce"));
        assert!(!signatures_match("abcd", "ABCD"));
        assert!(!signatures_match("abcd", "abc"));
        assert!(!signatures_match("abcd", ""));
    }

    #[test]
    fn key_debug_is_redacted() {
        assert_eq!(format!("{:?}", key("x")), "SigningKey(<redacted>)");
    }
}
