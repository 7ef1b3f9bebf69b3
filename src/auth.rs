//! Credentials and request signing for the ABL API.
//!
//! Every request is authenticated with an API key pair issued to an operator:
//! the public key travels in clear in the access-key header, the private key
//! only ever keys the HMAC that produces the signature header.
//!
//! # Signing Flow
//!
//! 1. Build the canonical string of the request (resource path + sorted query,
//!    or resource path + JSON body)
//! 2. Append the millisecond timestamp sent in the date header
//! 3. HMAC-SHA256 the result with the private key
//! 4. Hex-encode the digest

use std::fmt;

use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;

/// Required length of both the public and the private key.
pub const KEY_LENGTH: usize = 64;

type HmacSha256 = Hmac<Sha256>;

/// Credential validation errors, raised when a client is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialsError {
    #[error("API key must be specified and be of length {expected} characters (got {actual})")]
    PublicKey { expected: usize, actual: usize },

    #[error("API secret must be specified and be of length {expected} characters (got {actual})")]
    PrivateKey { expected: usize, actual: usize },
}

/// Result type alias for credential operations.
pub type CredentialsResult<T> = Result<T, CredentialsError>;

/// An operator's API key pair.
///
/// Both keys are validated on construction and never change afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    public_key: String,
    private_key: String,
}

impl Credentials {
    /// Validate and store a key pair.
    ///
    /// # Errors
    ///
    /// Returns an error if either key is not exactly [`KEY_LENGTH`] characters.
    pub fn new(
        public_key: impl Into<String>,
        private_key: impl Into<String>,
    ) -> CredentialsResult<Self> {
        let public_key = public_key.into();
        let private_key = private_key.into();

        let actual = public_key.chars().count();
        if actual != KEY_LENGTH {
            return Err(CredentialsError::PublicKey {
                expected: KEY_LENGTH,
                actual,
            });
        }

        let actual = private_key.chars().count();
        if actual != KEY_LENGTH {
            return Err(CredentialsError::PrivateKey {
                expected: KEY_LENGTH,
                actual,
            });
        }

        Ok(Self {
            public_key,
            private_key,
        })
    }

    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    /// Sign a canonical URL at the given timestamp with the private key.
    pub fn sign(&self, canonical: &str, timestamp_ms: i64) -> String {
        sign(&self.private_key, canonical, timestamp_ms)
    }
}

// Keep the private key out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// Compute the request signature.
///
/// Returns the lowercase hex HMAC-SHA256 of `canonical` followed by the decimal
/// timestamp, keyed with `secret`.
pub fn sign(secret: &str, canonical: &str, timestamp_ms: i64) -> String {
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => unreachable!("HMAC-SHA256 accepts keys of any length"),
    };
    mac.update(canonical.as_bytes());
    mac.update(timestamp_ms.to_string().as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Current time in milliseconds since the UNIX epoch.
pub fn current_timestamp_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(c: char) -> String {
        std::iter::repeat(c).take(KEY_LENGTH).collect()
    }

    #[test]
    fn test_credentials_accepts_64_chars() {
        let creds = Credentials::new(key('a'), key('b')).unwrap();
        assert_eq!(creds.public_key(), key('a'));
    }

    #[test]
    fn test_credentials_content_is_not_validated() {
        let public: String = "!@# $%^&*()".chars().cycle().take(KEY_LENGTH).collect();
        assert!(Credentials::new(public, key(' ')).is_ok());
    }

    #[test]
    fn test_credentials_rejects_bad_public_key() {
        for len in [0, 1, 63, 65, 128] {
            let public: String = "p".repeat(len);
            let err = Credentials::new(public, key('s')).unwrap_err();
            assert_eq!(
                err,
                CredentialsError::PublicKey {
                    expected: KEY_LENGTH,
                    actual: len
                }
            );
        }
    }

    #[test]
    fn test_credentials_rejects_bad_private_key() {
        let err = Credentials::new(key('p'), "short").unwrap_err();
        assert_eq!(
            err,
            CredentialsError::PrivateKey {
                expected: KEY_LENGTH,
                actual: 5
            }
        );
    }

    #[test]
    fn test_credentials_debug_redacts_private_key() {
        let creds = Credentials::new(key('p'), key('s')).unwrap();
        let debug = format!("{:?}", creds);
        assert!(debug.contains(&key('p')));
        assert!(!debug.contains(&key('s')));
    }

    #[test]
    fn test_sign_is_deterministic() {
        let a = sign(&key('s'), "/activities?limit=10", 1_450_000_000_000);
        let b = sign(&key('s'), "/activities?limit=10", 1_450_000_000_000);
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_sign_depends_on_every_input() {
        let base = sign(&key('s'), "/activities", 1000);
        assert_ne!(base, sign(&key('t'), "/activities", 1000));
        assert_ne!(base, sign(&key('s'), "/activities/A1", 1000));
        assert_ne!(base, sign(&key('s'), "/activities", 1001));
    }

    #[test]
    fn test_sign_covers_canonical_then_timestamp() {
        let sig = sign("Jefe", "/login", 1234567890123);
        let mut mac = HmacSha256::new_from_slice(b"Jefe").unwrap();
        mac.update(b"/login1234567890123");
        assert_eq!(sig, hex::encode(mac.finalize().into_bytes()));
    }

    #[test]
    fn test_current_timestamp_is_milliseconds() {
        let ts = current_timestamp_ms();
        // After 2020-01-01 in milliseconds
        assert!(ts > 1_577_836_800_000);
    }
}
