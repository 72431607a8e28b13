//! Signed session tokens.
//!
//! A token is `{nonce}.{tag}`: 32 random bytes and an HMAC-SHA256 over the
//! username, the expiry and the nonce, both URL-safe base64. A gate holding
//! the key can check a persisted session without having issued it in the
//! same process.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;

use crate::AuthError;

type HmacSha256 = Hmac<Sha256>;

/// Bytes of randomness in a token nonce.
const NONCE_BYTES: usize = 32;

/// URL-safe random string.
pub fn generate_token() -> String {
    let mut bytes = [0u8; NONCE_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Signs and checks session tokens with a secret key.
#[derive(Clone)]
pub struct TokenSigner {
    key: Vec<u8>,
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner").finish_non_exhaustive()
    }
}

impl TokenSigner {
    pub fn new(key: impl AsRef<[u8]>) -> Self {
        Self {
            key: key.as_ref().to_vec(),
        }
    }

    /// Issue a token bound to a username and expiry.
    pub fn sign(&self, username: &str, expires_at: DateTime<Utc>) -> Result<String, AuthError> {
        let nonce = generate_token();
        let mac = self.mac(username, expires_at, &nonce)?;
        let tag = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
        Ok(format!("{}.{}", nonce, tag))
    }

    /// Check that a token was signed with this key for these claims.
    pub fn verify(&self, token: &str, username: &str, expires_at: DateTime<Utc>) -> bool {
        let Some((nonce, tag)) = token.split_once('.') else {
            return false;
        };
        let Ok(tag) = URL_SAFE_NO_PAD.decode(tag) else {
            return false;
        };
        let Ok(mac) = self.mac(username, expires_at, nonce) else {
            return false;
        };
        // Constant-time comparison
        mac.verify_slice(&tag).is_ok()
    }

    fn mac(
        &self,
        username: &str,
        expires_at: DateTime<Utc>,
        nonce: &str,
    ) -> Result<HmacSha256, AuthError> {
        let mut mac = HmacSha256::new_from_slice(&self.key)
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        mac.update(username.as_bytes());
        mac.update(b"|");
        mac.update(expires_at.to_rfc3339().as_bytes());
        mac.update(b"|");
        mac.update(nonce.as_bytes());
        Ok(mac)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_tokens_are_random() {
        let a = generate_token();
        let b = generate_token();
        assert_ne!(a, b);
        assert_eq!(a.len(), 43);
        assert!(!a.contains('+') && !a.contains('/') && !a.contains('='));
    }

    #[test]
    fn test_sign_and_verify() {
        let signer = TokenSigner::new(b"roswell-key");
        let expires_at = Utc::now() + Duration::hours(1);
        let token = signer.sign("admin", expires_at).unwrap();

        assert!(signer.verify(&token, "admin", expires_at));
        assert!(!signer.verify(&token, "intruder", expires_at));
        assert!(!signer.verify(&token, "admin", expires_at + Duration::days(30)));
        assert!(!TokenSigner::new(b"other-key").verify(&token, "admin", expires_at));
    }

    #[test]
    fn test_malformed_tokens_fail() {
        let signer = TokenSigner::new(b"roswell-key");
        let expires_at = Utc::now() + Duration::hours(1);

        assert!(!signer.verify("anything", "admin", expires_at));
        assert!(!signer.verify("nonce.!!!", "admin", expires_at));
        assert!(!signer.verify(&format!("{}.", generate_token()), "admin", expires_at));
    }
}
