//! Admin sessions.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::token::TokenSigner;
use crate::AuthError;

/// An authenticated admin session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminSession {
    /// Signed bearer token.
    pub token: String,
    /// Admin the session belongs to.
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl AdminSession {
    /// Default session duration: 12 hours.
    pub const DEFAULT_DURATION_SECS: i64 = 12 * 60 * 60;

    /// Start a session with a freshly signed token.
    pub fn issue(
        signer: &TokenSigner,
        username: impl Into<String>,
        duration: Duration,
    ) -> Result<Self, AuthError> {
        let username = username.into();
        let now = Utc::now();
        let expires_at = now + duration;
        Ok(Self {
            token: signer.sign(&username, expires_at)?,
            username,
            created_at: now,
            expires_at,
        })
    }

    /// Whether the token was signed by `signer` for this username and expiry.
    pub fn is_signed_by(&self, signer: &TokenSigner) -> bool {
        signer.verify(&self.token, &self.username, self.expires_at)
    }

    /// Check if the session has expired.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Time left before expiry, zero once expired.
    pub fn remaining(&self) -> Duration {
        (self.expires_at - Utc::now()).max(Duration::zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signer() -> TokenSigner {
        TokenSigner::new(b"session-test-key")
    }

    #[test]
    fn test_expiry() {
        let session = AdminSession::issue(&signer(), "admin", Duration::hours(1)).unwrap();
        assert!(!session.is_expired());
        assert!(session.is_expired_at(session.expires_at));
        assert!(session.remaining() > Duration::minutes(59));

        let expired = AdminSession::issue(&signer(), "admin", Duration::seconds(-1)).unwrap();
        assert!(expired.is_expired());
        assert_eq!(expired.remaining(), Duration::zero());
    }

    #[test]
    fn test_session_serializes_and_stays_signed() {
        let session = AdminSession::issue(&signer(), "admin", Duration::hours(1)).unwrap();
        let json = serde_json::to_string(&session).unwrap();
        let restored: AdminSession = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, session);
        assert!(restored.is_signed_by(&signer()));
    }

    #[test]
    fn test_edited_expiry_breaks_signature() {
        let mut session = AdminSession::issue(&signer(), "admin", Duration::hours(1)).unwrap();
        session.expires_at += Duration::days(365);
        assert!(!session.is_signed_by(&signer()));
    }
}
