//! The admin gate.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Duration;
use parking_lot::RwLock;
use tracing::{info, instrument, warn};

use crate::password::verify_password;
use crate::session::AdminSession;
use crate::token::TokenSigner;
use crate::AuthError;

/// Access check in front of product writes.
#[async_trait]
pub trait AdminGate: Send + Sync {
    /// Exchange credentials for a session.
    async fn login(&self, username: &str, password: &str) -> Result<AdminSession, AuthError>;

    /// Check that a token belongs to a live session.
    async fn validate(&self, token: &str) -> Result<AdminSession, AuthError>;

    /// End a session. Unknown tokens are ignored.
    async fn logout(&self, token: &str);
}

/// Single-admin gate backed by a configured argon2 hash.
///
/// Sessions live in memory. Callers that need them across processes persist
/// the [`AdminSession`] themselves and [`restore`](CredentialGate::restore)
/// it; only tokens signed with this gate's key are accepted back.
///
/// The signing key defaults to the configured password hash, so changing the
/// password ends every outstanding session.
pub struct CredentialGate {
    username: String,
    password_hash: String,
    signer: TokenSigner,
    session_duration: Duration,
    sessions: RwLock<HashMap<String, AdminSession>>,
}

impl CredentialGate {
    /// Create a gate for one admin account.
    ///
    /// The hash is parsed up front so a bad config fails here rather than on
    /// the first login.
    pub fn new(
        username: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Result<Self, AuthError> {
        let password_hash = password_hash.into();
        argon2::PasswordHash::new(&password_hash)
            .map_err(|e| AuthError::InvalidHash(e.to_string()))?;

        Ok(Self {
            username: username.into(),
            signer: TokenSigner::new(&password_hash),
            password_hash,
            session_duration: Duration::seconds(AdminSession::DEFAULT_DURATION_SECS),
            sessions: RwLock::new(HashMap::new()),
        })
    }

    pub fn with_session_duration(mut self, duration: Duration) -> Self {
        self.session_duration = duration;
        self
    }

    /// Sign tokens with an explicit secret instead of the password hash.
    pub fn with_signing_key(mut self, key: impl AsRef<[u8]>) -> Self {
        self.signer = TokenSigner::new(key);
        self
    }

    /// Re-register a previously issued session.
    ///
    /// Sessions for another user, sessions whose token was not signed by
    /// this gate's key and expired sessions are refused.
    pub fn restore(&self, session: AdminSession) -> Result<(), AuthError> {
        if session.username != self.username {
            return Err(AuthError::SessionNotFound);
        }
        if !session.is_signed_by(&self.signer) {
            warn!("Rejected session with an invalid token");
            return Err(AuthError::InvalidToken);
        }
        if session.is_expired() {
            return Err(AuthError::SessionExpired);
        }
        self.sessions.write().insert(session.token.clone(), session);
        Ok(())
    }

    /// Number of live sessions.
    pub fn active_sessions(&self) -> usize {
        self.sessions.read().values().filter(|s| !s.is_expired()).count()
    }
}

#[async_trait]
impl AdminGate for CredentialGate {
    #[instrument(skip(self, password))]
    async fn login(&self, username: &str, password: &str) -> Result<AdminSession, AuthError> {
        // Hash check runs regardless of the username.
        let password_ok = verify_password(password, &self.password_hash)?;
        if username != self.username || !password_ok {
            warn!("Rejected admin login");
            return Err(AuthError::InvalidCredentials);
        }

        let session = AdminSession::issue(&self.signer, username, self.session_duration)?;
        let mut sessions = self.sessions.write();
        sessions.retain(|_, s| !s.is_expired());
        sessions.insert(session.token.clone(), session.clone());

        info!(expires_at = %session.expires_at, "Admin logged in");
        Ok(session)
    }

    async fn validate(&self, token: &str) -> Result<AdminSession, AuthError> {
        let session = self
            .sessions
            .read()
            .get(token)
            .cloned()
            .ok_or(AuthError::SessionNotFound)?;

        if session.is_expired() {
            self.sessions.write().remove(token);
            return Err(AuthError::SessionExpired);
        }
        Ok(session)
    }

    async fn logout(&self, token: &str) {
        self.sessions.write().remove(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::password::hash_password;

    fn gate() -> CredentialGate {
        let hash = hash_password("roswell-secret").unwrap();
        CredentialGate::new("admin", hash).unwrap()
    }

    #[tokio::test]
    async fn test_login_validate_logout() {
        let gate = gate();
        let session = gate.login("admin", "roswell-secret").await.unwrap();

        let validated = gate.validate(&session.token).await.unwrap();
        assert_eq!(validated.username, "admin");
        assert_eq!(gate.active_sessions(), 1);

        gate.logout(&session.token).await;
        assert!(matches!(
            gate.validate(&session.token).await,
            Err(AuthError::SessionNotFound)
        ));
    }

    #[tokio::test]
    async fn test_wrong_credentials() {
        let gate = gate();
        assert!(matches!(
            gate.login("admin", "wrong-password").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            gate.login("root", "roswell-secret").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert_eq!(gate.active_sessions(), 0);
    }

    #[tokio::test]
    async fn test_expired_session_is_rejected() {
        let gate = gate().with_session_duration(Duration::seconds(-1));
        let session = gate.login("admin", "roswell-secret").await.unwrap();

        let err = gate.validate(&session.token).await.unwrap_err();
        assert!(matches!(err, AuthError::SessionExpired));
        assert!(err.is_auth_failure());
    }

    #[tokio::test]
    async fn test_restore_session() {
        let issuer = gate();
        let session = issuer.login("admin", "roswell-secret").await.unwrap();

        // Same configured hash, separate process.
        let other = CredentialGate::new("admin", issuer.password_hash.clone()).unwrap();
        other.restore(session.clone()).unwrap();
        assert!(other.validate(&session.token).await.is_ok());

        let foreign = AdminSession::issue(&issuer.signer, "intruder", Duration::hours(1)).unwrap();
        assert!(matches!(
            other.restore(foreign),
            Err(AuthError::SessionNotFound)
        ));
    }

    #[tokio::test]
    async fn test_handwritten_session_is_rejected() {
        let gate = gate();
        let forged: AdminSession = serde_json::from_str(
            r#"{
                "token": "anything",
                "username": "admin",
                "created_at": "2024-01-01T00:00:00Z",
                "expires_at": "2099-01-01T00:00:00Z"
            }"#,
        )
        .unwrap();

        assert!(matches!(
            gate.restore(forged),
            Err(AuthError::InvalidToken)
        ));
        assert!(matches!(
            gate.validate("anything").await,
            Err(AuthError::SessionNotFound)
        ));
        assert_eq!(gate.active_sessions(), 0);
    }

    #[tokio::test]
    async fn test_session_from_other_key_is_rejected() {
        let issuer = gate();
        let session = issuer.login("admin", "roswell-secret").await.unwrap();

        // Password changed since the session was issued.
        let rehashed = gate();
        assert!(matches!(
            rehashed.restore(session.clone()),
            Err(AuthError::InvalidToken)
        ));

        let keyed = gate().with_signing_key(b"shared-secret");
        let keyed_session = keyed.login("admin", "roswell-secret").await.unwrap();
        let peer = gate().with_signing_key(b"shared-secret");
        peer.restore(keyed_session).unwrap();
    }

    #[test]
    fn test_plaintext_password_is_not_a_hash() {
        assert!(matches!(
            CredentialGate::new("admin", "roswell2024"),
            Err(AuthError::InvalidHash(_))
        ));
    }
}
