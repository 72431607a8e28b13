//! Authentication errors.

use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Username or password did not match.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No session for the token.
    #[error("session not found")]
    SessionNotFound,

    /// The token was not signed by this gate.
    #[error("invalid session token")]
    InvalidToken,

    /// The session exists but has expired.
    #[error("session expired")]
    SessionExpired,

    /// The configured password hash is not a valid PHC string.
    #[error("invalid password hash: {0}")]
    InvalidHash(String),

    /// Password rejected before hashing.
    #[error("password too weak: {0}")]
    WeakPassword(String),

    /// Hashing failed.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Check if this is an authentication failure rather than a setup error.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidCredentials
                | AuthError::SessionNotFound
                | AuthError::InvalidToken
                | AuthError::SessionExpired
        )
    }
}
