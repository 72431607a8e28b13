//! Admin authentication for the Roswell storefront.
//!
//! Product writes sit behind an [`AdminGate`]. [`CredentialGate`] checks a
//! single admin account against an argon2 hash and hands out expiring session
//! tokens signed with HMAC-SHA256.

mod error;
mod gate;
mod password;
mod session;
mod token;

pub use error::AuthError;
pub use gate::{AdminGate, CredentialGate};
pub use password::{hash_password, verify_password, MIN_PASSWORD_LEN};
pub use session::AdminSession;
pub use token::{generate_token, TokenSigner};
