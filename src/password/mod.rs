//! Password hashing adapters.
//!
//! Each adapter validates its cost parameters when constructed and turns a
//! password into a self-describing credential string. Verification is left
//! to the underlying primitive (`bcrypt::verify`, `argon2::PasswordVerifier`).

use std::fmt::Display;

use crate::error::{CryptoError, CryptoResult};

mod argon2;
mod bcrypt;

pub use self::argon2::{Argon2Hasher, Argon2Variant};
pub use self::bcrypt::BcryptHasher;

/// Hashes a password into a verifiable credential.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &[u8]) -> CryptoResult<String>;
}

/// Wraps a primitive failure, falling back to "unknown reason" when the
/// primitive gives no diagnostic.
pub(crate) fn hashing_failed(label: impl Display, reason: impl Display) -> CryptoError {
    let reason = reason.to_string();
    let reason = if reason.trim().is_empty() {
        "unknown reason"
    } else {
        reason.as_str()
    };
    CryptoError::Hashing(format!("{label} hasher failed: {reason}"))
}
