//! Error types shared by the encryption engine and the password hashers.

use thiserror::Error;

/// Result type for every fallible operation in this crate.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Failure kinds surfaced by encrypters and password hashers.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Invalid construction arguments. Only ever returned by constructors.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// The encrypt path could not produce a well-formed envelope.
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// The envelope was rejected. No plaintext is ever returned alongside.
    #[error(transparent)]
    Decryption(#[from] DecryptionError),

    /// The hashing primitive failed or the input broke a hard precondition.
    #[error("hashing failed: {0}")]
    Hashing(String),
}

/// Why an envelope was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecryptionError {
    /// The text encoding around the envelope is not valid base64.
    #[error("invalid envelope encoding")]
    Encoding,

    /// The authentication tag did not match, or the envelope is too short to
    /// carry one.
    #[error("hash validation failed")]
    HashValidation,

    /// The tag matched but the cipher could not invert the ciphertext.
    #[error("decryption failed")]
    Cipher,
}

impl CryptoError {
    /// Returns the decryption failure reason, if this is one.
    pub fn decryption_reason(&self) -> Option<DecryptionError> {
        match self {
            CryptoError::Decryption(reason) => Some(*reason),
            _ => None,
        }
    }
}
