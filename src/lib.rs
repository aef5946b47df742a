//! Password-based authenticated encryption and password hashing.
//!
//! Two independent services sit behind small traits:
//!
//! - [`Encrypter`]: [`CbcEncrypter`] turns plaintext and a password into a
//!   self-describing envelope `salt (16) | iv | ciphertext | tag (32)` and
//!   rejects tampered envelopes before decrypting anything.
//! - [`PasswordHasher`]: [`Argon2Hasher`] and [`BcryptHasher`] turn a password
//!   into a crypt-style credential string.
//!
//! The cipher key is `salt || password` cut to the cipher's key length. That
//! is not a key derivation function; envelopes are only as strong as their
//! passwords. The layout is kept as is so existing envelopes stay readable.
//!
//! ```no_run
//! use sealkit::{CbcEncrypter, Encrypter};
//!
//! let encrypter = CbcEncrypter::with_default_algorithm("some secret key")?;
//! let envelope = encrypter.encrypt(b"some secret data", b"some secret password")?;
//! let plaintext = encrypter.decrypt(&envelope, b"some secret password")?;
//! assert_eq!(plaintext.as_slice(), b"some secret data");
//! # Ok::<(), sealkit::CryptoError>(())
//! ```

pub mod config;
pub mod crypto;
mod encrypter;
mod error;
pub mod password;

pub use crate::config::Config;
pub use crate::crypto::{cipher_method, cipher_methods};
pub use crate::encrypter::{CbcEncrypter, DEFAULT_ALGORITHM, Encrypter};
pub use crate::error::{CryptoError, CryptoResult, DecryptionError};
pub use crate::password::{Argon2Hasher, Argon2Variant, BcryptHasher, PasswordHasher};
