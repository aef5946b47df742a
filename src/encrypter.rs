//! Password-based authenticated encryption.

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use zeroize::Zeroizing;

use crate::crypto::{self, CipherMethod, Envelope};
use crate::error::{CryptoError, CryptoResult, DecryptionError};

/// Default cipher algorithm.
pub const DEFAULT_ALGORITHM: &str = "AES-256-CBC";

/// Symmetric encryption of payloads under a password.
///
/// `encrypt_raw`/`decrypt_raw` work on envelope bytes; `encrypt`/`decrypt`
/// wrap them in standard base64.
pub trait Encrypter: Send + Sync {
    /// Canonical name of the cipher algorithm in use.
    fn algorithm(&self) -> &str;

    /// Produces a fresh envelope for `plaintext`.
    fn encrypt_raw(&self, plaintext: &[u8], password: &[u8]) -> CryptoResult<Vec<u8>>;

    /// Verifies and decrypts an envelope. Nothing is returned unless the tag
    /// matches and the cipher succeeds.
    fn decrypt_raw(&self, envelope: &[u8], password: &[u8]) -> CryptoResult<Zeroizing<Vec<u8>>>;

    fn encrypt(&self, plaintext: &[u8], password: &[u8]) -> CryptoResult<String> {
        Ok(STANDARD.encode(self.encrypt_raw(plaintext, password)?))
    }

    fn decrypt(&self, envelope: &str, password: &[u8]) -> CryptoResult<Zeroizing<Vec<u8>>> {
        let raw = STANDARD
            .decode(envelope.trim())
            .map_err(|_| DecryptionError::Encoding)?;
        self.decrypt_raw(&raw, password)
    }
}

/// [`Encrypter`] running a block cipher in CBC mode, authenticated with
/// HMAC-SHA256.
///
/// Each envelope carries a fresh 16-byte salt and IV. The cipher key is
/// `salt || password`; the MAC key is `salt || secret key`. There is no key
/// stretching, so an envelope is only as hard to open as its password is to
/// guess.
pub struct CbcEncrypter {
    method: CipherMethod,
    key: Zeroizing<Vec<u8>>,
    iv_len: usize,
}

impl CbcEncrypter {
    /// Creates an engine for `algorithm` (case-insensitive) and secret `key`.
    pub fn new(key: impl Into<Vec<u8>>, algorithm: &str) -> CryptoResult<Self> {
        let method = crypto::cipher_method(algorithm).ok_or_else(|| {
            CryptoError::Configuration(format!("unsupported cipher algorithm {algorithm}"))
        })?;

        let key = Zeroizing::new(key.into());
        if key.is_empty() {
            return Err(CryptoError::Configuration(
                "encryption key must not be empty".into(),
            ));
        }

        tracing::debug!(algorithm = method.name(), "encrypter ready");

        Ok(Self {
            method,
            key,
            iv_len: method.iv_len(),
        })
    }

    /// Creates an engine using [`DEFAULT_ALGORITHM`].
    pub fn with_default_algorithm(key: impl Into<Vec<u8>>) -> CryptoResult<Self> {
        Self::new(key, DEFAULT_ALGORITHM)
    }

    pub fn iv_len(&self) -> usize {
        self.iv_len
    }
}

impl Encrypter for CbcEncrypter {
    fn algorithm(&self) -> &str {
        self.method.name()
    }

    fn encrypt_raw(&self, plaintext: &[u8], password: &[u8]) -> CryptoResult<Vec<u8>> {
        let iv = crypto::generate_iv(self.iv_len)?;
        let salt = crypto::generate_salt()?;

        let key = crypto::key_material(&self.method, &salt, password);
        let ciphertext = crypto::seal(&self.method, &key, &iv, plaintext)?;

        let mut envelope = Envelope::assemble(&salt, &iv, &ciphertext);
        let tag = crypto::mac::tag(&salt, &self.key, &envelope)?;
        envelope.extend_from_slice(&tag);

        Ok(envelope)
    }

    fn decrypt_raw(&self, bytes: &[u8], password: &[u8]) -> CryptoResult<Zeroizing<Vec<u8>>> {
        let envelope = Envelope::from_bytes(bytes, self.iv_len)
            .inspect_err(|_| tracing::debug!(len = bytes.len(), "envelope too short"))?;

        crypto::mac::verify(envelope.salt(), &self.key, envelope.data(), envelope.tag())
            .inspect_err(|_| tracing::debug!("envelope tag mismatch"))?;

        let key = crypto::key_material(&self.method, envelope.salt(), password);
        crypto::open(&self.method, &key, envelope.iv(), envelope.ciphertext())
    }
}

impl fmt::Debug for CbcEncrypter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CbcEncrypter")
            .field("algorithm", &self.method.name())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "some secret key";
    const PASSWORD: &[u8] = b"some secret password";
    const DATA: &[u8] = b"some secret data";

    fn engine() -> CbcEncrypter {
        CbcEncrypter::with_default_algorithm(KEY).unwrap()
    }

    #[test]
    fn unsupported_algorithm_fails() {
        let err = CbcEncrypter::new("whatever", "FOO").unwrap_err();
        assert!(matches!(err, CryptoError::Configuration(_)));
    }

    #[test]
    fn empty_key_fails() {
        let err = CbcEncrypter::new(Vec::new(), DEFAULT_ALGORITHM).unwrap_err();
        assert!(matches!(err, CryptoError::Configuration(_)));
    }

    #[test]
    fn default_algorithm_pins_iv_len() {
        let e = engine();
        assert_eq!(e.algorithm(), "aes-256-cbc");
        assert_eq!(e.iv_len(), 16);
    }

    #[test]
    fn encoded_and_raw_roundtrip() {
        let e = engine();

        let encoded = e.encrypt(DATA, PASSWORD).unwrap();
        let raw = e.encrypt_raw(DATA, PASSWORD).unwrap();
        assert_ne!(encoded.as_bytes(), DATA);
        assert_ne!(encoded.as_bytes(), raw.as_slice());

        assert_eq!(e.decrypt(&encoded, PASSWORD).unwrap().as_slice(), DATA);
        assert_eq!(e.decrypt_raw(&raw, PASSWORD).unwrap().as_slice(), DATA);
    }

    #[test]
    fn envelope_length_matches_layout() {
        let raw = engine().encrypt_raw(DATA, PASSWORD).unwrap();
        // 16 bytes of data pad to two AES blocks.
        assert_eq!(raw.len(), 16 + 16 + 32 + 32);
    }

    #[test]
    fn zero_iv_length_is_an_encryption_error() {
        let mut e = engine();
        e.iv_len = 0;

        let err = e.encrypt(b"foo", b"bar").unwrap_err();
        assert!(matches!(err, CryptoError::Encryption(_)));
    }

    #[test]
    fn corrupted_first_character_fails_validation() {
        let e = engine();
        let encoded = e.encrypt(DATA, PASSWORD).unwrap();

        let replacement = if encoded.starts_with('x') { "y" } else { "x" };
        let corrupted = format!("{replacement}{}", &encoded[1..]);

        let err = e.decrypt(&corrupted, PASSWORD).unwrap_err();
        assert_eq!(err.decryption_reason(), Some(DecryptionError::HashValidation));
    }

    #[test]
    fn wrong_secret_key_fails_validation() {
        let raw = engine().encrypt_raw(DATA, PASSWORD).unwrap();
        let other = CbcEncrypter::with_default_algorithm("another key").unwrap();

        let err = other.decrypt_raw(&raw, PASSWORD).unwrap_err();
        assert_eq!(err.decryption_reason(), Some(DecryptionError::HashValidation));
    }

    #[test]
    fn invalid_base64_is_an_encoding_error() {
        let err = engine().decrypt("not base64 at all!", PASSWORD).unwrap_err();
        assert_eq!(err.decryption_reason(), Some(DecryptionError::Encoding));
    }

    #[test]
    fn debug_hides_key() {
        let rendered = format!("{:?}", engine());
        assert!(rendered.contains("aes-256-cbc"));
        assert!(!rendered.contains(KEY));
    }
}
