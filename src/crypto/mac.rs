//! HMAC-SHA256 tag over the envelope data.
//!
//! The MAC key is `salt || secret_key`, so it differs per message even when
//! the secret key is reused.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use zeroize::Zeroizing;

use super::TAG_LEN;
use crate::error::{CryptoError, CryptoResult, DecryptionError};

type HmacSha256 = Hmac<Sha256>;

fn keyed(salt: &[u8], secret_key: &[u8]) -> Option<HmacSha256> {
    let key = Zeroizing::new([salt, secret_key].concat());
    HmacSha256::new_from_slice(&key).ok()
}

/// Computes the tag for `data`.
pub fn tag(salt: &[u8], secret_key: &[u8], data: &[u8]) -> CryptoResult<[u8; TAG_LEN]> {
    let mut mac = keyed(salt, secret_key)
        .ok_or_else(|| CryptoError::Encryption("HMAC key setup failed".into()))?;
    mac.update(data);

    let mut out = [0u8; TAG_LEN];
    out.copy_from_slice(&mac.finalize().into_bytes());
    Ok(out)
}

/// Checks `expected` against the tag for `data` in constant time.
pub fn verify(
    salt: &[u8],
    secret_key: &[u8],
    data: &[u8],
    expected: &[u8],
) -> Result<(), DecryptionError> {
    let mut mac = keyed(salt, secret_key).ok_or(DecryptionError::HashValidation)?;
    mac.update(data);
    mac.verify_slice(expected).map_err(|_| DecryptionError::HashValidation)
}
