use aes::{Aes128, Aes192, Aes256};
use camellia::{Camellia128, Camellia192, Camellia256};
use cbc::cipher::{
    BlockCipher, BlockDecryptMut, BlockEncryptMut, InvalidLength, KeyInit, KeyIvInit,
    block_padding::Pkcs7,
};
use getrandom::fill;
use zeroize::Zeroizing;

use super::SALT_LEN;
use super::methods::{CipherKind, CipherMethod};
use crate::error::{CryptoError, CryptoResult, DecryptionError};

/// Fill buffer with cryptographically secure random bytes
fn secure_random(buf: &mut [u8]) -> CryptoResult<()> {
    if buf.is_empty() {
        return Err(CryptoError::Encryption(
            "Random bytes failure: length must be greater than 0".into(),
        ));
    }
    fill(buf).map_err(|e| {
        tracing::warn!(error = %e, "OS random generator unavailable");
        CryptoError::Encryption(format!("Random bytes failure: {e}"))
    })
}

/// Generate salt
pub fn generate_salt() -> CryptoResult<[u8; SALT_LEN]> {
    let mut salt = [0u8; SALT_LEN];
    secure_random(&mut salt)?;
    Ok(salt)
}

/// Generate an IV of `len` bytes. A zero length is an error.
pub fn generate_iv(len: usize) -> CryptoResult<Vec<u8>> {
    let mut iv = vec![0u8; len];
    secure_random(&mut iv)?;
    Ok(iv)
}

/// Builds the cipher key from `salt || password`.
///
/// The concatenation is cut or zero-padded to the cipher's key length, so
/// only the first `key_len - 16` password bytes take part. This is not a KDF:
/// the key is exactly as strong as the password.
pub fn key_material(method: &CipherMethod, salt: &[u8], password: &[u8]) -> Zeroizing<Vec<u8>> {
    let mut key = Zeroizing::new(vec![0u8; method.key_len()]);
    for (dst, src) in key.iter_mut().zip(salt.iter().chain(password)) {
        *dst = *src;
    }
    key
}

/// Encrypt plaintext
pub fn seal(
    method: &CipherMethod,
    key: &[u8],
    iv: &[u8],
    plaintext: &[u8],
) -> CryptoResult<Vec<u8>> {
    let sealed = match method.kind() {
        CipherKind::Aes128 => cbc_encrypt::<Aes128>(key, iv, plaintext),
        CipherKind::Aes192 => cbc_encrypt::<Aes192>(key, iv, plaintext),
        CipherKind::Aes256 => cbc_encrypt::<Aes256>(key, iv, plaintext),
        CipherKind::Camellia128 => cbc_encrypt::<Camellia128>(key, iv, plaintext),
        CipherKind::Camellia192 => cbc_encrypt::<Camellia192>(key, iv, plaintext),
        CipherKind::Camellia256 => cbc_encrypt::<Camellia256>(key, iv, plaintext),
    };
    sealed.map_err(|e| {
        CryptoError::Encryption(format!("{} cipher setup failed: {e}", method.name()))
    })
}

/// Decrypt ciphertext
pub fn open(
    method: &CipherMethod,
    key: &[u8],
    iv: &[u8],
    ciphertext: &[u8],
) -> CryptoResult<Zeroizing<Vec<u8>>> {
    let opened = match method.kind() {
        CipherKind::Aes128 => cbc_decrypt::<Aes128>(key, iv, ciphertext),
        CipherKind::Aes192 => cbc_decrypt::<Aes192>(key, iv, ciphertext),
        CipherKind::Aes256 => cbc_decrypt::<Aes256>(key, iv, ciphertext),
        CipherKind::Camellia128 => cbc_decrypt::<Camellia128>(key, iv, ciphertext),
        CipherKind::Camellia192 => cbc_decrypt::<Camellia192>(key, iv, ciphertext),
        CipherKind::Camellia256 => cbc_decrypt::<Camellia256>(key, iv, ciphertext),
    };
    opened
        .map(Zeroizing::new)
        .ok_or(CryptoError::Decryption(DecryptionError::Cipher))
}

fn cbc_encrypt<C>(key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, InvalidLength>
where
    C: BlockEncryptMut + BlockCipher + KeyInit,
{
    let encryptor = cbc::Encryptor::<C>::new_from_slices(key, iv)?;
    Ok(encryptor.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
}

fn cbc_decrypt<C>(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Option<Vec<u8>>
where
    C: BlockDecryptMut + BlockCipher + KeyInit,
{
    let decryptor = cbc::Decryptor::<C>::new_from_slices(key, iv).ok()?;
    decryptor.decrypt_padded_vec_mut::<Pkcs7>(ciphertext).ok()
}
