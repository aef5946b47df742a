//! Envelope layout.
//!
//! ```text
//! SALT (16) | IV (cipher iv length) | CIPHERTEXT | TAG (32)
//! ```
//!
//! The tag covers everything before it.

use super::{SALT_LEN, TAG_LEN};
use crate::error::DecryptionError;

/// Borrowed view over a raw envelope.
#[derive(Debug)]
pub struct Envelope<'a> {
    data: &'a [u8],
    tag: &'a [u8],
    iv_len: usize,
}

impl<'a> Envelope<'a> {
    /// Smallest envelope that can hold salt, iv and tag.
    pub const fn min_len(iv_len: usize) -> usize {
        SALT_LEN + iv_len + TAG_LEN
    }

    /// Assembles `salt || iv || ciphertext`, leaving room for the tag.
    pub fn assemble(salt: &[u8], iv: &[u8], ciphertext: &[u8]) -> Vec<u8> {
        let mut buf = Vec::with_capacity(salt.len() + iv.len() + ciphertext.len() + TAG_LEN);

        buf.extend_from_slice(salt);
        buf.extend_from_slice(iv);
        buf.extend_from_slice(ciphertext);

        buf
    }

    /// Splits an envelope from the tail: the tag is the last 32 bytes.
    pub fn from_bytes(bytes: &'a [u8], iv_len: usize) -> Result<Self, DecryptionError> {
        if bytes.len() < Self::min_len(iv_len) {
            return Err(DecryptionError::HashValidation);
        }

        let (data, tag) = bytes.split_at(bytes.len() - TAG_LEN);

        Ok(Self { data, tag, iv_len })
    }

    /// Authenticated portion: salt, iv and ciphertext.
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn tag(&self) -> &'a [u8] {
        self.tag
    }

    pub fn salt(&self) -> &'a [u8] {
        &self.data[..SALT_LEN]
    }

    pub fn iv(&self) -> &'a [u8] {
        &self.data[SALT_LEN..SALT_LEN + self.iv_len]
    }

    pub fn ciphertext(&self) -> &'a [u8] {
        &self.data[SALT_LEN + self.iv_len..]
    }
}
