//! Cryptographic building blocks for the encryption engine.
//!
//! Provides the supported-cipher table, CBC encryption, the HMAC tag and the
//! envelope layout.

pub mod cipher;
pub mod envelope;
pub mod mac;
pub mod methods;

pub use cipher::{generate_iv, generate_salt, key_material, open, seal};
pub use envelope::Envelope;
pub use methods::{CipherMethod, cipher_method, cipher_methods};

/// Length of the per-message salt (16 bytes).
pub const SALT_LEN: usize = 16;
/// Length of the HMAC-SHA256 tag (32 bytes).
pub const TAG_LEN: usize = 32;
/// Block length shared by every supported cipher (AES and Camellia, 16 bytes).
pub const BLOCK_LEN: usize = 16;
