//! Table of cipher algorithms the engine can run.
//!
//! The table is built once per process on first lookup and is read-only
//! afterwards. Names are matched case-insensitively.

use std::collections::HashMap;
use std::sync::LazyLock;

use super::BLOCK_LEN;

/// Block cipher behind a [`CipherMethod`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CipherKind {
    Aes128,
    Aes192,
    Aes256,
    Camellia128,
    Camellia192,
    Camellia256,
}

impl CipherKind {
    /// Key length in bytes.
    pub fn key_len(self) -> usize {
        match self {
            CipherKind::Aes128 | CipherKind::Camellia128 => 16,
            CipherKind::Aes192 | CipherKind::Camellia192 => 24,
            CipherKind::Aes256 | CipherKind::Camellia256 => 32,
        }
    }
}

/// A supported cipher algorithm in CBC mode with PKCS#7 padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CipherMethod {
    name: &'static str,
    kind: CipherKind,
}

impl CipherMethod {
    /// Canonical lowercase name, e.g. `aes-256-cbc`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> CipherKind {
        self.kind
    }

    pub fn key_len(&self) -> usize {
        self.kind.key_len()
    }

    /// IV length in bytes. CBC needs exactly one block.
    pub fn iv_len(&self) -> usize {
        BLOCK_LEN
    }
}

// (lookup name, canonical name, cipher)
const METHODS: &[(&str, &str, CipherKind)] = &[
    ("aes-128-cbc", "aes-128-cbc", CipherKind::Aes128),
    ("aes-192-cbc", "aes-192-cbc", CipherKind::Aes192),
    ("aes-256-cbc", "aes-256-cbc", CipherKind::Aes256),
    ("aes128", "aes-128-cbc", CipherKind::Aes128),
    ("aes192", "aes-192-cbc", CipherKind::Aes192),
    ("aes256", "aes-256-cbc", CipherKind::Aes256),
    ("camellia-128-cbc", "camellia-128-cbc", CipherKind::Camellia128),
    ("camellia-192-cbc", "camellia-192-cbc", CipherKind::Camellia192),
    ("camellia-256-cbc", "camellia-256-cbc", CipherKind::Camellia256),
    ("camellia128", "camellia-128-cbc", CipherKind::Camellia128),
    ("camellia192", "camellia-192-cbc", CipherKind::Camellia192),
    ("camellia256", "camellia-256-cbc", CipherKind::Camellia256),
];

static SUPPORTED: LazyLock<HashMap<&'static str, CipherMethod>> = LazyLock::new(|| {
    METHODS
        .iter()
        .map(|&(alias, name, kind)| (alias, CipherMethod { name, kind }))
        .collect()
});

/// Looks up a cipher by name, ignoring ASCII case.
pub fn cipher_method(algorithm: &str) -> Option<CipherMethod> {
    SUPPORTED.get(algorithm.to_ascii_lowercase().as_str()).copied()
}

/// Every accepted algorithm name (aliases included), sorted.
pub fn cipher_methods() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = SUPPORTED.keys().copied().collect();
    names.sort_unstable();
    names
}
