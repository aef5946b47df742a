//! Serializable construction settings.
//!
//! Every field has a default, so an empty JSON object is a valid
//! configuration. Building goes through the same validation as the
//! constructors.

use serde::{Deserialize, Serialize};

use crate::encrypter::{CbcEncrypter, DEFAULT_ALGORITHM};
use crate::error::{CryptoError, CryptoResult};
use crate::password::{Argon2Hasher, Argon2Variant, BcryptHasher};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub encrypter: EncrypterConfig,
    pub argon2: Argon2Config,
    pub bcrypt: BcryptConfig,
}

impl Config {
    pub fn from_json(json: &str) -> CryptoResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| CryptoError::Configuration(format!("malformed configuration: {e}")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncrypterConfig {
    pub algorithm: String,
}

impl Default for EncrypterConfig {
    fn default() -> Self {
        Self {
            algorithm: DEFAULT_ALGORITHM.to_string(),
        }
    }
}

impl EncrypterConfig {
    /// The secret key is never part of the configuration file.
    pub fn build(&self, key: impl Into<Vec<u8>>) -> CryptoResult<CbcEncrypter> {
        CbcEncrypter::new(key, &self.algorithm)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Argon2Config {
    pub algorithm: String,
    pub memory_cost: u32,
    pub time_cost: u32,
    pub threads: u32,
}

impl Default for Argon2Config {
    fn default() -> Self {
        Self {
            algorithm: Argon2Variant::default().to_string(),
            memory_cost: Argon2Hasher::DEFAULT_MEMORY_COST,
            time_cost: Argon2Hasher::DEFAULT_TIME_COST,
            threads: Argon2Hasher::DEFAULT_THREADS,
        }
    }
}

impl Argon2Config {
    pub fn build(&self) -> CryptoResult<Argon2Hasher> {
        Argon2Hasher::new(
            self.algorithm.parse()?,
            self.memory_cost,
            self.time_cost,
            self.threads,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BcryptConfig {
    pub cost: u32,
}

impl Default for BcryptConfig {
    fn default() -> Self {
        Self {
            cost: BcryptHasher::DEFAULT_COST,
        }
    }
}

impl BcryptConfig {
    pub fn build(&self) -> CryptoResult<BcryptHasher> {
        BcryptHasher::new(self.cost)
    }
}
