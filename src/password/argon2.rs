use std::fmt;
use std::str::FromStr;

use ::argon2::password_hash::rand_core::OsRng;
use ::argon2::password_hash::{PasswordHasher as _, SaltString};
use ::argon2::{Algorithm, Argon2, Params, Version};
use serde::{Deserialize, Serialize};

use super::{PasswordHasher, hashing_failed};
use crate::error::{CryptoError, CryptoResult};

/// Argon2 flavour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Argon2Variant {
    #[default]
    Argon2i,
    Argon2id,
}

impl Argon2Variant {
    pub fn as_str(self) -> &'static str {
        match self {
            Argon2Variant::Argon2i => "argon2i",
            Argon2Variant::Argon2id => "argon2id",
        }
    }

    fn algorithm(self) -> Algorithm {
        match self {
            Argon2Variant::Argon2i => Algorithm::Argon2i,
            Argon2Variant::Argon2id => Algorithm::Argon2id,
        }
    }

    // "Argon2id", used in messages
    fn label(self) -> &'static str {
        match self {
            Argon2Variant::Argon2i => "Argon2i",
            Argon2Variant::Argon2id => "Argon2id",
        }
    }
}

impl fmt::Display for Argon2Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Argon2Variant {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "argon2i" => Ok(Argon2Variant::Argon2i),
            "argon2id" => Ok(Argon2Variant::Argon2id),
            other => Err(CryptoError::Configuration(format!(
                "Argon2 hasher doesn't support the {other} algo, only argon2i and argon2id are supported"
            ))),
        }
    }
}

/// Memory-hard password hasher producing PHC strings
/// (`$argon2i$v=19$m=65536,t=4,p=1$...`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argon2Hasher {
    variant: Argon2Variant,
    memory_cost: u32,
    time_cost: u32,
    threads: u32,
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self {
            variant: Argon2Variant::default(),
            memory_cost: Self::DEFAULT_MEMORY_COST,
            time_cost: Self::DEFAULT_TIME_COST,
            threads: Self::DEFAULT_THREADS,
        }
    }
}

impl Argon2Hasher {
    /// Memory cost in KiB.
    pub const DEFAULT_MEMORY_COST: u32 = 64 * 1024;
    pub const DEFAULT_TIME_COST: u32 = 4;
    pub const DEFAULT_THREADS: u32 = 1;

    pub const MIN_MEMORY_COST: u32 = 8;
    pub const MIN_THREADS: u32 = 1;

    /// Validates the cost parameters. Time cost has no lower bound here; the
    /// primitive rejects unusable values when hashing.
    pub fn new(
        variant: Argon2Variant,
        memory_cost: u32,
        time_cost: u32,
        threads: u32,
    ) -> CryptoResult<Self> {
        let memory_cost = at_least(
            variant,
            memory_cost,
            Self::MIN_MEMORY_COST,
            "memory cost value",
        )?;
        let threads = at_least(variant, threads, Self::MIN_THREADS, "thread count")?;

        tracing::debug!(
            algorithm = variant.as_str(),
            memory_cost,
            time_cost,
            threads,
            "argon2 hasher ready"
        );

        Ok(Self {
            variant,
            memory_cost,
            time_cost,
            threads,
        })
    }

    pub fn variant(&self) -> Argon2Variant {
        self.variant
    }

    pub fn memory_cost(&self) -> u32 {
        self.memory_cost
    }

    pub fn time_cost(&self) -> u32 {
        self.time_cost
    }

    pub fn threads(&self) -> u32 {
        self.threads
    }
}

fn at_least(variant: Argon2Variant, value: u32, min: u32, option: &str) -> CryptoResult<u32> {
    if value < min {
        return Err(CryptoError::Configuration(format!(
            "{} {option} must be >= {min}, got {value}",
            variant.label()
        )));
    }
    Ok(value)
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &[u8]) -> CryptoResult<String> {
        let label = self.variant.label();

        let params = Params::new(self.memory_cost, self.time_cost, self.threads, None)
            .map_err(|e| hashing_failed(label, e))?;
        let argon2 = Argon2::new(self.variant.algorithm(), Version::V0x13, params);

        let salt = SaltString::generate(&mut OsRng);
        let hash = argon2
            .hash_password(password, &salt)
            .map_err(|e| hashing_failed(label, e))?;

        Ok(hash.to_string())
    }
}
