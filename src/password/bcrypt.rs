use ::bcrypt::Version;

use super::{PasswordHasher, hashing_failed};
use crate::error::{CryptoError, CryptoResult};

/// Bcrypt hasher producing `$2y$` modular-crypt strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BcryptHasher {
    cost: u32,
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self {
            cost: Self::DEFAULT_COST,
        }
    }
}

impl BcryptHasher {
    pub const DEFAULT_COST: u32 = 10;
    pub const MIN_COST: u32 = 4;
    /// Bcrypt reads at most this many password bytes.
    pub const MAX_PASSWORD_LEN: usize = 72;

    pub fn new(cost: u32) -> CryptoResult<Self> {
        if cost < Self::MIN_COST {
            return Err(CryptoError::Configuration(format!(
                "Bcrypt hasher cost value must be >= {}, got {cost}",
                Self::MIN_COST
            )));
        }

        tracing::debug!(cost, "bcrypt hasher ready");
        Ok(Self { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl PasswordHasher for BcryptHasher {
    /// Rejects passwords over 72 bytes instead of letting bcrypt truncate them.
    fn hash(&self, password: &[u8]) -> CryptoResult<String> {
        if password.len() > Self::MAX_PASSWORD_LEN {
            return Err(CryptoError::Hashing(format!(
                "Bcrypt hasher does not support passwords longer than {} bytes, got {}",
                Self::MAX_PASSWORD_LEN,
                password.len()
            )));
        }

        let parts = ::bcrypt::hash_with_result(password, self.cost)
            .map_err(|e| hashing_failed("Bcrypt", e))?;

        Ok(parts.format_for_version(Version::TwoY))
    }
}
