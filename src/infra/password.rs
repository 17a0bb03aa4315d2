//! Argon2id password hashing.
//!
//! Hashes are stored as PHC strings (`$argon2id$v=19$m=...`), so the cost
//! parameters travel with each hash and old hashes keep verifying after the
//! configured costs change.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;

/// Errors from hashing or parsing stored hashes.
#[derive(Debug, Error)]
pub enum PasswordError {
    /// The configured cost parameters are outside argon2's accepted ranges.
    #[error("invalid argon2 parameters: {0}")]
    Params(argon2::Error),

    /// Hashing failed.
    #[error("failed to hash password: {0}")]
    Hash(argon2::password_hash::Error),

    /// A stored hash could not be parsed.
    #[error("invalid password hash: {0}")]
    InvalidHash(argon2::password_hash::Error),
}

/// Argon2id hasher with configurable memory and iteration costs.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// Builds a hasher with `memory_kib` KiB of memory and `iterations` passes.
    pub fn new(memory_kib: u32, iterations: u32) -> Result<Self, PasswordError> {
        let params = Params::new(memory_kib, iterations, 1, None).map_err(PasswordError::Params)?;
        Ok(Self { params })
    }

    /// Cheapest parameters argon2 accepts. Only for tests.
    pub fn insecure_fast() -> Self {
        Self {
            params: Params::new(Params::MIN_M_COST, Params::MIN_T_COST, 1, None)
                .unwrap_or_default(),
        }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hashes a password with a fresh random salt. Returns a PHC string.
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(PasswordError::Hash)?;
        Ok(hash.to_string())
    }

    /// Checks `password` against a stored PHC string.
    ///
    /// Returns `Ok(false)` on mismatch and `Err` only when the stored hash is
    /// malformed.
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed = PasswordHash::new(hash).map_err(PasswordError::InvalidHash)?;
        Ok(self
            .argon2()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            params: Params::default(),
        }
    }
}
