//! Argon2id `PasswordHasher`.
//!
//! The hashed material is `username || 0x00 || password`, so a stored hash
//! only verifies for the account it was created for. Output is a PHC string
//! with a random per-call salt.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{
    self, PasswordHash as PhcHash, PasswordHasher as _, PasswordVerifier as _, SaltString,
};
use zeroize::Zeroizing;

use crate::domain::ports::{PasswordHashError, PasswordHasher};
use crate::domain::{PasswordHash, Username};

/// Argon2id with the crate's default (OWASP recommended) cost parameters.
#[derive(Debug, Clone, Default)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
    /// Hasher with default Argon2id parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn material(username: &Username, password: &str) -> Zeroizing<Vec<u8>> {
    let mut bytes = Vec::with_capacity(username.as_str().len() + 1 + password.len());
    bytes.extend_from_slice(username.as_str().as_bytes());
    bytes.push(0);
    bytes.extend_from_slice(password.as_bytes());
    Zeroizing::new(bytes)
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, username: &Username, password: &str) -> Result<PasswordHash, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);
        let encoded = self
            .argon2
            .hash_password(&material(username, password), &salt)
            .map_err(|err| PasswordHashError::hash(err.to_string()))?
            .to_string();
        PasswordHash::new(encoded).map_err(|err| PasswordHashError::hash(err.to_string()))
    }

    fn verify(
        &self,
        username: &Username,
        password: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError> {
        let parsed =
            PhcHash::new(hash.as_str()).map_err(|err| PasswordHashError::malformed(err.to_string()))?;
        match self
            .argon2
            .verify_password(&material(username, password), &parsed)
        {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(err) => Err(PasswordHashError::malformed(err.to_string())),
        }
    }
}
