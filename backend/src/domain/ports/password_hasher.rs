//! Port for one-way password hashing.

use crate::domain::{PasswordHash, Username};

/// Failures raised by password hashers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHashError {
    /// The hasher could not produce a hash.
    #[error("password hashing failed: {message}")]
    Hash { message: String },
    /// A stored hash could not be parsed.
    #[error("stored password hash is malformed: {message}")]
    Malformed { message: String },
}

impl PasswordHashError {
    /// Hashing failure with `message`.
    pub fn hash(message: impl Into<String>) -> Self {
        Self::Hash {
            message: message.into(),
        }
    }

    /// Unparseable stored hash with `message`.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }
}

/// Turns a username and plaintext password into a stored credential.
///
/// Implementations are CPU bound; async callers run them on a blocking
/// thread.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash `password` for `username` with a fresh salt.
    fn hash(&self, username: &Username, password: &str) -> Result<PasswordHash, PasswordHashError>;

    /// Check `password` for `username` against a stored hash.
    fn verify(
        &self,
        username: &Username,
        password: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError>;
}
