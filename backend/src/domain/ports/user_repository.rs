//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::User;

/// Persistence errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserPersistenceError {
    /// The store could not be reached.
    #[error("user repository connection failed: {message}")]
    Connection { message: String },
    /// The unique username constraint rejected the insert.
    #[error("username `{username}` is already taken")]
    Conflict { username: String },
    /// The store was reachable but refused the statement.
    #[error("user repository query failed: {message}")]
    Query { message: String },
}

impl UserPersistenceError {
    /// Unreachable store with `message`.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// `username` already taken.
    pub fn conflict(username: impl Into<String>) -> Self {
        Self::Conflict {
            username: username.into(),
        }
    }

    /// Refused statement with `message`.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Classified result of inserting a new user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateUserOutcome {
    /// The row was written.
    Created,
    /// The store refused the row for a non-uniqueness reason.
    Rejected,
    /// The store could not be reached.
    Unavailable,
    /// Another account claimed the username first.
    Conflict,
}

impl From<&Result<(), UserPersistenceError>> for CreateUserOutcome {
    fn from(result: &Result<(), UserPersistenceError>) -> Self {
        match result {
            Ok(()) => Self::Created,
            Err(UserPersistenceError::Conflict { .. }) => Self::Conflict,
            Err(UserPersistenceError::Connection { .. }) => Self::Unavailable,
            Err(UserPersistenceError::Query { .. }) => Self::Rejected,
        }
    }
}

/// Lookup and insert operations over stored user accounts.
///
/// `create` must be atomic with respect to username uniqueness: when two
/// callers insert the same username, exactly one sees `Ok(())` and the other
/// sees [`UserPersistenceError::Conflict`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by exact username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserPersistenceError>;

    /// Insert a new user.
    async fn create(&self, user: &User) -> Result<(), UserPersistenceError>;
}
