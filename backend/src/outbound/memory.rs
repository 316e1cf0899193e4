//! In-process `UserRepository` for running without PostgreSQL.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::User;
use crate::domain::ports::{UserPersistenceError, UserRepository};

/// Users kept in a map keyed by username.
///
/// `create` checks and inserts under one lock, matching the uniqueness
/// guarantee of the database constraint.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.lock().map(|users| users.len()).unwrap_or_default()
    }

    /// True when no account is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> UserPersistenceError {
    UserPersistenceError::connection("in-memory user store lock poisoned")
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserPersistenceError> {
        let users = self.users.lock().map_err(|_| poisoned())?;
        Ok(users.get(username).cloned())
    }

    async fn create(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut users = self.users.lock().map_err(|_| poisoned())?;
        let key = user.username().as_str();
        if users.contains_key(key) {
            return Err(UserPersistenceError::conflict(key));
        }
        users.insert(key.to_owned(), user.clone());
        Ok(())
    }
}
