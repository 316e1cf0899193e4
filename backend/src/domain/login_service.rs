//! Password sign-in against stored accounts.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::ports::{LoginService, PasswordHasher, UserPersistenceError, UserRepository};
use crate::domain::{Error, LOGIN_INVALID_MESSAGE, LoginCredentials, Username};

/// [`LoginService`] that checks a password against the stored hash.
#[derive(Clone)]
pub struct PasswordLoginService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl PasswordLoginService {
    /// Service reading accounts from `users` and checking with `hasher`.
    pub fn new(users: Arc<dyn UserRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { users, hasher }
    }
}

fn map_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => Error::service_unavailable(message),
        UserPersistenceError::Conflict { username } => {
            Error::internal(format!("unexpected conflict reading `{username}`"))
        }
        UserPersistenceError::Query { message } => Error::internal(message),
    }
}

#[async_trait]
impl LoginService for PasswordLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Username, Error> {
        let Some(user) = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(map_persistence_error)?
        else {
            debug!(username = credentials.username(), "sign-in for unknown user");
            return Err(Error::unauthorized(LOGIN_INVALID_MESSAGE));
        };

        let hasher = Arc::clone(&self.hasher);
        let username = user.username().clone();
        let hash = user.password_hash().clone();
        let password = zeroize::Zeroizing::new(credentials.password().to_owned());
        let verified =
            tokio::task::spawn_blocking(move || hasher.verify(&username, &password, &hash))
                .await
                .map_err(|err| Error::internal(format!("password check aborted: {err}")))?;

        match verified {
            Ok(true) => Ok(user.username().clone()),
            Ok(false) => Err(Error::unauthorized(LOGIN_INVALID_MESSAGE)),
            Err(err) => {
                warn!(error = %err, username = %user.username(), "stored hash could not be checked");
                Err(Error::unauthorized(LOGIN_INVALID_MESSAGE))
            }
        }
    }
}
