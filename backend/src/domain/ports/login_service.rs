//! Driving port for the sign-in use-case.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Username};

/// Checks credentials and yields the account's username.
///
/// Unknown users and wrong passwords both fail with
/// [`ErrorCode::Unauthorized`](crate::domain::ErrorCode::Unauthorized);
/// unreachable storage fails with `ServiceUnavailable`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Username, Error>;
}
