//! Port for reading seeded roles.

use async_trait::async_trait;

use crate::domain::{ADMIN_ROLE, Role, RoleId, USER_ROLE};

/// Persistence errors raised by role repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RolePersistenceError {
    /// The store could not be reached.
    #[error("role repository connection failed: {message}")]
    Connection { message: String },
    /// The store refused the lookup.
    #[error("role repository query failed: {message}")]
    Query { message: String },
}

impl RolePersistenceError {
    /// Unreachable store with `message`.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Refused lookup with `message`.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Read access to the seeded roles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Look up a role by its unique name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, RolePersistenceError>;
}

/// Role table matching the seed rows written by the migrations.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRoleRepository;

#[async_trait]
impl RoleRepository for FixtureRoleRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, RolePersistenceError> {
        let role = match name {
            ADMIN_ROLE => Some(Role::new(RoleId::new(1), ADMIN_ROLE)),
            USER_ROLE => Some(Role::new(RoleId::new(2), USER_ROLE)),
            _ => None,
        };
        Ok(role)
    }
}
