//! Role reference entity.
//!
//! Roles are read-only from the application's perspective: migrations seed
//! them and registration only looks one up by name.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of the role assigned to every self-registered account.
pub const USER_ROLE: &str = "user";

/// Name of the administrative role.
pub const ADMIN_ROLE: &str = "admin";

/// Database identifier of a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleId(i32);

impl RoleId {
    /// Wrap a raw role identifier.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw identifier as stored in the database.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Labelled role record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    id: RoleId,
    name: String,
}

impl Role {
    /// Build a role from its identifier and name.
    pub fn new(id: RoleId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Role identifier.
    pub fn id(&self) -> RoleId {
        self.id
    }

    /// Role name, e.g. `user`.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}
