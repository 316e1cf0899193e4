//! PostgreSQL-backed `RoleRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RolePersistenceError, RoleRepository};
use crate::domain::{Role, RoleId};

use super::error_mapping::{DbFailure, classify_diesel_error, classify_pool_error};
use super::models::RoleRow;
use super::pool::DbPool;
use super::schema::roles;

/// Diesel implementation of [`RoleRepository`] over the seeded `roles` table.
#[derive(Clone)]
pub struct DieselRoleRepository {
    pool: DbPool,
}

impl DieselRoleRepository {
    /// Repository reading through `pool`.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_role_error(failure: DbFailure) -> RolePersistenceError {
    match failure {
        DbFailure::Connection(message) => RolePersistenceError::connection(message),
        DbFailure::UniqueViolation { .. } => RolePersistenceError::query("unexpected unique violation"),
        DbFailure::Query(message) => RolePersistenceError::query(message),
    }
}

#[async_trait]
impl RoleRepository for DieselRoleRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, RolePersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| to_role_error(classify_pool_error(err)))?;

        let row: Option<RoleRow> = roles::table
            .filter(roles::name.eq(name))
            .select(RoleRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| to_role_error(classify_diesel_error(err)))?;

        Ok(row.map(|row| Role::new(RoleId::new(row.id), row.name)))
    }
}
