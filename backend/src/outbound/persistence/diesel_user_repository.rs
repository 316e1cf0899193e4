//! PostgreSQL-backed `UserRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{
    EmailAddress, FullName, PasswordHash, ProfilePicturePath, RoleId, User, UserId, UserParts,
    UserValidationError, Username,
};

use super::error_mapping::{DbFailure, classify_diesel_error, classify_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::DbPool;
use super::schema::users;

const USERNAME_CONSTRAINT: &str = "users_username_key";

/// Diesel implementation of [`UserRepository`].
///
/// Inserts rely on the `users_username_key` constraint for uniqueness, so
/// concurrent registrations of one username produce exactly one row.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Repository writing through `pool`.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_persistence_error(failure: DbFailure, username: &str) -> UserPersistenceError {
    match failure {
        DbFailure::Connection(message) => UserPersistenceError::connection(message),
        DbFailure::UniqueViolation { constraint }
            if constraint.as_deref().is_none_or(|name| name == USERNAME_CONSTRAINT) =>
        {
            UserPersistenceError::conflict(username)
        }
        DbFailure::UniqueViolation { constraint } => UserPersistenceError::query(format!(
            "unique constraint {} violated",
            constraint.unwrap_or_default()
        )),
        DbFailure::Query(message) => UserPersistenceError::query(message),
    }
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let id = row.id;
    let corrupt = move |err: UserValidationError| {
        warn!(user_id = %id, error = %err, "stored user row failed validation");
        UserPersistenceError::query(format!("stored user {id} is invalid: {err}"))
    };
    let profile_picture = row
        .profile_picture
        .map(ProfilePicturePath::new)
        .transpose()
        .map_err(corrupt)?;
    Ok(User::new(UserParts {
        id: UserId::from_uuid(id),
        full_name: FullName::new(row.full_name).map_err(corrupt)?,
        email: EmailAddress::new(row.email).map_err(corrupt)?,
        username: Username::new(row.username).map_err(corrupt)?,
        password_hash: PasswordHash::new(row.password_hash).map_err(corrupt)?,
        role_id: RoleId::new(row.role_id),
        profile_picture,
    }))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| to_persistence_error(classify_pool_error(err), username))?;

        let row: Option<UserRow> = users::table
            .filter(users::username.eq(username))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| to_persistence_error(classify_diesel_error(err), username))?;

        row.map(row_to_user).transpose()
    }

    async fn create(&self, user: &User) -> Result<(), UserPersistenceError> {
        let username = user.username().as_str();
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| to_persistence_error(classify_pool_error(err), username))?;

        let new_row = NewUserRow {
            id: *user.id().as_uuid(),
            full_name: user.full_name().as_str(),
            email: user.email().as_str(),
            username,
            password_hash: user.password_hash().as_str(),
            role_id: user.role_id().get(),
            profile_picture: user.profile_picture().map(ProfilePicturePath::as_str),
        };

        diesel::insert_into(users::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map_err(|err| to_persistence_error(classify_diesel_error(err), username))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use uuid::Uuid;

    fn row() -> UserRow {
        UserRow {
            id: Uuid::new_v4(),
            full_name: "Ada Lovelace".to_owned(),
            email: "ada@example.com".to_owned(),
            username: "ada".to_owned(),
            password_hash: "$argon2id$stored".to_owned(),
            role_id: 2,
            profile_picture: Some("/images/ada.png".to_owned()),
            created_at: chrono::Utc::now(),
        }
    }

    #[rstest]
    #[case(Some("users_username_key"))]
    #[case(None)]
    fn username_constraint_maps_to_conflict(#[case] constraint: Option<&str>) {
        let failure = DbFailure::UniqueViolation {
            constraint: constraint.map(str::to_owned),
        };
        assert_eq!(
            to_persistence_error(failure, "ada"),
            UserPersistenceError::conflict("ada")
        );
    }

    #[rstest]
    fn other_unique_constraints_are_query_errors() {
        let failure = DbFailure::UniqueViolation {
            constraint: Some("users_pkey".to_owned()),
        };
        assert!(matches!(
            to_persistence_error(failure, "ada"),
            UserPersistenceError::Query { .. }
        ));
    }

    #[rstest]
    fn connection_failures_stay_connection_errors() {
        let failure = DbFailure::Connection("refused".to_owned());
        assert_eq!(
            to_persistence_error(failure, "ada"),
            UserPersistenceError::connection("refused")
        );
    }

    #[rstest]
    fn row_converts_to_domain_user() {
        let row = row();
        let id = row.id;
        let user = row_to_user(row).expect("valid row");
        assert_eq!(user.id().as_uuid(), &id);
        assert_eq!(user.username().as_str(), "ada");
        assert_eq!(user.role_id(), RoleId::new(2));
        assert_eq!(
            user.profile_picture().map(ProfilePicturePath::as_str),
            Some("/images/ada.png")
        );
    }

    #[rstest]
    fn corrupt_row_is_a_query_error() {
        let mut row = row();
        row.username = "not valid".to_owned();
        assert!(matches!(
            row_to_user(row),
            Err(UserPersistenceError::Query { .. })
        ));
    }
}
