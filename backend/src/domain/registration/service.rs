//! Registration orchestrator.
//!
//! Validates the submission, checks that the username is free, assembles the
//! new [`User`] and hands it to the repository. Every path ends in an explicit
//! [`RegistrationOutcome`]; nothing is written to a response here.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::domain::ports::{
    CreateUserOutcome, ImageStoreError, PasswordHashError, PasswordHasher, ProfileImageStore,
    RegisterUser, RolePersistenceError, RoleRepository, UserRepository,
};
use crate::domain::{
    EmailAddress, FullName, PasswordHash, USER_ROLE, User, UserId, UserParts,
    UserValidationError, Username,
};

use super::errors::{
    INVALID_INPUT, REGISTRATION_FAILED, RegistrationErrors, RegistrationField,
    SERVICE_UNAVAILABLE, UNEXPECTED_ERROR, USERNAME_TAKEN,
};
use super::form::RegistrationForm;
use super::validation::{is_blank, validate_form};
use super::RegistrationOutcome;

/// Faults after validation succeeded. Logged, never shown to the client.
#[derive(Debug, thiserror::Error)]
enum RegistrationFault {
    #[error("role `{0}` is not configured")]
    MissingRole(&'static str),
    #[error("role lookup failed")]
    RoleLookup(#[source] RolePersistenceError),
    #[error("validated input was refused by the user model")]
    InvalidParts(#[from] UserValidationError),
    #[error("password hashing failed")]
    Hash(#[source] PasswordHashError),
    #[error("password hashing task was aborted")]
    HashTask(#[source] tokio::task::JoinError),
    #[error("profile picture intake failed")]
    Image(#[source] ImageStoreError),
}

/// Default [`RegisterUser`] implementation.
#[derive(Clone)]
pub struct RegistrationService {
    users: Arc<dyn UserRepository>,
    roles: Arc<dyn RoleRepository>,
    hasher: Arc<dyn PasswordHasher>,
    images: Arc<dyn ProfileImageStore>,
}

impl RegistrationService {
    /// Orchestrator over the given adapters.
    pub fn new(
        users: Arc<dyn UserRepository>,
        roles: Arc<dyn RoleRepository>,
        hasher: Arc<dyn PasswordHasher>,
        images: Arc<dyn ProfileImageStore>,
    ) -> Self {
        Self {
            users,
            roles,
            hasher,
            images,
        }
    }

    /// Field rules plus the username uniqueness lookup.
    ///
    /// A failing lookup discards everything collected so far and reports a
    /// single general error.
    async fn collect_errors(&self, form: &RegistrationForm) -> RegistrationErrors {
        let mut errors = validate_form(form);
        if is_blank(&form.username) {
            return errors;
        }
        match self.users.find_by_username(&form.username).await {
            Ok(Some(_)) => errors.set(RegistrationField::Username, USERNAME_TAKEN),
            Ok(None) => {}
            Err(err) => {
                warn!(error = %err, "username lookup failed during validation");
                return RegistrationErrors::general(INVALID_INPUT);
            }
        }
        errors
    }

    async fn build_user(&self, form: &RegistrationForm) -> Result<User, RegistrationFault> {
        let role = self
            .roles
            .find_by_name(USER_ROLE)
            .await
            .map_err(RegistrationFault::RoleLookup)?
            .ok_or(RegistrationFault::MissingRole(USER_ROLE))?;

        let username = Username::new(form.username.as_str())?;
        let full_name = FullName::new(form.full_name.as_str())?;
        let email = EmailAddress::new(form.email.as_str())?;
        let password_hash = self.hash_password(&username, form).await?;

        let profile_picture = match form.profile_picture.as_ref().filter(|u| u.has_file()) {
            Some(upload) => Some(
                self.images
                    .store(upload)
                    .await
                    .map_err(RegistrationFault::Image)?,
            ),
            None => None,
        };

        Ok(User::new(UserParts {
            id: UserId::random(),
            full_name,
            email,
            username,
            password_hash,
            role_id: role.id(),
            profile_picture,
        }))
    }

    async fn hash_password(
        &self,
        username: &Username,
        form: &RegistrationForm,
    ) -> Result<PasswordHash, RegistrationFault> {
        let hasher = Arc::clone(&self.hasher);
        let username = username.clone();
        let password = form.password.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&username, password.as_str()))
            .await
            .map_err(RegistrationFault::HashTask)?
            .map_err(RegistrationFault::Hash)
    }
}

#[async_trait]
impl RegisterUser for RegistrationService {
    async fn register(&self, form: RegistrationForm) -> RegistrationOutcome {
        let errors = self.collect_errors(&form).await;
        if !errors.is_empty() {
            return RegistrationOutcome::Rejected(errors);
        }

        let user = match self.build_user(&form).await {
            Ok(user) => user,
            Err(fault) => {
                error!(error = %fault, cause = ?fault, "registration aborted");
                return RegistrationOutcome::Rejected(RegistrationErrors::general(
                    UNEXPECTED_ERROR,
                ));
            }
        };

        let result = self.users.create(&user).await;
        match CreateUserOutcome::from(&result) {
            CreateUserOutcome::Created => {
                info!(user_id = %user.id(), username = %user.username(), "account registered");
                RegistrationOutcome::Registered {
                    user_id: *user.id(),
                    username: user.username().clone(),
                }
            }
            CreateUserOutcome::Conflict => {
                info!(username = %user.username(), "username claimed by a concurrent registration");
                let mut errors = RegistrationErrors::default();
                errors.set(RegistrationField::Username, USERNAME_TAKEN);
                RegistrationOutcome::Rejected(errors)
            }
            CreateUserOutcome::Rejected => {
                warn!(error = ?result.err(), "user insert rejected");
                RegistrationOutcome::Rejected(RegistrationErrors::general(REGISTRATION_FAILED))
            }
            CreateUserOutcome::Unavailable => {
                warn!(error = ?result.err(), "user store unavailable");
                RegistrationOutcome::Rejected(RegistrationErrors::general(SERVICE_UNAVAILABLE))
            }
        }
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
