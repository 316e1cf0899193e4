//! Domain ports and supporting types for the hexagonal boundary.

mod login_service;
mod password_hasher;
mod profile_image_store;
mod register_user;
mod role_repository;
mod user_repository;

#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use profile_image_store::MockProfileImageStore;
pub use profile_image_store::{ImageStoreError, ProfileImageStore};
#[cfg(test)]
pub use register_user::MockRegisterUser;
pub use register_user::RegisterUser;
#[cfg(test)]
pub use role_repository::MockRoleRepository;
pub use role_repository::{FixtureRoleRepository, RolePersistenceError, RoleRepository};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{CreateUserOutcome, UserPersistenceError, UserRepository};
