//! Domain primitives, ports and services.
//!
//! Purpose: hold the registration and sign-in rules independent of HTTP and
//! storage. Adapters in `inbound` and `outbound` talk to this layer only
//! through the traits in [`ports`].
//!
//! Public surface:
//! - `User` and its value objects, `Role`, `Category`.
//! - `RegistrationForm`, `RegistrationErrors`, `RegistrationOutcome` and the
//!   `RegistrationService` orchestrator.
//! - `LoginCredentials` and `PasswordLoginService`.
//! - `Error` / `ErrorCode` for failures surfaced outside form handling.

pub mod auth;
pub mod category;
pub mod error;
pub mod login_service;
pub mod ports;
pub mod profile_image;
pub mod registration;
pub mod role;
pub mod user;

pub use self::auth::{
    LOGIN_INVALID_MESSAGE, LOGIN_REQUIRED_MESSAGE, LoginCredentials, LoginValidationError,
};
pub use self::category::{Category, CategoryId};
pub use self::error::{Error, ErrorCode};
pub use self::login_service::PasswordLoginService;
pub use self::profile_image::ProfileImageUpload;
pub use self::registration::{
    FormPrefill, RegistrationErrors, RegistrationField, RegistrationForm, RegistrationOutcome,
    RegistrationService,
};
pub use self::role::{ADMIN_ROLE, Role, RoleId, USER_ROLE};
pub use self::user::{
    EmailAddress, FullName, PasswordHash, ProfilePicturePath, User, UserId, UserParts,
    UserValidationError, Username,
};
