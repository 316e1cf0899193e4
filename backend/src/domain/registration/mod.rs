//! Account registration: form model, field rules and the orchestrating
//! service.

mod errors;
mod form;
mod service;
pub mod validation;

pub use errors::*;
pub use form::{FormPrefill, RegistrationForm};
pub use service::RegistrationService;

use crate::domain::{UserId, Username};

/// Result of one registration attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// The account exists and the user may sign in.
    Registered {
        /// Identifier of the new account.
        user_id: UserId,
        /// Name the account signs in with.
        username: Username,
    },
    /// The form must be shown again with these messages.
    Rejected(RegistrationErrors),
}
