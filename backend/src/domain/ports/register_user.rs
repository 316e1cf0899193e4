//! Driving port for the registration use-case.
//!
//! Inbound adapters hand a decoded [`RegistrationForm`] to this port and
//! render whatever [`RegistrationOutcome`] comes back. Handler tests swap in
//! a mock instead of wiring persistence.

use async_trait::async_trait;

use crate::domain::{RegistrationForm, RegistrationOutcome};

/// Registration use-case as seen by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegisterUser: Send + Sync {
    /// Validate the form and, when valid, create the account.
    async fn register(&self, form: RegistrationForm) -> RegistrationOutcome;
}
