//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see the driving ports,
//! so they can be exercised with mocks and no storage.

use std::sync::Arc;

use crate::domain::ports::{LoginService, RegisterUser};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Account creation.
    pub registration: Arc<dyn RegisterUser>,
    /// Credential checks.
    pub login: Arc<dyn LoginService>,
}

impl HttpState {
    /// Bundle the use-case ports.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use wordweave::domain::ports::{LoginService, RegisterUser};
    /// use wordweave::inbound::http::state::HttpState;
    ///
    /// fn wire(registration: Arc<dyn RegisterUser>, login: Arc<dyn LoginService>) -> HttpState {
    ///     HttpState::new(registration, login)
    /// }
    /// ```
    pub fn new(registration: Arc<dyn RegisterUser>, login: Arc<dyn LoginService>) -> Self {
        Self {
            registration,
            login,
        }
    }
}
