//! Session helpers keeping handlers free of actix-session details.
//!
//! The session holds two keys: the signed-in username and a one-time
//! success notice shown on the next login page render.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, Username};

pub(crate) const USERNAME_KEY: &str = "username";
pub(crate) const FLASH_SUCCESS_KEY: &str = "flash_success";

/// Newtype wrapper exposing the operations handlers need.
#[derive(Clone)]
pub struct SessionContext(Session);

fn read_error(error: impl std::fmt::Display) -> Error {
    Error::internal(format!("failed to read session: {error}"))
}

fn write_error(error: impl std::fmt::Display) -> Error {
    Error::internal(format!("failed to write session: {error}"))
}

impl SessionContext {
    /// Wrap an extracted actix session.
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self(session)
    }

    /// Signed-in username, if any. A tampered value is treated as absent.
    pub fn username(&self) -> Result<Option<Username>, Error> {
        let Some(raw) = self.0.get::<String>(USERNAME_KEY).map_err(read_error)? else {
            return Ok(None);
        };
        match Username::new(raw) {
            Ok(username) => Ok(Some(username)),
            Err(error) => {
                warn!(%error, "ignoring malformed username in session");
                Ok(None)
            }
        }
    }

    /// Bind `username` to a fresh session.
    pub fn persist_username(&self, username: &Username) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USERNAME_KEY, username.as_str())
            .map_err(write_error)
    }

    /// Store a notice to be shown once.
    pub fn flash_success(&self, message: &str) -> Result<(), Error> {
        self.0.insert(FLASH_SUCCESS_KEY, message).map_err(write_error)
    }

    /// Read and clear the one-time notice.
    pub fn take_flash_success(&self) -> Result<Option<String>, Error> {
        let message = self.0.get::<String>(FLASH_SUCCESS_KEY).map_err(read_error)?;
        if message.is_some() {
            self.0.remove(FLASH_SUCCESS_KEY);
        }
        Ok(message)
    }

    /// Drop every key and expire the cookie.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
