//! HTTP inbound adapter serving the server-rendered pages.

use actix_web::HttpResponse;
use actix_web::http::header;

pub mod error;
pub mod forms;
pub mod home;
pub mod login;
pub mod register;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod views;

pub use error::HttpResult;

/// `302 Found` pointing at `location`.
pub(crate) fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}
