//! Test helpers for inbound HTTP components.

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::HttpResponse;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;

use crate::domain::{Error, Username};
use crate::inbound::http::HttpResult;
use crate::inbound::http::session::SessionContext;

/// Path served by [`sign_in_stub`].
pub const SIGN_IN_STUB_PATH: &str = "/__test/sign-in";

/// Cookie-session middleware with a throwaway key and `Secure` disabled.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Session cookie set by `res`, if the session changed.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
}

/// Handler binding `ada` to the session, standing in for a real login.
pub async fn sign_in_stub(session: SessionContext) -> HttpResult<HttpResponse> {
    let username = Username::new("ada").map_err(|err| Error::internal(err.to_string()))?;
    session.persist_username(&username)?;
    Ok(HttpResponse::Ok().finish())
}

/// Boundary used by [`multipart_text_body`].
pub const MULTIPART_BOUNDARY: &str = "----wordweave-form";

/// Encode text fields as a `multipart/form-data` body.
///
/// Returns the `content-type` header value alongside the body.
pub fn multipart_text_body(fields: &[(&str, &str)]) -> (String, Vec<u8>) {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!("--{MULTIPART_BOUNDARY}--\r\n"));
    (
        format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        body.into_bytes(),
    )
}
