//! Registration form handlers.
//!
//! ```text
//! GET  /register
//! POST /register  multipart: fullname, email, username, password, cPassword, profile_picture
//! ```

use actix_multipart::Multipart;
use actix_web::{HttpResponse, get, post, web};
use tracing::{error, warn};

use crate::domain::registration::{INVALID_INPUT, REGISTRATION_SUCCEEDED};
use crate::domain::{Error, FormPrefill, RegistrationErrors, RegistrationOutcome};
use crate::inbound::http::{HttpResult, redirect};
use crate::inbound::http::forms::decode_registration;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views;

fn form_page(prefill: &FormPrefill, errors: &RegistrationErrors) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(views::register_page(prefill, errors).into_string())
}

/// Send a new account to sign in. The account already exists, so a lost
/// notice is logged rather than turned into an error page.
fn after_registration(notice: Result<(), Error>) -> HttpResponse {
    if let Err(err) = notice {
        error!(error = %err, "could not store registration notice");
    }
    redirect("/login")
}

/// `GET /register`: show an empty form unless someone is already signed in.
#[get("/register")]
pub async fn register_form(session: SessionContext) -> HttpResult<HttpResponse> {
    if session.username()?.is_some() {
        return Ok(redirect("/"));
    }
    Ok(form_page(&FormPrefill::default(), &RegistrationErrors::default()))
}

/// `POST /register`: create the account or show the form again.
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: Multipart,
) -> HttpResult<HttpResponse> {
    let form = match decode_registration(payload).await {
        Ok(form) => form,
        Err(error) => {
            warn!(%error, "rejecting undecodable registration body");
            return Ok(form_page(
                &FormPrefill::default(),
                &RegistrationErrors::general(INVALID_INPUT),
            ));
        }
    };
    let prefill = form.prefill();

    match state.registration.register(form).await {
        RegistrationOutcome::Registered { .. } => Ok(after_registration(
            session.flash_success(REGISTRATION_SUCCEEDED),
        )),
        RegistrationOutcome::Rejected(errors) => Ok(form_page(&prefill, &errors)),
    }
}
