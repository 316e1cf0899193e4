//! Landing page.

use actix_web::{HttpResponse, get};

use crate::inbound::http::HttpResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::views;

/// `GET /`: greet the signed-in user or point at register/login.
#[get("/")]
pub async fn home(session: SessionContext) -> HttpResult<HttpResponse> {
    let username = session.username()?;
    let page = views::home_page(username.as_ref().map(|name| name.as_str()));
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(page.into_string()))
}
