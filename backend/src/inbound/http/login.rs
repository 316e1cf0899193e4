//! Sign-in and sign-out handlers.
//!
//! ```text
//! GET  /login
//! POST /login   username=ada&password=...
//! POST /logout
//! ```

use actix_web::{HttpResponse, get, post, web};
use tracing::{error, info};

use crate::domain::registration::{SERVICE_UNAVAILABLE, UNEXPECTED_ERROR};
use crate::domain::{
    ErrorCode, LOGIN_INVALID_MESSAGE, LOGIN_REQUIRED_MESSAGE, LoginCredentials,
};
use crate::inbound::http::{HttpResult, redirect};
use crate::inbound::http::forms::LoginForm;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::views::{self, LoginView};

fn login_page(view: &LoginView<'_>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(views::login_page(view).into_string())
}

/// `GET /login`: show the form and any pending one-time notice.
#[get("/login")]
pub async fn login_form(session: SessionContext) -> HttpResult<HttpResponse> {
    if session.username()?.is_some() {
        return Ok(redirect("/"));
    }
    let notice = session.take_flash_success()?;
    Ok(login_page(&LoginView {
        notice: notice.as_deref(),
        ..LoginView::default()
    }))
}

/// `POST /login`: verify credentials and bind the username to the session.
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<LoginForm>,
) -> HttpResult<HttpResponse> {
    let form = form.into_inner();
    let rejected = |message: &str| {
        login_page(&LoginView {
            error: Some(message),
            username: form.username.trim(),
            ..LoginView::default()
        })
    };

    let Ok(credentials) = LoginCredentials::try_from_parts(&form.username, &form.password) else {
        return Ok(rejected(LOGIN_REQUIRED_MESSAGE));
    };

    match state.login.authenticate(&credentials).await {
        Ok(username) => {
            session.persist_username(&username)?;
            info!(username = %username, "user signed in");
            Ok(redirect("/"))
        }
        Err(err) => {
            let message = match err.code() {
                ErrorCode::Unauthorized => LOGIN_INVALID_MESSAGE,
                ErrorCode::ServiceUnavailable => SERVICE_UNAVAILABLE,
                _ => {
                    error!(error = %err, "sign-in failed unexpectedly");
                    UNEXPECTED_ERROR
                }
            };
            Ok(rejected(message))
        }
    }
}

/// `POST /logout`: forget the session.
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    redirect("/")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::registration::REGISTRATION_SUCCEEDED;
    use crate::domain::ports::{MockLoginService, MockRegisterUser};
    use crate::domain::{Error, Username};
    use crate::inbound::http::home::home;
    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};
    use actix_web::cookie::Cookie;
    use actix_web::dev::{Service, ServiceResponse};
    use actix_web::http::{StatusCode, header};
    use actix_web::{App, test};
    use rstest::rstest;

    async fn app_with(
        login_service: MockLoginService,
    ) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>
    {
        let state = HttpState::new(Arc::new(MockRegisterUser::new()), Arc::new(login_service));
        test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .wrap(test_session_middleware())
                .service(login_form)
                .service(login)
                .service(logout)
                .service(home)
                .route(
                    "/flash",
                    web::get().to(|session: SessionContext| async move {
                        session.flash_success(REGISTRATION_SUCCEEDED)?;
                        Ok::<_, Error>(HttpResponse::Ok().finish())
                    }),
                ),
        )
        .await
    }

    fn post_login(username: &str, password: &str) -> test::TestRequest {
        test::TestRequest::post()
            .uri("/login")
            .set_form([("username", username), ("password", password)])
    }

    async fn body_text(res: ServiceResponse) -> String {
        let body = test::read_body(res).await;
        String::from_utf8(body.to_vec()).expect("utf-8 body")
    }

    fn succeeding_service() -> MockLoginService {
        let mut service = MockLoginService::new();
        service
            .expect_authenticate()
            .withf(|creds| creds.username() == "ada" && creds.password() == "Secret1!")
            .returning(|creds| Ok(Username::new(creds.username()).expect("valid username")));
        service
    }

    async fn sign_in(
        app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    ) -> Cookie<'static> {
        let res = test::call_service(app, post_login("ada", "Secret1!").to_request()).await;
        assert_eq!(res.status(), StatusCode::FOUND);
        session_cookie(&res).expect("session cookie")
    }

    #[actix_web::test]
    async fn notice_is_shown_once() {
        let app = app_with(MockLoginService::new()).await;
        let flash =
            test::call_service(&app, test::TestRequest::get().uri("/flash").to_request()).await;
        let cookie = session_cookie(&flash).expect("session cookie");

        let first = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/login")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        let cleared = session_cookie(&first);
        assert_eq!(first.status(), StatusCode::OK);
        assert!(body_text(first).await.contains(REGISTRATION_SUCCEEDED));

        let mut request = test::TestRequest::get().uri("/login");
        if let Some(cookie) = cleared {
            request = request.cookie(cookie);
        }
        let second = test::call_service(&app, request.to_request()).await;
        assert!(!body_text(second).await.contains(REGISTRATION_SUCCEEDED));
    }

    #[actix_web::test]
    async fn successful_login_redirects_home_and_greets_user() {
        let app = app_with(succeeding_service()).await;
        let cookie = sign_in(&app).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/").cookie(cookie).to_request(),
        )
        .await;
        assert!(body_text(res).await.contains("Welcome back, ada."));
    }

    #[actix_web::test]
    async fn signed_in_user_is_redirected_away_from_login() {
        let app = app_with(succeeding_service()).await;
        let cookie = sign_in(&app).await;

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/login")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FOUND);
    }

    #[rstest]
    #[case("", "Secret1!")]
    #[case("ada", "")]
    #[case("   ", "")]
    #[actix_web::test]
    async fn blank_fields_are_rejected_without_lookup(
        #[case] username: &str,
        #[case] password: &str,
    ) {
        let mut service = MockLoginService::new();
        service.expect_authenticate().never();
        let app = app_with(service).await;

        let res = test::call_service(&app, post_login(username, password).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(body_text(res).await.contains(LOGIN_REQUIRED_MESSAGE));
    }

    #[rstest]
    #[case(Error::unauthorized("nope"), LOGIN_INVALID_MESSAGE)]
    #[case(Error::service_unavailable("db down"), SERVICE_UNAVAILABLE)]
    #[case(Error::internal("boom"), UNEXPECTED_ERROR)]
    #[actix_web::test]
    async fn failures_map_to_form_messages(#[case] failure: Error, #[case] expected: &str) {
        let mut service = MockLoginService::new();
        service
            .expect_authenticate()
            .times(1)
            .return_once(move |_| Err(failure));
        let app = app_with(service).await;

        let res = test::call_service(&app, post_login("ada", "wrong").to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(session_cookie(&res).is_none());
        let html = body_text(res).await;
        assert!(html.contains(expected));
        assert!(html.contains("value=\"ada\""));
        assert!(!html.contains("wrong"));
    }

    #[actix_web::test]
    async fn logout_clears_session() {
        let app = app_with(succeeding_service()).await;
        let cookie = sign_in(&app).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/logout")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(
            res.headers().get(header::LOCATION).map(|v| v.as_bytes()),
            Some(&b"/"[..])
        );
        let expired = session_cookie(&res).expect("removal cookie");
        assert_eq!(expired.value(), "");
    }
}
