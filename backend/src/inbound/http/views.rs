//! Server-rendered HTML pages.
//!
//! Templates receive plain view data and never see request or session
//! types. All interpolation is escaped by `maud`.

use maud::{DOCTYPE, Markup, html};

use crate::domain::{FormPrefill, RegistrationErrors, RegistrationField};

fn layout(title: &str, signed_in: Option<&str>, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " | Wordweave" }
            }
            body {
                header {
                    a href="/" { "Wordweave" }
                    nav {
                        @if let Some(username) = signed_in {
                            span.user { (username) }
                            form method="post" action="/logout" {
                                button type="submit" { "Log out" }
                            }
                        } @else {
                            a href="/login" { "Log in" }
                            " "
                            a href="/register" { "Register" }
                        }
                    }
                }
                main { (body) }
            }
        }
    }
}

fn field_error(errors: &RegistrationErrors, field: RegistrationField) -> Markup {
    html! {
        @if let Some(message) = errors.get(field) {
            p.error data-key=(field.error_key()) { (message) }
        }
    }
}

/// Registration form. Password inputs are always rendered empty.
pub fn register_page(prefill: &FormPrefill, errors: &RegistrationErrors) -> Markup {
    let body = html! {
        h1 { "Create an account" }
        (field_error(errors, RegistrationField::General))
        form method="post" action="/register" enctype="multipart/form-data" {
            label for="fullname" { "Full name" }
            input type="text" id="fullname" name="fullname" value=(prefill.full_name);
            (field_error(errors, RegistrationField::FullName))

            label for="email" { "Email" }
            input type="email" id="email" name="email" value=(prefill.email);
            (field_error(errors, RegistrationField::Email))

            label for="username" { "Username" }
            input type="text" id="username" name="username" value=(prefill.username);
            (field_error(errors, RegistrationField::Username))

            label for="password" { "Password" }
            input type="password" id="password" name="password";
            (field_error(errors, RegistrationField::Password))

            label for="cPassword" { "Retype password" }
            input type="password" id="cPassword" name="cPassword";
            (field_error(errors, RegistrationField::ConfirmPassword))

            label for="profile_picture" { "Profile picture" }
            input type="file" id="profile_picture" name="profile_picture" accept="image/*";

            button type="submit" { "Register" }
        }
        p { "Already have an account? " a href="/login" { "Log in" } }
    };
    layout("Register", None, body)
}

/// Data for [`login_page`].
#[derive(Debug, Default)]
pub struct LoginView<'a> {
    /// One-time success notice.
    pub notice: Option<&'a str>,
    /// Form-level error.
    pub error: Option<&'a str>,
    /// Username to prefill.
    pub username: &'a str,
}

/// Sign-in form. The password input is never prefilled.
#[must_use]
pub fn login_page(view: &LoginView<'_>) -> Markup {
    let body = html! {
        h1 { "Log in" }
        @if let Some(notice) = view.notice {
            p.notice { (notice) }
        }
        @if let Some(error) = view.error {
            p.error data-key="error" { (error) }
        }
        form method="post" action="/login" {
            label for="username" { "Username" }
            input type="text" id="username" name="username" value=(view.username);
            label for="password" { "Password" }
            input type="password" id="password" name="password";
            button type="submit" { "Log in" }
        }
        p { "New here? " a href="/register" { "Create an account" } }
    };
    layout("Log in", None, body)
}

/// Landing page, greeting `signed_in` when present.
#[must_use]
pub fn home_page(signed_in: Option<&str>) -> Markup {
    let body = html! {
        h1 { "Wordweave" }
        @match signed_in {
            Some(username) => p { "Welcome back, " (username) "." },
            None => p { "Stories, notes and ideas. Sign in to start writing." },
        }
    };
    layout("Home", signed_in, body)
}

/// Page rendered for errors escaping a handler.
#[must_use]
pub fn error_page(status: u16, message: &str) -> Markup {
    let body = html! {
        h1 { (status) }
        p.error { (message) }
        p { a href="/" { "Back to the home page" } }
    };
    layout("Error", None, body)
}
