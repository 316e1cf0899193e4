//! Field rules for the registration form.
//!
//! Every check is pure; the uniqueness lookup lives in the service because it
//! needs the user repository.

use crate::domain::{EmailAddress, Username};

use super::errors::{
    CONFIRM_PASSWORD_REQUIRED, EMAIL_INVALID, EMAIL_REQUIRED, EMAIL_TOO_LONG, FULLNAME_REQUIRED,
    FULLNAME_TOO_LONG, PASSWORD_REQUIRED, PASSWORD_WEAK, PASSWORDS_MISMATCH,
    PICTURE_NAME_TOO_LONG, RegistrationErrors, RegistrationField, USERNAME_INVALID,
    USERNAME_REQUIRED, USERNAME_TOO_LONG,
};
use super::form::RegistrationForm;

/// Minimum password length in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Longest accepted full name, in characters. Matches `users.full_name`.
pub const MAX_FULL_NAME_LEN: usize = 255;
/// Longest accepted username, in characters. Matches `users.username`.
pub const MAX_USERNAME_LEN: usize = 64;
/// Longest accepted email, in characters. Matches `users.email`.
pub const MAX_EMAIL_LEN: usize = 255;
/// Longest accepted picture file name; `users.profile_picture` also holds
/// the `/images/` prefix.
pub const MAX_PICTURE_NAME_LEN: usize = 504;

/// True when `value` holds nothing but whitespace.
#[must_use]
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// True when `value` has more than `max` characters.
#[must_use]
pub fn exceeds(value: &str, max: usize) -> bool {
    value.chars().count() > max
}

/// True when `value` is a letter followed by letters and digits.
#[must_use]
pub fn is_valid_username(value: &str) -> bool {
    Username::new(value).is_ok()
}

/// True when `value` has the `local@domain.tld` shape.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    EmailAddress::new(value).is_ok()
}

/// At least eight characters with one ASCII uppercase letter, one ASCII
/// digit and one symbol. A symbol is any non-whitespace, non-alphanumeric
/// character.
#[must_use]
pub fn is_strong_password(password: &str) -> bool {
    let long_enough = password.chars().count() >= MIN_PASSWORD_LEN;
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password
        .chars()
        .any(|c| !c.is_alphanumeric() && !c.is_whitespace());
    long_enough && has_upper && has_digit && has_symbol
}

/// True when the confirmation repeats the password exactly.
#[must_use]
pub fn passwords_match(password: &str, confirm_password: &str) -> bool {
    password == confirm_password
}

/// Run every field rule and collect the failures.
///
/// A field that is blank only receives its "required" message; length and
/// shape rules are skipped for it. An over-long field reports its length and
/// skips the shape rule.
#[must_use]
pub fn validate_form(form: &RegistrationForm) -> RegistrationErrors {
    let mut errors = RegistrationErrors::default();

    let required = [
        (RegistrationField::FullName, form.full_name.as_str(), FULLNAME_REQUIRED),
        (RegistrationField::Username, form.username.as_str(), USERNAME_REQUIRED),
        (RegistrationField::Email, form.email.as_str(), EMAIL_REQUIRED),
        (RegistrationField::Password, form.password.as_str(), PASSWORD_REQUIRED),
        (
            RegistrationField::ConfirmPassword,
            form.confirm_password.as_str(),
            CONFIRM_PASSWORD_REQUIRED,
        ),
    ];
    for (field, value, message) in required {
        if is_blank(value) {
            errors.set(field, message);
        }
    }

    let limits = [
        (
            RegistrationField::FullName,
            form.full_name.as_str(),
            MAX_FULL_NAME_LEN,
            FULLNAME_TOO_LONG,
        ),
        (
            RegistrationField::Username,
            form.username.as_str(),
            MAX_USERNAME_LEN,
            USERNAME_TOO_LONG,
        ),
        (
            RegistrationField::Email,
            form.email.as_str(),
            MAX_EMAIL_LEN,
            EMAIL_TOO_LONG,
        ),
    ];
    for (field, value, max, message) in limits {
        if !errors.has(field) && exceeds(value, max) {
            errors.set(field, message);
        }
    }
    let long_picture_name = form.profile_picture.as_ref().is_some_and(|upload| {
        upload.has_file() && exceeds(upload.file_name(), MAX_PICTURE_NAME_LEN)
    });
    if long_picture_name {
        errors.set(RegistrationField::General, PICTURE_NAME_TOO_LONG);
    }

    if !errors.has(RegistrationField::Username) && !is_valid_username(&form.username) {
        errors.set(RegistrationField::Username, USERNAME_INVALID);
    }
    if !errors.has(RegistrationField::Email) && !is_valid_email(&form.email) {
        errors.set(RegistrationField::Email, EMAIL_INVALID);
    }
    if !errors.has(RegistrationField::Password) && !is_strong_password(&form.password) {
        errors.set(RegistrationField::Password, PASSWORD_WEAK);
    }
    if !errors.has(RegistrationField::ConfirmPassword)
        && !passwords_match(&form.password, &form.confirm_password)
    {
        errors.set(RegistrationField::ConfirmPassword, PASSWORDS_MISMATCH);
    }

    errors
}
