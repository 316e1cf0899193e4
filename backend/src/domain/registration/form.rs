//! Decoded registration submission.

use std::fmt;

use zeroize::Zeroizing;

use crate::domain::ProfileImageUpload;

/// Values submitted through the registration form.
///
/// Text fields arrive trimmed from the inbound adapter. Passwords are kept
/// verbatim and wiped on drop.
#[derive(Clone, Default)]
pub struct RegistrationForm {
    /// `fullname` part.
    pub full_name: String,
    /// `email` part.
    pub email: String,
    /// `username` part.
    pub username: String,
    /// `password` part.
    pub password: Zeroizing<String>,
    /// `cPassword` part.
    pub confirm_password: Zeroizing<String>,
    /// `profile_picture` part, when one was sent.
    pub profile_picture: Option<ProfileImageUpload>,
}

impl RegistrationForm {
    /// Values that may be echoed back when the form is re-rendered.
    pub fn prefill(&self) -> FormPrefill {
        FormPrefill {
            full_name: self.full_name.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
        }
    }
}

impl fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("confirm_password", &"<redacted>")
            .field("profile_picture", &self.profile_picture)
            .finish()
    }
}

/// Non-secret form values shown again after a failed submission.
///
/// Password fields are never echoed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormPrefill {
    /// Full name as submitted.
    pub full_name: String,
    /// Username as submitted.
    pub username: String,
    /// Email as submitted.
    pub email: String,
}
