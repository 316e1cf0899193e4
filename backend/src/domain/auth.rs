//! Sign-in credentials submitted through the login form.

use std::fmt;

use zeroize::Zeroizing;

/// Shown when either login field is left blank.
pub const LOGIN_REQUIRED_MESSAGE: &str = "Username and password are required.";
/// Shown for unknown users and wrong passwords alike.
pub const LOGIN_INVALID_MESSAGE: &str = "Invalid username or password.";

/// Reasons raw login input cannot form [`LoginCredentials`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username blank after trimming.
    MissingUsername,
    /// Password empty.
    MissingPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingUsername => write!(f, "login username is missing"),
            Self::MissingPassword => write!(f, "login password is missing"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Username and password pair for a sign-in attempt.
///
/// The username is trimmed; the password is kept verbatim in a zeroizing
/// buffer so it is wiped when dropped.
///
/// # Examples
/// ```
/// use wordweave::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" ada ", "S3cret!pw").unwrap();
/// assert_eq!(creds.username(), "ada");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Build credentials from raw form values.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(LoginValidationError::MissingUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::MissingPassword);
        }
        Ok(Self {
            username: username.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Trimmed username.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password exactly as entered.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
