//! User account data model.
//!
//! Value objects validate on construction so a [`User`] can only be built
//! from well-formed parts. Persistence adapters rebuild users through the
//! same constructors.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::role::RoleId;

/// Validation errors returned by the user value-object constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// Full name blank.
    EmptyFullName,
    /// Username empty.
    EmptyUsername,
    /// Username outside `^[A-Za-z][A-Za-z0-9]*$`.
    InvalidUsername,
    /// Email empty.
    EmptyEmail,
    /// Email without the `local@domain.tld` shape.
    InvalidEmail,
    /// Hash string empty.
    EmptyPasswordHash,
    /// Picture path not a single file below a public directory.
    InvalidProfilePicturePath,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyFullName => write!(f, "full name must not be empty"),
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::InvalidUsername => write!(
                f,
                "username must start with a letter and contain only letters and numbers"
            ),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email address is malformed"),
            Self::EmptyPasswordHash => write!(f, "password hash must not be empty"),
            Self::InvalidProfilePicturePath => {
                write!(f, "profile picture path must be an absolute public path")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

static USERNAME_RE: OnceLock<Regex> = OnceLock::new();
static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn username_regex() -> &'static Regex {
    USERNAME_RE.get_or_init(|| {
        Regex::new("^[A-Za-z][A-Za-z0-9]*$")
            .unwrap_or_else(|error| panic!("username regex failed to compile: {error}"))
    })
}

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID, typically read back from storage.
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Login name: starts with an ASCII letter, followed by letters or digits.
///
/// # Examples
/// ```
/// use wordweave::domain::Username;
///
/// assert!(Username::new("ada1815").is_ok());
/// assert!(Username::new("1ada").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(username: impl Into<String>) -> Result<Self, UserValidationError> {
        let username = username.into();
        if username.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if !username_regex().is_match(&username) {
            return Err(UserValidationError::InvalidUsername);
        }
        Ok(Self(username))
    }

    /// Borrow the username as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Email address in the common `local@domain.tld` shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let email = email.into();
        if email.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if !email_regex().is_match(&email) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(email))
    }

    /// Borrow the address as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name shown on the author's profile and posts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullName(String);

impl FullName {
    /// Validate and construct a [`FullName`]; it must not be blank.
    pub fn new(full_name: impl Into<String>) -> Result<Self, UserValidationError> {
        let full_name = full_name.into();
        if full_name.trim().is_empty() {
            return Err(UserValidationError::EmptyFullName);
        }
        Ok(Self(full_name))
    }

    /// Borrow the name as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Encoded password hash (PHC string format).
///
/// `Debug` output is redacted so hashes never end up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash produced by a password hasher or read from storage.
    pub fn new(encoded: impl Into<String>) -> Result<Self, UserValidationError> {
        let encoded = encoded.into();
        if encoded.trim().is_empty() {
            return Err(UserValidationError::EmptyPasswordHash);
        }
        Ok(Self(encoded))
    }

    /// Borrow the encoded hash.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Public path of a stored profile picture, e.g. `/images/ada.png`.
///
/// Absolute, at most [`ProfilePicturePath::MAX_LEN`] characters, with no
/// backslashes and no `.` or `..` segments. Dots inside a file name such as
/// `holiday..final.png` are fine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfilePicturePath(String);

impl ProfilePicturePath {
    /// Longest stored path. Matches `users.profile_picture`.
    pub const MAX_LEN: usize = 512;

    /// Validate and construct a [`ProfilePicturePath`].
    pub fn new(path: impl Into<String>) -> Result<Self, UserValidationError> {
        let path = path.into();
        let Some(relative) = path.strip_prefix('/') else {
            return Err(UserValidationError::InvalidProfilePicturePath);
        };
        let traverses = relative
            .split('/')
            .any(|segment| matches!(segment, "" | "." | ".."));
        if traverses || relative.contains('\\') || path.chars().count() > Self::MAX_LEN {
            return Err(UserValidationError::InvalidProfilePicturePath);
        }
        Ok(Self(path))
    }

    /// Borrow the public path.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ProfilePicturePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameter object bundling the validated parts of a [`User`].
#[derive(Debug, Clone)]
pub struct UserParts {
    /// Account identifier.
    pub id: UserId,
    /// Display name.
    pub full_name: FullName,
    /// Contact address.
    pub email: EmailAddress,
    /// Unique sign-in name.
    pub username: Username,
    /// Argon2 PHC string.
    pub password_hash: PasswordHash,
    /// Role granted at registration.
    pub role_id: RoleId,
    /// Public picture path, if one was uploaded.
    pub profile_picture: Option<ProfilePicturePath>,
}

/// Registered user account.
///
/// ## Invariants
/// - `username` is unique across all accounts; storage enforces it.
/// - The record is never mutated by the registration workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    full_name: FullName,
    email: EmailAddress,
    username: Username,
    password_hash: PasswordHash,
    role_id: RoleId,
    profile_picture: Option<ProfilePicturePath>,
}

impl User {
    /// Build a [`User`] from validated components.
    pub fn new(parts: UserParts) -> Self {
        let UserParts {
            id,
            full_name,
            email,
            username,
            password_hash,
            role_id,
            profile_picture,
        } = parts;
        Self {
            id,
            full_name,
            email,
            username,
            password_hash,
            role_id,
            profile_picture,
        }
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Full name shown on the profile.
    pub fn full_name(&self) -> &FullName {
        &self.full_name
    }

    /// Contact email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Unique login name.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Stored password hash.
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Role the account belongs to.
    pub fn role_id(&self) -> RoleId {
        self.role_id
    }

    /// Public path of the profile picture, when one was uploaded.
    pub fn profile_picture(&self) -> Option<&ProfilePicturePath> {
        self.profile_picture.as_ref()
    }
}

#[cfg(test)]
mod tests;
