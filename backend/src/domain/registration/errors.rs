//! Per-field error collection for the registration form.

/// Full name left blank.
pub const FULLNAME_REQUIRED: &str = "Fullname is required.";
/// Username left blank.
pub const USERNAME_REQUIRED: &str = "Username is required.";
/// Email left blank.
pub const EMAIL_REQUIRED: &str = "Email is required.";
/// Password left blank.
pub const PASSWORD_REQUIRED: &str = "Password is required.";
/// Confirmation left blank.
pub const CONFIRM_PASSWORD_REQUIRED: &str = "Please retype the password.";
/// Full name longer than the account column allows.
pub const FULLNAME_TOO_LONG: &str = "Fullname must be at most 255 characters.";
/// Username longer than the account column allows.
pub const USERNAME_TOO_LONG: &str = "Username must be at most 64 characters.";
/// Email longer than the account column allows.
pub const EMAIL_TOO_LONG: &str = "Email must be at most 255 characters.";
/// Uploaded picture name longer than the stored path allows.
pub const PICTURE_NAME_TOO_LONG: &str = "Profile picture file name is too long.";
/// Username with a leading digit or a non-alphanumeric character.
pub const USERNAME_INVALID: &str =
    "Username must start with a letter and contain only letters and numbers.";
/// Email without the `local@domain.tld` shape.
pub const EMAIL_INVALID: &str = "Invalid email format.";
/// Password failing the strength rule.
pub const PASSWORD_WEAK: &str =
    "Password must be at least 8 characters long, with 1 uppercase letter, 1 number, and 1 symbol.";
/// Confirmation differing from the password.
pub const PASSWORDS_MISMATCH: &str = "Passwords do not match.";
/// Username already held by another account.
pub const USERNAME_TAKEN: &str = "The user with this username already exists.";
/// Submission could not be checked at all.
pub const INVALID_INPUT: &str = "Invalid input.";
/// Account store unreachable.
pub const SERVICE_UNAVAILABLE: &str = "Our server is under maintenance. Please try again later!";
/// Account store refused the insert.
pub const REGISTRATION_FAILED: &str = "Could not register your account. Please try again later!";
/// Configuration or adapter fault; details only reach the logs.
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred. Please try again later!";
/// One-time notice shown on the sign-in page after registering.
pub const REGISTRATION_SUCCEEDED: &str = "Account Successfully Created, Please Login.";

/// Slot in [`RegistrationErrors`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistrationField {
    /// `fullname` input.
    FullName,
    /// `username` input.
    Username,
    /// `email` input.
    Email,
    /// `password` input.
    Password,
    /// `cPassword` input.
    ConfirmPassword,
    /// Form-wide message not tied to one input.
    General,
}

impl RegistrationField {
    /// Every slot, in template order.
    pub const ALL: [Self; 6] = [
        Self::FullName,
        Self::Username,
        Self::Email,
        Self::Password,
        Self::ConfirmPassword,
        Self::General,
    ];

    /// Attribute key the form template reads the message from.
    #[must_use]
    pub const fn error_key(self) -> &'static str {
        match self {
            Self::FullName => "error_fullname",
            Self::Username => "error_username",
            Self::Email => "error_email",
            Self::Password => "error_password",
            Self::ConfirmPassword => "error_cpassword",
            Self::General => "error",
        }
    }
}

/// At most one message per form field plus one general message.
///
/// An empty collection means the submission passed validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationErrors {
    full_name: Option<String>,
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
    confirm_password: Option<String>,
    general: Option<String>,
}

impl RegistrationErrors {
    /// Collection holding only a form-wide message.
    #[must_use]
    pub fn general(message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.set(RegistrationField::General, message);
        errors
    }

    fn slot(&self, field: RegistrationField) -> &Option<String> {
        match field {
            RegistrationField::FullName => &self.full_name,
            RegistrationField::Username => &self.username,
            RegistrationField::Email => &self.email,
            RegistrationField::Password => &self.password,
            RegistrationField::ConfirmPassword => &self.confirm_password,
            RegistrationField::General => &self.general,
        }
    }

    fn slot_mut(&mut self, field: RegistrationField) -> &mut Option<String> {
        match field {
            RegistrationField::FullName => &mut self.full_name,
            RegistrationField::Username => &mut self.username,
            RegistrationField::Email => &mut self.email,
            RegistrationField::Password => &mut self.password,
            RegistrationField::ConfirmPassword => &mut self.confirm_password,
            RegistrationField::General => &mut self.general,
        }
    }

    /// Record `message` for `field`, replacing any earlier message.
    pub fn set(&mut self, field: RegistrationField, message: impl Into<String>) {
        *self.slot_mut(field) = Some(message.into());
    }

    /// Message recorded for `field`, if any.
    #[must_use]
    pub fn get(&self, field: RegistrationField) -> Option<&str> {
        self.slot(field).as_deref()
    }

    /// Whether `field` already carries a message.
    #[must_use]
    pub fn has(&self, field: RegistrationField) -> bool {
        self.slot(field).is_some()
    }

    /// True when the submission passed every check.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        RegistrationField::ALL.iter().all(|field| !self.has(*field))
    }

    /// Set messages keyed by their template attribute name.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        RegistrationField::ALL
            .into_iter()
            .filter_map(|field| self.get(field).map(|message| (field.error_key(), message)))
    }
}
