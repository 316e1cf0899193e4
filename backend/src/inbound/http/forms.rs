//! Request body decoding for the HTML forms.
//!
//! Registration arrives as `multipart/form-data` because of the optional
//! profile picture; login is a plain urlencoded form.

use actix_multipart::Multipart;
use futures_util::TryStreamExt;
use serde::Deserialize;
use thiserror::Error;
use zeroize::Zeroizing;

use crate::domain::{ProfileImageUpload, RegistrationForm};

/// Largest accepted text part.
pub const MAX_TEXT_FIELD_BYTES: usize = 4 * 1024;
/// Largest accepted profile picture.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Part name of the full name input.
pub const FULLNAME_FIELD: &str = "fullname";
/// Part name of the email input.
pub const EMAIL_FIELD: &str = "email";
/// Part name of the username input.
pub const USERNAME_FIELD: &str = "username";
/// Part name of the password input.
pub const PASSWORD_FIELD: &str = "password";
/// Part name of the confirmation input.
pub const CONFIRM_PASSWORD_FIELD: &str = "cPassword";
/// Part name of the file input.
pub const PROFILE_PICTURE_FIELD: &str = "profile_picture";

/// Reasons a registration body could not be decoded.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormDecodeError {
    /// The stream is not valid `multipart/form-data`.
    #[error("malformed multipart body: {0}")]
    Multipart(String),
    /// A part is larger than its limit.
    #[error("field `{name}` exceeds its size limit")]
    FieldTooLarge { name: String },
    /// A text part is not UTF-8.
    #[error("field `{name}` is not valid UTF-8")]
    NotUtf8 { name: String },
}

/// Urlencoded body of `POST /login`.
#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    /// Submitted username, untrimmed.
    #[serde(default)]
    pub username: String,
    /// Submitted password.
    #[serde(default)]
    pub password: String,
}

async fn read_part(
    field: &mut actix_multipart::Field,
    name: &str,
    limit: usize,
) -> Result<Vec<u8>, FormDecodeError> {
    let mut buf = Vec::new();
    while let Some(chunk) = field
        .try_next()
        .await
        .map_err(|err| FormDecodeError::Multipart(err.to_string()))?
    {
        if buf.len() + chunk.len() > limit {
            return Err(FormDecodeError::FieldTooLarge {
                name: name.to_owned(),
            });
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(buf)
}

fn into_text(name: &str, bytes: Vec<u8>) -> Result<String, FormDecodeError> {
    String::from_utf8(bytes).map_err(|_| FormDecodeError::NotUtf8 {
        name: name.to_owned(),
    })
}

/// Collect the registration fields from a multipart stream.
///
/// Unknown parts are drained and ignored. Text fields are trimmed; password
/// fields are kept exactly as typed.
pub async fn decode_registration(
    mut payload: Multipart,
) -> Result<RegistrationForm, FormDecodeError> {
    let mut form = RegistrationForm::default();

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|err| FormDecodeError::Multipart(err.to_string()))?
    {
        let (name, file_name) = match field.content_disposition() {
            Some(disposition) => (
                disposition.get_name().unwrap_or_default().to_owned(),
                disposition.get_filename().map(str::to_owned),
            ),
            None => (String::new(), None),
        };

        match name.as_str() {
            PROFILE_PICTURE_FIELD => {
                let content_type = field.content_type().map(ToString::to_string);
                let bytes = read_part(&mut field, &name, MAX_IMAGE_BYTES).await?;
                form.profile_picture = Some(ProfileImageUpload::new(
                    file_name.unwrap_or_default(),
                    content_type,
                    bytes,
                ));
            }
            PASSWORD_FIELD | CONFIRM_PASSWORD_FIELD => {
                let bytes =
                    Zeroizing::new(read_part(&mut field, &name, MAX_TEXT_FIELD_BYTES).await?);
                let text = std::str::from_utf8(&bytes)
                    .map_err(|_| FormDecodeError::NotUtf8 { name: name.clone() })?;
                let value = Zeroizing::new(text.to_owned());
                if name == PASSWORD_FIELD {
                    form.password = value;
                } else {
                    form.confirm_password = value;
                }
            }
            FULLNAME_FIELD | EMAIL_FIELD | USERNAME_FIELD => {
                let bytes = read_part(&mut field, &name, MAX_TEXT_FIELD_BYTES).await?;
                let value = into_text(&name, bytes)?.trim().to_owned();
                match name.as_str() {
                    FULLNAME_FIELD => form.full_name = value,
                    EMAIL_FIELD => form.email = value,
                    _ => form.username = value,
                }
            }
            _ => {
                read_part(&mut field, &name, MAX_IMAGE_BYTES).await?;
            }
        }
    }

    Ok(form)
}
