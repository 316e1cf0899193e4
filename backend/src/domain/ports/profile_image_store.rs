//! Port for storing uploaded profile pictures.

use async_trait::async_trait;

use crate::domain::{ProfileImageUpload, ProfilePicturePath};

/// Failures raised by profile image stores.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageStoreError {
    /// The submitted name has no usable file component.
    #[error("profile picture name `{name}` is not a usable file name")]
    InvalidName { name: String },
    /// Writing the file failed.
    #[error("profile picture could not be written: {message}")]
    Io { message: String },
}

impl ImageStoreError {
    /// Unusable submitted `name`.
    pub fn invalid_name(name: impl Into<String>) -> Self {
        Self::InvalidName { name: name.into() }
    }

    /// Write failure with `message`.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }
}

/// Destination for uploaded profile pictures.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileImageStore: Send + Sync {
    /// Persist the upload and return the public path it is served from.
    async fn store(&self, upload: &ProfileImageUpload)
    -> Result<ProfilePicturePath, ImageStoreError>;
}
