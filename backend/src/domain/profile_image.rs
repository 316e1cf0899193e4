//! Uploaded profile picture as received from the registration form.

use std::fmt;

/// File part submitted in the `profile_picture` field.
///
/// The bytes are stored as submitted; no decoding or resizing happens.
#[derive(Clone, PartialEq, Eq)]
pub struct ProfileImageUpload {
    file_name: String,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

impl ProfileImageUpload {
    /// Upload as received from the client.
    #[must_use]
    pub fn new(file_name: impl Into<String>, content_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            bytes,
        }
    }

    /// File name supplied by the client, possibly including path components.
    pub fn file_name(&self) -> &str {
        self.file_name.as_str()
    }

    /// Declared MIME type, if the client sent one.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// File contents.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Whether the client actually selected a file.
    ///
    /// Browsers submit an empty file part with a blank name when the picker
    /// is left untouched.
    pub fn has_file(&self) -> bool {
        !self.file_name.trim().is_empty()
    }
}

impl fmt::Debug for ProfileImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileImageUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}
