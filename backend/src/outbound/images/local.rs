//! Filesystem-backed `ProfileImageStore`.
//!
//! Uploads are written as submitted into one directory, opened through
//! `cap_std` so a crafted file name cannot escape it.

use std::path::PathBuf;

use async_trait::async_trait;
use cap_std::{ambient_authority, fs::Dir};
use tracing::{debug, warn};

use crate::domain::ports::{ImageStoreError, ProfileImageStore};
use crate::domain::{ProfileImageUpload, ProfilePicturePath};

/// Public URL prefix the stored files are served under.
pub const PUBLIC_IMAGE_PREFIX: &str = "/images/";

/// Writes profile pictures into a local directory.
#[derive(Debug, Clone)]
pub struct LocalProfileImageStore {
    root: PathBuf,
}

impl LocalProfileImageStore {
    /// Store uploads below `root`, creating it on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

/// Last path component of a client-supplied name.
///
/// Browsers on Windows may send the full local path.
fn file_component(submitted: &str) -> Option<&str> {
    let name = submitted.rsplit(['/', '\\']).next()?.trim();
    match name {
        "" | "." | ".." => None,
        name => Some(name),
    }
}

/// Write `bytes` to `name` inside `dir`; reports whether a file was replaced.
fn write_upload(dir: &Dir, name: &str, bytes: &[u8]) -> std::io::Result<bool> {
    let replaced = dir.exists(name);
    dir.write(name, bytes)?;
    Ok(replaced)
}

#[async_trait]
impl ProfileImageStore for LocalProfileImageStore {
    async fn store(
        &self,
        upload: &ProfileImageUpload,
    ) -> Result<ProfilePicturePath, ImageStoreError> {
        let name = file_component(upload.file_name())
            .ok_or_else(|| ImageStoreError::invalid_name(upload.file_name()))?
            .to_owned();
        let public_path = ProfilePicturePath::new(format!("{PUBLIC_IMAGE_PREFIX}{name}"))
            .map_err(|_| ImageStoreError::invalid_name(upload.file_name()))?;

        let root = self.root.clone();
        let bytes = upload.bytes().to_vec();
        let file_name = name.clone();
        let replaced = tokio::task::spawn_blocking(move || -> Result<bool, ImageStoreError> {
            Dir::create_ambient_dir_all(&root, ambient_authority())
                .map_err(|err| ImageStoreError::io(format!("{}: {err}", root.display())))?;
            let dir = Dir::open_ambient_dir(&root, ambient_authority())
                .map_err(|err| ImageStoreError::io(format!("{}: {err}", root.display())))?;
            write_upload(&dir, &file_name, &bytes)
                .map_err(|err| ImageStoreError::io(format!("{file_name}: {err}")))
        })
        .await
        .map_err(|err| ImageStoreError::io(format!("image write task aborted: {err}")))??;

        if replaced {
            warn!(path = %public_path, "profile picture replaced an existing upload");
        }
        debug!(path = %public_path, size = upload.bytes().len(), "stored profile picture");
        Ok(public_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("ada.png", Some("ada.png"))]
    #[case("nested/dir/ada.png", Some("ada.png"))]
    #[case(r"C:\Users\ada\Pictures\ada.png", Some("ada.png"))]
    #[case("../../etc/passwd", Some("passwd"))]
    #[case("..", None)]
    #[case("uploads/", None)]
    #[case("   ", None)]
    fn strips_directories_from_submitted_names(
        #[case] submitted: &str,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(file_component(submitted), expected);
    }

    #[tokio::test]
    async fn writes_bytes_and_returns_public_path() {
        let temp = tempfile::tempdir().expect("temp dir");
        let root = temp.path().join("images");
        let store = LocalProfileImageStore::new(&root);
        let upload = ProfileImageUpload::new(
            "avatars/ada.png",
            Some("image/png".to_owned()),
            vec![0x89, b'P', b'N', b'G'],
        );

        let path = store.store(&upload).await.expect("store succeeds");

        assert_eq!(path.as_str(), "/images/ada.png");
        let written = std::fs::read(root.join("ada.png")).expect("file written");
        assert_eq!(written, vec![0x89, b'P', b'N', b'G']);
    }

    #[tokio::test]
    async fn keeps_dots_inside_file_names() {
        let temp = tempfile::tempdir().expect("temp dir");
        let store = LocalProfileImageStore::new(temp.path());
        let upload = ProfileImageUpload::new("holiday..final.png", None, vec![1, 2, 3]);

        let path = store.store(&upload).await.expect("store succeeds");

        assert_eq!(path.as_str(), "/images/holiday..final.png");
        let written = std::fs::read(temp.path().join("holiday..final.png")).expect("file written");
        assert_eq!(written, vec![1, 2, 3]);
    }

    #[rstest]
    fn second_write_reports_replacement() {
        let temp = tempfile::tempdir().expect("temp dir");
        let dir = Dir::open_ambient_dir(temp.path(), ambient_authority()).expect("open dir");

        assert!(!write_upload(&dir, "avatar.png", b"first").expect("first write"));
        assert!(write_upload(&dir, "avatar.png", b"second").expect("second write"));
        let written = std::fs::read(temp.path().join("avatar.png")).expect("file written");
        assert_eq!(written, b"second");
    }

    #[tokio::test]
    async fn rejects_names_without_a_file_component() {
        let temp = tempfile::tempdir().expect("temp dir");
        let store = LocalProfileImageStore::new(temp.path());
        let upload = ProfileImageUpload::new("..", None, vec![1]);

        let err = store.store(&upload).await.expect_err("must fail");
        assert_eq!(err, ImageStoreError::invalid_name(".."));
    }
}
