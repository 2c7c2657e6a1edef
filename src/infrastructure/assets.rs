//! Filesystem storage for uploaded avatar images
//!
//! Stored names are built from a millisecond timestamp, a fresh uuid and
//! the original file extension, so collisions are not a practical concern
//! and the browser still sees the right media type when fetching the file
//! back from `/images/{name}`.

use std::path::{Path, PathBuf};

use chrono::Utc;
use uuid::Uuid;

use crate::domain::entities::NO_AVATAR;
use crate::domain::error::DomainError;

/// MIME types accepted for avatar uploads
const ALLOWED_IMAGE_TYPES: [&str; 4] = ["image/png", "image/jpeg", "image/gif", "image/webp"];

/// An avatar file received from a client, not yet written to disk
#[derive(Debug, Clone)]
pub struct UploadedAvatar {
    pub bytes: Vec<u8>,
    pub original_filename: String,
    pub content_type: String,
}

/// Writes, replaces and removes avatar files under the uploads directory
#[derive(Clone)]
pub struct AvatarStore {
    root: PathBuf,
    max_bytes: usize,
}

impl AvatarStore {
    pub async fn new(root: impl Into<PathBuf>, max_bytes: usize) -> Result<Self, DomainError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self { root, max_bytes })
    }

    /// Check type and size limits without touching the disk
    ///
    /// Runs before any file write or aggregate mutation, so a rejected
    /// upload leaves no trace.
    pub fn validate(&self, upload: &UploadedAvatar) -> Result<(), DomainError> {
        if !ALLOWED_IMAGE_TYPES.contains(&upload.content_type.as_str()) {
            return Err(DomainError::validation(format!(
                "unsupported avatar type: {}",
                upload.content_type
            )));
        }
        if upload.bytes.len() > self.max_bytes {
            return Err(DomainError::validation(format!(
                "avatar exceeds the {} byte limit",
                self.max_bytes
            )));
        }
        Ok(())
    }

    /// Write the upload and return its stored file name
    pub async fn store(&self, upload: &UploadedAvatar) -> Result<String, DomainError> {
        self.validate(upload)?;

        let name = stored_name(&upload.original_filename);
        tokio::fs::write(self.root.join(&name), &upload.bytes).await?;

        tracing::debug!(file = %name, bytes = upload.bytes.len(), "Stored avatar");
        Ok(name)
    }

    /// Best-effort removal: failures are logged, never propagated
    pub async fn delete_quiet(&self, stored: &str) {
        if stored == NO_AVATAR {
            return;
        }
        if let Err(err) = tokio::fs::remove_file(self.root.join(stored)).await {
            tracing::warn!(file = %stored, error = %err, "Failed to remove avatar file");
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn stored_name(original_filename: &str) -> String {
    let extension = Path::new(original_filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default();

    format!(
        "{}-{}{}",
        Utc::now().timestamp_millis(),
        Uuid::new_v4(),
        extension
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_upload(bytes: Vec<u8>) -> UploadedAvatar {
        UploadedAvatar {
            bytes,
            original_filename: "portrait.png".to_string(),
            content_type: "image/png".to_string(),
        }
    }

    async fn test_store(max_bytes: usize) -> (AvatarStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = AvatarStore::new(dir.path(), max_bytes).await.unwrap();
        (store, dir)
    }

    #[tokio::test]
    async fn test_store_writes_file_and_keeps_extension() {
        let (store, _dir) = test_store(1024).await;

        let name = store.store(&png_upload(vec![1, 2, 3])).await.unwrap();
        assert!(name.ends_with(".png"));

        let written = tokio::fs::read(store.root().join(&name)).await.unwrap();
        assert_eq!(written, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_non_image_type_is_rejected_before_any_write() {
        let (store, _dir) = test_store(1024).await;

        let upload = UploadedAvatar {
            bytes: vec![0; 16],
            original_filename: "notes.txt".to_string(),
            content_type: "text/plain".to_string(),
        };
        let err = store.store(&upload).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let mut entries = tokio::fs::read_dir(store.root()).await.unwrap();
        assert!(entries.next_entry().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_oversized_upload_is_rejected() {
        let (store, _dir) = test_store(8).await;

        let err = store.store(&png_upload(vec![0; 9])).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn test_delete_quiet_swallows_missing_files() {
        let (store, _dir) = test_store(1024).await;

        // Neither the sentinel nor an unknown name may raise
        store.delete_quiet(NO_AVATAR).await;
        store.delete_quiet("1234-no-such-file.png").await;
    }

    #[tokio::test]
    async fn test_stored_names_do_not_collide() {
        let (store, _dir) = test_store(1024).await;

        let first = store.store(&png_upload(vec![1])).await.unwrap();
        let second = store.store(&png_upload(vec![2])).await.unwrap();
        assert_ne!(first, second);
    }
}
