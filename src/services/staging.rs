//! Upload staging between receipt and the provider call.
//!
//! Each upload is written to a uniquely named file so concurrent requests
//! never collide; the file is owned by exactly one request and removed when
//! its guard drops, on success and error paths alike.

use crate::error::AppError;
use crate::services::providers::MediaPart;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct UploadStaging {
    dir: PathBuf,
}

impl UploadStaging {
    pub async fn new(dir: impl Into<PathBuf>) -> Result<Self, AppError> {
        let dir = dir.into();
        if !dir.exists() {
            fs::create_dir_all(&dir).await?;
        }
        Ok(Self { dir })
    }

    /// Write upload bytes to a uniquely named staging file owned by the caller.
    pub async fn stage(&self, data: &[u8]) -> Result<StagedFile, AppError> {
        let path = self.dir.join(Uuid::new_v4().to_string());
        fs::write(&path, data).await?;
        Ok(StagedFile { path })
    }
}

/// A staged upload scoped to a single request.
pub struct StagedFile {
    path: PathBuf,
}

impl StagedFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the staged bytes and base64-encode them into a media part.
    pub async fn to_media_part(&self, mime_type: &str) -> Result<MediaPart, AppError> {
        let bytes = fs::read(&self.path).await?;
        Ok(MediaPart {
            mime_type: mime_type.to_string(),
            data: STANDARD.encode(bytes),
        })
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            tracing::warn!(
                path = %self.path.display(),
                "Failed to remove staged upload: {}",
                e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn stage_writes_and_drop_removes() {
        let dir = format!("target/test-staging-{}", Uuid::new_v4());
        let staging = UploadStaging::new(&dir).await.unwrap();

        let staged = staging.stage(b"hello").await.unwrap();
        let path = staged.path().to_path_buf();
        assert!(path.exists());

        drop(staged);
        assert!(!path.exists());

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn to_media_part_encodes_bytes() {
        let dir = format!("target/test-staging-{}", Uuid::new_v4());
        let staging = UploadStaging::new(&dir).await.unwrap();

        let staged = staging.stage(b"hello").await.unwrap();
        let part = staged.to_media_part("text/plain").await.unwrap();
        assert_eq!(part.mime_type, "text/plain");
        assert_eq!(part.data, "aGVsbG8=");

        drop(staged);
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn staged_files_are_uniquely_named() {
        let dir = format!("target/test-staging-{}", Uuid::new_v4());
        let staging = UploadStaging::new(&dir).await.unwrap();

        let first = staging.stage(b"one").await.unwrap();
        let second = staging.stage(b"two").await.unwrap();
        assert_ne!(first.path(), second.path());

        drop(first);
        drop(second);
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
