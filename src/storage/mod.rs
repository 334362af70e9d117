//! File storage service.
//!
//! Uploaded images live in a flat directory as `{uuid}{extension}`; the
//! filename is the only index and lookup is a prefix scan. That is fine for a
//! reference deployment, but a production deployment would point this at a
//! persistent object store and keep an explicit id -> location mapping.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{error, info};
use uuid::Uuid;

use crate::config::StorageConfig;
use crate::types::{AppError, AppResult};

/// 5MB placeholder limit; adjust if client constraints change.
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Only JPEG and PNG are accepted, so a script disguised as an image never
/// lands on disk.
fn is_allowed_mime(content_type: &str) -> bool {
    content_type
        .parse::<mime::Mime>()
        .map(|m| {
            m.essence_str() == mime::IMAGE_JPEG.essence_str()
                || m.essence_str() == mime::IMAGE_PNG.essence_str()
        })
        .unwrap_or(false)
}

/// File store over a single upload directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    upload_dir: PathBuf,
}

impl FileStore {
    /// Open the store, creating the upload directory if it does not exist.
    /// Safe to call repeatedly; an existing directory is not an error.
    pub async fn open(config: &StorageConfig) -> AppResult<Self> {
        fs::create_dir_all(&config.upload_dir).await?;
        Ok(Self {
            upload_dir: config.upload_dir.clone(),
        })
    }

    /// Validate and persist uploaded content, returning its new image id.
    pub async fn save(
        &self,
        content: &[u8],
        filename: &str,
        content_type: &str,
    ) -> AppResult<String> {
        if !is_allowed_mime(content_type) {
            error!(content_type = %content_type, "Invalid file type");
            return Err(AppError::InvalidMediaType(content_type.to_string()));
        }

        if content.len() > MAX_FILE_SIZE {
            error!(size = content.len(), "File too large");
            return Err(AppError::PayloadTooLarge(content.len()));
        }

        // UUID v4 makes ids unguessable and keeps the prefix lookup in
        // `resolve` sound: no generated id is ever a prefix of another.
        let image_id = Uuid::new_v4().to_string();
        let extension = file_extension(filename);
        let final_path = self.upload_dir.join(format!("{image_id}{extension}"));

        // Stage under a dot-prefixed name that can never match an id prefix,
        // then rename into place so `resolve` never observes a partial write.
        let staging_path = self.upload_dir.join(format!(".tmp-{image_id}"));
        fs::write(&staging_path, content).await?;
        fs::rename(&staging_path, &final_path).await?;

        info!(image_id = %image_id, size = content.len(), "File saved successfully");
        Ok(image_id)
    }

    /// Resolve an image id to the stored file path.
    ///
    /// Linear scan over the upload directory; the first entry whose name
    /// starts with `image_id` wins, whatever its extension. Known limitation:
    /// O(n) per lookup since there is no index beyond the filenames.
    pub async fn resolve(&self, image_id: &str) -> AppResult<PathBuf> {
        // An empty prefix would match the first directory entry.
        if image_id.is_empty() {
            return Err(AppError::NotFound(image_id.to_string()));
        }

        let mut entries = fs::read_dir(&self.upload_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            if name.to_string_lossy().starts_with(image_id) {
                return Ok(entry.path());
            }
        }

        Err(AppError::NotFound(image_id.to_string()))
    }
}

/// Suffix after the last `.` of the original filename, dot included.
/// Filenames without an extension store the bare id.
fn file_extension(filename: &str) -> String {
    match Path::new(filename).extension() {
        Some(ext) => format!(".{}", ext.to_string_lossy()),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn open_store(dir: &TempDir) -> FileStore {
        FileStore::open(&StorageConfig {
            upload_dir: dir.path().to_path_buf(),
        })
        .await
        .unwrap()
    }

    async fn entry_count(dir: &TempDir) -> usize {
        let mut entries = fs::read_dir(dir.path()).await.unwrap();
        let mut count = 0;
        while entries.next_entry().await.unwrap().is_some() {
            count += 1;
        }
        count
    }

    #[tokio::test]
    async fn test_save_and_resolve_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir).await;

        let content = b"not really a png, but the store does not sniff bytes";
        let image_id = store.save(content, "selfie.png", "image/png").await.unwrap();

        let path = store.resolve(&image_id).await.unwrap();
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with(&image_id));
        assert_eq!(fs::read(&path).await.unwrap(), content);
    }

    #[tokio::test]
    async fn test_extension_comes_from_filename() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir).await;

        let id = store.save(b"jpeg", "face.jpeg", "image/jpeg").await.unwrap();
        let path = store.resolve(&id).await.unwrap();
        assert_eq!(path.file_name().unwrap().to_string_lossy(), format!("{id}.jpeg"));

        let id = store.save(b"raw", "noextension", "image/png").await.unwrap();
        let path = store.resolve(&id).await.unwrap();
        assert_eq!(path.file_name().unwrap().to_string_lossy(), id);
    }

    #[tokio::test]
    async fn test_disallowed_mime_type_persists_nothing() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir).await;

        let err = store
            .save(b"#!/bin/sh", "evil.sh", "application/x-sh")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidMediaType(_)));
        assert_eq!(entry_count(&dir).await, 0);
    }

    #[tokio::test]
    async fn test_size_limit_boundary() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir).await;

        // Exactly at the limit is accepted.
        let at_limit = vec![0u8; MAX_FILE_SIZE];
        store.save(&at_limit, "big.png", "image/png").await.unwrap();

        // One byte over is rejected and nothing new is written.
        let over_limit = vec![0u8; MAX_FILE_SIZE + 1];
        let err = store
            .save(&over_limit, "huge.png", "image/png")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::PayloadTooLarge(_)));
        assert_eq!(entry_count(&dir).await, 1);
    }

    #[tokio::test]
    async fn test_resolve_unknown_id_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir).await;

        store.save(b"png", "a.png", "image/png").await.unwrap();

        let err = store.resolve("no-such-id").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        // The empty prefix must not match the stored entry either.
        let err = store.resolve("").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_concurrent_uploads_do_not_collide() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir).await;

        let (first, second) = tokio::join!(
            store.save(b"first upload", "one.png", "image/png"),
            store.save(b"second upload", "two.jpg", "image/jpeg"),
        );
        let first = first.unwrap();
        let second = second.unwrap();
        assert_ne!(first, second);

        let first_path = store.resolve(&first).await.unwrap();
        let second_path = store.resolve(&second).await.unwrap();
        assert_eq!(fs::read(first_path).await.unwrap(), b"first upload");
        assert_eq!(fs::read(second_path).await.unwrap(), b"second upload");
    }

    #[tokio::test]
    async fn test_mime_parameters_are_tolerated() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir).await;

        store
            .save(b"png", "p.png", "image/png; charset=binary")
            .await
            .unwrap();
        let err = store.save(b"gif", "g.gif", "image/gif").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidMediaType(_)));
    }
}
