//! Flat, directory-backed store for uploaded attachments.

use std::{io, path::PathBuf};

use juicios_core::{
  StoredAttachment,
  attachment::{is_safe_name, sanitize_filename, storage_key},
};

/// Attachment files kept side by side in one directory.
///
/// Files are written under their content hash (see
/// [`storage_key`](juicios_core::attachment::storage_key)); the sanitized
/// client filename travels back to the caller for display only.
#[derive(Debug, Clone)]
pub struct FileStore {
  dir: PathBuf,
}

impl FileStore {
  /// Use `dir` as the upload directory, creating it if needed.
  pub async fn open(dir: impl Into<PathBuf>) -> io::Result<Self> {
    let dir = dir.into();
    tokio::fs::create_dir_all(&dir).await?;
    Ok(Self { dir })
  }

  /// Write `data` and return where it went. Re-uploading identical content
  /// rewrites the same file with the same bytes.
  pub async fn save(&self, filename: &str, data: &[u8]) -> io::Result<StoredAttachment> {
    let stored = StoredAttachment {
      key:  storage_key(data),
      name: sanitize_filename(filename),
    };
    tokio::fs::write(self.dir.join(&stored.key), data).await?;
    tracing::debug!(key = %stored.key, name = %stored.name, bytes = data.len(), "stored attachment");
    Ok(stored)
  }

  /// Read the file stored as `name`.
  ///
  /// Returns `None` for unknown names and for any name that is not already
  /// in sanitized form, so nothing outside the directory is reachable.
  pub async fn read(&self, name: &str) -> io::Result<Option<Vec<u8>>> {
    if !is_safe_name(name) {
      return Ok(None);
    }
    match tokio::fs::read(self.dir.join(name)).await {
      Ok(data) => Ok(Some(data)),
      Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
      Err(e) => Err(e),
    }
  }
}
