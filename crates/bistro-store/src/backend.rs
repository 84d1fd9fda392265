//! # State Backends
//!
//! The pluggable persistence seam under the StateStore.
//!
//! ## Why a Trait?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Backend Selection                              │
//! │                                                                     │
//! │  StateStore ──► StateBackend (trait)                                │
//! │                    │                                                │
//! │         ┌──────────┴───────────┐                                    │
//! │         ▼                      ▼                                    │
//! │   FileBackend            MemoryBackend                              │
//! │   (production)           (tests, ephemeral runs)                    │
//! │                                                                     │
//! │  Backends move raw strings only. Parsing, schema checks, and all    │
//! │  domain logic stay above this seam, so a backend cannot half-apply  │
//! │  a mutation.                                                        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Atomic File Replacement
//! FileBackend writes to a sibling `*.tmp` file and renames it over the
//! state file. A crash mid-write leaves the previous document intact; the
//! rename either fully happens or doesn't.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use crate::error::StorageError;

// =============================================================================
// State Backend Trait
// =============================================================================

/// Raw persistence for the serialized state document.
///
/// `read` returns `Ok(None)` when no document has ever been written; the
/// store treats that as first-run bootstrap, not as an error.
#[async_trait]
pub trait StateBackend: Send + Sync {
    /// Short backend name for log lines.
    fn describe(&self) -> String;

    /// Reads the whole serialized document, or None if none exists yet.
    async fn read(&self) -> Result<Option<String>, StorageError>;

    /// Overwrites the whole serialized document atomically.
    async fn write(&self, raw: &str) -> Result<(), StorageError>;
}

// =============================================================================
// File Backend
// =============================================================================

/// Stores the document as a single JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    /// Creates a file backend for the given state file path.
    ///
    /// The file is not touched here; it appears on the first write (or on
    /// first-run bootstrap by the store).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileBackend { path: path.into() }
    }

    /// The state file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling path used for the write-then-rename dance.
    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

#[async_trait]
impl StateBackend for FileBackend {
    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }

    async fn read(&self) -> Result<Option<String>, StorageError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => {
                debug!(path = %self.path.display(), bytes = raw.len(), "Read state file");
                Ok(Some(raw))
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "State file does not exist yet");
                Ok(None)
            }
            Err(err) => Err(StorageError::read(format!(
                "{}: {}",
                self.path.display(),
                err
            ))),
        }
    }

    async fn write(&self, raw: &str) -> Result<(), StorageError> {
        let tmp = self.tmp_path();

        tokio::fs::write(&tmp, raw)
            .await
            .map_err(|err| StorageError::write(format!("{}: {}", tmp.display(), err)))?;

        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|err| StorageError::write(format!("{}: {}", self.path.display(), err)))?;

        debug!(path = %self.path.display(), bytes = raw.len(), "Wrote state file");
        Ok(())
    }
}

// =============================================================================
// Memory Backend
// =============================================================================

/// Keeps the document in memory. For tests and ephemeral runs.
///
/// A std Mutex (not tokio) guards the cell: it is held only for the copy,
/// never across an await.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    cell: Mutex<Option<String>>,
}

impl MemoryBackend {
    /// Creates an empty in-memory backend (no document yet).
    pub fn new() -> Self {
        MemoryBackend::default()
    }

    /// Creates an in-memory backend pre-loaded with a serialized document.
    /// Handy for corrupt-input tests.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        MemoryBackend {
            cell: Mutex::new(Some(raw.into())),
        }
    }
}

#[async_trait]
impl StateBackend for MemoryBackend {
    fn describe(&self) -> String {
        "memory".to_string()
    }

    async fn read(&self) -> Result<Option<String>, StorageError> {
        let cell = self
            .cell
            .lock()
            .map_err(|_| StorageError::read("memory backend poisoned"))?;
        Ok(cell.clone())
    }

    async fn write(&self, raw: &str) -> Result<(), StorageError> {
        let mut cell = self
            .cell
            .lock()
            .map_err(|_| StorageError::write("memory backend poisoned"))?;
        *cell = Some(raw.to_string());
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_backend_round_trip() {
        let backend = MemoryBackend::new();
        assert!(backend.read().await.unwrap().is_none());

        backend.write("{}").await.unwrap();
        assert_eq!(backend.read().await.unwrap().as_deref(), Some("{}"));
    }

    #[tokio::test]
    async fn test_file_backend_missing_file_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path().join("data.json"));
        assert!(backend.read().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_file_backend_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path().join("data.json"));

        backend.write(r#"{"users": {}}"#).await.unwrap();
        assert_eq!(
            backend.read().await.unwrap().as_deref(),
            Some(r#"{"users": {}}"#)
        );

        // Overwrite replaces wholesale.
        backend.write("{}").await.unwrap();
        assert_eq!(backend.read().await.unwrap().as_deref(), Some("{}"));
    }

    #[tokio::test]
    async fn test_file_backend_leaves_no_tmp_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        let backend = FileBackend::new(&path);

        backend.write("{}").await.unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("data.json")]);
    }

    #[tokio::test]
    async fn test_file_backend_read_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        // The path IS a directory, so read_to_string fails with a real
        // I/O error rather than NotFound.
        let backend = FileBackend::new(dir.path());

        let err = backend.read().await.unwrap_err();
        assert!(matches!(err, StorageError::Read(_)));
    }
}
