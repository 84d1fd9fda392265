//! # Storage Error Types
//!
//! Error types for persistence operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Error Propagation                               │
//! │                                                                     │
//! │  std::io::Error / serde_json::Error                                 │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  StorageError (this module) ← Adds path context and categorization  │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  StoreError ← Also carries CoreError (domain failures)              │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Chat transport displays a user-friendly message                    │
//! │                                                                     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No storage error is retried here: the store must never pretend a
//! mutation succeeded, so failures surface immediately and the caller
//! decides what to tell the user.

use thiserror::Error;

use bistro_core::CoreError;

// =============================================================================
// Storage Error
// =============================================================================

/// Failures of the persisted medium itself.
///
/// After any of these, callers must assume the corresponding mutation did
/// NOT happen.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The state document could not be read.
    ///
    /// ## When This Occurs
    /// - File permissions problem
    /// - Directory vanished under us
    /// - Any I/O failure other than "file does not exist" (that one is
    ///   first-run bootstrap, not an error)
    #[error("Failed to read state document: {0}")]
    Read(String),

    /// The state document could not be written.
    ///
    /// ## When This Occurs
    /// - Disk full
    /// - File permissions problem
    /// - Rename of the temp file failed
    #[error("Failed to write state document: {0}")]
    Write(String),

    /// The state document exists but does not round-trip.
    ///
    /// ## When This Occurs
    /// - Truncated or hand-edited JSON
    /// - Schema violation (unknown field, wrong type, negative price)
    ///
    /// There is no partial recovery and no migration: a corrupt document
    /// fails fast rather than silently propagating malformed data.
    #[error("State document is corrupt: {0}")]
    Corrupt(String),
}

impl StorageError {
    /// Creates a Read error from an I/O failure.
    pub fn read(err: impl std::fmt::Display) -> Self {
        StorageError::Read(err.to_string())
    }

    /// Creates a Write error from an I/O failure.
    pub fn write(err: impl std::fmt::Display) -> Self {
        StorageError::Write(err.to_string())
    }

    /// Creates a Corrupt error from a parse/serialize failure.
    pub fn corrupt(err: impl std::fmt::Display) -> Self {
        StorageError::Corrupt(err.to_string())
    }
}

// =============================================================================
// Store Error
// =============================================================================

/// Everything a store operation can fail with: the medium, or the domain.
///
/// Transparent wrapping keeps the messages of the underlying errors, and
/// `#[from]` lets store code use `?` on both kinds.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The persisted medium failed; nothing was committed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A domain rule rejected the action; nothing was saved.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StoreError {
    /// True for domain failures the transport shows as a normal chat
    /// message (unknown item, empty cart) rather than as a system fault.
    pub fn is_domain(&self) -> bool {
        matches!(self, StoreError::Core(_))
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with StoreError.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
