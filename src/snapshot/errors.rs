//! # Snapshot Errors
//!
//! `Integrity` is the only error the offline evaluator raises. The correct
//! recovery is to discard the snapshot and resolve online again, never to
//! retry the same snapshot. The remaining variants come from moving
//! snapshots in and out of storage.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for snapshot operations
pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Snapshot errors
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Snapshot failed verification (expired or tampered)
    #[error("{message}")]
    Integrity { message: String },

    /// Snapshot could not be serialized
    #[error("Failed to encode snapshot: {0}")]
    Encode(String),

    /// Bytes are not a snapshot
    #[error("Failed to decode snapshot: {0}")]
    Decode(String),

    /// Snapshot file could not be read or written
    #[error("Snapshot I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SnapshotError {
    pub fn integrity(message: impl Into<String>) -> Self {
        SnapshotError::Integrity {
            message: message.into(),
        }
    }

    pub fn io_error_at_path(path: &std::path::Path, source: io::Error) -> Self {
        SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            SnapshotError::Integrity { .. } => "DASH_SNAPSHOT_INTEGRITY",
            SnapshotError::Encode(_) => "DASH_SNAPSHOT_ENCODE",
            SnapshotError::Decode(_) => "DASH_SNAPSHOT_DECODE",
            SnapshotError::Io { .. } => "DASH_SNAPSHOT_IO",
        }
    }

    pub fn is_integrity(&self) -> bool {
        matches!(self, SnapshotError::Integrity { .. })
    }

    /// Nothing is retried internally; an invalid snapshot stays invalid.
    pub fn is_retryable(&self) -> bool {
        false
    }
}
