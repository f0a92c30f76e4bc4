//! Portable snapshot structure and its JSON codec
//!
//! The snapshot is the only dashgate structure that leaves the process.
//! Field order is fixed so independently built verifiers see the same
//! layout:
//!
//! ```json
//! {
//!   "id": "snapshot_partner-dashboard_1768867200000_6f1c...",
//!   "dashboardId": "partner-dashboard",
//!   "version": "1.0.0",
//!   "resolved": { "...": "ResolvedDashboard" },
//!   "signature": "sig_1a2b3c4d",
//!   "createdAt": 1768867200000,
//!   "expiresAt": 1768870800000
//! }
//! ```

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::clock::Millis;
use crate::resolution::ResolvedDashboard;

use super::errors::{SnapshotError, SnapshotResult};

/// A signed, time-bounded resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// `snapshot_{dashboardId}_{createdAt}_{random}`
    pub id: String,
    pub dashboard_id: String,
    pub version: String,
    pub resolved: ResolvedDashboard,
    /// `sig_XXXXXXXX` over the signed fields of `resolved` and `created_at`
    pub signature: String,
    pub created_at: Millis,
    /// Always later than `created_at` for generated snapshots
    pub expires_at: Millis,
}

impl Snapshot {
    /// True once `now` is strictly past `expires_at`
    pub fn is_expired_at(&self, now: Millis) -> bool {
        now > self.expires_at
    }

    /// Milliseconds left before expiry, zero once expired
    pub fn time_remaining_ms(&self, now: Millis) -> Millis {
        self.expires_at.saturating_sub(now).max(0)
    }

    /// Serializes the snapshot to pretty-printed JSON.
    pub fn to_json(&self) -> SnapshotResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| SnapshotError::Encode(e.to_string()))
    }

    /// Deserializes a snapshot from JSON.
    ///
    /// Decoding says nothing about validity; run the verifier on the result.
    pub fn from_json(json: &str) -> SnapshotResult<Self> {
        serde_json::from_str(json).map_err(|e| SnapshotError::Decode(e.to_string()))
    }

    /// Writes the snapshot to `path` and fsyncs it.
    pub fn write_to_file(&self, path: &Path) -> SnapshotResult<()> {
        let json = self.to_json()?;

        let mut file =
            File::create(path).map_err(|e| SnapshotError::io_error_at_path(path, e))?;
        file.write_all(json.as_bytes())
            .map_err(|e| SnapshotError::io_error_at_path(path, e))?;
        file.sync_all()
            .map_err(|e| SnapshotError::io_error_at_path(path, e))?;

        Ok(())
    }

    /// Reads a snapshot from `path`.
    pub fn read_from_file(path: &Path) -> SnapshotResult<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| SnapshotError::io_error_at_path(path, e))?;
        Self::from_json(&content)
    }
}
