//! Snapshot verification
//!
//! Checks run in a fixed order:
//! 1. Expiry. An expired snapshot is reported as expired without looking at
//!    its signature, so expired-and-tampered reads as expired.
//! 2. Signature, recomputed over the embedded resolution and `created_at`.
//!
//! Verification never fails; it always returns a verdict.

use serde::{Deserialize, Serialize};

use crate::clock::{Clock, Millis, SystemClock};
use crate::observability::{log_event, Event};

use super::artifact::Snapshot;
use super::signature::SignedFields;

/// Message for snapshots past `expires_at`
pub const EXPIRED_MESSAGE: &str = "Snapshot has expired";

/// Message for snapshots whose signature does not match their content
pub const TAMPERED_MESSAGE: &str =
    "Snapshot signature verification failed - data may have been tampered";

/// Outcome of verifying a snapshot.
///
/// Exactly one of `valid`, `expired`, `tampered` is true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub valid: bool,
    pub expired: bool,
    pub tampered: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl VerificationResult {
    pub fn verified() -> Self {
        Self {
            valid: true,
            expired: false,
            tampered: false,
            error: None,
        }
    }

    pub fn expired() -> Self {
        Self {
            valid: false,
            expired: true,
            tampered: false,
            error: Some(EXPIRED_MESSAGE.to_string()),
        }
    }

    pub fn tampered() -> Self {
        Self {
            valid: false,
            expired: false,
            tampered: true,
            error: Some(TAMPERED_MESSAGE.to_string()),
        }
    }
}

/// Verifies snapshots against a clock
#[derive(Debug, Clone, Default)]
pub struct SnapshotVerifier<C = SystemClock> {
    clock: C,
}

impl SnapshotVerifier<SystemClock> {
    pub fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C: Clock> SnapshotVerifier<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    /// Checks expiry, then signature.
    pub fn verify(&self, snapshot: &Snapshot) -> VerificationResult {
        verify_at(snapshot, self.clock.now_millis())
    }
}

/// Verifies `snapshot` as of `now`: expiry first, then signature.
pub fn verify_at(snapshot: &Snapshot, now: Millis) -> VerificationResult {
    if snapshot.is_expired_at(now) {
        log_event(
            Event::SnapshotExpired,
            &[
                ("expires_at", snapshot.expires_at.to_string().as_str()),
                ("now", now.to_string().as_str()),
                ("snapshot_id", snapshot.id.as_str()),
            ],
        );
        return VerificationResult::expired();
    }

    let expected = SignedFields::of(&snapshot.resolved, snapshot.created_at).signature();
    if snapshot.signature != expected {
        log_event(
            Event::SnapshotTampered,
            &[
                ("snapshot_id", snapshot.id.as_str()),
                ("stored_signature", snapshot.signature.as_str()),
            ],
        );
        return VerificationResult::tampered();
    }

    log_event(Event::SnapshotVerified, &[("snapshot_id", snapshot.id.as_str())]);
    VerificationResult::verified()
}
