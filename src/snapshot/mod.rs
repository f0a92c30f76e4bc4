//! Snapshot subsystem for dashgate
//!
//! A snapshot freezes a [`ResolvedDashboard`] so it can be stored or shipped
//! and evaluated later without re-running gating.
//!
//! # Pipeline
//!
//! ```text
//! ResolvedDashboard ─▶ SnapshotGenerator ─▶ Snapshot ─▶ [storage / transport]
//!                                                          │
//!                    EvaluationResult ◀─ OfflineEvaluator ◀┘ (SnapshotVerifier)
//! ```
//!
//! # Integrity
//!
//! The signature is a CRC32 checksum over a canonical encoding. It detects
//! corruption and naive edits. It is forgeable by anyone holding this crate,
//! so snapshots must only cross trusted boundaries; a keyed MAC is required
//! before they cross untrusted ones.
//!
//! `expires_at` and the snapshot id are not covered by the signature.

mod artifact;
mod errors;
mod generator;
mod offline;
mod signature;
mod verifier;

pub use artifact::Snapshot;
pub use errors::{SnapshotError, SnapshotResult};
pub use generator::{SnapshotGenerator, DEFAULT_EXPIRATION_MS};
pub use offline::{EvaluationResult, OfflineEvaluator};
pub use signature::{compute_checksum, format_signature, parse_signature, SignedFields, SIGNATURE_PREFIX};
pub use verifier::{verify_at, SnapshotVerifier, VerificationResult, EXPIRED_MESSAGE, TAMPERED_MESSAGE};

use crate::resolution::ResolvedDashboard;

/// Snapshot of `resolved` on the system clock, valid for `expiration_ms`
/// (default one hour).
pub fn generate_dashboard_snapshot(resolved: &ResolvedDashboard, expiration_ms: Option<u64>) -> Snapshot {
    SnapshotGenerator::new()
        .generate_with_expiration(resolved, expiration_ms.unwrap_or(DEFAULT_EXPIRATION_MS))
}

/// Verifies `snapshot` against the system clock. Never fails.
pub fn verify_dashboard_snapshot(snapshot: &Snapshot) -> VerificationResult {
    SnapshotVerifier::new().verify(snapshot)
}

/// Verifies and partitions `snapshot` against the system clock.
pub fn evaluate_from_snapshot(snapshot: &Snapshot) -> SnapshotResult<EvaluationResult> {
    OfflineEvaluator::new().evaluate(snapshot)
}
