//! Snapshot Integrity Tests
//!
//! Tests for snapshot invariants:
//! - Fresh snapshots verify
//! - Any change to signed content is detected
//! - Expiry is reported before tampering
//! - Snapshots survive file transport

use std::sync::Arc;

use dashgate::clock::{FixedClock, ManualClock};
use dashgate::declaration::partner_dashboard;
use dashgate::resolution::{DashboardResolver, ResolutionContext, ResolvedDashboard};
use dashgate::snapshot::{
    Snapshot, SnapshotGenerator, SnapshotVerifier, VerificationResult, EXPIRED_MESSAGE,
    TAMPERED_MESSAGE,
};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

const NOW: i64 = 1_767_225_600_000;
const HOUR: u64 = 3_600_000;

fn resolved() -> ResolvedDashboard {
    let ctx = ResolutionContext::new("partner-1")
        .with_tenant("tenant-1")
        .with_permissions(["partner:overview:read", "tenants:read", "ai:read"])
        .with_feature_flags(["ai-features-enabled"])
        .at(NOW);
    DashboardResolver::with_clock(FixedClock::new(NOW))
        .resolve(&partner_dashboard(), &ctx)
        .unwrap()
}

fn snapshot_at(now: i64) -> Snapshot {
    SnapshotGenerator::with_clock(FixedClock::new(now)).generate(&resolved())
}

fn verify_at(snapshot: &Snapshot, now: i64) -> VerificationResult {
    SnapshotVerifier::with_clock(FixedClock::new(now)).verify(snapshot)
}

// =============================================================================
// Round Trip Tests
// =============================================================================

/// Freshly generated snapshot verifies.
#[test]
fn test_fresh_snapshot_valid() {
    let snapshot = snapshot_at(NOW);

    assert_eq!(snapshot.created_at, NOW);
    assert_eq!(snapshot.expires_at, NOW + HOUR as i64);
    assert_eq!(verify_at(&snapshot, NOW), VerificationResult::verified());
}

/// Snapshot written to disk and read back still verifies.
#[test]
fn test_file_transport_preserves_validity() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("snapshot.json");
    let snapshot = snapshot_at(NOW);

    snapshot.write_to_file(&path).unwrap();
    let loaded = Snapshot::read_from_file(&path).unwrap();

    assert_eq!(loaded, snapshot);
    assert!(verify_at(&loaded, NOW + 1).valid);
}

/// Two snapshots of the same resolution at the same instant share a signature but not an id.
#[test]
fn test_same_instant_same_signature() {
    let a = snapshot_at(NOW);
    let b = snapshot_at(NOW);

    assert_eq!(a.signature, b.signature);
    assert_ne!(a.id, b.id);
}

// =============================================================================
// Tamper Tests
// =============================================================================

/// Flipping one section's visibility is detected.
#[test]
fn test_visibility_flip_detected() {
    let mut snapshot = snapshot_at(NOW);
    let hidden = snapshot.resolved.sections.iter_mut().find(|s| !s.visible).unwrap();
    hidden.visible = true;

    let result = verify_at(&snapshot, NOW);
    assert!(!result.valid);
    assert!(result.tampered);
    assert!(!result.expired);
    assert_eq!(result.error.as_deref(), Some(TAMPERED_MESSAGE));
}

/// Adding a permission to the frozen context is detected.
#[test]
fn test_context_edit_detected() {
    let mut snapshot = snapshot_at(NOW);
    snapshot.resolved.context.permissions.insert("audit:read".to_string());

    assert!(verify_at(&snapshot, NOW).tampered);
}

/// Editing created_at is detected.
#[test]
fn test_created_at_edit_detected() {
    let mut snapshot = snapshot_at(NOW);
    snapshot.created_at += 1;

    assert!(verify_at(&snapshot, NOW).tampered);
}

/// A rewritten signature is detected.
#[test]
fn test_signature_edit_detected() {
    let mut snapshot = snapshot_at(NOW);
    snapshot.signature = "sig_00000000".to_string();

    assert!(verify_at(&snapshot, NOW).tampered);
}

// =============================================================================
// Expiry Tests
// =============================================================================

/// Snapshot is valid at expires_at and expired one millisecond later.
#[test]
fn test_expiry_boundary() {
    let snapshot = snapshot_at(NOW);

    assert!(verify_at(&snapshot, snapshot.expires_at).valid);

    let result = verify_at(&snapshot, snapshot.expires_at + 1);
    assert_eq!(result, VerificationResult::expired());
    assert_eq!(result.error.as_deref(), Some(EXPIRED_MESSAGE));
}

/// An expired and tampered snapshot reports only expiry.
#[test]
fn test_expiry_takes_precedence() {
    let mut snapshot = snapshot_at(NOW);
    snapshot.resolved.sections[0].visible = !snapshot.resolved.sections[0].visible;

    let result = verify_at(&snapshot, snapshot.expires_at + 1);
    assert!(result.expired);
    assert!(!result.tampered);
}

/// Validity tracks a shared clock as it advances.
#[test]
fn test_manual_clock_expiry() {
    let clock = Arc::new(ManualClock::new(NOW));
    let generator = SnapshotGenerator::with_clock(Arc::clone(&clock)).with_expiration_ms(1_000);
    let verifier = SnapshotVerifier::with_clock(Arc::clone(&clock));

    let snapshot = generator.generate(&resolved());
    assert!(verifier.verify(&snapshot).valid);

    clock.advance(1_000);
    assert!(verifier.verify(&snapshot).valid);

    clock.advance(1);
    assert!(verifier.verify(&snapshot).expired);
}

/// Zero expiration still yields a window of at least one millisecond.
#[test]
fn test_zero_expiration_clamped() {
    let snapshot = SnapshotGenerator::with_clock(FixedClock::new(NOW))
        .generate_with_expiration(&resolved(), 0);

    assert!(snapshot.expires_at > snapshot.created_at);
}
