//! Snapshot generation

use uuid::Uuid;

use crate::clock::{Clock, Millis, SystemClock};
use crate::observability::{log_event, Event};
use crate::resolution::ResolvedDashboard;

use super::artifact::Snapshot;
use super::signature::SignedFields;

/// Default validity window: one hour
pub const DEFAULT_EXPIRATION_MS: u64 = 3_600_000;

/// Wraps resolutions into signed, expiring snapshots.
///
/// The expiration is an unsigned duration clamped to at least 1 ms, so a
/// generated snapshot always has `expires_at > created_at`. A 1 ms window
/// still verifies at its creation instant and is expired one tick later.
#[derive(Debug, Clone)]
pub struct SnapshotGenerator<C = SystemClock> {
    clock: C,
    expiration_ms: u64,
}

impl SnapshotGenerator<SystemClock> {
    /// Generator on the system clock with the default window
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for SnapshotGenerator<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> SnapshotGenerator<C> {
    /// Generator on `clock` with the default window
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            expiration_ms: DEFAULT_EXPIRATION_MS,
        }
    }

    /// Overrides the validity window used by [`generate`](Self::generate)
    pub fn with_expiration_ms(mut self, expiration_ms: u64) -> Self {
        self.expiration_ms = expiration_ms;
        self
    }

    pub fn expiration_ms(&self) -> u64 {
        self.expiration_ms
    }

    /// Snapshot with the configured window
    pub fn generate(&self, resolved: &ResolvedDashboard) -> Snapshot {
        self.generate_with_expiration(resolved, self.expiration_ms)
    }

    /// Snapshot valid for `expiration_ms` from now
    pub fn generate_with_expiration(&self, resolved: &ResolvedDashboard, expiration_ms: u64) -> Snapshot {
        let now = self.clock.now_millis();
        let signature = SignedFields::of(resolved, now).signature();
        let window = Millis::try_from(expiration_ms.max(1)).unwrap_or(Millis::MAX);

        let snapshot = Snapshot {
            id: snapshot_id(&resolved.id, now),
            dashboard_id: resolved.id.clone(),
            version: resolved.version.clone(),
            resolved: resolved.clone(),
            signature,
            created_at: now,
            expires_at: now.saturating_add(window),
        };

        log_event(
            Event::SnapshotGenerated,
            &[
                ("dashboard_id", snapshot.dashboard_id.as_str()),
                ("expires_at", snapshot.expires_at.to_string().as_str()),
                ("snapshot_id", snapshot.id.as_str()),
                ("version", snapshot.version.as_str()),
            ],
        );

        snapshot
    }
}

/// `snapshot_{dashboard}_{created_at}_{uuid}`; the UUID keeps ids distinct
/// when the same dashboard is snapshotted twice in one millisecond.
fn snapshot_id(dashboard_id: &str, created_at: Millis) -> String {
    format!(
        "snapshot_{}_{}_{}",
        dashboard_id,
        created_at,
        Uuid::new_v4().simple()
    )
}
