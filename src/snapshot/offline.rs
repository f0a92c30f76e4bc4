//! Offline evaluation
//!
//! Rebuilds visible / hidden partitions from a snapshot without re-running
//! gating. Unlike the verifier this raises: a snapshot that does not verify
//! is an `Integrity` error, and the caller should resolve online again.

use serde::{Deserialize, Serialize};

use crate::clock::{Clock, Millis, SystemClock};
use crate::observability::{log_event, Event};
use crate::resolution::ResolvedSection;

use super::artifact::Snapshot;
use super::errors::{SnapshotError, SnapshotResult};
use super::verifier::verify_at;

/// Fallback message when a failed verdict carries none
const INVALID_SNAPSHOT_MESSAGE: &str = "Invalid snapshot";

/// Sections of a verified snapshot, split by visibility
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    /// All sections in snapshot order
    pub sections: Vec<ResolvedSection>,
    /// Visible sections in snapshot order
    pub visible_sections: Vec<ResolvedSection>,
    /// Hidden sections in snapshot order
    pub hidden_sections: Vec<ResolvedSection>,
    pub evaluated_at: Millis,
}

impl EvaluationResult {
    pub fn visible_section_ids(&self) -> Vec<&str> {
        self.visible_sections.iter().map(|s| s.id.as_str()).collect()
    }

    pub fn hidden_section_ids(&self) -> Vec<&str> {
        self.hidden_sections.iter().map(|s| s.id.as_str()).collect()
    }
}

/// Evaluates snapshots offline
#[derive(Debug, Clone, Default)]
pub struct OfflineEvaluator<C = SystemClock> {
    clock: C,
}

impl OfflineEvaluator<SystemClock> {
    pub fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C: Clock> OfflineEvaluator<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    /// Verifies `snapshot` and partitions its sections.
    ///
    /// # Errors
    ///
    /// `SnapshotError::Integrity` carrying the verifier's message if the
    /// snapshot is expired or tampered.
    pub fn evaluate(&self, snapshot: &Snapshot) -> SnapshotResult<EvaluationResult> {
        let now = self.clock.now_millis();
        let verification = verify_at(snapshot, now);

        if !verification.valid {
            let message = verification
                .error
                .unwrap_or_else(|| INVALID_SNAPSHOT_MESSAGE.to_string());
            log_event(
                Event::OfflineEvaluationRejected,
                &[("reason", message.as_str()), ("snapshot_id", snapshot.id.as_str())],
            );
            return Err(SnapshotError::integrity(message));
        }

        let sections = snapshot.resolved.sections.clone();
        let (visible_sections, hidden_sections): (Vec<_>, Vec<_>) =
            sections.iter().cloned().partition(|s| s.visible);

        let result = EvaluationResult {
            sections,
            visible_sections,
            hidden_sections,
            evaluated_at: now,
        };

        log_event(
            Event::OfflineEvaluated,
            &[
                ("hidden", result.hidden_sections.len().to_string().as_str()),
                ("snapshot_id", snapshot.id.as_str()),
                ("visible", result.visible_sections.len().to_string().as_str()),
            ],
        );

        Ok(result)
    }
}
