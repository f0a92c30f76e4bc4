//! Observable events for dashgate
//!
//! Events are explicit and typed. Each one carries the severity it is
//! logged at, so call sites never pick a level ad hoc.

use std::fmt;

use super::logger::Severity;

/// Observable events in dashgate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration loaded
    ConfigLoaded,
    /// Declaration catalog loaded
    CatalogLoaded,

    // Resolution
    /// A declaration was resolved against a context
    DashboardResolved,
    /// Resolution refused because the context was invalid
    ResolutionRejected,

    // Snapshot
    /// Snapshot generated and signed
    SnapshotGenerated,
    /// Snapshot passed expiry and signature checks
    SnapshotVerified,
    /// Snapshot rejected because its window has passed
    SnapshotExpired,
    /// Snapshot rejected because its signature does not match
    SnapshotTampered,

    // Offline evaluation
    /// Visibility partitions rebuilt from a verified snapshot
    OfflineEvaluated,
    /// Offline evaluation refused an invalid snapshot
    OfflineEvaluationRejected,

    // Isolation
    /// Two contexts crossed a partner or tenant boundary
    IsolationViolation,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::CatalogLoaded => "CATALOG_LOADED",
            Event::DashboardResolved => "DASHBOARD_RESOLVED",
            Event::ResolutionRejected => "RESOLUTION_REJECTED",
            Event::SnapshotGenerated => "SNAPSHOT_GENERATED",
            Event::SnapshotVerified => "SNAPSHOT_VERIFIED",
            Event::SnapshotExpired => "SNAPSHOT_EXPIRED",
            Event::SnapshotTampered => "SNAPSHOT_TAMPERED",
            Event::OfflineEvaluated => "OFFLINE_EVALUATED",
            Event::OfflineEvaluationRejected => "OFFLINE_EVALUATION_REJECTED",
            Event::IsolationViolation => "ISOLATION_VIOLATION",
        }
    }

    /// Severity this event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::DashboardResolved => Severity::Trace,
            Event::ConfigLoaded
            | Event::CatalogLoaded
            | Event::SnapshotGenerated
            | Event::SnapshotVerified
            | Event::OfflineEvaluated => Severity::Info,
            Event::ResolutionRejected
            | Event::SnapshotExpired
            | Event::SnapshotTampered
            | Event::OfflineEvaluationRejected => Severity::Warn,
            Event::IsolationViolation => Severity::Error,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
