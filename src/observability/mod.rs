//! Observability for dashgate
//!
//! Structured JSON log lines for every resolution, snapshot and isolation
//! decision. Logging is synchronous, read-only with respect to the data it
//! describes, and never changes the outcome of the operation being logged.
//!
//! ```ignore
//! use dashgate::observability::{log_event, Event};
//!
//! log_event(Event::SnapshotGenerated, &[("dashboard_id", "partner-dashboard")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

pub(crate) use logger::escape_json_string;

/// Log a lifecycle event at its own severity
pub fn log_event(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
