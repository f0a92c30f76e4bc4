//! dashgate - dashboard section gating with offline snapshots
//!
//! Resolves declarative dashboards against a caller's permissions,
//! entitlements and feature flags, freezes the result into a checksummed
//! snapshot, and evaluates that snapshot later without re-running gating.
//!
//! Modules:
//! - `declaration`: dashboard declarations and the catalog
//! - `resolution`: online gating, resolution and tenant isolation
//! - `snapshot`: generation, verification and offline evaluation
//! - `config`: file-based configuration
//! - `observability`: structured JSON logging
//! - `clock`: injectable time source
//! - `cli`: command-line interface

pub mod cli;
pub mod clock;
pub mod config;
pub mod declaration;
pub mod observability;
pub mod resolution;
pub mod snapshot;

pub use resolution::{resolve_dashboard, validate_tenant_isolation};
pub use snapshot::{evaluate_from_snapshot, generate_dashboard_snapshot, verify_dashboard_snapshot};
