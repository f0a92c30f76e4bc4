//! Online resolution
//!
//! Turns a [`Declaration`](crate::declaration::Declaration) plus a
//! [`ResolutionContext`] into a [`ResolvedDashboard`] with a visibility
//! decision per section, and guards against mixing contexts across partner
//! or tenant boundaries.
//!
//! ## Guarantees
//! - Section order is the declaration's order, never re-sorted
//! - `visible` iff no permission, entitlement or flag is missing
//! - Identical inputs and clock produce identical sections
//! - Inputs are never mutated

mod context;
mod errors;
mod gating;
mod isolation;
mod resolver;

pub use context::ResolutionContext;
pub use errors::{IsolationError, IsolationResult, ResolutionError, ResolutionResult};
pub use gating::{GatingEvaluator, GatingResult};
pub use isolation::validate_tenant_isolation;
pub use resolver::{DashboardResolver, ResolvedDashboard, ResolvedSection};

use crate::declaration::Declaration;

/// Resolves `declaration` against `context` using the system clock.
pub fn resolve_dashboard(
    declaration: &Declaration,
    context: &ResolutionContext,
) -> ResolutionResult<ResolvedDashboard> {
    DashboardResolver::new().resolve(declaration, context)
}
