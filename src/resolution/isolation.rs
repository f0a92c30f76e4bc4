//! Tenant isolation guard
//!
//! Asserts that two contexts live inside the same partner and, when both are
//! tenant-scoped, the same tenant. A partner-level context (no tenant) only
//! has to share the partner.

use crate::observability::{log_event, Event};

use super::context::ResolutionContext;
use super::errors::{IsolationError, IsolationResult};

/// Checks that `left` and `right` may be used together.
///
/// # Errors
///
/// - `IsolationError::CrossPartner` if the partner ids differ
/// - `IsolationError::CrossTenant` if both carry a tenant id and they differ
pub fn validate_tenant_isolation(
    left: &ResolutionContext,
    right: &ResolutionContext,
) -> IsolationResult<()> {
    if left.partner_id != right.partner_id {
        log_event(
            Event::IsolationViolation,
            &[
                ("boundary", "partner"),
                ("left", left.partner_id.as_str()),
                ("right", right.partner_id.as_str()),
            ],
        );
        return Err(IsolationError::CrossPartner {
            left: left.partner_id.clone(),
            right: right.partner_id.clone(),
        });
    }

    if let (Some(l), Some(r)) = (left.tenant(), right.tenant()) {
        if l != r {
            log_event(
                Event::IsolationViolation,
                &[
                    ("boundary", "tenant"),
                    ("left", l),
                    ("partner_id", left.partner_id.as_str()),
                    ("right", r),
                ],
            );
            return Err(IsolationError::CrossTenant {
                left: l.to_string(),
                right: r.to_string(),
            });
        }
    }

    Ok(())
}
