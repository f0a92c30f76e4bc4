//! Tenant Isolation Tests
//!
//! Contexts may only be combined within one partner, and within one tenant
//! when both carry a tenant id.

use dashgate::resolution::{validate_tenant_isolation, IsolationError, ResolutionContext};

/// Same partner, same tenant passes.
#[test]
fn test_same_scope_passes() {
    let a = ResolutionContext::new("p1").with_tenant("t1");
    let b = ResolutionContext::new("p1").with_tenant("t1").with_permissions(["x"]);

    assert!(validate_tenant_isolation(&a, &b).is_ok());
}

/// Partner-level context combines with any tenant of its partner.
#[test]
fn test_partner_level_passes() {
    let partner = ResolutionContext::new("p1");
    let tenant = ResolutionContext::new("p1").with_tenant("t1");

    assert!(validate_tenant_isolation(&partner, &tenant).is_ok());
    assert!(validate_tenant_isolation(&tenant, &partner).is_ok());
}

/// Empty tenant id counts as partner level.
#[test]
fn test_empty_tenant_is_partner_level() {
    let a = ResolutionContext::new("p1").with_tenant("");
    let b = ResolutionContext::new("p1").with_tenant("t2");

    assert!(validate_tenant_isolation(&a, &b).is_ok());
}

/// Different partners fail, even with matching tenants.
#[test]
fn test_cross_partner_fails() {
    let a = ResolutionContext::new("p1").with_tenant("t1");
    let b = ResolutionContext::new("p2").with_tenant("t1");

    let err = validate_tenant_isolation(&a, &b).unwrap_err();
    assert!(matches!(err, IsolationError::CrossPartner { .. }));
    assert_eq!(err.to_string(), "Cross-partner context access is not allowed");
}

/// Different tenants of one partner fail.
#[test]
fn test_cross_tenant_fails() {
    let a = ResolutionContext::new("p1").with_tenant("t1");
    let b = ResolutionContext::new("p1").with_tenant("t2");

    let err = validate_tenant_isolation(&a, &b).unwrap_err();
    assert!(matches!(err, IsolationError::CrossTenant { .. }));
    assert_eq!(err.to_string(), "Cross-tenant context access is not allowed");
    assert_eq!(err.code(), "DASH_ISOLATION_CROSS_TENANT");
}

/// The check is symmetric.
#[test]
fn test_symmetric() {
    let a = ResolutionContext::new("p1").with_tenant("t1");
    let b = ResolutionContext::new("p2");

    assert_eq!(
        validate_tenant_isolation(&a, &b).is_err(),
        validate_tenant_isolation(&b, &a).is_err()
    );
}

/// Whitespace-only tenant id is a real tenant and must match.
#[test]
fn test_whitespace_tenant_checked() {
    let a = ResolutionContext::new("p1").with_tenant("   ");
    let b = ResolutionContext::new("p1").with_tenant("t2");

    let err = validate_tenant_isolation(&a, &b).unwrap_err();
    assert!(matches!(err, IsolationError::CrossTenant { .. }));
    assert!(validate_tenant_isolation(&a, &a.clone()).is_ok());
}
