//! Built-in partner dashboard declaration
//!
//! Authored configuration only. Nine sections, each gated on a single read
//! permission, with three sections carrying an extra entitlement or flag.

use super::types::{
    DashboardScope, Declaration, DeclarationMetadata, GatingRequirements, Section,
};

/// Identifier of the built-in partner dashboard
pub const PARTNER_DASHBOARD_ID: &str = "partner-dashboard";

/// Version of the built-in partner dashboard
pub const PARTNER_DASHBOARD_VERSION: &str = "1.0.0";

fn section(id: &str, name: &str, description: &str, order: i32, gating: GatingRequirements) -> Section {
    Section {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        order,
        gating,
    }
}

/// The partner dashboard's sections, in display order
pub fn partner_sections() -> Vec<Section> {
    vec![
        section(
            "partner-overview",
            "Partner Overview",
            "Overview of partner account, metrics, and status",
            1,
            GatingRequirements::permissions(["partner:overview:read"]),
        ),
        section(
            "tenants-management",
            "Tenants Management",
            "Manage and view tenant accounts under this partner",
            2,
            GatingRequirements::permissions(["tenants:read"]),
        ),
        section(
            "pricing-plans",
            "Pricing & Plans",
            "View pricing tiers and plan configurations",
            3,
            GatingRequirements::permissions(["pricing:read"]),
        ),
        section(
            "incentives-affiliates",
            "Incentives & Affiliates",
            "Affiliate programs and incentive structures",
            4,
            GatingRequirements::permissions(["incentives:read"])
                .with_feature_flags(["incentives-enabled"]),
        ),
        section(
            "feature-flags",
            "Feature Flags",
            "View feature flag configurations",
            5,
            GatingRequirements::permissions(["feature-flags:read"]),
        ),
        section(
            "branding-whitelabel",
            "Branding / Whitelabel",
            "Branding customization and whitelabel settings",
            6,
            GatingRequirements::permissions(["branding:read"])
                .with_entitlements(["whitelabel-access"]),
        ),
        section(
            "audit-activity",
            "Audit & Activity",
            "Audit logs and activity tracking",
            7,
            GatingRequirements::permissions(["audit:read"]),
        ),
        section(
            "ai-automation",
            "AI & Automation",
            "AI features and automation configurations",
            8,
            GatingRequirements::permissions(["ai:read"])
                .with_feature_flags(["ai-features-enabled"]),
        ),
        section(
            "support-integrations",
            "Support & Integrations",
            "Support tools and third-party integrations",
            9,
            GatingRequirements::permissions(["integrations:read"]),
        ),
    ]
}

/// The partner dashboard declaration
pub fn partner_dashboard() -> Declaration {
    Declaration {
        id: PARTNER_DASHBOARD_ID.to_string(),
        name: "Partner Dashboard".to_string(),
        version: PARTNER_DASHBOARD_VERSION.to_string(),
        scope: DashboardScope::Partner,
        sections: partner_sections(),
        metadata: DeclarationMetadata {
            created_at: "2026-01-20T00:00:00.000Z".to_string(),
            author: "dashgate".to_string(),
            description: "Partner-level dashboard: account overview, tenants, commercial and operational tools"
                .to_string(),
        },
    }
}
