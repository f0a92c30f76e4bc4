//! Snapshot signature
//!
//! CRC32 (IEEE, via crc32fast) over a canonical encoding of the signed
//! fields, rendered as `sig_XXXXXXXX` (lowercase hex, zero-padded).
//!
//! This is an integrity checksum, not a MAC. There is no secret: anyone who
//! can run this function can produce a valid signature for any content. It
//! catches accidental corruption and naive edits only.
//!
//! # Canonical encoding
//!
//! Compact JSON with a fixed key order, built by hand so it cannot fail and
//! does not depend on serializer settings:
//!
//! ```text
//! {"dashboardId":S,"version":S,
//!  "sections":[{"id":S,"name":S,"description":S,"order":N,"visible":B,
//!    "gatingResult":{"permissionsMatched":[S..],"permissionsMissing":[S..],
//!      "entitlementsMatched":[S..],"entitlementsMissing":[S..],
//!      "featureFlagsMatched":[S..],"featureFlagsMissing":[S..]}}..],
//!  "context":{"partnerId":S,"tenantId":S|null,"permissions":[S..],
//!    "entitlements":[S..],"featureFlags":[S..],"timestamp":N},
//!  "createdAt":N}
//! ```
//!
//! Context grant arrays are sorted (they are sets); every other array keeps
//! its stored order. No whitespace is emitted.

use crc32fast::Hasher;

use crate::clock::Millis;
use crate::observability::escape_json_string;
use crate::resolution::{GatingResult, ResolutionContext, ResolvedDashboard, ResolvedSection};

/// Prefix of every signature token
pub const SIGNATURE_PREFIX: &str = "sig_";

/// Exactly the fields a snapshot signature covers, in signing order
#[derive(Debug, Clone, Copy)]
pub struct SignedFields<'a> {
    pub dashboard_id: &'a str,
    pub version: &'a str,
    pub sections: &'a [ResolvedSection],
    pub context: &'a ResolutionContext,
    pub created_at: Millis,
}

impl<'a> SignedFields<'a> {
    /// Signed fields of `resolved` stamped at `created_at`
    pub fn of(resolved: &'a ResolvedDashboard, created_at: Millis) -> Self {
        Self {
            dashboard_id: &resolved.id,
            version: &resolved.version,
            sections: &resolved.sections,
            context: &resolved.context,
            created_at,
        }
    }

    /// Canonical byte encoding (UTF-8 JSON, see module docs)
    pub fn canonical_encoding(&self) -> String {
        let mut out = String::with_capacity(256 + self.sections.len() * 256);

        out.push('{');
        push_key(&mut out, "dashboardId", true);
        push_string(&mut out, self.dashboard_id);
        push_key(&mut out, "version", false);
        push_string(&mut out, self.version);

        push_key(&mut out, "sections", false);
        out.push('[');
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            push_section(&mut out, section);
        }
        out.push(']');

        push_key(&mut out, "context", false);
        push_context(&mut out, self.context);

        push_key(&mut out, "createdAt", false);
        out.push_str(&self.created_at.to_string());
        out.push('}');

        out
    }

    /// Signature token over the canonical encoding
    pub fn signature(&self) -> String {
        format_signature(compute_checksum(self.canonical_encoding().as_bytes()))
    }
}

/// CRC32 of `data`
pub fn compute_checksum(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// Formats a checksum as `sig_XXXXXXXX`
pub fn format_signature(checksum: u32) -> String {
    format!("{}{:08x}", SIGNATURE_PREFIX, checksum)
}

/// Parses a `sig_XXXXXXXX` token back to its checksum.
///
/// Returns `None` unless the token is the prefix followed by exactly eight
/// lowercase hex digits.
pub fn parse_signature(token: &str) -> Option<u32> {
    let hex = token.strip_prefix(SIGNATURE_PREFIX)?;
    if hex.len() != 8 || !hex.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')) {
        return None;
    }
    u32::from_str_radix(hex, 16).ok()
}

fn push_key(out: &mut String, key: &str, first: bool) {
    if !first {
        out.push(',');
    }
    push_string(out, key);
    out.push(':');
}

fn push_string(out: &mut String, value: &str) {
    out.push('"');
    escape_json_string(out, value);
    out.push('"');
}

fn push_array<'s, I>(out: &mut String, values: I)
where
    I: IntoIterator<Item = &'s String>,
{
    out.push('[');
    for (i, value) in values.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_string(out, value);
    }
    out.push(']');
}

fn push_section(out: &mut String, section: &ResolvedSection) {
    out.push('{');
    push_key(out, "id", true);
    push_string(out, &section.id);
    push_key(out, "name", false);
    push_string(out, &section.name);
    push_key(out, "description", false);
    push_string(out, &section.description);
    push_key(out, "order", false);
    out.push_str(&section.order.to_string());
    push_key(out, "visible", false);
    out.push_str(if section.visible { "true" } else { "false" });
    push_key(out, "gatingResult", false);
    push_gating(out, &section.gating_result);
    out.push('}');
}

fn push_gating(out: &mut String, gating: &GatingResult) {
    out.push('{');
    push_key(out, "permissionsMatched", true);
    push_array(out, &gating.permissions_matched);
    push_key(out, "permissionsMissing", false);
    push_array(out, &gating.permissions_missing);
    push_key(out, "entitlementsMatched", false);
    push_array(out, &gating.entitlements_matched);
    push_key(out, "entitlementsMissing", false);
    push_array(out, &gating.entitlements_missing);
    push_key(out, "featureFlagsMatched", false);
    push_array(out, &gating.feature_flags_matched);
    push_key(out, "featureFlagsMissing", false);
    push_array(out, &gating.feature_flags_missing);
    out.push('}');
}

fn push_context(out: &mut String, context: &ResolutionContext) {
    out.push('{');
    push_key(out, "partnerId", true);
    push_string(out, &context.partner_id);
    push_key(out, "tenantId", false);
    match &context.tenant_id {
        Some(tenant) => push_string(out, tenant),
        None => out.push_str("null"),
    }
    push_key(out, "permissions", false);
    push_array(out, &context.permissions);
    push_key(out, "entitlements", false);
    push_array(out, &context.entitlements);
    push_key(out, "featureFlags", false);
    push_array(out, &context.feature_flags);
    push_key(out, "timestamp", false);
    out.push_str(&context.timestamp.to_string());
    out.push('}');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::declaration::partner_dashboard;
    use crate::resolution::DashboardResolver;

    fn resolved(ctx: &ResolutionContext) -> ResolvedDashboard {
        DashboardResolver::with_clock(FixedClock::new(10))
            .resolve(&partner_dashboard(), ctx)
            .unwrap()
    }

    fn context() -> ResolutionContext {
        ResolutionContext::new("partner-1")
            .with_permissions(["partner:overview:read", "tenants:read"])
            .at(5)
    }

    #[test]
    fn test_encoding_is_valid_json_in_fixed_order() {
        let dashboard = resolved(&context());
        let encoding = SignedFields::of(&dashboard, 99).canonical_encoding();

        let parsed: serde_json::Value = serde_json::from_str(&encoding).unwrap();
        assert_eq!(parsed["dashboardId"], "partner-dashboard");
        assert_eq!(parsed["createdAt"], 99);
        assert_eq!(parsed["context"]["tenantId"], serde_json::Value::Null);
        assert_eq!(parsed["sections"].as_array().unwrap().len(), 9);

        let positions: Vec<usize> = ["\"dashboardId\"", "\"version\"", "\"sections\"", "\"context\"", "\"createdAt\""]
            .iter()
            .map(|k| encoding.find(k).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(!encoding.contains('\n'));
    }

    #[test]
    fn test_signature_deterministic() {
        let dashboard = resolved(&context());
        let a = SignedFields::of(&dashboard, 1).signature();
        let b = SignedFields::of(&dashboard.clone(), 1).signature();
        assert_eq!(a, b);
    }

    #[test]
    fn test_grant_insertion_order_irrelevant() {
        let a = ResolutionContext::new("p").with_permissions(["tenants:read", "partner:overview:read"]);
        let b = ResolutionContext::new("p").with_permissions(["partner:overview:read", "tenants:read"]);
        assert_eq!(
            SignedFields::of(&resolved(&a), 1).canonical_encoding(),
            SignedFields::of(&resolved(&b), 1).canonical_encoding()
        );
    }

    #[test]
    fn test_resolved_at_is_not_signed() {
        let mut dashboard = resolved(&context());
        let before = SignedFields::of(&dashboard, 1).signature();
        dashboard.resolved_at += 1_000;
        assert_eq!(SignedFields::of(&dashboard, 1).signature(), before);
    }

    #[test]
    fn test_signature_detects_changes() {
        let dashboard = resolved(&context());
        let original = SignedFields::of(&dashboard, 1).signature();

        assert_ne!(SignedFields::of(&dashboard, 2).signature(), original);

        let mut renamed = dashboard.clone();
        renamed.sections[0].name.push_str(" TAMPERED");
        assert_ne!(SignedFields::of(&renamed, 1).signature(), original);

        let mut flipped = dashboard.clone();
        flipped.sections[3].visible = true;
        assert_ne!(SignedFields::of(&flipped, 1).signature(), original);

        let mut escalated = dashboard;
        escalated.context.permissions.insert("audit:read".to_string());
        assert_ne!(SignedFields::of(&escalated, 1).signature(), original);
    }

    #[test]
    fn test_format_signature() {
        assert_eq!(format_signature(0xDEADBEEF), "sig_deadbeef");
        assert_eq!(format_signature(0x00000001), "sig_00000001");
    }

    #[test]
    fn test_parse_signature() {
        assert_eq!(parse_signature("sig_deadbeef"), Some(0xDEADBEEF));
        assert_eq!(parse_signature("sig_DEADBEEF"), None);
        assert_eq!(parse_signature("sig_1234"), None);
        assert_eq!(parse_signature("crc32:deadbeef"), None);
        assert_eq!(parse_signature("sig_"), None);
    }

    #[test]
    fn test_signature_token_shape() {
        let sig = SignedFields::of(&resolved(&context()), 1).signature();
        assert!(parse_signature(&sig).is_some());
        assert_eq!(sig.len(), SIGNATURE_PREFIX.len() + 8);
    }
}
