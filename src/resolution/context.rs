//! Resolution context carried with each request
//!
//! Built by the caller's authorization layer; dashgate only reads it. Grants
//! are set-backed, so membership tests are logarithmic and iteration order is
//! sorted regardless of how the context was assembled.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::clock::Millis;

/// Caller scope and grants a dashboard is resolved against
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionContext {
    /// Owning partner (required, non-empty)
    pub partner_id: String,

    /// Tenant within the partner; `None` for partner-level contexts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,

    /// Granted permission identifiers
    #[serde(default)]
    pub permissions: BTreeSet<String>,

    /// Granted entitlement identifiers
    #[serde(default)]
    pub entitlements: BTreeSet<String>,

    /// Enabled feature-flag identifiers
    #[serde(default)]
    pub feature_flags: BTreeSet<String>,

    /// When the grants were read, epoch milliseconds
    #[serde(default)]
    pub timestamp: Millis,
}

impl ResolutionContext {
    /// Partner-level context with no grants
    pub fn new(partner_id: impl Into<String>) -> Self {
        Self {
            partner_id: partner_id.into(),
            ..Default::default()
        }
    }

    /// Scope the context to a tenant
    pub fn with_tenant(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant_id.into());
        self
    }

    /// Grant permissions
    pub fn with_permissions<I, S>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permissions.extend(permissions.into_iter().map(Into::into));
        self
    }

    /// Grant entitlements
    pub fn with_entitlements<I, S>(mut self, entitlements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entitlements.extend(entitlements.into_iter().map(Into::into));
        self
    }

    /// Enable feature flags
    pub fn with_feature_flags<I, S>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.feature_flags.extend(flags.into_iter().map(Into::into));
        self
    }

    /// Set the time the grants were read
    pub fn at(mut self, timestamp: Millis) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Partner id, or `None` if it is empty or whitespace
    pub fn partner(&self) -> Option<&str> {
        non_empty(&self.partner_id)
    }

    /// Tenant id, or `None` if absent or empty. Whitespace is a real tenant id.
    pub fn tenant(&self) -> Option<&str> {
        self.tenant_id.as_deref().filter(|t| !t.is_empty())
    }

    /// True when the context is not scoped to a tenant
    pub fn is_partner_level(&self) -> bool {
        self.tenant().is_none()
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }

    pub fn has_entitlement(&self, entitlement: &str) -> bool {
        self.entitlements.contains(entitlement)
    }

    pub fn has_feature_flag(&self, flag: &str) -> bool {
        self.feature_flags.contains(flag)
    }
}

fn non_empty(value: &str) -> Option<&str> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
