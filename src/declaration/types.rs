//! Declaration value records
//!
//! Declarations are authored offline and never mutated by dashgate. All
//! sections share one shape, so they are plain records, not a trait
//! hierarchy. Field names serialize in camelCase to match the catalog files.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::{CatalogError, CatalogResult};

/// Organizational level a dashboard is authored for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardScope {
    /// Partner-level dashboard
    Partner,
    /// Platform operator dashboard
    Superadmin,
    /// Single-tenant dashboard
    Tenant,
}

impl DashboardScope {
    /// Returns the wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            DashboardScope::Partner => "partner",
            DashboardScope::Superadmin => "superadmin",
            DashboardScope::Tenant => "tenant",
        }
    }
}

impl fmt::Display for DashboardScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requirements a context must fully satisfy for a section to be visible.
///
/// There is no boolean composition: every listed identifier must be granted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatingRequirements {
    /// Required permission identifiers (expected non-empty)
    pub permissions: Vec<String>,

    /// Required entitlement identifiers
    #[serde(default)]
    pub entitlements: Vec<String>,

    /// Required feature-flag identifiers
    #[serde(default)]
    pub feature_flags: Vec<String>,
}

impl GatingRequirements {
    /// Requirements consisting of permissions only
    pub fn permissions<I, S>(permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            permissions: permissions.into_iter().map(Into::into).collect(),
            entitlements: Vec::new(),
            feature_flags: Vec::new(),
        }
    }

    /// Sets required entitlements, replacing any already set
    pub fn with_entitlements<I, S>(mut self, entitlements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entitlements = entitlements.into_iter().map(Into::into).collect();
        self
    }

    /// Sets required feature flags, replacing any already set
    pub fn with_feature_flags<I, S>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.feature_flags = flags.into_iter().map(Into::into).collect();
        self
    }
}

/// One gated section of a dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Display order as authored. Resolution keeps declaration order and
    /// never sorts by this field.
    pub order: i32,
    pub gating: GatingRequirements,
}

/// Authoring metadata carried alongside a declaration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclarationMetadata {
    /// RFC3339 authoring timestamp
    pub created_at: String,
    pub author: String,
    pub description: String,
}

/// A versioned dashboard declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Declaration {
    pub id: String,
    pub name: String,
    pub version: String,
    pub scope: DashboardScope,
    pub sections: Vec<Section>,
    #[serde(default)]
    pub metadata: DeclarationMetadata,
}

impl Declaration {
    /// Checks the structural rules every catalog entry must satisfy:
    /// - id and version are non-empty
    /// - at least one section
    /// - section ids are non-empty and unique
    /// - every section requires at least one permission
    pub fn validate(&self) -> CatalogResult<()> {
        let invalid = |reason: String| CatalogError::InvalidDeclaration {
            id: self.id.clone(),
            reason,
        };

        if self.id.trim().is_empty() {
            return Err(invalid("declaration id is empty".to_string()));
        }
        if self.version.trim().is_empty() {
            return Err(invalid("declaration version is empty".to_string()));
        }
        if self.sections.is_empty() {
            return Err(invalid("declaration has no sections".to_string()));
        }

        let mut seen = HashSet::with_capacity(self.sections.len());
        for section in &self.sections {
            if section.id.trim().is_empty() {
                return Err(invalid("section id is empty".to_string()));
            }
            if !seen.insert(section.id.as_str()) {
                return Err(invalid(format!("duplicate section id '{}'", section.id)));
            }
            if section.gating.permissions.is_empty() {
                return Err(invalid(format!(
                    "section '{}' requires no permissions",
                    section.id
                )));
            }
        }

        Ok(())
    }

    /// Looks up a section by id
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }
}
