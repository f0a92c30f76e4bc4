//! Gating evaluation
//!
//! For each category (permissions, entitlements, feature flags) the
//! required identifiers are split into `matched` and `missing` by membership
//! in the context's grants. Output keeps the order of the requirement list,
//! so results are reproducible and diffable.
//!
//! Categories never interact and there is no partial credit: one missing
//! identifier anywhere hides the section.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::declaration::GatingRequirements;

use super::context::ResolutionContext;

/// Matched / missing split for all three categories.
///
/// For every category `matched ∪ missing == required` and the two are
/// disjoint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatingResult {
    pub permissions_matched: Vec<String>,
    pub permissions_missing: Vec<String>,
    pub entitlements_matched: Vec<String>,
    pub entitlements_missing: Vec<String>,
    pub feature_flags_matched: Vec<String>,
    pub feature_flags_missing: Vec<String>,
}

impl GatingResult {
    /// True when nothing is missing in any category
    pub fn is_satisfied(&self) -> bool {
        self.permissions_missing.is_empty()
            && self.entitlements_missing.is_empty()
            && self.feature_flags_missing.is_empty()
    }

    /// Total missing identifiers across categories
    pub fn missing_count(&self) -> usize {
        self.permissions_missing.len()
            + self.entitlements_missing.len()
            + self.feature_flags_missing.len()
    }
}

/// Stateless gating evaluator
pub struct GatingEvaluator;

impl GatingEvaluator {
    /// Splits every requirement category against the context's grants.
    pub fn evaluate(requirements: &GatingRequirements, context: &ResolutionContext) -> GatingResult {
        let (permissions_matched, permissions_missing) =
            split(&requirements.permissions, &context.permissions);
        let (entitlements_matched, entitlements_missing) =
            split(&requirements.entitlements, &context.entitlements);
        let (feature_flags_matched, feature_flags_missing) =
            split(&requirements.feature_flags, &context.feature_flags);

        GatingResult {
            permissions_matched,
            permissions_missing,
            entitlements_matched,
            entitlements_missing,
            feature_flags_matched,
            feature_flags_missing,
        }
    }
}

/// Stable filter of `required` into (granted, not granted)
fn split(required: &[String], granted: &BTreeSet<String>) -> (Vec<String>, Vec<String>) {
    required.iter().cloned().partition(|id| granted.contains(id))
}
