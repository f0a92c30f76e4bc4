//! Dashboard resolution
//!
//! Walks a declaration's sections in stored order, evaluates gating for each
//! against one context, and records the outcome. The only side effects are
//! one clock read and one log line.

use serde::{Deserialize, Serialize};

use crate::clock::{Clock, Millis, SystemClock};
use crate::declaration::{DashboardScope, Declaration, Section};
use crate::observability::{log_event, Event};

use super::context::ResolutionContext;
use super::errors::{ResolutionError, ResolutionResult};
use super::gating::{GatingEvaluator, GatingResult};

/// A section with its visibility decision.
///
/// `visible` is true exactly when `gating_result` has nothing missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedSection {
    pub id: String,
    pub name: String,
    pub description: String,
    pub order: i32,
    pub visible: bool,
    pub gating_result: GatingResult,
}

impl ResolvedSection {
    fn resolve(section: &Section, context: &ResolutionContext) -> Self {
        let gating_result = GatingEvaluator::evaluate(&section.gating, context);
        Self {
            id: section.id.clone(),
            name: section.name.clone(),
            description: section.description.clone(),
            order: section.order,
            visible: gating_result.is_satisfied(),
            gating_result,
        }
    }
}

/// A declaration resolved against one context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedDashboard {
    pub id: String,
    pub name: String,
    pub version: String,
    pub scope: DashboardScope,
    /// Same order as the declaration's sections
    pub sections: Vec<ResolvedSection>,
    /// The context exactly as supplied
    pub context: ResolutionContext,
    pub resolved_at: Millis,
}

impl ResolvedDashboard {
    /// Ids of visible sections, in section order
    pub fn visible_section_ids(&self) -> Vec<&str> {
        self.sections
            .iter()
            .filter(|s| s.visible)
            .map(|s| s.id.as_str())
            .collect()
    }

    /// Ids of hidden sections, in section order
    pub fn hidden_section_ids(&self) -> Vec<&str> {
        self.sections
            .iter()
            .filter(|s| !s.visible)
            .map(|s| s.id.as_str())
            .collect()
    }

    pub fn section(&self, id: &str) -> Option<&ResolvedSection> {
        self.sections.iter().find(|s| s.id == id)
    }
}

/// Resolves declarations against contexts
#[derive(Debug, Clone, Default)]
pub struct DashboardResolver<C = SystemClock> {
    clock: C,
}

impl DashboardResolver<SystemClock> {
    /// Resolver stamped by the system clock
    pub fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C: Clock> DashboardResolver<C> {
    /// Resolver stamped by `clock`
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    /// Resolves every section of `declaration` against `context`.
    ///
    /// # Errors
    ///
    /// `ResolutionError::PartnerIdRequired` if the context has an empty
    /// partner id. Checked before any section is evaluated.
    pub fn resolve(
        &self,
        declaration: &Declaration,
        context: &ResolutionContext,
    ) -> ResolutionResult<ResolvedDashboard> {
        if context.partner().is_none() {
            log_event(
                Event::ResolutionRejected,
                &[
                    ("dashboard_id", declaration.id.as_str()),
                    ("reason", "partner id required"),
                ],
            );
            return Err(ResolutionError::PartnerIdRequired);
        }

        let sections: Vec<ResolvedSection> = declaration
            .sections
            .iter()
            .map(|section| ResolvedSection::resolve(section, context))
            .collect();

        let resolved = ResolvedDashboard {
            id: declaration.id.clone(),
            name: declaration.name.clone(),
            version: declaration.version.clone(),
            scope: declaration.scope,
            sections,
            context: context.clone(),
            resolved_at: self.clock.now_millis(),
        };

        let visible = resolved.sections.iter().filter(|s| s.visible).count();
        let hidden = resolved.sections.len() - visible;
        log_event(
            Event::DashboardResolved,
            &[
                ("dashboard_id", resolved.id.as_str()),
                ("version", resolved.version.as_str()),
                ("partner_id", resolved.context.partner_id.as_str()),
                ("visible", visible.to_string().as_str()),
                ("hidden", hidden.to_string().as_str()),
            ],
        );

        Ok(resolved)
    }
}
