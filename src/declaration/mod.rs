//! Dashboard declarations
//!
//! The authored side of dashgate: which sections a dashboard has and what
//! each one requires. Declarations are plain value records looked up in a
//! [`DeclarationCatalog`] by id and version.

mod catalog;
mod errors;
mod partner;
mod types;

pub use catalog::{compare_versions, DeclarationCatalog};
pub use errors::{CatalogError, CatalogResult};
pub use partner::{partner_dashboard, partner_sections, PARTNER_DASHBOARD_ID, PARTNER_DASHBOARD_VERSION};
pub use types::{DashboardScope, Declaration, DeclarationMetadata, GatingRequirements, Section};
