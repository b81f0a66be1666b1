//! FILENAME: report-engine/src/datasource.rs
//! The narrow data-access interface the core consumes.
//!
//! Implemented by the external backend collaborator. Collections arrive as
//! validated, authorized snapshots; a fetch failure is recovered locally by
//! showing an empty state, it never crashes a view.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use engine::entities::{Accessory, Employee, InventoryItem, LeaveRequest, Loan};
use engine::record::EntityCollection;
use layout_engine::geometry::{Orientation, PageSizeId};

use crate::definition::{DashboardConfig, DashboardKind, ReportDefinition};
use crate::filter::FilterSet;
use crate::view::ReportData;

// ============================================================================
// ERRORS
// ============================================================================

/// Backend collaborator failure while loading collections, settings or
/// definitions. Logged and mapped to an empty/placeholder state.
#[derive(Error, Debug)]
pub enum DataFetchError {
    #[error("backend request failed: {0}")]
    Backend(String),

    #[error("malformed payload: {0}")]
    Decode(String),

    #[error("unknown report: {0}")]
    UnknownReport(String),
}

// ============================================================================
// SETTINGS
// ============================================================================

/// PDF export settings as configured in the settings screen. Seeds the
/// export dialog's initial page geometry and carries the chrome text;
/// payload fields with no export consumer are ignored at decode time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfSettings {
    #[serde(default)]
    pub header_text: String,
    #[serde(default)]
    pub footer_text: String,
    pub orientation: Orientation,
    pub size: PageSizeId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSettings {
    pub pdf: PdfSettings,
}

// ============================================================================
// REPORT CATALOG
// ============================================================================

/// One category of the report picker, in backend order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportCategory {
    pub category: String,
    pub reports: Vec<ReportDefinition>,
}

// ============================================================================
// DATA SOURCE
// ============================================================================

/// The fetch interface. All calls are suspension points from the view's
/// perspective; between them the engines run synchronously.
pub trait DataSource {
    fn fetch_employees(&self) -> Result<EntityCollection<Employee>, DataFetchError>;
    fn fetch_loans(&self) -> Result<EntityCollection<Loan>, DataFetchError>;
    fn fetch_inventory_items(&self) -> Result<EntityCollection<InventoryItem>, DataFetchError>;
    fn fetch_accessories(&self) -> Result<EntityCollection<Accessory>, DataFetchError>;
    fn fetch_leave_requests(&self) -> Result<EntityCollection<LeaveRequest>, DataFetchError>;

    fn fetch_dashboard_config(&self, kind: DashboardKind)
        -> Result<DashboardConfig, DataFetchError>;
    fn fetch_report_definitions(&self) -> Result<Vec<ReportCategory>, DataFetchError>;
    fn fetch_report_settings(&self) -> Result<ReportSettings, DataFetchError>;

    /// Produces fresh report data for the given definition and filters.
    fn generate_report(
        &self,
        report_id: &str,
        filters: &FilterSet,
    ) -> Result<ReportData, DataFetchError>;
}
