//! FILENAME: report-engine/src/definition.rs
//! Dashboard and report definitions - the serializable configuration.
//!
//! These structures describe WHAT a dashboard or report shows. They are:
//! - Serializable (fetched from the backend as JSON)
//! - Immutable snapshots of the configured layout
//! - Lenient: a `data_key` that resolves to nothing renders as absent,
//!   it never errors (see `dashboard::validate_config` for the startup warn)

use serde::{Deserialize, Serialize};

// ============================================================================
// DASHBOARD KIND
// ============================================================================

/// The dashboard variants sharing one view. Each kind carries its own
/// filter-predicate table and aggregation-rule table; there is no
/// type-name string switching anywhere downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DashboardKind {
    Employees,
    Loans,
    Inventory,
    Absences,
}

impl DashboardKind {
    pub fn label(&self) -> &'static str {
        match self {
            DashboardKind::Employees => "employees",
            DashboardKind::Loans => "loans",
            DashboardKind::Inventory => "inventory",
            DashboardKind::Absences => "absences",
        }
    }
}

// ============================================================================
// DASHBOARD CONFIG
// ============================================================================

/// A summary card on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardConfig {
    pub id: String,
    pub title: String,
    /// Key into the aggregation output map. Unknown keys read as 0.
    pub data_key: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default = "default_true")]
    pub visible: bool,
}

/// A filter control shown above the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterConfig {
    pub id: String,
    pub label: String,
    /// Record field key the filter predicate applies to.
    pub data_key: String,
    #[serde(default = "default_true")]
    pub visible: bool,
}

/// Chart shape for a named series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartType {
    Bar,
    Pie,
    Line,
}

/// A chart panel on the dashboard or a report's chart page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    pub id: String,
    pub title: String,
    /// Key into the aggregation output map. Unknown keys render as absent.
    pub data_key: String,
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    #[serde(default = "default_true")]
    pub visible: bool,
}

/// The complete, ordered dashboard configuration for one kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardConfig {
    #[serde(default)]
    pub cards: Vec<CardConfig>,
    #[serde(default)]
    pub filters: Vec<FilterConfig>,
    #[serde(default)]
    pub charts: Vec<ChartConfig>,
}

fn default_true() -> bool {
    true
}

// ============================================================================
// REPORT DEFINITION
// ============================================================================

/// Table projection: which record field lands in which column.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportColumn {
    pub key: String,
    pub label: String,
}

/// A printable report: table projection plus optional chart panels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDefinition {
    pub id: String,
    pub label: String,
    pub columns: Vec<ReportColumn>,
    #[serde(default)]
    pub charts: Vec<ChartConfig>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_config_accepts_backend_json() {
        let json = r#"{
            "id": "c1",
            "title": "By department",
            "dataKey": "byDepartment",
            "type": "pie"
        }"#;
        let c: ChartConfig = serde_json::from_str(json).unwrap();
        assert_eq!(c.chart_type, ChartType::Pie);
        assert!(c.visible);
    }

    #[test]
    fn dashboard_config_sections_default_to_empty() {
        let c: DashboardConfig = serde_json::from_str("{}").unwrap();
        assert!(c.cards.is_empty() && c.filters.is_empty() && c.charts.is_empty());
    }
}
