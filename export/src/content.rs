//! FILENAME: export/src/content.rs
//! Logical page content and export naming.
//!
//! A `PageContent` is what gets staged off-screen and handed to the
//! rasterizer: a semantic description of one logical page, not markup.
//! The report document is fixed at one table page plus, when chart series
//! exist, one chart page on a two-column grid. The organization chart is
//! a single content item that may overflow onto continuation pages.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use report_engine::definition::{ChartType, ReportDefinition};
use report_engine::org::OrgNode;
use report_engine::view::{ReportData, SeriesPoint};

use crate::error::ExportError;

// ============================================================================
// PAGE CONTENT
// ============================================================================

/// One chart panel on the chart page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartTile {
    pub title: String,
    pub chart_type: ChartType,
    pub data: Vec<SeriesPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PageContent {
    /// The report's table page: header row plus projected cells in
    /// column order.
    Table {
        title: String,
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    /// The report's chart page; the staging renderer lays the panels out
    /// on a fixed two-column grid.
    ChartGrid {
        title: String,
        charts: Vec<ChartTile>,
    },
    /// The organization chart; height unknown until staged.
    OrgChart { roots: Vec<OrgNode> },
}

// ============================================================================
// REPORT VARIANTS
// ============================================================================

/// Which pages of the report document to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReportVariant {
    Full,
    Table,
    Charts,
}

impl ReportVariant {
    pub fn suffix(&self) -> &'static str {
        match self {
            ReportVariant::Full => "full",
            ReportVariant::Table => "table",
            ReportVariant::Charts => "charts",
        }
    }
}

/// Builds the logical pages for a report export, table page first.
///
/// The chart page exists only when at least one series has data; asking
/// for the charts-only variant without any is an error (the control is
/// disabled in the UI, but the engine guards it anyway).
pub fn report_pages(
    definition: &ReportDefinition,
    data: &ReportData,
    variant: ReportVariant,
) -> Result<Vec<PageContent>, ExportError> {
    let mut pages = Vec::new();

    if matches!(variant, ReportVariant::Full | ReportVariant::Table) {
        pages.push(table_page(definition, data));
    }

    if matches!(variant, ReportVariant::Full | ReportVariant::Charts) {
        match chart_page(definition, data) {
            Some(page) => pages.push(page),
            None if variant == ReportVariant::Charts => return Err(ExportError::NoChartData),
            None => {}
        }
    }

    Ok(pages)
}

fn table_page(definition: &ReportDefinition, data: &ReportData) -> PageContent {
    let columns: Vec<String> = definition.columns.iter().map(|c| c.label.clone()).collect();
    let rows = data
        .table_data
        .iter()
        .map(|row| {
            definition
                .columns
                .iter()
                .map(|c| row.get(&c.key).cloned().unwrap_or_default())
                .collect()
        })
        .collect();

    PageContent::Table {
        title: definition.label.clone(),
        columns,
        rows,
    }
}

fn chart_page(definition: &ReportDefinition, data: &ReportData) -> Option<PageContent> {
    let charts: Vec<ChartTile> = data
        .chart_data
        .iter()
        .filter(|c| !c.data.is_empty())
        .map(|c| ChartTile {
            title: c.title.clone(),
            chart_type: c.chart_type,
            data: c.data.clone(),
        })
        .collect();

    if charts.is_empty() {
        return None;
    }
    Some(PageContent::ChartGrid {
        title: definition.label.clone(),
        charts,
    })
}

// ============================================================================
// FILE NAMING
// ============================================================================

/// `<ReportLabel_with_spaces_as_underscores>_<variant>.pdf`
pub fn report_file_name(label: &str, variant: ReportVariant) -> String {
    format!("{}_{}.pdf", label.replace(' ', "_"), variant.suffix())
}

/// `organigrama_<ISO-date>.pdf`
pub fn org_chart_file_name(date: NaiveDate) -> String {
    format!("organigrama_{}.pdf", date.format("%Y-%m-%d"))
}

/// `<ReportLabel_with_spaces_as_underscores>.csv`
pub fn csv_file_name(label: &str) -> String {
    format!("{}.csv", label.replace(' ', "_"))
}
