//! FILENAME: report-engine/src/view.rs
//! Aggregation output - what the dashboard and report preview render.
//!
//! A `DashboardStats` is always a complete result: the engine builds it
//! fully before handing it out, so the UI never observes a partial map.
//! The previously displayed result stays valid until replaced wholesale.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::definition::ChartType;

// ============================================================================
// DASHBOARD STATS
// ============================================================================

/// One point of a named chart series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    pub name: String,
    pub value: f64,
}

impl SeriesPoint {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        SeriesPoint {
            name: name.into(),
            value,
        }
    }
}

/// A single aggregation result: a scalar card value or a chart series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatValue {
    Scalar(f64),
    Series(Vec<SeriesPoint>),
}

/// Mapping from `data_key` to aggregation results for one dashboard kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    values: FxHashMap<String, StatValue>,
}

impl DashboardStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_scalar(&mut self, data_key: &str, value: f64) {
        self.values.insert(data_key.to_string(), StatValue::Scalar(value));
    }

    pub fn insert_series(&mut self, data_key: &str, series: Vec<SeriesPoint>) {
        self.values.insert(data_key.to_string(), StatValue::Series(series));
    }

    /// Card lookup. Unknown keys and series-typed keys read as 0.
    pub fn card_value(&self, data_key: &str) -> f64 {
        match self.values.get(data_key) {
            Some(StatValue::Scalar(v)) => *v,
            _ => 0.0,
        }
    }

    /// Chart lookup. Unknown keys and scalar-typed keys read as absent.
    pub fn series(&self, data_key: &str) -> Option<&[SeriesPoint]> {
        match self.values.get(data_key) {
            Some(StatValue::Series(s)) => Some(s),
            _ => None,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(|k| k.as_str())
    }
}

// ============================================================================
// REPORT DATA
// ============================================================================

/// One rendered chart of a generated report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportChart {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub data: Vec<SeriesPoint>,
}

/// A table row keyed by column key. Column order lives in the report
/// definition, not here.
pub type TableRow = FxHashMap<String, String>;

/// The product of one report generation. Immutable once produced; user
/// formatting changes re-derive a fresh instance instead of mutating.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportData {
    pub table_data: Vec<TableRow>,
    pub chart_data: Vec<ReportChart>,
}

impl ReportData {
    pub fn has_charts(&self) -> bool {
        self.chart_data.iter().any(|c| !c.data.is_empty())
    }
}
