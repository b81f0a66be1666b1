//! FILENAME: report-engine/src/lib.rs
//! Report & dashboard aggregation subsystem for Plantel.
//!
//! This crate turns raw entity collections into filtered statistics and
//! chart/table series under a composable filter set. It depends on
//! `engine` for shared record types only.
//!
//! Layers:
//! - `definition`: Serializable configuration (what a dashboard/report IS)
//! - `filter`: Predicate evaluation over record snapshots
//! - `dashboard`: Per-kind aggregation rule tables (HOW we compute)
//! - `view`: The complete result maps the frontend renders
//! - `datasource`: The narrow backend interface the core consumes
//! - `org`: Organization chart tree for the paginated export

pub mod dashboard;
pub mod datasource;
pub mod definition;
pub mod filter;
pub mod org;
pub mod view;

pub use datasource::{
    DataFetchError, DataSource, PdfSettings, ReportCategory, ReportSettings,
};
pub use definition::{
    CardConfig, ChartConfig, ChartType, DashboardConfig, DashboardKind, FilterConfig,
    ReportColumn, ReportDefinition,
};
pub use dashboard::{compute_stats, known_keys, validate_config, DashboardInput};
pub use filter::{apply, DateFilter, FilterOption, FilterSet, OptionTable};
pub use org::{build_org_chart, node_count, OrgNode};
pub use view::{DashboardStats, ReportChart, ReportData, SeriesPoint, StatValue, TableRow};
