//! FILENAME: export/src/lib.rs
//! Paginated document export.
//!
//! Turns computed report data and the organization chart into multi-page
//! PDF documents (and CSV for the plain table). Page content is staged
//! off-screen, captured as a bitmap by an external rasterizer, and the
//! resulting JPEG frames are assembled into pages with header/footer
//! chrome. The orchestrator drives the pipeline and enforces the
//! one-export-at-a-time rule.

pub mod content;
pub mod csv;
pub mod error;
pub mod orchestrator;
pub mod pdf;
pub mod raster;

pub use content::{
    csv_file_name, org_chart_file_name, report_file_name, report_pages, ChartTile, PageContent,
    ReportVariant,
};
pub use csv::export_csv;
pub use error::{ExportError, RasterizationError};
pub use orchestrator::{ExportOrchestrator, ExportedDocument, RASTER_SCALE};
pub use pdf::{DocumentBuilder, ImagePlacement, JPEG_QUALITY};
pub use raster::{PageBitmap, PageStage, Rasterizer, StagedPage, StagingGuard};
