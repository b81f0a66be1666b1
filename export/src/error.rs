//! FILENAME: export/src/error.rs

use thiserror::Error;

use layout_engine::LayoutError;

/// The external bitmap-capture step failed. Aborts the whole multi-page
/// export; partial documents are never emitted.
#[derive(Error, Debug, Clone)]
#[error("rasterization failed: {0}")]
pub struct RasterizationError(pub String);

#[derive(Error, Debug)]
pub enum ExportError {
    /// An export is already in flight; re-entrant triggering is refused.
    #[error("an export is already in progress")]
    Busy,

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Raster(#[from] RasterizationError),

    #[error("image encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    /// The charts-only variant was requested for a report without series.
    #[error("report has no chart data")]
    NoChartData,
}
