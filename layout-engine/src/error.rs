//! FILENAME: layout-engine/src/error.rs

use thiserror::Error;

/// Degenerate page geometry. Fatal to the current export attempt only;
/// the caller resets its exporting state and keeps the view intact.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("content box is degenerate: {width_pt}x{height_pt} pt")]
    DegenerateContentBox { width_pt: f64, height_pt: f64 },

    #[error("content box height must be positive, got {0} pt")]
    NonPositiveContentHeight(f64),

    #[error("scale must be positive, got {0}")]
    NonPositiveScale(f64),
}
