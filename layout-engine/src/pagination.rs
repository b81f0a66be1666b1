//! FILENAME: layout-engine/src/pagination.rs
//! Pagination planner for content of unknown height.
//!
//! Used when the total rendered height is only discovered after a first
//! full-resolution render (the organization chart). The fixed two-page
//! report never comes through here. The plan slices ONE rasterization:
//! page k shows the window starting at its offset, guaranteeing visual
//! continuity because nothing is re-rendered per page.

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

/// The slicing schedule for one overflow export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationPlan {
    pub total_pages: usize,
    /// One offset per page beyond the first: how far into the full-height
    /// content that page's visible window starts, in points.
    pub slice_offsets_pt: Vec<f64>,
}

impl PaginationPlan {
    /// Offset for a 1-based page number. Page 1 always starts at 0.
    pub fn offset_for_page(&self, page: usize) -> f64 {
        if page <= 1 {
            0.0
        } else {
            self.slice_offsets_pt
                .get(page - 2)
                .copied()
                .unwrap_or(0.0)
        }
    }
}

/// Computes continuation pages for the given content and window heights.
///
/// `total_pages = 1 + ceil(max(0, total - box) / box)`; page k > 1 starts
/// at `(k - 1) * box`.
pub fn plan(
    total_content_height_pt: f64,
    content_box_height_pt: f64,
) -> Result<PaginationPlan, LayoutError> {
    if content_box_height_pt <= 0.0 {
        return Err(LayoutError::NonPositiveContentHeight(content_box_height_pt));
    }

    let overflow = (total_content_height_pt - content_box_height_pt).max(0.0);
    let continuation_pages = (overflow / content_box_height_pt).ceil() as usize;

    let slice_offsets_pt = (1..=continuation_pages)
        .map(|k| k as f64 * content_box_height_pt)
        .collect();

    Ok(PaginationPlan {
        total_pages: 1 + continuation_pages,
        slice_offsets_pt,
    })
}
