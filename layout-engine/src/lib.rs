//! FILENAME: layout-engine/src/lib.rs
//! Page layout subsystem for Plantel exports.
//!
//! Converts a page-size/orientation/margin/scale configuration into
//! absolute point coordinates, and plans overflow pagination for content
//! whose height is only known after a first full render. Independent of
//! content and of the rendering backend.

pub mod error;
pub mod geometry;
pub mod pagination;

pub use error::LayoutError;
pub use geometry::{
    resolve_page_box, ContentBox, MarginController, MarginMode, MarginsMm, Orientation, PageBox,
    PageGeometry, PageSizeId, AUTO_MARGIN_MM, MM_TO_PT,
};
pub use pagination::{plan, PaginationPlan};
