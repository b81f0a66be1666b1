//! FILENAME: export/src/raster.rs
//! Off-screen staging and bitmap capture interfaces.
//!
//! Rendering is delegated to an external bitmap-capture service. The
//! orchestrator stages one logical page at a time into a process-wide
//! off-screen container, captures it, and tears the container down before
//! the next page's step begins; `StagingGuard` enforces the teardown on
//! both success and failure paths.

use std::io::Cursor;

use image::{ImageEncoder, codecs::jpeg::JpegEncoder};

use crate::content::PageContent;
use crate::error::RasterizationError;

// ============================================================================
// BITMAP
// ============================================================================

/// A captured page bitmap, RGB8 row-major.
#[derive(Debug, Clone)]
pub struct PageBitmap {
    pub width_px: u32,
    pub height_px: u32,
    pub pixels: Vec<u8>,
}

impl PageBitmap {
    pub fn filled(width_px: u32, height_px: u32, rgb: [u8; 3]) -> Self {
        let mut pixels = Vec::with_capacity((width_px * height_px * 3) as usize);
        for _ in 0..(width_px * height_px) {
            pixels.extend_from_slice(&rgb);
        }
        PageBitmap {
            width_px,
            height_px,
            pixels,
        }
    }

    /// A horizontal band of this bitmap. The range is clamped to the
    /// source; a fully out-of-range request yields an empty bitmap.
    /// Slicing one capture is what guarantees visual continuity across
    /// continuation pages - nothing is re-rendered.
    pub fn slice_rows(&self, start_row: u32, height: u32) -> PageBitmap {
        let start = start_row.min(self.height_px);
        let end = start_row.saturating_add(height).min(self.height_px);
        let row_bytes = (self.width_px * 3) as usize;
        let pixels = self.pixels[start as usize * row_bytes..end as usize * row_bytes].to_vec();
        PageBitmap {
            width_px: self.width_px,
            height_px: end - start,
            pixels,
        }
    }

    /// JPEG-encodes the bitmap for embedding into the output document.
    pub fn to_jpeg(&self, quality: u8) -> Result<Vec<u8>, image::ImageError> {
        let mut out = Cursor::new(Vec::new());
        JpegEncoder::new_with_quality(&mut out, quality).write_image(
            &self.pixels,
            self.width_px,
            self.height_px,
            image::ExtendedColorType::Rgb8,
        )?;
        Ok(out.into_inner())
    }
}

// ============================================================================
// STAGING
// ============================================================================

/// A page materialized off-screen at a fixed width, with its measured
/// full-resolution height. The height is only trustworthy after staging,
/// which is the whole point for overflow content.
#[derive(Debug, Clone)]
pub struct StagedPage {
    pub content: PageContent,
    pub width_pt: f64,
    pub measured_height_pt: f64,
}

/// The off-screen staging container. Process-wide: at most one page may
/// be staged at a time, and it must be torn down before the next one.
pub trait PageStage {
    fn stage(&mut self, content: &PageContent, width_pt: f64)
        -> Result<StagedPage, RasterizationError>;

    fn teardown(&mut self, staged: &StagedPage);
}

/// The external bitmap-capture service.
pub trait Rasterizer {
    /// Blocks until font resources are ready; capture before this point
    /// would produce fallback glyphs.
    fn wait_for_fonts(&mut self) -> Result<(), RasterizationError>;

    fn rasterize(
        &mut self,
        staged: &StagedPage,
        scale: f64,
    ) -> Result<PageBitmap, RasterizationError>;
}

/// Scoped staging: tears the staged page down when dropped, so the
/// container is released on the error path as well.
pub struct StagingGuard<'a, S: PageStage + ?Sized> {
    stage: &'a mut S,
    staged: StagedPage,
}

impl<'a, S: PageStage + ?Sized> StagingGuard<'a, S> {
    pub fn new(
        stage: &'a mut S,
        content: &PageContent,
        width_pt: f64,
    ) -> Result<Self, RasterizationError> {
        let staged = stage.stage(content, width_pt)?;
        Ok(StagingGuard { stage, staged })
    }

    pub fn staged(&self) -> &StagedPage {
        &self.staged
    }
}

impl<'a, S: PageStage + ?Sized> Drop for StagingGuard<'a, S> {
    fn drop(&mut self) {
        self.stage.teardown(&self.staged);
    }
}
