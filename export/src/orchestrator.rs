//! FILENAME: export/src/orchestrator.rs
//! The export pipeline driver.
//!
//! Owns the staging container and the bitmap-capture service, and enforces
//! the single-flight rule: one export at a time, with the busy flag
//! released on every exit path. Page geometry arrives per call from the
//! export dialog; settings contribute the header/footer chrome only. A
//! failure on any page aborts the whole document; nothing partial is ever
//! returned.

use chrono::NaiveDate;

use layout_engine::geometry::{resolve_page_box, PageGeometry};
use layout_engine::pagination;
use report_engine::datasource::PdfSettings;
use report_engine::definition::ReportDefinition;
use report_engine::org::OrgNode;
use report_engine::view::ReportData;

use crate::content::{
    csv_file_name, org_chart_file_name, report_file_name, report_pages, PageContent, ReportVariant,
};
use crate::csv::export_csv;
use crate::error::ExportError;
use crate::pdf::{DocumentBuilder, ImagePlacement};
use crate::raster::{PageStage, Rasterizer, StagingGuard};

/// Device scale for page capture. Bitmaps come back at twice the point
/// resolution and are scaled down at placement, which keeps text crisp in
/// the embedded JPEGs.
pub const RASTER_SCALE: f64 = 2.0;

/// A finished export, ready to hand to the save dialog.
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

// ============================================================================
// ORCHESTRATOR
// ============================================================================

pub struct ExportOrchestrator<S: PageStage, R: Rasterizer> {
    stage: S,
    rasterizer: R,
    exporting: bool,
}

impl<S: PageStage, R: Rasterizer> ExportOrchestrator<S, R> {
    pub fn new(stage: S, rasterizer: R) -> Self {
        ExportOrchestrator {
            stage,
            rasterizer,
            exporting: false,
        }
    }

    pub fn is_exporting(&self) -> bool {
        self.exporting
    }

    fn begin(&mut self) -> Result<(), ExportError> {
        if self.exporting {
            return Err(ExportError::Busy);
        }
        self.exporting = true;
        Ok(())
    }

    fn end(&mut self, result: &Result<ExportedDocument, ExportError>) {
        self.exporting = false;
        if let Err(err) = result {
            log::error!("Export aborted: {}", err);
        }
    }

    /// Exports the fixed-page report document. The table page comes first;
    /// the chart page follows when the variant includes it and series data
    /// exists. Table overflow past the content box is clipped, matching
    /// the on-screen preview.
    ///
    /// `geometry` is the export dialog's session state (size, orientation,
    /// margins, scale); `settings` contributes the page chrome text.
    pub fn export_report(
        &mut self,
        definition: &ReportDefinition,
        data: &ReportData,
        variant: ReportVariant,
        geometry: &PageGeometry,
        settings: &PdfSettings,
    ) -> Result<ExportedDocument, ExportError> {
        self.begin()?;
        let result = self.export_report_inner(definition, data, variant, geometry, settings);
        self.end(&result);
        result
    }

    fn export_report_inner(
        &mut self,
        definition: &ReportDefinition,
        data: &ReportData,
        variant: ReportVariant,
        geometry: &PageGeometry,
        settings: &PdfSettings,
    ) -> Result<ExportedDocument, ExportError> {
        let page_box = resolve_page_box(geometry)?;
        let content = page_box.content;
        // Staging narrows by the content scale; stretching the capture
        // back to the content box magnifies the content by that factor.
        let staging_width_pt = content.width / geometry.scale;
        let pages = report_pages(definition, data, variant)?;

        let mut builder =
            DocumentBuilder::new(page_box, &settings.header_text, &settings.footer_text);
        self.rasterizer.wait_for_fonts()?;

        for page in &pages {
            let guard = StagingGuard::new(&mut self.stage, page, staging_width_pt)?;
            let bitmap = self.rasterizer.rasterize(guard.staged(), RASTER_SCALE)?;

            let display_height_pt = guard.staged().measured_height_pt * geometry.scale;
            let px_per_pt = pixels_per_point(bitmap.height_px, display_height_pt);
            let visible_pt = display_height_pt.min(content.height);
            let visible_px = (visible_pt * px_per_pt).round() as u32;
            let band = bitmap.slice_rows(0, visible_px);

            builder.add_image_page(
                &band,
                ImagePlacement {
                    x_pt: content.x,
                    y_pt: content.y,
                    width_pt: content.width,
                    height_pt: band.height_px as f64 / px_per_pt,
                },
            )?;
        }

        Ok(ExportedDocument {
            file_name: report_file_name(&definition.label, variant),
            bytes: builder.finish(),
        })
    }

    /// Exports the organization chart. The chart is staged and captured
    /// exactly once at full height; continuation pages are horizontal
    /// bands sliced out of that single capture per the pagination plan.
    pub fn export_org_chart(
        &mut self,
        roots: Vec<OrgNode>,
        geometry: &PageGeometry,
        settings: &PdfSettings,
        today: NaiveDate,
    ) -> Result<ExportedDocument, ExportError> {
        self.begin()?;
        let result = self.export_org_chart_inner(roots, geometry, settings, today);
        self.end(&result);
        result
    }

    fn export_org_chart_inner(
        &mut self,
        roots: Vec<OrgNode>,
        geometry: &PageGeometry,
        settings: &PdfSettings,
        today: NaiveDate,
    ) -> Result<ExportedDocument, ExportError> {
        let page_box = resolve_page_box(geometry)?;
        let content = page_box.content;
        let staging_width_pt = content.width / geometry.scale;

        let mut builder =
            DocumentBuilder::new(page_box, &settings.header_text, &settings.footer_text);
        self.rasterizer.wait_for_fonts()?;

        let page = PageContent::OrgChart { roots };
        let guard = StagingGuard::new(&mut self.stage, &page, staging_width_pt)?;
        let bitmap = self.rasterizer.rasterize(guard.staged(), RASTER_SCALE)?;

        let display_height_pt = guard.staged().measured_height_pt * geometry.scale;
        let plan = pagination::plan(display_height_pt, content.height)?;
        let px_per_pt = pixels_per_point(bitmap.height_px, display_height_pt);
        let window_px = (content.height * px_per_pt).round() as u32;

        for page_number in 1..=plan.total_pages {
            let offset_pt = plan.offset_for_page(page_number);
            let start_row = (offset_pt * px_per_pt).round() as u32;
            let band = bitmap.slice_rows(start_row, window_px);

            builder.add_image_page(
                &band,
                ImagePlacement {
                    x_pt: content.x,
                    y_pt: content.y,
                    width_pt: content.width,
                    height_pt: band.height_px as f64 / px_per_pt,
                },
            )?;
        }

        Ok(ExportedDocument {
            file_name: org_chart_file_name(today),
            bytes: builder.finish(),
        })
    }

    /// Exports the report table as CSV. No rasterization is involved, but
    /// the single-flight rule still applies.
    pub fn export_report_csv(
        &mut self,
        definition: &ReportDefinition,
        data: &ReportData,
    ) -> Result<ExportedDocument, ExportError> {
        self.begin()?;
        let result = Ok(ExportedDocument {
            file_name: csv_file_name(&definition.label),
            bytes: export_csv(definition, data).into_bytes(),
        });
        self.end(&result);
        result
    }
}

/// Capture density of a bitmap relative to its displayed height. Falls
/// back to the configured scale when the staged height is degenerate.
fn pixels_per_point(height_px: u32, display_height_pt: f64) -> f64 {
    if display_height_pt > 0.0 {
        height_px as f64 / display_height_pt
    } else {
        RASTER_SCALE
    }
}
