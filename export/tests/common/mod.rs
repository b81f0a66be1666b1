//! FILENAME: tests/common/mod.rs
//! Mock staging/rasterization collaborators and fixtures for export
//! integration tests.

use std::cell::RefCell;
use std::rc::Rc;

use export::{PageBitmap, PageContent, PageStage, RasterizationError, Rasterizer, StagedPage};
use layout_engine::geometry::{Orientation, PageGeometry, PageSizeId};
use report_engine::datasource::PdfSettings;
use report_engine::definition::{ChartType, ReportColumn, ReportDefinition};
use report_engine::view::{ReportChart, ReportData, SeriesPoint, TableRow};

/// Shared call counters, inspectable after the orchestrator consumed the
/// mocks.
#[derive(Debug, Default)]
pub struct CallLog {
    pub staged: usize,
    pub torn_down: usize,
    pub rasterized: usize,
    /// Width handed to each stage call, in order.
    pub staged_widths_pt: Vec<f64>,
}

pub struct MockStage {
    pub log: Rc<RefCell<CallLog>>,
    /// Measured height reported for each stage call, in order.
    pub heights_pt: Vec<f64>,
    /// Zero-based stage call index that fails, if any.
    pub fail_on_stage: Option<usize>,
}

impl MockStage {
    pub fn new(log: Rc<RefCell<CallLog>>, heights_pt: Vec<f64>) -> Self {
        MockStage {
            log,
            heights_pt,
            fail_on_stage: None,
        }
    }
}

impl PageStage for MockStage {
    fn stage(
        &mut self,
        content: &PageContent,
        width_pt: f64,
    ) -> Result<StagedPage, RasterizationError> {
        let index = self.log.borrow().staged;
        if self.fail_on_stage == Some(index) {
            return Err(RasterizationError("staging container unavailable".into()));
        }
        let mut log = self.log.borrow_mut();
        log.staged += 1;
        log.staged_widths_pt.push(width_pt);
        drop(log);
        let measured_height_pt = self.heights_pt.get(index).copied().unwrap_or(200.0);
        Ok(StagedPage {
            content: content.clone(),
            width_pt,
            measured_height_pt,
        })
    }

    fn teardown(&mut self, _staged: &StagedPage) {
        self.log.borrow_mut().torn_down += 1;
    }
}

pub struct MockRasterizer {
    pub log: Rc<RefCell<CallLog>>,
    /// Zero-based capture attempt that fails, if any. Attempts keep
    /// counting across exports, so a later retry proceeds.
    pub fail_on_rasterize: Option<usize>,
    attempts: usize,
}

impl MockRasterizer {
    pub fn new(log: Rc<RefCell<CallLog>>) -> Self {
        MockRasterizer {
            log,
            fail_on_rasterize: None,
            attempts: 0,
        }
    }
}

impl Rasterizer for MockRasterizer {
    fn wait_for_fonts(&mut self) -> Result<(), RasterizationError> {
        Ok(())
    }

    fn rasterize(
        &mut self,
        staged: &StagedPage,
        scale: f64,
    ) -> Result<PageBitmap, RasterizationError> {
        let attempt = self.attempts;
        self.attempts += 1;
        if self.fail_on_rasterize == Some(attempt) {
            return Err(RasterizationError("capture failed".into()));
        }
        self.log.borrow_mut().rasterized += 1;
        Ok(PageBitmap::filled(
            (staged.width_pt * scale).round() as u32,
            (staged.measured_height_pt * scale).round() as u32,
            [255, 255, 255],
        ))
    }
}

// ============================================================================
// FIXTURES
// ============================================================================

pub fn loans_definition() -> ReportDefinition {
    ReportDefinition {
        id: "loans".to_string(),
        label: "Employee Loans".to_string(),
        columns: vec![
            ReportColumn {
                key: "employee".to_string(),
                label: "Employee".to_string(),
            },
            ReportColumn {
                key: "item".to_string(),
                label: "Item".to_string(),
            },
        ],
        charts: Vec::new(),
    }
}

pub fn loans_data(with_charts: bool) -> ReportData {
    let mut row = TableRow::default();
    row.insert("employee".to_string(), "Ana".to_string());
    row.insert("item".to_string(), "Laptop".to_string());
    ReportData {
        table_data: vec![row],
        chart_data: if with_charts {
            vec![ReportChart {
                id: "by-status".to_string(),
                title: "By status".to_string(),
                chart_type: ChartType::Pie,
                data: vec![SeriesPoint::new("Active", 3.0)],
            }]
        } else {
            Vec::new()
        },
    }
}

pub fn a4_settings() -> PdfSettings {
    PdfSettings {
        header_text: "Plantel".to_string(),
        footer_text: "Confidencial".to_string(),
        orientation: Orientation::Portrait,
        size: PageSizeId::A4,
    }
}

/// A4 portrait with the default 10mm margins and no content scaling.
pub fn a4_geometry() -> PageGeometry {
    PageGeometry::new(PageSizeId::A4, Orientation::Portrait)
}

/// Number of page objects in a finished document. Each page carries
/// exactly one /Contents entry.
pub fn pdf_page_count(bytes: &[u8]) -> usize {
    let needle = b"/Contents";
    bytes
        .windows(needle.len())
        .filter(|w| *w == needle)
        .count()
}
