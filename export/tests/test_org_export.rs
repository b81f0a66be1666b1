//! FILENAME: tests/test_org_export.rs
//! Integration tests for the organization chart export.

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDate;

use common::{a4_geometry, a4_settings, pdf_page_count, CallLog, MockRasterizer, MockStage};
use export::ExportOrchestrator;
use report_engine::org::OrgNode;

// A4 portrait content height with the 10mm auto margins, in points.
const A4_CONTENT_HEIGHT_PT: f64 = 841.89 - 2.0 * 10.0 * 2.83465;

fn orchestrator(
    chart_height_pt: f64,
) -> (
    ExportOrchestrator<MockStage, MockRasterizer>,
    Rc<RefCell<CallLog>>,
) {
    let log = Rc::new(RefCell::new(CallLog::default()));
    let stage = MockStage::new(Rc::clone(&log), vec![chart_height_pt]);
    let rasterizer = MockRasterizer::new(Rc::clone(&log));
    (ExportOrchestrator::new(stage, rasterizer), log)
}

fn roots() -> Vec<OrgNode> {
    vec![OrgNode {
        employee_id: "ceo".to_string(),
        name: "Alice CEO".to_string(),
        position: "General Management".to_string(),
        children: Vec::new(),
    }]
}

fn export_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
}

#[test]
fn test_short_chart_fits_one_page() {
    let (mut orchestrator, log) = orchestrator(400.0);
    let doc = orchestrator
        .export_org_chart(roots(), &a4_geometry(), &a4_settings(), export_date())
        .unwrap();

    assert_eq!(doc.file_name, "organigrama_2024-03-09.pdf");
    assert!(doc.bytes.starts_with(b"%PDF-"));
    assert_eq!(pdf_page_count(&doc.bytes), 1);
    assert_eq!(log.borrow().staged, 1);
    assert_eq!(log.borrow().torn_down, 1);
}

#[test]
fn test_tall_chart_is_sliced_from_one_capture() {
    // Just over two content boxes tall: three pages.
    let (mut orchestrator, log) = orchestrator(A4_CONTENT_HEIGHT_PT * 2.0 + 50.0);
    let doc = orchestrator
        .export_org_chart(roots(), &a4_geometry(), &a4_settings(), export_date())
        .unwrap();

    assert_eq!(pdf_page_count(&doc.bytes), 3);

    // One staging, one capture, regardless of page count.
    let counts = log.borrow();
    assert_eq!(counts.staged, 1);
    assert_eq!(counts.rasterized, 1);
    assert_eq!(counts.torn_down, 1);
}

#[test]
fn test_exact_fit_does_not_add_a_continuation_page() {
    let (mut orchestrator, _log) = orchestrator(A4_CONTENT_HEIGHT_PT);
    let doc = orchestrator
        .export_org_chart(roots(), &a4_geometry(), &a4_settings(), export_date())
        .unwrap();
    assert_eq!(pdf_page_count(&doc.bytes), 1);
}
