//! FILENAME: export/src/csv.rs
//! CSV export - bypasses rasterization entirely.
//!
//! Output contract: UTF-8 with a byte-order-mark prefix (spreadsheet
//! compatibility), comma-delimited, header row of column labels, rows in
//! the report's column order. Fields containing a comma, quote or newline
//! are quoted, with embedded quotes doubled.

use report_engine::definition::ReportDefinition;
use report_engine::view::ReportData;

/// UTF-8 byte-order-mark as a string prefix.
const BOM: &str = "\u{feff}";

/// Serializes the report table using the definition's column order.
pub fn export_csv(definition: &ReportDefinition, data: &ReportData) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(data.table_data.len() + 1);

    let header: Vec<String> = definition
        .columns
        .iter()
        .map(|c| escape_field(&c.label))
        .collect();
    lines.push(header.join(","));

    for row in &data.table_data {
        let cells: Vec<String> = definition
            .columns
            .iter()
            .map(|c| escape_field(row.get(&c.key).map(String::as_str).unwrap_or("")))
            .collect();
        lines.push(cells.join(","));
    }

    format!("{}{}", BOM, lines.join("\n"))
}

/// Quotes a field only when it needs it; embedded quotes are doubled.
fn escape_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
