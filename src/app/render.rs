// ==========================================
// Product Import - report rendering
// ==========================================
// Reads the report through its public accessors only
// ==========================================

use crate::app::cli::OutputFormat;
use crate::domain::report::{ImportReport, ReportEntry};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use std::fmt::Write as _;

pub fn render(report: &ImportReport, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Table => Ok(render_table(report)),
        OutputFormat::Json => serde_json::to_string_pretty(report),
        OutputFormat::Text => Ok(report.format_summary()),
    }
}

/// Per-record lines, a counts table, then skipped/failed detail tables.
pub fn render_table(report: &ImportReport) -> String {
    let mut out = String::new();

    for item in report.successful_items() {
        let _ = writeln!(out, "✓ {} - {} - Imported successfully", item.code, item.detail);
    }
    for item in report.skipped_items() {
        let _ = writeln!(out, "✗ {} - Skipped: {}", item.code, item.detail);
    }
    for item in report.failed_items() {
        let _ = writeln!(out, "✗ {} - Failed: {}", item.code, item.detail);
    }
    if report.total_processed() > 0 {
        let _ = writeln!(out);
    }

    let mut summary = styled_table();
    summary.set_header(vec![header_cell("Metric"), header_cell("Count")]);
    summary.add_row(vec![Cell::new("Total Processed"), Cell::new(report.total_processed())]);
    summary.add_row(vec![
        Cell::new("Successfully Imported"),
        count_cell(report.successful(), Color::Green),
    ]);
    summary.add_row(vec![Cell::new("Skipped"), count_cell(report.skipped(), Color::Yellow)]);
    summary.add_row(vec![Cell::new("Failed"), count_cell(report.failed(), Color::Red)]);
    if let Some(column) = summary.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    let _ = writeln!(out, "{summary}");

    if !report.skipped_items().is_empty() {
        let _ = writeln!(out, "\nSkipped Items");
        let _ = writeln!(out, "{}", entry_table("Reason", report.skipped_items()));
    }
    if !report.failed_items().is_empty() {
        let _ = writeln!(out, "\nFailed Items");
        let _ = writeln!(out, "{}", entry_table("Error", report.failed_items()));
    }

    if report.is_dry_run() {
        let _ = writeln!(out, "\nTest mode: no data was written to the database.");
    }

    out
}

fn entry_table(detail_header: &str, entries: &[ReportEntry]) -> Table {
    let mut table = styled_table();
    table.set_header(vec![header_cell("Product Code"), header_cell(detail_header)]);
    for entry in entries {
        table.add_row(vec![Cell::new(&entry.code), Cell::new(&entry.detail)]);
    }
    table
}

fn styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn count_cell(value: usize, color: Color) -> Cell {
    if value == 0 {
        Cell::new(value).add_attribute(Attribute::Dim)
    } else {
        Cell::new(value).fg(color)
    }
}
