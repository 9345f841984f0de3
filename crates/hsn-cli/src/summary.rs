//! Text rendering of command results.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use hsn_map::ConfidenceLevel;

use crate::types::{LookupReport, StatsReport, SuggestReport, ValidateReport};

pub fn validation_table(report: &ValidateReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Code"),
        header_cell("Status"),
        header_cell("Description"),
        header_cell("Hierarchy"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    for result in &report.results {
        let (status, detail) = match result.error_message() {
            None => (
                Cell::new("valid").fg(Color::Green),
                Cell::new(result.description.as_deref().unwrap_or_default()),
            ),
            Some(message) => (
                Cell::new("invalid")
                    .fg(Color::Red)
                    .add_attribute(Attribute::Bold),
                Cell::new(message).fg(Color::Red),
            ),
        };
        table.add_row(vec![
            code_cell(&result.code),
            status,
            detail,
            list_cell(&result.hierarchy),
        ]);
    }
    table
}

/// One-line tally printed under the validation table.
pub fn validation_footer(report: &ValidateReport) -> String {
    let summary = report.summary;
    format!(
        "{} checked: {} valid, {} invalid",
        summary.total, summary.valid, summary.invalid
    )
}

pub fn suggestion_table(report: &SuggestReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Code"),
        header_cell("Description"),
        header_cell("Confidence"),
        header_cell("Level"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for m in &report.matches {
        let level = ConfidenceLevel::from_confidence(m.confidence);
        table.add_row(vec![
            code_cell(&m.code),
            Cell::new(&m.description),
            Cell::new(m.confidence),
            level_cell(level),
        ]);
    }
    table
}

pub fn lookup_table(report: &LookupReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Level"),
        header_cell("Code"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    for ancestor in &report.ancestors {
        table.add_row(vec![
            dim_cell(ancestor.code.len()),
            Cell::new(&ancestor.code),
            match &ancestor.description {
                Some(description) => Cell::new(description),
                None => dim_cell("-"),
            },
        ]);
    }
    match (&report.description, report.error) {
        (Some(description), _) => {
            table.add_row(vec![
                Cell::new(report.code.len()).add_attribute(Attribute::Bold),
                code_cell(&report.code),
                Cell::new(description).add_attribute(Attribute::Bold),
            ]);
        }
        (None, Some(error)) => {
            table.add_row(vec![
                dim_cell("-"),
                code_cell(&report.code),
                Cell::new(error).fg(Color::Red),
            ]);
        }
        (None, None) => {}
    }
    table
}

pub fn stats_table(report: &StatsReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let stats = &report.stats;
    if let Some(source) = &report.source {
        if let Some(path) = &source.path {
            table.add_row(vec![Cell::new("Table"), Cell::new(path.display())]);
        }
        if let Some(sha256) = &source.sha256 {
            table.add_row(vec![Cell::new("SHA-256"), Cell::new(sha256)]);
        }
        table.add_row(vec![
            Cell::new("Columns"),
            Cell::new(format!(
                "{} / {}",
                source.code_column, source.description_column
            )),
        ]);
        table.add_row(vec![Cell::new("Rows read"), Cell::new(source.rows_read)]);
        table.add_row(vec![
            Cell::new("Blank codes skipped"),
            count_cell(source.rows_skipped),
        ]);
    }
    table.add_row(vec![Cell::new("Invalid codes dropped"), count_cell(stats.build.dropped)]);
    table.add_row(vec![
        Cell::new("Duplicate codes"),
        count_cell(stats.build.duplicates),
    ]);
    table.add_row(vec![
        Cell::new("Codes").add_attribute(Attribute::Bold),
        Cell::new(stats.codes).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Hierarchy prefixes"),
        Cell::new(stats.hierarchy_prefixes),
    ]);
    table.add_row(vec![
        Cell::new("  with own record"),
        Cell::new(stats.resolved_prefixes),
    ]);
    table.add_row(vec![
        Cell::new("  without record"),
        count_cell(stats.unresolved_prefixes),
    ]);
    table.add_row(vec![
        Cell::new("Distinct descriptions"),
        Cell::new(stats.distinct_descriptions),
    ]);
    table.add_row(vec![
        Cell::new("Sample code"),
        match &stats.sample_code {
            Some(code) => code_cell(code),
            None => dim_cell("-"),
        },
    ]);
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn code_cell(code: &str) -> Cell {
    Cell::new(code)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn level_cell(level: ConfidenceLevel) -> Cell {
    let color = match level {
        ConfidenceLevel::High => Color::Green,
        ConfidenceLevel::Medium => Color::Yellow,
        ConfidenceLevel::Low => Color::DarkYellow,
    };
    Cell::new(level).fg(color)
}

fn list_cell(items: &[String]) -> Cell {
    if items.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(items.join(" > "))
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Yellow)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
