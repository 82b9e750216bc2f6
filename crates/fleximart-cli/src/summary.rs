use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use fleximart_cli::types::{RecordSetSummary, RunResult};

pub fn print_summary(result: &RunResult) {
    println!("Input: {}", result.input_dir.display());
    match (&result.database, &result.load) {
        (Some(path), Some(_)) => println!("Database: {}", path.display()),
        _ => println!("Database: skipped (dry run)"),
    }
    println!("Report: {}", result.report_path.display());
    println!("Fingerprint: {}", result.fingerprint);

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Record set"),
        header_cell("Read"),
        header_cell("Rejected"),
        header_cell("Emitted"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=3 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for summary in &result.record_sets {
        table.add_row(summary_row(summary));
    }
    println!("{table}");

    if let Some(customers) = result.report.customers() {
        print_reasons("Customers", customers.rejections.iter());
    }
    if let Some(products) = result.report.products() {
        print_reasons("Products", products.rejections.iter());
    }
    if let Some(sales) = result.report.sales() {
        print_reasons("Transaction lines", sales.rejections.iter());
    }
}

fn print_reasons<R>(label: &str, reasons: impl Iterator<Item = (R, usize)>)
where
    R: std::fmt::Display,
{
    let lines: Vec<String> = reasons
        .map(|(reason, count)| format!("  - {reason}: {count}"))
        .collect();
    if lines.is_empty() {
        return;
    }
    println!("{label} rejected:");
    for line in lines {
        println!("{line}");
    }
}

fn summary_row(summary: &RecordSetSummary) -> Vec<Cell> {
    vec![
        Cell::new(summary.name).add_attribute(Attribute::Bold),
        optional_count_cell(summary.read, None),
        optional_count_cell(summary.rejected, Some(Color::Yellow)),
        Cell::new(summary.emitted).fg(Color::Green),
    ]
}

fn optional_count_cell(count: Option<usize>, highlight: Option<Color>) -> Cell {
    match (count, highlight) {
        (Some(value), Some(color)) if value > 0 => {
            Cell::new(value).fg(color).add_attribute(Attribute::Bold)
        }
        (Some(value), Some(_)) => dim_cell(value),
        (Some(value), None) => Cell::new(value),
        (None, _) => dim_cell("-"),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
