//! Terminal summaries for run results and statistics.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use xpub_model::{RunFailure, StatisticsReport, TransformationResult};

pub fn print_success(result: &TransformationResult, statistics: &StatisticsReport) {
    println!("Run: {}", result.run_id);
    println!("Archive: {}", result.archive_path.display());
    println!("Output: {}", result.output_dir.display());
    print_statistics(statistics);

    let mut table = Table::new();
    table.set_header(vec![header_cell("Output file")]);
    apply_table_style(&mut table);
    for file in &result.files {
        table.add_row(vec![Cell::new(file)]);
    }
    println!("{table}");
    println!(
        "{} file(s) archived in {:.2}s",
        result.output_files_count, result.duration_secs
    );
}

pub fn print_statistics(statistics: &StatisticsReport) {
    if let Some(error) = &statistics.parse_error {
        eprintln!("statistics unavailable: {error}");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Statistic"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![
        Cell::new("Root element"),
        Cell::new(&statistics.root_tag),
    ]);
    table.add_row(vec![
        Cell::new("Total elements"),
        Cell::new(statistics.total_elements),
    ]);
    table.add_row(vec![
        Cell::new("Element types"),
        Cell::new(statistics.element_types),
    ]);
    table.add_row(vec![
        Cell::new("Maximum depth"),
        Cell::new(statistics.max_depth),
    ]);
    table.add_row(vec![
        Cell::new("Text length"),
        Cell::new(statistics.total_text_length),
    ]);
    table.add_row(vec![
        Cell::new("Size (bytes)"),
        Cell::new(statistics.xml_size_bytes),
    ]);
    table.add_row(vec![
        Cell::new("Project references"),
        Cell::new(statistics.project_references.len()),
    ]);
    println!("{table}");

    if !statistics.project_references.is_empty() {
        println!(
            "References: {}",
            statistics
                .project_references
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
}

pub fn print_failure(failure: &RunFailure) {
    eprintln!("error[{}]: {}", failure.kind, failure.message);
    if !failure.missing_references.is_empty() {
        eprintln!("missing project references:");
        for reference in &failure.missing_references {
            eprintln!("- {reference}");
        }
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
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
