use std::path::PathBuf;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{
    Attribute, Cell, CellAlignment, ColumnConstraint, Color, ContentArrangement, Table, Width,
};

use crate::types::{RunResult, StageFailure};

pub fn print_summary(result: &RunResult) {
    println!("Output: {}", result.output_dir.display());
    if let Some(path) = &result.report_path {
        println!("Run report: {}", path.display());
    }
    if result.dry_run {
        println!("Dry run: no files written");
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Dataset"),
        header_cell("Title"),
        header_cell("Records"),
        header_cell("Sources"),
        header_cell("Data"),
        header_cell("Metadata"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);
    align_column(&mut table, 5, CellAlignment::Center);

    let mut total_records = 0usize;
    for dataset in &result.datasets {
        total_records += dataset.records;
        table.add_row(vec![
            dataset_cell(&dataset.dataset_id),
            Cell::new(&dataset.title),
            Cell::new(dataset.records),
            sources_cell(&dataset.combined_from),
            output_cell(dataset.data_csv.as_ref(), result.dry_run),
            output_cell(dataset.metadata_csv.as_ref(), result.dry_run),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{} datasets", result.datasets.len()))
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_records).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    println!("{table}");

    print_failure_table(&result.failures);
}

fn print_failure_table(failures: &[StageFailure]) {
    if failures.is_empty() {
        return;
    }
    let mut ordered: Vec<&StageFailure> = failures.iter().collect();
    ordered.sort_by_key(|failure| (failure.stage, failure.dataset_id.clone()));

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Dataset"),
        header_cell("Stage"),
        header_cell("Reason"),
    ]);
    apply_failure_table_style(&mut table);
    for failure in ordered {
        table.add_row(vec![
            dataset_cell(&failure.dataset_id),
            Cell::new(failure.stage.as_str())
                .fg(Color::Red)
                .add_attribute(Attribute::Bold),
            Cell::new(&failure.reason),
        ]);
    }
    println!();
    println!("Failed datasets:");
    println!("{table}");
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
    if table.column_count() >= 6 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(10)),
            ColumnConstraint::UpperBoundary(Width::Percentage(45)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
            ColumnConstraint::LowerBoundary(Width::Fixed(5)),
            ColumnConstraint::LowerBoundary(Width::Fixed(9)),
        ]);
    }
}

fn apply_failure_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
    if table.column_count() >= 3 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(10)),
            ColumnConstraint::UpperBoundary(Width::Fixed(9)),
            ColumnConstraint::UpperBoundary(Width::Percentage(75)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn output_cell(path: Option<&PathBuf>, dry_run: bool) -> Cell {
    match path {
        Some(_) => Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        None if dry_run => dim_cell("skip"),
        None => dim_cell("-"),
    }
}

fn sources_cell(combined_from: &[String]) -> Cell {
    if combined_from.is_empty() {
        dim_cell(1)
    } else {
        Cell::new(combined_from.len())
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dataset_cell(id: &str) -> Cell {
    Cell::new(id).fg(Color::Blue).add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
