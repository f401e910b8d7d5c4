use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use grid_cli::pipeline::RunResult;

pub fn print_summary(result: &RunResult) {
    println!("Input: {}", result.input.display());
    println!("Output: {}", result.output.display());
    if result.dictionary_found {
        println!(
            "Dictionary: {} ({} entries)",
            result.block_name, result.dictionary_entries
        );
    } else {
        println!("Unable to find mapping block {}", result.block_name);
    }
    if !result.mapped_blocks.is_empty() {
        println!("Mapped blocks: {}", result.mapped_blocks.join(", "));
    }
    if !result.ignored_categories.is_empty() {
        println!(
            "Ignored categories: {}",
            result.ignored_categories.join(", ")
        );
    }

    let stats = &result.stats;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Lines read"), Cell::new(stats.lines_read)]);
    table.add_row(vec![
        Cell::new("Blocks remapped"),
        Cell::new(stats.blocks_remapped),
    ]);
    table.add_row(vec![
        Cell::new("Rows rewritten"),
        Cell::new(stats.rows_rewritten),
    ]);
    table.add_row(vec![
        Cell::new("Rows mismatched"),
        count_cell(stats.rows_mismatched, Color::Yellow),
    ]);
    table.add_row(vec![Cell::new("Values mapped"), Cell::new(stats.values_mapped)]);
    table.add_row(vec![
        Cell::new("Values substituted"),
        count_cell(stats.values_substituted, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Skipped map lines"),
        count_cell(result.skipped_map_lines as u64, Color::Yellow),
    ]);
    println!("{table}");
    print_diagnostics(result);
}

fn print_diagnostics(result: &RunResult) {
    if result.diagnostics.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Message"), header_cell("Occurrences")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (message, occurrences) in result.diagnostics.iter() {
        table.add_row(vec![Cell::new(message), Cell::new(occurrences)]);
    }
    println!();
    println!("Diagnostics:");
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
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

fn count_cell(count: u64, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        Cell::new(count).fg(Color::DarkGrey)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}
