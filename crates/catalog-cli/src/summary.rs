use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use catalog_cli::pipeline::RunReport;
use catalog_ingest::FrameProfile;
use catalog_output::{ItemDetail, SearchHit};

pub fn print_run_summary(report: &RunReport) {
    match &report.database {
        Some(path) => println!("Database: {}", path.display()),
        None => println!("Database: (dry run, nothing written)"),
    }
    if let Some(path) = &report.audit_report {
        println!("Audit report: {}", path.display());
    }
    for path in &report.exported {
        println!("Exported: {}", path.display());
    }

    let mut sources = Table::new();
    sources.set_header(vec![
        header_cell("Source"),
        header_cell("Rows in"),
        header_cell("Rows out"),
        header_cell("Columns"),
        header_cell("Audit entries"),
    ]);
    apply_table_style(&mut sources);
    for column in 1..=4 {
        align_column(&mut sources, column, CellAlignment::Right);
    }
    for summary in &report.sources {
        sources.add_row(vec![
            Cell::new(&summary.name).add_attribute(Attribute::Bold),
            Cell::new(summary.rows_in),
            Cell::new(summary.rows_out),
            Cell::new(summary.columns),
            count_cell(summary.audit_entries),
        ]);
    }
    println!("{sources}");

    let mut tables = Table::new();
    tables.set_header(vec![
        header_cell("Table"),
        header_cell("Rows"),
        header_cell("Columns"),
    ]);
    apply_table_style(&mut tables);
    align_column(&mut tables, 1, CellAlignment::Right);
    align_column(&mut tables, 2, CellAlignment::Right);
    let mut total_rows = 0usize;
    for table in &report.tables {
        total_rows += table.rows;
        tables.add_row(vec![
            Cell::new(&table.name),
            Cell::new(table.rows),
            Cell::new(table.columns),
        ]);
    }
    tables.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_rows).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    println!("{tables}");
}

pub fn print_profiles(profiles: &[FrameProfile]) {
    for profile in profiles {
        println!(
            "{} ({} rows, {} columns)",
            profile.name,
            profile.rows,
            profile.columns.len()
        );
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Column"),
            header_cell("Type"),
            header_cell("Nulls"),
            header_cell("Distinct"),
            header_cell("Samples"),
        ]);
        apply_table_style(&mut table);
        align_column(&mut table, 2, CellAlignment::Right);
        align_column(&mut table, 3, CellAlignment::Right);
        for column in &profile.columns {
            table.add_row(vec![
                Cell::new(&column.name),
                dim_cell(&column.dtype),
                count_cell(column.null_count),
                Cell::new(format!("{:.0}%", column.distinct_ratio * 100.0)),
                Cell::new(column.samples.join(" | ")),
            ]);
        }
        println!("{table}");
    }
}

pub fn print_search_results(term: &str, hits: &[SearchHit]) {
    if hits.is_empty() {
        println!("No items match '{term}'.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("AppID"),
        header_cell("Name"),
        header_cell("Released"),
        header_cell("Header image"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for hit in hits {
        table.add_row(vec![
            Cell::new(hit.appid),
            optional_cell(hit.name.as_deref()),
            optional_cell(hit.release_date.as_deref()),
            optional_cell(hit.header_image.as_deref()),
        ]);
    }
    println!("{table}");
}

pub fn print_item_detail(detail: &ItemDetail) {
    let mut table = Table::new();
    apply_table_style(&mut table);
    let price = detail.price.map(|price| format!("{price:.2}"));
    let positive = detail.positive_ratings.map(|value| format!("{value:.0}"));
    let negative = detail.negative_ratings.map(|value| format!("{value:.0}"));
    let tags: Vec<String> = detail
        .tags
        .iter()
        .map(|(name, votes)| format!("{name} ({votes:.0})"))
        .collect();
    let rows = [
        ("AppID", Some(detail.appid.to_string())),
        ("Name", detail.name.clone()),
        ("Released", detail.release_date.clone()),
        ("Price", price),
        ("Positive ratings", positive),
        ("Negative ratings", negative),
        ("Description", detail.short_description.clone()),
        ("Header image", detail.header_image.clone()),
        ("Genres", joined(&detail.genres)),
        ("Categories", joined(&detail.categories)),
        ("Platforms", joined(&detail.platforms)),
        ("Tags", joined(&tags)),
    ];
    for (label, value) in rows {
        table.add_row(vec![header_cell(label), optional_cell(value.as_deref())]);
    }
    println!("{table}");
}

fn joined(values: &[String]) -> Option<String> {
    (!values.is_empty()).then(|| values.join(", "))
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

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Yellow).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn optional_cell(value: Option<&str>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}
