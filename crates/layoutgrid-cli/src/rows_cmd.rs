use std::path::Path;

use layoutgrid_core::{LayoutEngine, Row};
use serde::Serialize;

use crate::cli::{LayoutArgs, ReportFormat};
use crate::shared::{build_engine, load_items, print_json, resolve_pages};

#[derive(Debug, Serialize)]
struct PageRows {
    page: u32,
    rows: Vec<RowOut>,
}

#[derive(Debug, Serialize)]
struct RowOut {
    row_group: Option<u32>,
    top: f64,
    items: Vec<String>,
}

impl From<&Row<'_>> for RowOut {
    fn from(row: &Row<'_>) -> Self {
        Self {
            row_group: row.row_group,
            top: row.top(),
            items: row.items.iter().map(|i| i.content().to_string()).collect(),
        }
    }
}

pub fn run(
    file: &Path,
    pages: Option<&str>,
    format: &ReportFormat,
    layout: &LayoutArgs,
) -> Result<(), i32> {
    let items = load_items(file)?;
    let engine = build_engine(items, layout.to_options())?;
    let page_numbers = resolve_pages(pages, &engine)?;
    let report = collect_rows(&engine, &page_numbers);

    match format {
        ReportFormat::Text => write_text(&report),
        ReportFormat::Json => print_json(&report),
    }
}

fn collect_rows(engine: &LayoutEngine, page_numbers: &[u32]) -> Vec<PageRows> {
    page_numbers
        .iter()
        .map(|&page| PageRows {
            page,
            rows: engine.get_rows(page).iter().map(RowOut::from).collect(),
        })
        .collect()
}

fn write_text(report: &[PageRows]) -> Result<(), i32> {
    for page in report {
        println!("--- Page {} ---", page.page);
        for row in &page.rows {
            let id = row.row_group.map(|g| g.to_string()).unwrap_or_else(|| "-".to_string());
            println!("{id}\t{:.2}\t{}", row.top, row.items.join(" | "));
        }
    }
    Ok(())
}
