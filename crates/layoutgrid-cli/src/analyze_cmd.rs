use std::path::Path;

use layoutgrid_core::{LayoutEngine, LayoutStats};
use serde::Serialize;

use crate::cli::{LayoutArgs, ReportFormat};
use crate::shared::{build_engine, load_items, print_json, resolve_pages};

#[derive(Debug, Serialize)]
struct PageAnalysis {
    page: u32,
    #[serde(flatten)]
    stats: LayoutStats,
    fields: Vec<FieldOut>,
}

#[derive(Debug, Serialize)]
struct FieldOut {
    label: String,
    value: String,
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
    let report = analyze(&engine, &page_numbers);

    match format {
        ReportFormat::Text => write_text(&report),
        ReportFormat::Json => print_json(&report),
    }
}

fn analyze(engine: &LayoutEngine, page_numbers: &[u32]) -> Vec<PageAnalysis> {
    page_numbers
        .iter()
        .map(|&page| PageAnalysis {
            page,
            stats: engine.analyze_layout(page),
            fields: engine
                .get_form_fields(page)
                .iter()
                .map(|f| FieldOut {
                    label: f.label.content().to_string(),
                    value: f.value.content().to_string(),
                })
                .collect(),
        })
        .collect()
}

fn write_text(report: &[PageAnalysis]) -> Result<(), i32> {
    for page in report {
        let s = &page.stats;
        println!("--- Page {} ---", page.page);
        println!("Items:         {}", s.total_items);
        println!("Rows:          {}", s.total_rows);
        println!("Labels:        {}", s.label_count);
        println!("Values:        {}", s.value_count);
        println!("Headers:       {}", s.header_count);
        println!("Items per row: {:.2}", s.avg_items_per_row);
        for field in &page.fields {
            println!("  {} {}", field.label, field.value);
        }
    }
    Ok(())
}
