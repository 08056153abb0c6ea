use std::path::Path;

use layoutgrid_core::{ContentItem, ItemRecord, LayoutEngine};

use crate::cli::{LayoutArgs, OutputFormat};
use crate::shared::{build_engine, load_items, print_json, resolve_pages};

pub fn run(
    file: &Path,
    pages: Option<&str>,
    format: &OutputFormat,
    scale: f64,
    layout: &LayoutArgs,
) -> Result<(), i32> {
    if !scale.is_finite() || scale <= 0.0 {
        eprintln!("Error: --scale must be a positive number, got {scale}");
        return Err(1);
    }

    let items = load_items(file)?;
    let engine = build_engine(items, layout.to_options())?;
    let page_numbers = resolve_pages(pages, &engine)?;
    let records = collect_records(&engine, &page_numbers, scale);

    match format {
        OutputFormat::Text => write_text(&records),
        OutputFormat::Json => print_json(&records),
        OutputFormat::Csv => write_csv(&records),
    }
}

fn collect_records(engine: &LayoutEngine, page_numbers: &[u32], scale: f64) -> Vec<ItemRecord> {
    page_numbers
        .iter()
        .flat_map(|&page| engine.get_all_items(Some(page)))
        .map(|item| scaled_record(item, scale))
        .collect()
}

fn scaled_record(item: &ContentItem, scale: f64) -> ItemRecord {
    let mut record = ItemRecord::from(item);
    if scale != 1.0 {
        let screen = item.bbox().to_screen(scale);
        record.left = screen.left();
        record.top = screen.top();
        record.right = screen.right();
        record.bottom = screen.bottom();
        record.width = screen.width();
        record.height = screen.height();
    }
    record
}

fn write_text(records: &[ItemRecord]) -> Result<(), i32> {
    println!("page\trow\tleft\ttop\tright\tbottom\tform\tcontent");

    for r in records {
        let row = r.row_group.map(|g| g.to_string()).unwrap_or_else(|| "-".to_string());
        let form = if r.is_form_label {
            "label"
        } else if r.is_form_value {
            "value"
        } else {
            "-"
        };
        println!(
            "{}\t{}\t{:.2}\t{:.2}\t{:.2}\t{:.2}\t{}\t{}",
            r.page, row, r.left, r.top, r.right, r.bottom, form, r.content,
        );
    }

    Ok(())
}

fn write_csv(records: &[ItemRecord]) -> Result<(), i32> {
    println!("{}", ItemRecord::csv_header());
    for r in records {
        println!("{}", r.to_csv_row());
    }
    Ok(())
}
