use std::fs;
use std::path::Path;

use layoutgrid_core::{ContentItem, LayoutEngine, LayoutOptions};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::input::InputDocument;
use crate::page_range::parse_page_range;

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise each `-v` raises the level from
/// `warn` through `info` and `debug` to `trace`.
pub fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        })
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Read and normalize the blocks in `file` with user-friendly error messages.
///
/// Returns `Err(1)` with a message printed to stderr if the file is missing,
/// is not valid block JSON, or holds a block that cannot be normalized.
pub fn load_items(file: &Path) -> Result<Vec<ContentItem>, i32> {
    if !file.exists() {
        eprintln!("Error: file not found: {}", file.display());
        return Err(1);
    }

    let text = fs::read_to_string(file).map_err(|e| {
        eprintln!("Error: failed to read {}: {e}", file.display());
        1
    })?;

    let document: InputDocument = serde_json::from_str(&text).map_err(|e| {
        eprintln!("Error: failed to parse {}: {e}", file.display());
        1
    })?;

    let items = document.into_items().map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;
    info!(count = items.len(), file = %file.display(), "loaded blocks");
    Ok(items)
}

/// Place every item, in document order, on a fresh engine.
pub fn build_engine(items: Vec<ContentItem>, options: LayoutOptions) -> Result<LayoutEngine, i32> {
    let mut engine = LayoutEngine::with_options(options).map_err(|e| {
        eprintln!("Error: {e}");
        1
    })?;
    for item in items {
        engine.add_item(item);
    }
    debug!(pages = engine.page_numbers().len(), items = engine.len(), "layout complete");
    Ok(engine)
}

/// Resolve an optional page range string into page numbers.
///
/// If `pages` is `None`, returns every page the engine holds, ascending.
pub fn resolve_pages(pages: Option<&str>, engine: &LayoutEngine) -> Result<Vec<u32>, i32> {
    let known = engine.page_numbers();
    match pages {
        Some(range) => parse_page_range(range, &known).map_err(|e| {
            eprintln!("Error: {e}");
            1
        }),
        None => Ok(known),
    }
}

/// Serialize `value` as JSON on stdout.
pub fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<(), i32> {
    let json = serde_json::to_string(value).map_err(|e| {
        eprintln!("Error: failed to serialize output: {e}");
        1
    })?;
    println!("{json}");
    Ok(())
}
