/// Parse a page range string like "1,3-5" against the pages present in the
/// input.
///
/// Page numbers are taken as they appear in the input blocks (0 is a valid
/// page). Returns the selected pages sorted and deduplicated, or an error for
/// malformed ranges and pages that have no blocks.
pub fn parse_page_range(input: &str, known: &[u32]) -> Result<Vec<u32>, String> {
    let mut pages = Vec::new();

    for part in input.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        if let Some((start_str, end_str)) = part.split_once('-') {
            let start = parse_page(start_str)?;
            let end = parse_page(end_str)?;

            if start > end {
                return Err(format!("invalid page range: '{part}' (start after end)"));
            }

            let selected: Vec<u32> = known
                .iter()
                .copied()
                .filter(|p| (start..=end).contains(p))
                .collect();
            if selected.is_empty() {
                return Err(format!("no blocks on pages {start}-{end}"));
            }
            pages.extend(selected);
        } else {
            let page = parse_page(part)?;
            if !known.contains(&page) {
                return Err(format!("no blocks on page {page}"));
            }
            pages.push(page);
        }
    }

    if pages.is_empty() {
        return Err(format!("empty page range: '{input}'"));
    }

    pages.sort_unstable();
    pages.dedup();
    Ok(pages)
}

fn parse_page(text: &str) -> Result<u32, String> {
    text.trim()
        .parse()
        .map_err(|_| format!("invalid page number: '{}'", text.trim()))
}
