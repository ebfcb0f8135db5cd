use crate::api::{Product, ProductPage};
use crate::session::Chip;

/// Terminal width under which the grid drops to two cards per row.
pub const NARROW_BREAKPOINT: u16 = 100;

const WIDE_COLUMNS: usize = 5;
const NARROW_COLUMNS: usize = 2;

pub fn terminal_width() -> u16 {
    crossterm::terminal::size()
        .map(|(width, _)| width)
        .unwrap_or(80)
}

pub fn columns_for_width(width: u16) -> usize {
    if width < NARROW_BREAKPOINT {
        NARROW_COLUMNS
    } else {
        WIDE_COLUMNS
    }
}

/// Two-decimal similarity score, `None` when the product has no score.
pub fn score_label(score: Option<f64>) -> Option<String> {
    score.map(|s| format!("{s:.2}"))
}

/// Count line above the grid. While a text search is active the total is
/// qualified with the search label.
pub fn header_line(total: usize, search_text: &str) -> String {
    if search_text.is_empty() {
        format!("{total} searchable products")
    } else {
        format!("show only {total} searchable products for {search_text}")
    }
}

pub fn chips_line(chips: &[Chip]) -> Option<String> {
    if chips.is_empty() {
        return None;
    }
    let labels: Vec<String> = chips.iter().map(|c| format!("[{}]", c.label())).collect();
    Some(labels.join(" "))
}

fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }
    let cut: String = value.chars().take(max.saturating_sub(1)).collect();
    format!("{cut}…")
}

/// One card, a fixed number of lines so cards align across a row. A missing
/// similarity score leaves its line empty rather than printing a blank
/// score.
fn card_lines(index: usize, product: &Product, cell_width: usize) -> Vec<String> {
    let meta = &product.product_metadata;
    let mut lines = vec![
        truncate(&format!("[{index}] {}", meta.name), cell_width),
        truncate(&meta.text, cell_width),
        truncate(&meta.image_url, cell_width),
    ];
    match score_label(product.similarity_score) {
        Some(score) => lines.push(truncate(&format!("similarity {score}"), cell_width)),
        None => lines.push(String::new()),
    }
    lines
}

/// Renders the card grid at the given terminal width. Cards are numbered
/// globally (1-based) so interactive mode can refer to them.
pub fn render_grid(page: &ProductPage, width: u16) -> String {
    if page.products.is_empty() {
        return "no products".to_string();
    }

    let columns = columns_for_width(width);
    let cell_width = (width as usize / columns).saturating_sub(2).max(16);

    let mut out = Vec::new();
    for (row_idx, row) in page.products.chunks(columns).enumerate() {
        let cards: Vec<Vec<String>> = row
            .iter()
            .enumerate()
            .map(|(i, p)| card_lines(row_idx * columns + i + 1, p, cell_width))
            .collect();

        let line_count = cards.iter().map(|c| c.len()).max().unwrap_or(0);
        for line_idx in 0..line_count {
            let mut line = String::new();
            for card in &cards {
                let cell = card.get(line_idx).map(String::as_str).unwrap_or("");
                line.push_str(&format!("{cell:<cell_width$}  "));
            }
            out.push(line.trim_end().to_string());
        }
        out.push(String::new());
    }

    out.join("\n")
}

/// Full view: header, chips, error, grid.
pub fn render_view(
    page: &ProductPage,
    chips: &[Chip],
    last_error: Option<&str>,
    search_text: &str,
    width: u16,
) -> String {
    let mut out = Vec::new();
    out.push(header_line(page.total, search_text));
    if let Some(chips) = chips_line(chips) {
        out.push(chips);
    }
    if let Some(err) = last_error {
        out.push(format!("error: {err}"));
    }
    out.push(String::new());
    out.push(render_grid(page, width));
    out.join("\n")
}
