//! Document helpers over `scraper`.
//!
//! Text extraction mirrors how the list pages are read by a person: every
//! text run trimmed, empty runs dropped, the rest glued together without a
//! separator.

pub mod section;

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

static WIKITABLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table.wikitable").expect("static selector"));
static ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("static selector"));
static CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("td, th").expect("static selector"));
static LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a").expect("static selector"));
static LIST_ITEM: Lazy<Selector> = Lazy::new(|| Selector::parse("li").expect("static selector"));

/// Visible text of `el` with every run trimmed.
pub fn stripped_text(el: ElementRef<'_>) -> String {
    el.text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Untrimmed visible text of `el`.
pub fn raw_text(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// First descendant `<a>` of `el`.
pub fn first_link(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.select(&LINK).next()
}

/// All list items below `el`, nested ones included.
pub fn list_items(el: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    el.select(&LIST_ITEM)
}

/// Every `table.wikitable` in the document.
pub fn wikitables(doc: &Html) -> Vec<ElementRef<'_>> {
    doc.select(&WIKITABLE).collect()
}

/// Rows of `table` after its first (header) row, each as its `td`/`th` cells.
pub fn data_rows(table: ElementRef<'_>) -> impl Iterator<Item = Vec<ElementRef<'_>>> {
    table
        .select(&ROW)
        .skip(1)
        .map(|row| row.select(&CELL).collect())
}

/// Name taken from a cell: its first link's text when it has a link,
/// otherwise the cell's own text.
pub fn cell_name(cell: ElementRef<'_>) -> String {
    match first_link(cell) {
        Some(link) => stripped_text(link),
        None => stripped_text(cell),
    }
}

/// Length in characters, which is what the name filters count.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}
