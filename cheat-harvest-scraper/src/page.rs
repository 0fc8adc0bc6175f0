//! Title detail page: build-id table and cheat table.
//!
//! The page has two sections of interest, each a heading followed by a
//! `div` wrapping a table:
//!
//! ```text
//! <h2>Build ID's</h2>  <div> <table> Build ID | Version | ...
//! <h4>Cheats</h4>      <div> <table class="table"> Name | Version | Added | <ul class="cheat"><li>code</li>...
//! ```
//!
//! Column positions are fixed. Rows with fewer cells than expected are
//! skipped.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::client::HttpClient;
use crate::error::ScrapeError;

const BUILD_HEADING: &str = "Build ID's";
const CHEATS_HEADING: &str = "Cheats";
const BUILD_COLUMNS: usize = 2;
const CHEAT_COLUMNS: usize = 4;

static H2: LazyLock<Selector> = LazyLock::new(|| selector("h2"));
static H4: LazyLock<Selector> = LazyLock::new(|| selector("h4"));
static TABLE: LazyLock<Selector> = LazyLock::new(|| selector("table"));
static CHEAT_TABLE: LazyLock<Selector> = LazyLock::new(|| selector("table.table"));
static BODY_ROWS: LazyLock<Selector> = LazyLock::new(|| selector("tbody > tr"));
static CODE_LIST: LazyLock<Selector> = LazyLock::new(|| selector("ul.cheat"));
static LIST_ITEM: LazyLock<Selector> = LazyLock::new(|| selector("li"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

/// One row of the build-id table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRow {
    /// Build id exactly as published (not yet truncated)
    pub build_id: String,
    pub version: String,
}

/// One row of the cheat table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheatRow {
    /// Cheat name with enclosing brackets removed
    pub name: String,
    pub patch_version: String,
    pub date_added: Option<String>,
    pub codes: Vec<String>,
}

/// Structured content of a detail page.
///
/// `None` means the section heading was not found at all; `Some(vec![])`
/// means the heading exists but no usable rows were found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailPage {
    pub builds: Option<Vec<BuildRow>>,
    pub cheats: Option<Vec<CheatRow>>,
}

/// Anything that can produce the structured detail page for a title.
pub trait DetailSource {
    fn fetch_detail(&self, title_id: &str) -> Result<DetailPage, ScrapeError>;
}

/// The live title pages.
pub struct TinfoilSite {
    client: HttpClient,
}

impl TinfoilSite {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }
}

impl DetailSource for TinfoilSite {
    fn fetch_detail(&self, title_id: &str) -> Result<DetailPage, ScrapeError> {
        let url = self.client.endpoints().title_page_url(title_id);
        log::debug!("Fetching detail page {url}");
        let html = self.client.get_text(&url)?;
        Ok(parse_detail_page(&html))
    }
}

/// Extract the build and cheat tables from a detail page.
pub fn parse_detail_page(html: &str) -> DetailPage {
    let doc = Html::parse_document(html);
    DetailPage {
        builds: parse_builds(&doc),
        cheats: parse_cheats(&doc),
    }
}

fn parse_builds(doc: &Html) -> Option<Vec<BuildRow>> {
    let div = section_div(doc, &H2, BUILD_HEADING)?;
    let Some(table) = div.select(&TABLE).next() else {
        return Some(Vec::new());
    };

    let rows = table
        .select(&BODY_ROWS)
        .filter_map(|row| {
            let cells = cells(row);
            if cells.len() < BUILD_COLUMNS {
                return None;
            }
            Some(BuildRow {
                build_id: cell_text(cells[0]),
                version: cell_text(cells[1]),
            })
        })
        .collect();
    Some(rows)
}

fn parse_cheats(doc: &Html) -> Option<Vec<CheatRow>> {
    let div = section_div(doc, &H4, CHEATS_HEADING)?;
    let Some(table) = div.select(&CHEAT_TABLE).next() else {
        return Some(Vec::new());
    };

    let rows = table
        .select(&BODY_ROWS)
        .filter_map(|row| {
            let cells = cells(row);
            if cells.len() < CHEAT_COLUMNS {
                return None;
            }
            let date_added = cell_text(cells[2]);
            let codes = cells[3]
                .select(&CODE_LIST)
                .next()
                .map(|ul| ul.select(&LIST_ITEM).map(cell_text).collect())
                .unwrap_or_default();
            Some(CheatRow {
                name: strip_enclosing_brackets(&cell_text(cells[0])).to_string(),
                patch_version: cell_text(cells[1]),
                date_added: (!date_added.is_empty()).then_some(date_added),
                codes,
            })
        })
        .collect();
    Some(rows)
}

/// Find the heading with the given text and return the first `div` that
/// follows it as a sibling.
fn section_div<'a>(doc: &'a Html, heading: &Selector, text: &str) -> Option<ElementRef<'a>> {
    let header = doc
        .select(heading)
        .find(|h| normalize_heading(&cell_text(*h)) == text)?;
    header
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name() == "div")
}

fn cells(row: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|e| e.value().name() == "td")
        .collect()
}

/// Concatenation of the element's text nodes, each trimmed and with inner
/// whitespace runs (including source line wraps) collapsed to one space.
fn cell_text(el: ElementRef<'_>) -> String {
    el.text().map(collapse_whitespace).collect()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn normalize_heading(text: &str) -> String {
    text.replace('\u{2019}', "'")
}

/// `"[Infinite HP]"` -> `"Infinite HP"`; anything else is returned as-is.
pub fn strip_enclosing_brackets(name: &str) -> &str {
    match name.strip_prefix('[').and_then(|n| n.strip_suffix(']')) {
        Some(inner) => inner.trim(),
        None => name,
    }
}

#[cfg(test)]
#[path = "tests/page_tests.rs"]
mod tests;
