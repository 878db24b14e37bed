use crate::output::{CrawlResult, FontUsage};
use std::collections::HashSet;
use url::Url;

/// Strips quotes and commas from a font-family name and trims whitespace
///
/// `"Arial"`, `'Arial'` and `Arial` all normalize to `Arial`.
pub fn normalize_font_name(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '\'' | '"' | ','))
        .collect::<String>()
        .trim()
        .to_string()
}

/// All mutable state of one crawl
///
/// Invariants:
/// - a font name is recorded at most once, attached to whichever page or
///   stylesheet introduced it first
/// - `result.font_families` only grows
#[derive(Debug, Default)]
pub struct CrawlSession {
    seen_pages: HashSet<String>,
    seen_fonts: HashSet<String>,
    result: CrawlResult,
}

impl CrawlSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a page as visited; returns false if it already was
    pub fn mark_visited(&mut self, url: &Url) -> bool {
        self.seen_pages.insert(url.as_str().to_string())
    }

    pub fn is_visited(&self, url: &Url) -> bool {
        self.seen_pages.contains(url.as_str())
    }

    /// Number of visited pages, compared against the page limit
    pub fn visited_count(&self) -> usize {
        self.seen_pages.len()
    }

    /// Records a font unless its normalized name was seen before
    ///
    /// Returns true if a new `FontUsage` was appended. Names that normalize
    /// to the empty string are ignored.
    pub fn record_font(&mut self, raw_name: &str, character_count: Option<u64>) -> bool {
        let name = normalize_font_name(raw_name);
        if name.is_empty() || self.seen_fonts.contains(&name) {
            return false;
        }

        self.seen_fonts.insert(name.clone());
        self.result.font_families.push(FontUsage {
            name,
            character_count,
        });
        true
    }

    /// The result accumulated so far
    pub fn result(&self) -> &CrawlResult {
        &self.result
    }

    /// Ends the session, handing the accumulated result to the caller
    pub fn into_result(self) -> CrawlResult {
        self.result
    }
}
