//! Statistics gathered while a crawl runs
//!
//! Nothing here is returned to API callers; the coordinator logs the totals
//! when a crawl finishes.

use std::fmt;

/// What happened to the style sources of one page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageFontReport {
    /// Fonts newly recorded from this page (all sources)
    pub fonts_recorded: usize,

    /// Stylesheets (linked or embedded) parsed
    pub stylesheets_parsed: usize,

    /// Linked stylesheets whose fetch failed or whose href did not resolve
    pub stylesheets_unavailable: usize,

    /// Stylesheets (linked or embedded) skipped because they failed to parse
    pub stylesheets_malformed: usize,
}

/// Crawl-wide totals
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStatistics {
    pub pages_visited: usize,
    pub fonts_recorded: usize,
    pub stylesheets_parsed: usize,
    pub stylesheets_unavailable: usize,
    pub stylesheets_malformed: usize,
}

impl CrawlStatistics {
    /// Folds the report of one visited page into the totals
    pub fn record_page(&mut self, report: &PageFontReport) {
        self.pages_visited += 1;
        self.fonts_recorded += report.fonts_recorded;
        self.stylesheets_parsed += report.stylesheets_parsed;
        self.stylesheets_unavailable += report.stylesheets_unavailable;
        self.stylesheets_malformed += report.stylesheets_malformed;
    }
}

impl fmt::Display for CrawlStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} pages, {} fonts, {} stylesheets parsed ({} unavailable, {} malformed)",
            self.pages_visited,
            self.fonts_recorded,
            self.stylesheets_parsed,
            self.stylesheets_unavailable,
            self.stylesheets_malformed
        )
    }
}
