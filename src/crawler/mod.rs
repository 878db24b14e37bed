//! Crawler module for page fetching and font extraction
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching of pages and stylesheets
//! - Document loading, link extraction and style source collection
//! - Font-family extraction from inline styles and CSS
//! - Breadth-first and depth-first traversal

mod coordinator;
mod document;
mod fetcher;
mod fonts;
mod parser;

pub use coordinator::{Coordinator, CrawlStrategy};
pub use document::{is_html_content_type, load_document, Document};
pub use fetcher::{build_http_client, user_agent_string, FetchResult, Fetcher, TRANSPORT_ERROR_STATUS};
pub use fonts::{
    character_count, extract_inline_fonts, font_families_in_css, font_families_in_value,
    get_page_fonts, parse_stylesheet_fonts,
};
pub use parser::{collect_style_sources, extract_links, is_followable_href, StyleSources};

use crate::config::Config;
use crate::output::CrawlResult;
use crate::FontCrawlError;
use url::Url;

/// Runs a single crawl with a coordinator built from `config`
///
/// This is the entry point of the one-shot command-line mode. It will:
/// 1. Build the HTTP client and coordinator
/// 2. Walk the site from `seed` with the given strategy
/// 3. Return the fonts found, in discovery order
///
/// # Returns
///
/// * `Ok(CrawlResult)` - Crawl completed
/// * `Err(FontCrawlError)` - A page could not be loaded
pub async fn crawl(
    config: &Config,
    seed: &Url,
    strategy: Option<CrawlStrategy>,
    page_limit: Option<usize>,
) -> Result<CrawlResult, FontCrawlError> {
    Coordinator::from_config(config)?
        .crawl(seed, strategy, page_limit)
        .await
}
