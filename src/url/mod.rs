//! URL handling module for Font-Crawl
//!
//! This module provides seed URL normalization and resolution of the
//! hrefs found on crawled pages.

mod normalize;
mod resolve;

// Re-export main functions
pub use normalize::normalize_seed_url;
pub use resolve::resolve_href;

/// Returns true for the schemes the crawler is willing to fetch
pub fn is_http_scheme(scheme: &str) -> bool {
    scheme == "http" || scheme == "https"
}
