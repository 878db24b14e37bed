//! Output module for crawl results and API payloads
//!
//! This module handles:
//! - The `CrawlResult` / `FontUsage` records a crawl accumulates
//! - The failure payload the API answers with
//! - Per-crawl statistics reported in the logs

pub mod stats;
mod types;

pub use stats::{CrawlStatistics, PageFontReport};
pub use types::{CrawlResult, ErrorResponse, FontUsage};
