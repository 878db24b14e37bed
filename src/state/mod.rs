//! State module for tracking crawl progress
//!
//! A crawl's mutable state lives in one `CrawlSession`: the pages already
//! visited, the fonts already recorded, and the result being accumulated.
//! Sessions are created per crawl and never shared between crawls.

mod session;

pub use session::{normalize_font_name, CrawlSession};
