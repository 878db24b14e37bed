//! Font-Crawl: a font-family census for websites
//!
//! This crate crawls pages starting from a seed URL, extracts every CSS
//! font-family declared on each visited page (inline styles, embedded style
//! blocks and linked stylesheets) and serves the aggregated results over a
//! small HTTP API.

pub mod config;
pub mod crawler;
pub mod output;
pub mod server;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Font-Crawl operations
#[derive(Debug, Error)]
pub enum FontCrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A page of the crawl could not be loaded as a document
    #[error("Crawl failed at {url}: {reason}")]
    CrawlFailed { url: String, reason: String },

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Stylesheet errors; a stylesheet that fails to parse contributes no fonts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CssError {
    #[error("Malformed CSS at line {line}, column {column}: {reason}")]
    Malformed {
        line: u32,
        column: u32,
        reason: String,
    },
}

/// Result type alias for Font-Crawl operations
pub type Result<T> = std::result::Result<T, FontCrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Coordinator, CrawlStrategy};
pub use output::{CrawlResult, FontUsage};
pub use state::CrawlSession;
pub use crate::url::{normalize_seed_url, resolve_href};
