//! Configuration module for Font-Crawl
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use font_crawl::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("font-crawl.toml")).unwrap();
//! println!("Serving on port {}", config.server.port);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, PopularConfig, ServerConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
