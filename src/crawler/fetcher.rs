//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the HTTP client with a proper user agent string
//! - GET requests for pages and stylesheets
//! - Classifying the outcome as success, HTTP error, or network error
//!
//! There are no retries. A failed fetch is reported to the caller, which
//! decides whether it aborts anything.

use crate::config::{Config, CrawlerConfig, UserAgentConfig};
use reqwest::Client;
use std::time::Duration;

/// Status reported for fetches that never got an HTTP response
pub const TRANSPORT_ERROR_STATUS: u16 = 502;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the resource
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Content-Type header value, if the server sent one
        content_type: Option<String>,
        /// Response body
        body: String,
    },

    /// The server answered with a non-2xx status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// No usable response (connection refused, timeout, unreadable body, ...)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The HTTP status of the outcome; network errors map to
    /// [`TRANSPORT_ERROR_STATUS`]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Success { status_code, .. } | Self::HttpError { status_code } => *status_code,
            Self::NetworkError { .. } => TRANSPORT_ERROR_STATUS,
        }
    }

    /// The body of a successful fetch, or None for any failure
    pub fn into_body(self) -> Option<String> {
        match self {
            Self::Success { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Human-readable description of a failed fetch
    pub fn failure_reason(&self) -> Option<String> {
        match self {
            Self::Success { .. } => None,
            Self::HttpError { status_code } => Some(format!("HTTP status {}", status_code)),
            Self::NetworkError { error } => Some(error.clone()),
        }
    }
}

/// Formats the user agent: `CrawlerName/Version (+ContactURL; ContactEmail)`
pub fn user_agent_string(config: &UserAgentConfig) -> String {
    format!(
        "{}/{} (+{}; {})",
        config.crawler_name, config.crawler_version, config.contact_url, config.contact_email
    )
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The user agent configuration
/// * `crawler` - The crawler configuration (timeouts)
///
/// # Example
///
/// ```no_run
/// use font_crawl::config::{CrawlerConfig, UserAgentConfig};
/// use font_crawl::crawler::build_http_client;
///
/// let user_agent = UserAgentConfig {
///     crawler_name: "FontCrawl".to_string(),
///     crawler_version: "1.0".to_string(),
///     contact_url: "https://example.com/about".to_string(),
///     contact_email: "admin@example.com".to_string(),
/// };
/// let crawler = CrawlerConfig {
///     default_page_limit: 1,
///     max_page_limit: 100,
///     fetch_timeout_secs: 20,
///     connect_timeout_secs: 10,
/// };
///
/// let client = build_http_client(&user_agent, &crawler).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    crawler: &CrawlerConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent_string(user_agent))
        .timeout(Duration::from_secs(crawler.fetch_timeout_secs))
        .connect_timeout(Duration::from_secs(crawler.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Page Fetcher: retrieves raw page or stylesheet content
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a fetcher from the `[user-agent]` and `[crawler]` sections
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(
            &config.user_agent,
            &config.crawler,
        )?))
    }

    /// The underlying client, shared with other outbound calls of the server
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Fetches a URL and classifies the outcome
    ///
    /// | Condition | Result |
    /// |-----------|--------|
    /// | 2xx + readable body | `Success` |
    /// | any other HTTP status | `HttpError` with that status |
    /// | timeout, refused connection, invalid URL, unreadable body | `NetworkError` |
    pub async fn fetch(&self, url: &str) -> FetchResult {
        match self.client.get(url).send().await {
            Ok(response) => {
                let status = response.status();
                let final_url = response.url().to_string();

                if !status.is_success() {
                    tracing::debug!("{} responded with HTTP {}", url, status.as_u16());
                    return FetchResult::HttpError {
                        status_code: status.as_u16(),
                    };
                }

                let content_type = response
                    .headers()
                    .get(reqwest::header::CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);

                match response.text().await {
                    Ok(body) => FetchResult::Success {
                        final_url,
                        status_code: status.as_u16(),
                        content_type,
                        body,
                    },
                    Err(e) => FetchResult::NetworkError {
                        error: format!("Failed to read body: {}", e),
                    },
                }
            }
            Err(e) => {
                tracing::debug!("Fetch of {} failed: {}", url, e);
                let error = if e.is_timeout() {
                    "Request timeout".to_string()
                } else if e.is_connect() {
                    "Connection refused".to_string()
                } else {
                    e.to_string()
                };
                FetchResult::NetworkError { error }
            }
        }
    }
}
