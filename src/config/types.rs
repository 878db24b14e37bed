use serde::Deserialize;

/// Main configuration structure for Font-Crawl
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub popular: PopularConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Upper bound on the time spent answering one API request (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Page limit used when a request does not name one
    #[serde(rename = "default-page-limit")]
    pub default_page_limit: usize,

    /// Requests asking for more pages than this are clamped
    #[serde(rename = "max-page-limit")]
    pub max_page_limit: usize,

    /// Timeout for a single page or stylesheet fetch (seconds)
    #[serde(rename = "fetch-timeout-secs")]
    pub fetch_timeout_secs: u64,

    /// Timeout for establishing a connection (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

/// Upstream listing republished by `GET /100MostPopular`
#[derive(Debug, Clone, Deserialize)]
pub struct PopularConfig {
    /// Listing endpoint, queried with `limit`, `offset` and `sort`
    #[serde(default = "default_popular_endpoint")]
    pub endpoint: String,

    /// Number of listing pages fetched per request
    #[serde(default = "default_popular_pages")]
    pub pages: u32,

    /// Entries per listing page
    #[serde(rename = "page-size", default = "default_popular_page_size")]
    pub page_size: u32,

    /// Sort key passed through to the listing
    #[serde(default = "default_popular_sort")]
    pub sort: String,
}

impl Default for PopularConfig {
    fn default() -> Self {
        Self {
            endpoint: default_popular_endpoint(),
            pages: default_popular_pages(),
            page_size: default_popular_page_size(),
            sort: default_popular_sort(),
        }
    }
}

fn default_popular_endpoint() -> String {
    "https://webflow.com/api/discover/sites/popular".to_string()
}

fn default_popular_pages() -> u32 {
    5
}

fn default_popular_page_size() -> u32 {
    20
}

fn default_popular_sort() -> String {
    "-popularOn".to_string()
}
