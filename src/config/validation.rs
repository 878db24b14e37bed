use crate::config::types::{Config, CrawlerConfig, PopularConfig, ServerConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Hard ceiling on pages per crawl, whatever the config asks for
const PAGE_LIMIT_CEILING: usize = 10_000;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_server_config(&config.server)?;
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_popular_config(&config.popular)?;
    Ok(())
}

/// Validates server configuration
fn validate_server_config(config: &ServerConfig) -> Result<(), ConfigError> {
    if config.host.trim().is_empty() {
        return Err(ConfigError::Validation("host cannot be empty".to_string()));
    }

    if config.port == 0 {
        return Err(ConfigError::Validation("port must be non-zero".to_string()));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_page_limit < 1 || config.max_page_limit > PAGE_LIMIT_CEILING {
        return Err(ConfigError::Validation(format!(
            "max_page_limit must be between 1 and {}, got {}",
            PAGE_LIMIT_CEILING, config.max_page_limit
        )));
    }

    if config.default_page_limit < 1 || config.default_page_limit > config.max_page_limit {
        return Err(ConfigError::Validation(format!(
            "default_page_limit must be between 1 and max_page_limit ({}), got {}",
            config.max_page_limit, config.default_page_limit
        )));
    }

    if config.fetch_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "fetch_timeout_secs must be >= 1, got {}",
            config.fetch_timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect_timeout_secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates the popular-sites listing configuration
fn validate_popular_config(config: &PopularConfig) -> Result<(), ConfigError> {
    let endpoint = Url::parse(&config.endpoint)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid popular endpoint: {}", e)))?;

    if endpoint.scheme() != "http" && endpoint.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Popular endpoint '{}' must use HTTP or HTTPS",
            config.endpoint
        )));
    }

    if config.pages < 1 || config.pages > 20 {
        return Err(ConfigError::Validation(format!(
            "popular pages must be between 1 and 20, got {}",
            config.pages
        )));
    }

    if config.page_size < 1 || config.page_size > 100 {
        return Err(ConfigError::Validation(format!(
            "popular page_size must be between 1 and 100, got {}",
            config.page_size
        )));
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact_email cannot be empty".to_string(),
        ));
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    };

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}
