use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigResult;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> ConfigResult<Config> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration text
pub(crate) fn parse_config(content: &str) -> ConfigResult<Config> {
    let config: Config = toml::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Logged at startup so a running server can be matched to the config revision
/// it was started with.
pub fn compute_config_hash(path: &Path) -> ConfigResult<String> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> ConfigResult<(Config, String)> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const VALID_CONFIG: &str = r#"
[server]
host = "127.0.0.1"
port = 3007
request-timeout-secs = 30

[crawler]
default-page-limit = 1
max-page-limit = 50
fetch-timeout-secs = 20
connect-timeout-secs = 10

[user-agent]
crawler-name = "TestCrawler"
crawler-version = "1.0"
contact-url = "https://example.com/about"
contact-email = "admin@example.com"
"#;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let file = create_temp_config(VALID_CONFIG);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.server.port, 3007);
        assert_eq!(config.crawler.max_page_limit, 50);
        assert_eq!(config.user_agent.crawler_name, "TestCrawler");
    }

    #[test]
    fn test_popular_section_defaults() {
        let config = parse_config(VALID_CONFIG).unwrap();

        assert_eq!(config.popular.pages, 5);
        assert_eq!(config.popular.page_size, 20);
        assert_eq!(config.popular.sort, "-popularOn");
        assert!(config.popular.endpoint.starts_with("https://"));
    }

    #[test]
    fn test_popular_section_override() {
        let content = format!(
            "{}\n[popular]\nendpoint = \"http://localhost:9000/sites\"\npages = 2\n",
            VALID_CONFIG
        );
        let config = parse_config(&content).unwrap();

        assert_eq!(config.popular.endpoint, "http://localhost:9000/sites");
        assert_eq!(config.popular.pages, 2);
        assert_eq!(config.popular.page_size, 20);
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/font-crawl.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let content = VALID_CONFIG.replace("max-page-limit = 50", "max-page-limit = 0");
        let file = create_temp_config(&content);
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }

    #[test]
    fn test_compute_config_hash() {
        let file = create_temp_config("test content");

        let hash1 = compute_config_hash(file.path()).unwrap();
        let hash2 = compute_config_hash(file.path()).unwrap();

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_different_content_different_hash() {
        let file1 = create_temp_config("content 1");
        let file2 = create_temp_config("content 2");

        let hash1 = compute_config_hash(file1.path()).unwrap();
        let hash2 = compute_config_hash(file2.path()).unwrap();

        assert_ne!(hash1, hash2);
    }
}
