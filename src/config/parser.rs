use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
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
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use linkwake::config::load_config;
///
/// let config = load_config(Path::new("config.toml")).unwrap();
/// println!("Seed: {}", config.crawler.seed_url);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[crawler]
seed-url = "https://example.com/"
max-pages = 50
concurrency = 4
deadline-secs = 120

[user-agent]
crawler-name = "TestCrawler"
crawler-version = "1.0"
contact-url = "https://example.com/about"
contact-email = "admin@example.com"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.crawler.seed_url, "https://example.com/");
        assert_eq!(config.crawler.max_pages, 50);
        assert_eq!(config.crawler.concurrency, 4);
        assert_eq!(config.crawler.deadline_secs, 120);
        // Not set in the file, falls back to the default
        assert_eq!(config.crawler.shutdown_grace_secs, 5);
        assert_eq!(config.user_agent.crawler_name, "TestCrawler");
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
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
        let config_content = r#"
[crawler]
seed-url = "https://example.com/"
max-pages = 50
concurrency = 0
deadline-secs = 120

[user-agent]
crawler-name = "TestCrawler"
crawler-version = "1.0"
contact-url = "https://example.com/about"
contact-email = "admin@example.com"
"#;

        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }
}
