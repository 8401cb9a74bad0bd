use crate::config::types::{Config, CrawlerConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    let seed = Url::parse(&config.seed_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed-url '{}': {}", config.seed_url, e)))?;

    if seed.scheme() != "http" && seed.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "seed-url must use http or https, got '{}'",
            seed.scheme()
        )));
    }

    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max-pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if config.concurrency < 1 || config.concurrency > 100 {
        return Err(ConfigError::Validation(format!(
            "concurrency must be between 1 and 100, got {}",
            config.concurrency
        )));
    }

    if config.deadline_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "deadline-secs must be >= 1, got {}",
            config.deadline_secs
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler-name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler-name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact-url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Basic email shape check: one '@' with a dotted domain after it
fn validate_email(email: &str) -> Result<(), ConfigError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!(
            "contact-email '{}' is not a valid email address",
            email
        )))
    }
}
