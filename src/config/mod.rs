//! Configuration loading and validation
//!
//! Configuration comes from a TOML file with kebab-case keys. Everything is
//! validated up front; a crawl never starts with out-of-range settings.

mod parser;
mod types;
mod validation;

pub use parser::load_config;
pub use types::{Config, CrawlerConfig, UserAgentConfig};
pub use validation::validate;
