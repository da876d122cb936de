use crate::fetchers::DEFAULT_USER_AGENT;
use crate::formatter::TagRules;
use crate::vocabulary::Vocabulary;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Scraper configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ScraperConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Selector and keyword tables for the DOM extractor
    #[serde(default)]
    pub vocabulary: Vocabulary,
    /// Tag derivation rules for the formatter
    #[serde(default)]
    pub tags: TagRules,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            user_agent: default_user_agent(),
            vocabulary: Vocabulary::default(),
            tags: TagRules::default(),
        }
    }
}

// Default value functions
fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl ScraperConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with REZEPT__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: REZEPT__TIMEOUT, REZEPT__USER_AGENT
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Load configuration from file and environment variables
///
/// See [`ScraperConfig::load`] for the priority order.
pub fn load_config() -> Result<ScraperConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: REZEPT__VOCABULARY__MIN_INGREDIENT_ITEMS
        .add_source(
            Environment::with_prefix("REZEPT")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
