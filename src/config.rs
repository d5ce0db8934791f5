use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use weeklist_matching::MatchPolicy;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub lists: ListsConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub menu: MenuConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ListsConfig {
    /// Stored weeks kept before completed ones start being evicted.
    #[serde(default = "default_max_weeks")]
    pub max_weeks: usize,
}

impl Default for ListsConfig {
    fn default() -> Self {
        Self {
            max_weeks: default_max_weeks(),
        }
    }
}

fn default_max_weeks() -> usize {
    weeklist_shopping::DEFAULT_MAX_WEEKS
}

#[derive(Debug, Deserialize, Clone)]
pub struct MatchingConfig {
    #[serde(default = "default_max_key_words")]
    pub max_key_words: usize,
    #[serde(default = "default_min_shared_words")]
    pub min_shared_words: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            max_key_words: default_max_key_words(),
            min_shared_words: default_min_shared_words(),
        }
    }
}

impl MatchingConfig {
    pub fn policy(&self) -> MatchPolicy {
        MatchPolicy {
            max_key_words: self.max_key_words,
            min_shared_words: self.min_shared_words,
        }
    }
}

fn default_max_key_words() -> usize {
    weeklist_matching::MAX_KEY_WORDS
}

fn default_min_shared_words() -> usize {
    weeklist_matching::MIN_SHARED_WORDS
}

#[derive(Debug, Deserialize, Clone)]
pub struct MenuConfig {
    #[serde(default = "default_menu_dir")]
    pub dir: String,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            dir: default_menu_dir(),
        }
    }
}

fn default_menu_dir() -> String {
    "./menus".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (WEEKLIST__LISTS__MAX_WEEKS, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("database.url", "sqlite:weeklist.db")?
            .set_default("database.max_connections", 5)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Optional, ignored when missing
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("WEEKLIST")
                .separator("__")
                .try_parsing(true),
        );

        if let Ok(database_url) = env::var("DATABASE_URL") {
            builder = builder.set_override("database.url", database_url)?;
        }

        builder.build()?.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.lists.max_weeks == 0 {
            return Err("lists.max_weeks must be at least 1".to_string());
        }
        if self.matching.max_key_words == 0 {
            return Err("matching.max_key_words must be at least 1".to_string());
        }
        if self.matching.min_shared_words < 2 {
            return Err("matching.min_shared_words must be at least 2".to_string());
        }
        if self.database.max_connections < 1 {
            return Err("Database max_connections must be at least 1".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            database: DatabaseConfig {
                url: "sqlite:test.db".to_string(),
                max_connections: 5,
            },
            lists: ListsConfig::default(),
            matching: MatchingConfig::default(),
            menu: MenuConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }

    #[test]
    fn test_validation_valid_config() {
        let config = config();

        assert!(config.validate().is_ok());
        assert_eq!(config.lists.max_weeks, 8);
        assert_eq!(config.matching.policy(), MatchPolicy::default());
    }

    #[test]
    fn test_validation_zero_weeks() {
        let mut config = config();
        config.lists.max_weeks = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_single_shared_word() {
        let mut config = config();
        config.matching.min_shared_words = 1;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_key_words() {
        let mut config = config();
        config.matching.max_key_words = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_connections() {
        let mut config = config();
        config.database.max_connections = 0;

        assert!(config.validate().is_err());
    }
}
