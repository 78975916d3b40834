use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::{env, path::PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub recipe: RecipeConfig,
    pub media: MediaConfig,
    #[serde(default)]
    pub document: DocumentConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Public origin used to build recipe links.
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RecipeConfig {
    pub min_cooking_time: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MediaConfig {
    pub root: PathBuf,
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DocumentConfig {
    /// TrueType font for shopping lists; built-in Times Roman when unset.
    #[serde(default)]
    pub font_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
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
    /// 1. Environment variables (FOODGRAM__DATABASE__URL, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder()
            .set_default("server.base_url", "http://localhost:8000")?
            .set_default("database.url", "sqlite:foodgram.db")?
            .set_default("database.max_connections", 5)?
            .set_default("recipe.min_cooking_time", foodgram_recipe::DEFAULT_MIN_COOKING_TIME)?
            .set_default("media.root", "media")?
            .set_default("media.base_url", "http://localhost:8000/media")?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("FOODGRAM")
                .separator("__")
                .try_parsing(true),
        );

        if let Ok(database_url) = env::var("DATABASE_URL") {
            builder = builder.set_override("database.url", database_url)?;
        }

        builder.build()?.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.database.max_connections < 1 {
            return Err("Database max_connections must be at least 1".to_string());
        }
        if self.recipe.min_cooking_time < 1 {
            return Err("Recipe min_cooking_time must be at least 1".to_string());
        }
        if self.server.base_url.trim().is_empty() {
            return Err("Server base_url must not be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            server: ServerConfig {
                base_url: "http://localhost:8000".to_string(),
            },
            database: DatabaseConfig {
                url: "sqlite:test.db".to_string(),
                max_connections: 5,
            },
            recipe: RecipeConfig {
                min_cooking_time: 1,
            },
            media: MediaConfig {
                root: PathBuf::from("media"),
                base_url: "http://localhost:8000/media".to_string(),
            },
            document: DocumentConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(config().validate().is_ok());
    }

    #[test]
    fn test_validation_zero_connections() {
        let mut config = config();
        config.database.max_connections = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_cooking_time() {
        let mut config = config();
        config.recipe.min_cooking_time = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_empty_base_url() {
        let mut config = config();
        config.server.base_url = " ".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_defaults() {
        let config = Config::load(Some("missing/config.toml".to_string())).unwrap();

        assert_eq!(config.recipe.min_cooking_time, 1);
        assert_eq!(config.observability.log_level, "info");
        assert!(config.document.font_path.is_none());
    }
}
