//! Configuration manager implementation

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use tracing::debug;

use crate::{
    error::{ConfigError, Result},
    types::{StoryforgeConfig, LOG_LEVELS},
};

/// Default environment variable prefix, e.g. `STORYFORGE_MODEL__DEFAULT_MODEL`
pub const ENV_PREFIX: &str = "STORYFORGE";

/// Loads, validates and saves [`StoryforgeConfig`]
pub struct ConfigManager {
    /// Configuration file path
    config_path: PathBuf,
    /// Environment prefix
    env_prefix: String,
}

impl ConfigManager {
    /// Create a manager for the default config location
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Create with custom config path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Override the environment variable prefix
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Path the manager reads from and writes to
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// `$CONFIG_DIR/storyforge/config.toml`
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("storyforge")
            .join("config.toml")
    }

    /// Load defaults, then the config file if present, then the environment
    pub fn load(&self) -> Result<StoryforgeConfig> {
        debug!(path = %self.config_path.display(), prefix = %self.env_prefix, "Loading configuration");

        let config = Config::builder()
            .add_source(File::from(self.config_path.clone()).required(false))
            .add_source(
                Environment::with_prefix(&self.env_prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let loaded: StoryforgeConfig = config.try_deserialize()?;
        Self::validate(&loaded)?;
        Ok(loaded)
    }

    /// Write `config` as TOML, creating parent directories
    pub fn save(&self, config: &StoryforgeConfig) -> Result<()> {
        Self::validate(config)?;
        let toml = toml::to_string_pretty(config)?;
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.config_path, toml)?;
        Ok(())
    }

    /// Check cross-field constraints
    pub fn validate(config: &StoryforgeConfig) -> Result<()> {
        if config.model.default_model.trim().is_empty() {
            return Err(ConfigError::Validation(
                "model.default_model must not be empty".to_string(),
            ));
        }

        if config.generation.min_stories == 0 {
            return Err(ConfigError::Validation(
                "generation.min_stories must be at least 1".to_string(),
            ));
        }

        if config.generation.min_stories > config.generation.max_stories {
            return Err(ConfigError::Validation(format!(
                "generation.min_stories ({}) exceeds generation.max_stories ({})",
                config.generation.min_stories, config.generation.max_stories
            )));
        }

        let level = config.logging.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "logging.level must be one of {}, got '{}'",
                LOG_LEVELS.join(", "),
                config.logging.level
            )));
        }

        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
