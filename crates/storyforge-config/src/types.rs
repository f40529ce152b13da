//! Core configuration types and data structures

use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct StoryforgeConfig {
    /// Model service settings
    pub model: ModelConfig,
    /// Story generation settings
    pub generation: GenerationConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

/// Model service configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ModelConfig {
    /// Model used when a request names none
    pub default_model: String,
}

/// Story generation configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GenerationConfig {
    /// Fewest stories to ask for per requirement
    pub min_stories: u32,
    /// Most stories to ask for per requirement
    pub max_stories: u32,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive: trace, debug, info, warn or error
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            default_model: "deepseek-r1:14b".to_string(),
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            min_stories: 2,
            max_stories: 5,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Recognised log levels
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
