//! StoryForge Configuration Management
//!
//! Configuration is layered, highest priority last:
//! 1. Built-in defaults
//! 2. `$CONFIG_DIR/storyforge/config.toml` (optional)
//! 3. `STORYFORGE_*` environment variables, `__` separating nested keys
//!    (`STORYFORGE_LOGGING__LEVEL=debug`)

pub mod error;
pub mod manager;
pub mod types;

pub use error::{ConfigError, Result};
pub use manager::ConfigManager;
pub use types::{GenerationConfig, LoggingConfig, ModelConfig, StoryforgeConfig};
