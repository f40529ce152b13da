//! StoryForge command-line interface
//!
//! The binary is a thin wrapper over [`commands::execute`].

pub mod cli;
pub mod commands;
pub mod logging;

pub use cli::{Cli, Commands};
pub use commands::{execute, CommandOutput};
