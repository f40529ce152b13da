//! Command-line argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Environment variable read when `--password` is omitted, keeping the
/// password out of argv and shell history
pub const PASSWORD_ENV: &str = "STORYFORGE_PASSWORD";

#[derive(Debug, Parser)]
#[command(name = "storyforge")]
#[command(version, about = "Turn requirements and model responses into organized user stories")]
pub struct Cli {
    /// Configuration file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Parse a model response and print the organized stories as JSON
    Parse {
        /// Response file (reads stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Print single-line JSON
        #[arg(long)]
        compact: bool,
    },
    /// Print the generation prompt for a requirement
    Prompt {
        /// Requirement text
        #[arg(short, long)]
        requirement: String,

        /// Context document files, in order
        #[arg(short, long = "context", value_name = "FILE")]
        context: Vec<PathBuf>,
    },
    /// Encrypt text under a password
    Seal {
        /// Password to derive the key from
        #[arg(short, long, env = PASSWORD_ENV, hide_env_values = true)]
        password: String,

        /// Plaintext file (reads stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Decrypt a sealed blob
    Unseal {
        #[arg(short, long, env = PASSWORD_ENV, hide_env_values = true)]
        password: String,

        /// `iv:ciphertext:tag` hex blob
        #[arg(short, long)]
        blob: String,

        /// Hex salt stored alongside the blob
        #[arg(short, long)]
        salt: String,
    },
    /// Check a password against a sealed blob
    Verify {
        #[arg(short, long, env = PASSWORD_ENV, hide_env_values = true)]
        password: String,

        #[arg(short, long)]
        blob: String,

        #[arg(short, long)]
        salt: String,
    },
}
