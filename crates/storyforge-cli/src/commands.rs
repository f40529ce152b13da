//! Command execution
//!
//! Commands return their output instead of printing it so they can be tested
//! without a terminal.

use std::{io::Read, path::Path, sync::Arc};

use anyhow::Context;
use storyforge_activity_log::{ActivityLogger, TracingSink};
use storyforge_config::StoryforgeConfig;
use storyforge_security::CredentialCipher;
use storyforge_stories::{build_prompt, GenerationInput, StoryGenerator, StoryLimits};
use tracing::{debug, info};

use crate::cli::Commands;

/// Project id attached to activity events raised from the command line
pub const CLI_PROJECT_ID: &str = "cli";

/// Result of running a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Text for stdout
    pub stdout: String,
    /// Whether the process should exit successfully
    pub success: bool,
}

impl CommandOutput {
    fn ok(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            success: true,
        }
    }
}

/// Run `command`, reading from `stdin` when a command needs input and no file was given
pub async fn execute(
    command: Commands,
    config: &StoryforgeConfig,
    stdin: &mut dyn Read,
) -> anyhow::Result<CommandOutput> {
    match command {
        Commands::Parse { input, compact } => {
            let response = read_input(input.as_deref(), stdin)?;
            parse_response(&response, compact).map(CommandOutput::ok)
        }
        Commands::Prompt {
            requirement,
            context,
        } => {
            let documents = context
                .iter()
                .map(|path| {
                    std::fs::read_to_string(path)
                        .with_context(|| format!("failed to read context file {}", path.display()))
                })
                .collect::<anyhow::Result<Vec<_>>>()?;

            let input = GenerationInput::from_context_documents(
                requirement,
                documents,
                Vec::new(),
                config.model.default_model.clone(),
            );
            let limits = StoryLimits {
                min: config.generation.min_stories,
                max: config.generation.max_stories,
            };
            Ok(CommandOutput::ok(build_prompt(&input, limits)))
        }
        Commands::Seal { password, input } => {
            let plaintext = read_input(input.as_deref(), stdin)?;
            let payload =
                tokio::task::spawn_blocking(move || CredentialCipher::encrypt(&plaintext, &password, None))
                    .await??;
            info!("Sealed {} bytes", payload.encrypted_data.len());
            Ok(CommandOutput::ok(serde_json::to_string_pretty(&payload)?))
        }
        Commands::Unseal {
            password,
            blob,
            salt,
        } => {
            let plaintext =
                tokio::task::spawn_blocking(move || CredentialCipher::decrypt(&blob, &password, &salt))
                    .await?;
            match plaintext {
                Some(plaintext) => Ok(CommandOutput::ok(plaintext)),
                None => anyhow::bail!("decryption failed: wrong password or corrupted data"),
            }
        }
        Commands::Verify {
            password,
            blob,
            salt,
        } => {
            let valid = tokio::task::spawn_blocking(move || {
                CredentialCipher::validate_password(&blob, &password, &salt)
            })
            .await?;
            Ok(CommandOutput {
                stdout: if valid { "valid" } else { "invalid" }.to_string(),
                success: valid,
            })
        }
    }
}

/// Parse and organize a model response, rendered as JSON
pub fn parse_response(response: &str, compact: bool) -> anyhow::Result<String> {
    let activity = ActivityLogger::new(CLI_PROJECT_ID, Arc::new(TracingSink));
    let content = StoryGenerator::process_response(response, &activity);

    let json = if compact {
        serde_json::to_string(&content.organized)?
    } else {
        serde_json::to_string_pretty(&content.organized)?
    };
    Ok(json)
}

fn read_input(path: Option<&Path>, stdin: &mut dyn Read) -> anyhow::Result<String> {
    match path {
        Some(path) => {
            debug!("Reading input from {}", path.display());
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            let mut buffer = String::new();
            stdin
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            Ok(buffer)
        }
    }
}
