use std::process::ExitCode;

use clap::Parser;
use storyforge_cli::{execute, logging, Cli};
use storyforge_config::ConfigManager;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let manager = match &cli.config {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new(),
    };
    let config = manager.load()?;
    logging::init(&config.logging)?;

    let output = execute(cli.command, &config, &mut std::io::stdin()).await?;
    println!("{}", output.stdout);

    Ok(if output.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
