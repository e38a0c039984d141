//! Hotseat - unified CLI
//!
//! Plays in the terminal UI or replays command scripts.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use hotseat::{Cli, Command, SessionConfig, run_script, run_tui};
use hotseat_core::{ChessRules, GameSession};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = SessionConfig::load(cli.config.as_deref()).context("Failed to load config")?;
    if let Some(secs) = cli.turn_budget {
        config = config
            .with_turn_budget(secs)
            .context("Invalid --turn-budget")?;
    }

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => run_tui(config).await,
        Command::Script { input } => run_script_command(config, input),
    }
}

/// Replays a script from a file or stdin, writing snapshots to stdout.
fn run_script_command(config: SessionConfig, input: Option<PathBuf>) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let mut session = GameSession::new(ChessRules::new(), *config.turn_budget_secs());
    let stdout = io::stdout().lock();

    let summary = match input {
        Some(path) => {
            info!(path = %path.display(), "Replaying script file");
            let file = File::open(&path)
                .with_context(|| format!("Failed to open script {}", path.display()))?;
            run_script(&mut session, BufReader::new(file), stdout)?
        }
        None => {
            info!("Replaying script from stdin");
            run_script(&mut session, io::stdin().lock(), stdout)?
        }
    };

    if summary.rejected > 0 {
        info!(rejected = summary.rejected, "Some script lines were rejected");
    }
    Ok(())
}
