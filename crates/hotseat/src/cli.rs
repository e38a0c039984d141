//! Command-line interface for hotseat.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Hotseat - two players, one board, a clock per turn
#[derive(Parser, Debug)]
#[command(name = "hotseat")]
#[command(about = "Same-device chess with a per-turn clock", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML session config
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Seconds per turn, overriding the config file
    #[arg(long, global = true)]
    pub turn_budget: Option<u32>,

    /// Subcommand to run (defaults to play)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Play in the terminal UI
    Play,

    /// Replay a command script and print a JSON snapshot per command
    Script {
        /// Script file; reads stdin if not provided
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}
