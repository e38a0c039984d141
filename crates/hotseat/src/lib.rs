//! Hotseat - terminal front end for same-device chess
//!
//! Wraps a [`hotseat_core::GameSession`] in the pieces needed to play it:
//!
//! - **Config**: [`SessionConfig`], TOML with defaults
//! - **Commands**: [`SessionCommand`], the input vocabulary shared by every front end
//! - **View**: [`SnapshotView`], an owned JSON-ready frame of the session
//! - **Host**: [`SessionHost`], a tokio task that owns the session and its timer
//! - **Script**: [`run_script`], replays command files and prints snapshots
//! - **TUI**: [`run_tui`], mouse and keyboard play in the terminal
//!
//! # Example
//!
//! ```
//! use hotseat::{SessionConfig, run_script};
//! use hotseat_core::{ChessRules, GameSession};
//!
//! let config = SessionConfig::default();
//! let mut session = GameSession::new(ChessRules::new(), *config.turn_budget_secs());
//! let mut out = Vec::new();
//! let summary = run_script(&mut session, "click e2\nclick e4\n".as_bytes(), &mut out)?;
//! assert_eq!(summary.applied, 2);
//! # Ok::<(), anyhow::Error>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod cli;
mod command;
mod config;
mod host;
mod script;
mod tui;
mod view;

// Crate-level exports - Command line
pub use cli::{Cli, Command};

// Crate-level exports - Configuration
pub use config::{ConfigError, SessionConfig};

// Crate-level exports - Session input and output
pub use command::{CommandParseError, SessionCommand};
pub use view::SnapshotView;

// Crate-level exports - Front ends
pub use host::{HostError, HostHandle, SessionHost};
pub use script::{ScriptSummary, run_script};
pub use tui::run_tui;
