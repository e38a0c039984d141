//! Terminal UI for hot-seat play.

mod board;
mod input;

use crate::config::SessionConfig;
use crate::host::{HostHandle, SessionHost};
use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use hotseat_core::{ChessRules, GameSession, Square};
use input::{InputAction, map_event};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::io;
use std::time::Duration;
use tracing::{error, info, instrument, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Runs the terminal UI until the players quit.
pub async fn run_tui(config: SessionConfig) -> Result<()> {
    // Log to a file so output does not corrupt the terminal
    let log_file = std::fs::File::create(config.log_file())
        .with_context(|| format!("Failed to create log file {}", config.log_file().display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(turn_budget = config.turn_budget_secs(), "Starting hotseat TUI");

    let session = GameSession::new(ChessRules::new(), *config.turn_budget_secs());
    let (handle, host) = SessionHost::spawn(
        session,
        Duration::from_millis(*config.tick_interval_ms()),
    );

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_loop(&mut terminal, handle).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // The loop dropped the last handle, so the host winds down
    if let Err(e) = host.await {
        warn!(error = %e, "Session host ended abnormally");
    }

    if let Err(err) = &res {
        error!(error = ?err, "TUI loop error");
    }
    res
}

#[instrument(skip_all)]
async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut handle: HostHandle,
) -> Result<()> {
    let mut cursor = Square::from_coords(4, 1).context("Cursor start is off the board")?;
    let mut squares = Rect::default();
    let mut redraw = true;

    loop {
        if redraw || handle.has_changed()? {
            let view = handle.snapshot_and_mark_seen();
            terminal.draw(|f| squares = board::draw(f, &view, cursor))?;
            redraw = false;
        }

        if event::poll(Duration::ZERO)? {
            let event = event::read()?;
            match map_event(&event, cursor, squares) {
                InputAction::Quit => {
                    info!("Players quit");
                    return Ok(());
                }
                InputAction::Command(command) => {
                    handle.send(command)?;
                }
                InputAction::Cursor(square) => {
                    cursor = square;
                    redraw = true;
                }
                InputAction::None => {
                    redraw = matches!(event, event::Event::Resize(..));
                }
            }
            continue;
        }

        tokio::time::sleep(POLL_INTERVAL).await;
    }
}
