//! Session commands shared by the terminal UI and the script runner.

use derive_more::{Display, Error};
use hotseat_core::{GameSession, RulesEngine, SessionError, Square};
use std::str::FromStr;
use tracing::instrument;

/// One event for a [`GameSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SessionCommand {
    /// A board click.
    #[display("click {}", _0)]
    Click(Square),
    /// Pause or resume.
    #[display("pause")]
    TogglePause,
    /// Fresh match.
    #[display("new")]
    NewGame,
    /// Next game, tally kept.
    #[display("restart")]
    Restart,
    /// The side to move gives up.
    #[display("resign")]
    Resign,
    /// One second elapsed.
    #[display("tick")]
    Tick,
}

impl SessionCommand {
    /// Feeds the command to the session.
    #[instrument(skip(session), fields(command = %self))]
    pub fn apply<R: RulesEngine>(self, session: &mut GameSession<R>) -> Result<(), SessionError> {
        match self {
            Self::Click(square) => {
                session.handle_square_click(square)?;
            }
            Self::TogglePause => {
                session.toggle_pause();
            }
            Self::NewGame => session.new_game(),
            Self::Restart => session.restart(),
            Self::Resign => {
                session.resign();
            }
            Self::Tick => {
                session.tick();
            }
        }
        Ok(())
    }
}

/// A script line that is not a command.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Unrecognized command '{}': {}", line, reason)]
pub struct CommandParseError {
    /// The offending line, trimmed.
    pub line: String,
    /// What was wrong with it.
    pub reason: String,
}

impl CommandParseError {
    fn new(line: &str, reason: impl Into<String>) -> Self {
        Self {
            line: line.to_string(),
            reason: reason.into(),
        }
    }
}

impl FromStr for SessionCommand {
    type Err = CommandParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        let mut words = line.split_whitespace();
        let verb = words
            .next()
            .ok_or_else(|| CommandParseError::new(line, "empty line"))?;

        let command = match verb.to_ascii_lowercase().as_str() {
            "click" => {
                let square = words
                    .next()
                    .ok_or_else(|| CommandParseError::new(line, "click needs a square"))?;
                let square = square
                    .parse()
                    .map_err(|e| CommandParseError::new(line, format!("{}", e)))?;
                Self::Click(square)
            }
            "pause" => Self::TogglePause,
            "new" => Self::NewGame,
            "restart" => Self::Restart,
            "resign" => Self::Resign,
            "tick" => Self::Tick,
            other => {
                return Err(CommandParseError::new(
                    line,
                    format!("unknown verb '{}'", other),
                ));
            }
        };

        if words.next().is_some() {
            return Err(CommandParseError::new(line, "trailing input"));
        }
        Ok(command)
    }
}
