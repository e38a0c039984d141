//! The game session aggregate.
//!
//! A [`GameSession`] owns everything that changes during a game: the
//! position, the side to move, the move-input selection, the turn clock and
//! the pause/game-over flags. It is mutated only through its event methods;
//! views read it through [`GameSession::snapshot`].

use crate::clock::SessionClock;
use crate::invariants::{InvariantSet, SessionInvariants};
use crate::rules::{RulesEngine, RulesError, TerminalStatus};
use crate::selection::{SelectionEffect, SelectionState};
use crate::side::Side;
use crate::square::Square;
use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, error, info, instrument, warn};

/// Seconds per turn when nothing else is configured.
pub const DEFAULT_TURN_BUDGET: u32 = 30;

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum OverReason {
    /// The active side ran out of time.
    Timeout,
    /// The side that just moved delivered mate.
    Checkmate,
    /// The side that just moved left the opponent without a move.
    Stalemate,
    /// The active side gave up.
    Resigned,
}

/// Pause and game-over state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionFlags {
    pub(crate) paused: bool,
    pub(crate) over: bool,
    pub(crate) over_reason: Option<OverReason>,
}

impl SessionFlags {
    /// Returns true while paused.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Returns true once the game has ended.
    pub fn is_over(&self) -> bool {
        self.over
    }

    /// Why the game ended, if it has.
    pub fn over_reason(&self) -> Option<OverReason> {
        self.over_reason
    }
}

/// Results across the games of one match.
///
/// Survives [`GameSession::restart`], cleared by [`GameSession::new_game`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchTally {
    white_wins: u32,
    black_wins: u32,
    draws: u32,
}

impl MatchTally {
    /// Games won by White.
    pub fn white_wins(&self) -> u32 {
        self.white_wins
    }

    /// Games won by Black.
    pub fn black_wins(&self) -> u32 {
        self.black_wins
    }

    /// Drawn games.
    pub fn draws(&self) -> u32 {
        self.draws
    }

    /// Total finished games.
    pub fn games(&self) -> u32 {
        self.white_wins + self.black_wins + self.draws
    }

    fn record(&mut self, winner: Option<Side>) {
        match winner {
            Some(Side::White) => self.white_wins += 1,
            Some(Side::Black) => self.black_wins += 1,
            None => self.draws += 1,
        }
    }
}

/// What a click did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Paused, over, or nothing clickable.
    Ignored,
    /// A piece was picked up.
    Selected {
        /// Square of the piece.
        square: Square,
        /// Its legal destinations.
        targets: BTreeSet<Square>,
    },
    /// The selection was dropped.
    Deselected,
    /// A move was played and the turn passed.
    Moved {
        /// Origin square.
        from: Square,
        /// Destination square.
        to: Square,
    },
    /// A move was played and ended the game.
    GameOver {
        /// Checkmate or stalemate.
        reason: OverReason,
    },
}

/// What a clock tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Paused or over.
    Ignored,
    /// One second elapsed; seconds left.
    Counted(u32),
    /// The active side ran out of time.
    Expired,
}

/// Session failure.
///
/// Only raised when the rules engine rejects a move the session already
/// validated against the engine's own legal targets.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum SessionError {
    /// The engine refused a validated move.
    #[display("Rules engine rejected a validated move: {}", _0)]
    Rules(RulesError),
}

/// Read-only view of a session for rendering.
#[derive(Debug, Clone)]
pub struct SessionSnapshot<'a, P> {
    /// Current position.
    pub position: &'a P,
    /// Side to move.
    pub active_side: Side,
    /// Move-input state.
    pub selection: &'a SelectionState,
    /// Turn clock.
    pub clock: SessionClock,
    /// Pause and game-over flags.
    pub flags: SessionFlags,
    /// Match results so far.
    pub tally: MatchTally,
    /// Seconds each turn starts with.
    pub turn_budget: u32,
}

/// A two-player, same-device game with a per-turn clock.
#[derive(Debug, Clone)]
pub struct GameSession<R: RulesEngine> {
    pub(crate) rules: R,
    pub(crate) turn_budget: u32,
    pub(crate) position: R::Position,
    pub(crate) active_side: Side,
    pub(crate) selection: SelectionState,
    pub(crate) clock: SessionClock,
    pub(crate) flags: SessionFlags,
    pub(crate) tally: MatchTally,
}

impl<R: RulesEngine> GameSession<R> {
    /// Creates a session and starts the first game.
    #[instrument(skip(rules))]
    pub fn new(rules: R, turn_budget: u32) -> Self {
        let position = rules.start_position();
        let mut session = Self {
            rules,
            turn_budget,
            position,
            active_side: Side::White,
            selection: SelectionState::Idle,
            clock: SessionClock::new(turn_budget),
            flags: SessionFlags::default(),
            tally: MatchTally::default(),
        };
        session.new_game();
        session
    }

    /// Starts a fresh match: new game, empty tally.
    #[instrument(skip(self))]
    pub fn new_game(&mut self) {
        self.reset_game();
        self.tally = MatchTally::default();
        info!(turn_budget = self.turn_budget, "New game started");
        self.check_invariants();
    }

    /// Starts the next game of the same match, keeping the tally.
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        self.reset_game();
        info!(
            white_wins = self.tally.white_wins,
            black_wins = self.tally.black_wins,
            draws = self.tally.draws,
            "Game restarted"
        );
        self.check_invariants();
    }

    fn reset_game(&mut self) {
        self.position = self.rules.start_position();
        self.active_side = Side::White;
        self.selection = SelectionState::Idle;
        self.clock = SessionClock::new(self.turn_budget);
        self.flags = SessionFlags::default();
        self.clock.start();
    }

    /// Pauses or resumes. Returns the resulting pause flag.
    ///
    /// Does nothing once the game is over.
    #[instrument(skip(self), fields(side = %self.active_side))]
    pub fn toggle_pause(&mut self) -> bool {
        if self.flags.over {
            debug!("Game over, pause toggle ignored");
            return self.flags.paused;
        }

        self.flags.paused = !self.flags.paused;
        if self.flags.paused {
            self.clock.stop();
        } else {
            self.clock.start();
        }

        info!(
            paused = self.flags.paused,
            remaining = self.clock.remaining_seconds(),
            "Pause toggled"
        );
        self.check_invariants();
        self.flags.paused
    }

    /// Feeds one board click through the select-then-target protocol.
    ///
    /// Clicks while paused or after the game ended are ignored. An error
    /// means the rules engine refused a move it had itself listed as legal.
    #[instrument(skip(self), fields(side = %self.active_side))]
    pub fn handle_square_click(&mut self, square: Square) -> Result<ClickOutcome, SessionError> {
        if self.flags.paused || self.flags.over {
            debug!(
                paused = self.flags.paused,
                over = self.flags.over,
                "Click ignored"
            );
            return Ok(ClickOutcome::Ignored);
        }

        let was_selected = !self.selection.is_idle();
        let side = self.active_side;
        let rules = &self.rules;
        let position = &self.position;
        let (next, effect) = self.selection.advance(
            square,
            |s| rules.is_own_piece(position, s, side),
            |s| rules.legal_moves(position, s),
        );
        self.selection = next;

        let outcome = match effect {
            SelectionEffect::AttemptMove { from, to } => self.play(from, to)?,
            SelectionEffect::None => match &self.selection {
                SelectionState::PieceSelected {
                    square,
                    legal_targets,
                } => {
                    debug!(%square, targets = legal_targets.len(), "Piece selected");
                    ClickOutcome::Selected {
                        square: *square,
                        targets: legal_targets.clone(),
                    }
                }
                SelectionState::Idle if was_selected => {
                    debug!("Selection dropped");
                    ClickOutcome::Deselected
                }
                SelectionState::Idle => {
                    debug!("Nothing to select");
                    ClickOutcome::Ignored
                }
            },
        };

        self.check_invariants();
        Ok(outcome)
    }

    fn play(&mut self, from: Square, to: Square) -> Result<ClickOutcome, SessionError> {
        let next = self
            .rules
            .apply_move(&self.position, from, to)
            .map_err(|e| {
                error!(%from, %to, error = %e, "Rules engine rejected a listed move");
                e
            })?;
        self.position = next;
        info!(%from, %to, side = %self.active_side, "Move played");
        Ok(self.end_turn(from, to))
    }

    /// Terminal check first, then the turn passes.
    fn end_turn(&mut self, from: Square, to: Square) -> ClickOutcome {
        match self.rules.terminal_status(&self.position) {
            TerminalStatus::Checkmate => {
                self.finish(OverReason::Checkmate);
                ClickOutcome::GameOver {
                    reason: OverReason::Checkmate,
                }
            }
            TerminalStatus::Stalemate => {
                self.finish(OverReason::Stalemate);
                ClickOutcome::GameOver {
                    reason: OverReason::Stalemate,
                }
            }
            TerminalStatus::None => {
                self.active_side = self.active_side.opponent();
                self.clock.reset(self.turn_budget);
                self.clock.start();
                debug!(side = %self.active_side, "Turn passed");
                ClickOutcome::Moved { from, to }
            }
        }
    }

    /// Counts one second off the active side's turn.
    #[instrument(skip(self), fields(side = %self.active_side), level = "trace")]
    pub fn tick(&mut self) -> TickOutcome {
        if self.flags.paused || self.flags.over {
            return TickOutcome::Ignored;
        }

        let remaining = self.clock.tick();
        let outcome = if remaining == 0 {
            self.finish(OverReason::Timeout);
            TickOutcome::Expired
        } else {
            TickOutcome::Counted(remaining)
        };

        self.check_invariants();
        outcome
    }

    /// The active side resigns. Returns false if the game was already over.
    #[instrument(skip(self), fields(side = %self.active_side))]
    pub fn resign(&mut self) -> bool {
        if self.flags.over {
            debug!("Game already over, resignation ignored");
            return false;
        }

        self.finish(OverReason::Resigned);
        self.check_invariants();
        true
    }

    fn finish(&mut self, reason: OverReason) {
        self.flags.over = true;
        self.flags.over_reason = Some(reason);
        self.flags.paused = false;
        self.clock.stop();
        self.selection = SelectionState::Idle;

        let winner = match reason {
            OverReason::Checkmate => Some(self.active_side),
            OverReason::Stalemate => None,
            OverReason::Timeout | OverReason::Resigned => Some(self.active_side.opponent()),
        };
        self.tally.record(winner);

        info!(
            %reason,
            side = %self.active_side,
            winner = ?winner,
            "Game over"
        );
    }

    fn check_invariants(&self) {
        if cfg!(debug_assertions)
            && let Err(violations) = SessionInvariants::check_all(self)
        {
            for violation in &violations {
                warn!(invariant = %violation.description, "Session invariant violated");
            }
            debug_assert!(violations.is_empty(), "Session invariants violated");
        }
    }

    /// Borrowed view of the whole session.
    pub fn snapshot(&self) -> SessionSnapshot<'_, R::Position> {
        SessionSnapshot {
            position: &self.position,
            active_side: self.active_side,
            selection: &self.selection,
            clock: self.clock,
            flags: self.flags,
            tally: self.tally,
            turn_budget: self.turn_budget,
        }
    }

    /// The rules engine.
    pub fn rules(&self) -> &R {
        &self.rules
    }

    /// Current position.
    pub fn position(&self) -> &R::Position {
        &self.position
    }

    /// Side to move.
    pub fn active_side(&self) -> Side {
        self.active_side
    }

    /// Move-input state.
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Turn clock.
    pub fn clock(&self) -> &SessionClock {
        &self.clock
    }

    /// Pause and game-over flags.
    pub fn flags(&self) -> &SessionFlags {
        &self.flags
    }

    /// Match results.
    pub fn tally(&self) -> &MatchTally {
        &self.tally
    }

    /// Seconds each turn starts with.
    pub fn turn_budget(&self) -> u32 {
        self.turn_budget
    }
}
