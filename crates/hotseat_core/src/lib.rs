//! Hotseat core - turn, clock and move-input state for same-device play
//!
//! Two players share one board. This crate tracks whose turn it is, runs a
//! per-turn countdown, handles pausing, locks in the end of the game and
//! turns pairs of board clicks into moves.
//!
//! # Architecture
//!
//! - **Rules**: [`RulesEngine`] is the only source of move legality;
//!   [`ChessRules`] implements it for orthodox chess
//! - **Clock**: [`SessionClock`], a countdown that knows nothing about sides
//! - **Selection**: [`SelectionState`], the pure select-then-target protocol
//! - **Session**: [`GameSession`], the aggregate that wires them together
//!
//! # Example
//!
//! ```
//! use hotseat_core::{ChessRules, ClickOutcome, GameSession, Side};
//!
//! let mut session = GameSession::new(ChessRules::new(), 30);
//! session.handle_square_click("e2".parse()?)?;
//! let outcome = session.handle_square_click("e4".parse()?)?;
//!
//! assert!(matches!(outcome, ClickOutcome::Moved { .. }));
//! assert_eq!(session.active_side(), Side::Black);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod chess;
mod clock;
mod rules;
mod selection;
mod session;
mod side;
mod square;

pub mod invariants;

// Crate-level exports - Board primitives
pub use side::{Piece, PieceKind, Side};
pub use square::{Square, SquareParseError};

// Crate-level exports - Rules engine
pub use chess::ChessRules;
pub use rules::{RulesEngine, RulesError, TerminalStatus, board_rows};

// Crate-level exports - Session state machine
pub use clock::SessionClock;
pub use selection::{SelectionEffect, SelectionState};
pub use session::{
    ClickOutcome, DEFAULT_TURN_BUDGET, GameSession, MatchTally, OverReason, SessionError,
    SessionFlags, SessionSnapshot, TickOutcome,
};
