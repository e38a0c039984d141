//! The rules-engine seam.
//!
//! The session never decides move legality itself. Everything it needs to
//! know about a position goes through [`RulesEngine`], so any game with
//! "select a piece, then a destination" input can drive a [`crate::GameSession`].

use crate::side::{Piece, Side};
use crate::square::Square;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Terminal condition of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TerminalStatus {
    /// Play continues.
    None,
    /// Side to move is mated.
    Checkmate,
    /// Side to move has no legal move and is not in check.
    Stalemate,
}

impl TerminalStatus {
    /// Returns true if the game cannot continue.
    pub fn is_terminal(self) -> bool {
        !matches!(self, TerminalStatus::None)
    }
}

/// Error returned by a rules engine.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum RulesError {
    /// The move is not legal in the given position.
    #[display("Illegal move {} -> {}", from, to)]
    IllegalMove {
        /// Origin square.
        from: Square,
        /// Destination square.
        to: Square,
    },
}

/// Board rules consumed by the session.
///
/// Positions are values: [`RulesEngine::apply_move`] returns a new position
/// and leaves its input untouched.
pub trait RulesEngine {
    /// Opaque position type.
    type Position: Clone + std::fmt::Debug;

    /// The standard starting position.
    fn start_position(&self) -> Self::Position;

    /// Destinations reachable by a legal move from `from`.
    ///
    /// Empty when `from` is empty or its piece cannot move.
    fn legal_moves(&self, position: &Self::Position, from: Square) -> BTreeSet<Square>;

    /// Returns true if `square` holds a piece belonging to `side`.
    fn is_own_piece(&self, position: &Self::Position, square: Square, side: Side) -> bool;

    /// Plays `from -> to`, which must be legal.
    fn apply_move(
        &self,
        position: &Self::Position,
        from: Square,
        to: Square,
    ) -> Result<Self::Position, RulesError>;

    /// Terminal condition of `position` for the side to move.
    fn terminal_status(&self, position: &Self::Position) -> TerminalStatus;

    /// The piece on `square`, for rendering.
    fn piece_at(&self, position: &Self::Position, square: Square) -> Option<Piece>;
}

/// Renders a position as eight rank strings, rank 8 first.
///
/// Pieces use [`Piece::symbol`]; empty squares are `'.'`.
pub fn board_rows<R: RulesEngine>(rules: &R, position: &R::Position) -> Vec<String> {
    (0..8u8)
        .rev()
        .map(|rank| {
            (0..8u8)
                .filter_map(|file| Square::from_coords(file, rank))
                .map(|square| {
                    rules
                        .piece_at(position, square)
                        .map_or('.', |piece| piece.symbol())
                })
                .collect()
        })
        .collect()
}
