//! Two-click move input.
//!
//! The first click picks up one of the active side's pieces, the second
//! click either names one of its legal destinations or starts over. The
//! transition is a pure function of the current state, the clicked square
//! and two board queries, so it can be exercised without a live board.

use crate::square::Square;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Where the player is in the select-then-target protocol.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SelectionState {
    /// Nothing picked up.
    #[default]
    Idle,
    /// A piece is picked up.
    PieceSelected {
        /// Square of the picked-up piece.
        square: Square,
        /// Destinations the rules engine reported for that piece.
        legal_targets: BTreeSet<Square>,
    },
}

/// What the session should do after a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEffect {
    /// Nothing beyond the state change.
    None,
    /// Play `from -> to`; the target was in the legal set.
    AttemptMove {
        /// Origin square.
        from: Square,
        /// Destination square.
        to: Square,
    },
}

impl SelectionState {
    /// Feeds one click through the protocol.
    ///
    /// `is_own_piece` answers whether a square holds an active-side piece;
    /// `legal_moves` lists destinations from a square. `legal_moves` is only
    /// consulted when a piece actually gets picked up.
    pub fn advance<Q, L>(
        &self,
        click: Square,
        is_own_piece: Q,
        legal_moves: L,
    ) -> (SelectionState, SelectionEffect)
    where
        Q: FnOnce(Square) -> bool,
        L: FnOnce(Square) -> BTreeSet<Square>,
    {
        match self {
            SelectionState::PieceSelected {
                square,
                legal_targets,
            } if legal_targets.contains(&click) => (
                SelectionState::Idle,
                SelectionEffect::AttemptMove {
                    from: *square,
                    to: click,
                },
            ),
            // Idle, or a miss while selected: a miss drops the selection and
            // the same click may pick up another piece.
            _ => (
                Self::pick_up(click, is_own_piece, legal_moves),
                SelectionEffect::None,
            ),
        }
    }

    fn pick_up<Q, L>(click: Square, is_own_piece: Q, legal_moves: L) -> SelectionState
    where
        Q: FnOnce(Square) -> bool,
        L: FnOnce(Square) -> BTreeSet<Square>,
    {
        if is_own_piece(click) {
            SelectionState::PieceSelected {
                square: click,
                legal_targets: legal_moves(click),
            }
        } else {
            SelectionState::Idle
        }
    }

    /// Returns true if nothing is picked up.
    pub fn is_idle(&self) -> bool {
        matches!(self, SelectionState::Idle)
    }

    /// Square of the picked-up piece.
    pub fn selected_square(&self) -> Option<Square> {
        match self {
            SelectionState::Idle => None,
            SelectionState::PieceSelected { square, .. } => Some(*square),
        }
    }

    /// Destinations of the picked-up piece.
    pub fn legal_targets(&self) -> Option<&BTreeSet<Square>> {
        match self {
            SelectionState::Idle => None,
            SelectionState::PieceSelected { legal_targets, .. } => Some(legal_targets),
        }
    }
}
