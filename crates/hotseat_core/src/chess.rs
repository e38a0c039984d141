//! Standard chess rules backed by `shakmaty`.

use crate::rules::{RulesEngine, RulesError, TerminalStatus};
use crate::side::{Piece, PieceKind, Side};
use crate::square::Square;
use shakmaty::{Chess, Color, File, Move, Position, Role};
use std::collections::BTreeSet;
use tracing::{instrument, trace};

/// Orthodox chess.
///
/// Castling is entered as the king's two-square step (`e1` then `g1`),
/// and pawns reaching the last rank always promote to a queen.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChessRules;

impl ChessRules {
    /// Creates the rules engine.
    pub fn new() -> Self {
        Self
    }
}

fn to_shakmaty(square: Square) -> shakmaty::Square {
    shakmaty::Square::new(u32::from(square.index()))
}

fn from_shakmaty(square: shakmaty::Square) -> Option<Square> {
    u8::try_from(u32::from(square)).ok().and_then(Square::new)
}

fn side_of(color: Color) -> Side {
    match color {
        Color::White => Side::White,
        Color::Black => Side::Black,
    }
}

fn kind_of(role: Role) -> PieceKind {
    match role {
        Role::Pawn => PieceKind::Pawn,
        Role::Knight => PieceKind::Knight,
        Role::Bishop => PieceKind::Bishop,
        Role::Rook => PieceKind::Rook,
        Role::Queen => PieceKind::Queen,
        Role::King => PieceKind::King,
    }
}

/// Origin and destination as a player would click them.
fn click_pair(m: &Move) -> Option<(shakmaty::Square, shakmaty::Square)> {
    match m {
        Move::Normal { from, to, .. } => Some((*from, *to)),
        Move::EnPassant { from, to, .. } => Some((*from, *to)),
        Move::Castle { king, rook, .. } => {
            let file = if rook.file() == File::H {
                File::G
            } else {
                File::C
            };
            Some((*king, shakmaty::Square::from_coords(file, king.rank())))
        }
        Move::Put { .. } => None,
    }
}

impl RulesEngine for ChessRules {
    type Position = Chess;

    fn start_position(&self) -> Chess {
        Chess::default()
    }

    #[instrument(skip(self, position))]
    fn legal_moves(&self, position: &Chess, from: Square) -> BTreeSet<Square> {
        let origin = to_shakmaty(from);
        let targets: BTreeSet<Square> = position
            .legal_moves()
            .iter()
            .filter_map(click_pair)
            .filter(|(f, _)| *f == origin)
            .filter_map(|(_, to)| from_shakmaty(to))
            .collect();

        trace!(count = targets.len(), "Collected legal targets");
        targets
    }

    fn is_own_piece(&self, position: &Chess, square: Square, side: Side) -> bool {
        self.piece_at(position, square)
            .is_some_and(|piece| piece.side == side)
    }

    #[instrument(skip(self, position))]
    fn apply_move(&self, position: &Chess, from: Square, to: Square) -> Result<Chess, RulesError> {
        let wanted = (to_shakmaty(from), to_shakmaty(to));
        let illegal = || RulesError::IllegalMove { from, to };

        let chosen = position
            .legal_moves()
            .iter()
            .filter(|m| click_pair(m) == Some(wanted))
            .find(|m| matches!(m.promotion(), None | Some(Role::Queen)))
            .cloned()
            .ok_or_else(illegal)?;

        position.clone().play(&chosen).map_err(|_| illegal())
    }

    fn terminal_status(&self, position: &Chess) -> TerminalStatus {
        if position.is_checkmate() {
            TerminalStatus::Checkmate
        } else if position.is_stalemate() {
            TerminalStatus::Stalemate
        } else {
            TerminalStatus::None
        }
    }

    fn piece_at(&self, position: &Chess, square: Square) -> Option<Piece> {
        position
            .board()
            .piece_at(to_shakmaty(square))
            .map(|piece| Piece::new(side_of(piece.color), kind_of(piece.role)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::board_rows;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    fn play(rules: &ChessRules, position: Chess, moves: &[(&str, &str)]) -> Chess {
        moves.iter().fold(position, |pos, (from, to)| {
            rules.apply_move(&pos, sq(from), sq(to)).unwrap()
        })
    }

    #[test]
    fn test_square_conversion_round_trips() {
        for square in Square::all() {
            assert_eq!(from_shakmaty(to_shakmaty(square)), Some(square));
        }
        assert_eq!(to_shakmaty(sq("e2")), shakmaty::Square::E2);
    }

    #[test]
    fn test_pawn_targets_from_start() {
        let rules = ChessRules::new();
        let start = rules.start_position();

        let targets = rules.legal_moves(&start, sq("e2"));
        assert_eq!(targets, BTreeSet::from([sq("e3"), sq("e4")]));
    }

    #[test]
    fn test_empty_square_has_no_targets() {
        let rules = ChessRules::new();
        let start = rules.start_position();
        assert!(rules.legal_moves(&start, sq("e4")).is_empty());
    }

    #[test]
    fn test_ownership() {
        let rules = ChessRules::new();
        let start = rules.start_position();

        assert!(rules.is_own_piece(&start, sq("e2"), Side::White));
        assert!(!rules.is_own_piece(&start, sq("e2"), Side::Black));
        assert!(!rules.is_own_piece(&start, sq("e4"), Side::White));
    }

    #[test]
    fn test_apply_move_leaves_input_untouched() {
        let rules = ChessRules::new();
        let start = rules.start_position();

        let after = rules.apply_move(&start, sq("e2"), sq("e4")).unwrap();
        assert!(rules.piece_at(&start, sq("e2")).is_some());
        assert!(rules.piece_at(&after, sq("e2")).is_none());
        assert_eq!(
            rules.piece_at(&after, sq("e4")),
            Some(Piece::new(Side::White, PieceKind::Pawn))
        );
    }

    #[test]
    fn test_illegal_move_rejected() {
        let rules = ChessRules::new();
        let start = rules.start_position();

        let result = rules.apply_move(&start, sq("e2"), sq("e5"));
        assert_eq!(
            result.unwrap_err(),
            RulesError::IllegalMove {
                from: sq("e2"),
                to: sq("e5"),
            }
        );
    }

    #[test]
    fn test_castling_is_king_two_step() {
        let rules = ChessRules::new();
        let pos = play(
            &rules,
            rules.start_position(),
            &[("e2", "e4"), ("e7", "e5"), ("g1", "f3"), ("b8", "c6"), ("f1", "c4"), ("g8", "f6")],
        );

        let king_targets = rules.legal_moves(&pos, sq("e1"));
        assert!(king_targets.contains(&sq("g1")));

        let castled = rules.apply_move(&pos, sq("e1"), sq("g1")).unwrap();
        assert_eq!(
            rules.piece_at(&castled, sq("g1")),
            Some(Piece::new(Side::White, PieceKind::King))
        );
        assert_eq!(
            rules.piece_at(&castled, sq("f1")),
            Some(Piece::new(Side::White, PieceKind::Rook))
        );
    }

    #[test]
    fn test_fools_mate_is_checkmate() {
        let rules = ChessRules::new();
        let pos = play(
            &rules,
            rules.start_position(),
            &[("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")],
        );
        assert_eq!(rules.terminal_status(&pos), TerminalStatus::Checkmate);
    }

    #[test]
    fn test_start_position_rows() {
        let rules = ChessRules::new();
        let rows = board_rows(&rules, &rules.start_position());

        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0], "rnbqkbnr");
        assert_eq!(rows[1], "pppppppp");
        assert_eq!(rows[4], "........");
        assert_eq!(rows[7], "RNBQKBNR");
    }
}
