//! Owned, serializable projection of a session.

use hotseat_core::{
    GameSession, MatchTally, RulesEngine, SelectionState, SessionClock, SessionFlags, Side,
    Square, board_rows,
};
use serde::{Deserialize, Serialize};

/// Everything a view needs to draw one frame.
///
/// `board` holds eight rank strings from rank 8 down to rank 1, one
/// character per file: uppercase White, lowercase Black, `.` empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotView {
    /// Ranks 8 to 1.
    pub board: Vec<String>,
    /// Side to move.
    pub active_side: Side,
    /// Move-input state.
    pub selection: SelectionState,
    /// Turn clock.
    pub clock: SessionClock,
    /// Pause and game-over flags.
    pub flags: SessionFlags,
    /// Match results so far.
    pub tally: MatchTally,
    /// Seconds each turn starts with.
    pub turn_budget: u32,
}

impl SnapshotView {
    /// Captures the current state of a session.
    pub fn capture<R: RulesEngine>(session: &GameSession<R>) -> Self {
        let snapshot = session.snapshot();
        Self {
            board: board_rows(session.rules(), snapshot.position),
            active_side: snapshot.active_side,
            selection: snapshot.selection.clone(),
            clock: snapshot.clock,
            flags: snapshot.flags,
            tally: snapshot.tally,
            turn_budget: snapshot.turn_budget,
        }
    }

    /// Piece letter on a square, `None` if empty.
    pub fn symbol_at(&self, square: Square) -> Option<char> {
        let row = self.board.get(usize::from(7 - square.rank()))?;
        row.chars()
            .nth(usize::from(square.file()))
            .filter(|c| *c != '.')
    }

    /// One-line status: side to move, clock, pause or result.
    pub fn status_line(&self) -> String {
        if let Some(reason) = self.flags.over_reason() {
            return format!("Game over: {} ({} to move)", reason, self.active_side);
        }
        if self.flags.is_paused() {
            return format!(
                "Paused - {} has {}s",
                self.active_side,
                self.clock.remaining_seconds()
            );
        }
        format!(
            "{} to move - {}s",
            self.active_side,
            self.clock.remaining_seconds()
        )
    }
}
