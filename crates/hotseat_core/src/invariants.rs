//! First-class session invariants.
//!
//! Invariants are logical properties that must hold between any two
//! session events. The session asserts them in debug builds after every
//! mutating operation; tests can check them directly.

use crate::rules::RulesEngine;
use crate::selection::SelectionState;
use crate::session::GameSession;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants checked together.
///
/// Implemented for tuples of [`Invariant`]s.
pub trait InvariantSet<S> {
    /// Checks every invariant, collecting all violations.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn collect(checks: &[(bool, &'static str)]) -> Result<(), Vec<InvariantViolation>> {
    let violations: Vec<_> = checks
        .iter()
        .filter(|(holds, _)| !holds)
        .map(|(_, description)| InvariantViolation::new(*description))
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        collect(&[
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
        ])
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        collect(&[
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
            (I3::holds(state), I3::description()),
        ])
    }
}

/// A picked-up piece belongs to the side to move and its targets are
/// exactly what the rules engine reports from its square.
pub struct SelectionMatchesRules;

impl<R: RulesEngine> Invariant<GameSession<R>> for SelectionMatchesRules {
    fn holds(session: &GameSession<R>) -> bool {
        match &session.selection {
            SelectionState::Idle => true,
            SelectionState::PieceSelected {
                square,
                legal_targets,
            } => {
                session
                    .rules
                    .is_own_piece(&session.position, *square, session.active_side)
                    && *legal_targets == session.rules.legal_moves(&session.position, *square)
            }
        }
    }

    fn description() -> &'static str {
        "Selection targets match the rules engine for the side to move"
    }
}

/// The clock runs exactly while the game is neither paused nor over.
pub struct ClockRunsOnlyWhenLive;

impl<R: RulesEngine> Invariant<GameSession<R>> for ClockRunsOnlyWhenLive {
    fn holds(session: &GameSession<R>) -> bool {
        let live = !session.flags.paused && !session.flags.over;
        session.clock.is_running() == live
    }

    fn description() -> &'static str {
        "Clock runs only while neither paused nor over"
    }
}

/// A finished game has a reason and is not paused.
pub struct OverHasReason;

impl<R: RulesEngine> Invariant<GameSession<R>> for OverHasReason {
    fn holds(session: &GameSession<R>) -> bool {
        let flags = &session.flags;
        flags.over == flags.over_reason.is_some() && !(flags.over && flags.paused)
    }

    fn description() -> &'static str {
        "Game over always carries a reason and is never paused"
    }
}

/// All session invariants as a composable set.
pub type SessionInvariants = (SelectionMatchesRules, ClockRunsOnlyWhenLive, OverHasReason);
