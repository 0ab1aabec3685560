//! Status invariant: the status is always the one derived from the slots
//! and the wrong count.

use super::super::GameState;
use super::super::rules::derive_status;
use super::Invariant;

/// Invariant: status agrees with the board.
pub struct StatusConsistent;

impl Invariant<GameState> for StatusConsistent {
    fn holds(state: &GameState) -> bool {
        state.status() == derive_status(state)
    }

    fn description() -> &'static str {
        "Status agrees with revealed slots and wrong count"
    }
}
