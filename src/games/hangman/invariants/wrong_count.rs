//! Wrong-count invariant.

use super::super::GameState;
use super::Invariant;

/// Invariant: the wrong count never exceeds its limit.
pub struct WrongCountBounded;

impl Invariant<GameState> for WrongCountBounded {
    fn holds(state: &GameState) -> bool {
        state.wrong() <= state.max_wrong()
    }

    fn description() -> &'static str {
        "Wrong count is within [0, max_wrong]"
    }
}
