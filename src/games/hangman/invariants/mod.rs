//! First-class invariants for hangman.
//!
//! Invariants are logical properties that must hold after every accepted
//! transition. They are checked in debug builds and tested independently.

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

/// A set of invariants that can be checked together.
///
/// Implementations are provided for tuples of two to four invariants.
pub trait InvariantSet<S> {
    /// Checks every invariant, collecting all violations.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn check<S, I: Invariant<S>>(state: &S, violations: &mut Vec<InvariantViolation>) {
    if !I::holds(state) {
        violations.push(InvariantViolation::new(I::description()));
    }
}

fn finish(violations: Vec<InvariantViolation>) -> Result<(), Vec<InvariantViolation>> {
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
        let mut violations = Vec::new();
        check::<S, I1>(state, &mut violations);
        check::<S, I2>(state, &mut violations);
        finish(violations)
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check::<S, I1>(state, &mut violations);
        check::<S, I2>(state, &mut violations);
        check::<S, I3>(state, &mut violations);
        finish(violations)
    }
}

impl<S, I1, I2, I3, I4> InvariantSet<S> for (I1, I2, I3, I4)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
    I4: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check::<S, I1>(state, &mut violations);
        check::<S, I2>(state, &mut violations);
        check::<S, I3>(state, &mut violations);
        check::<S, I4>(state, &mut violations);
        finish(violations)
    }
}

pub mod revealed_slots;
pub mod status;
pub mod wrong_count;

pub use revealed_slots::{RevealedLettersGuessed, SlotsMatchTarget};
pub use status::StatusConsistent;
pub use wrong_count::WrongCountBounded;

/// All hangman invariants as a composable set.
pub type HangmanInvariants = (
    SlotsMatchTarget,
    RevealedLettersGuessed,
    WrongCountBounded,
    StatusConsistent,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::hangman::{GameState, MAX_WRONG, Slot, TargetWord};

    fn fresh() -> GameState {
        GameState::new(TargetWord::new("twerk").unwrap(), MAX_WRONG)
    }

    #[test]
    fn test_invariant_set_holds_for_new_game() {
        assert!(HangmanInvariants::check_all(&fresh()).is_ok());
    }

    #[test]
    fn test_invariant_set_reports_every_violation() {
        let mut state = fresh();
        state.slots_mut()[0] = Slot::Revealed('x');
        state.set_wrong(MAX_WRONG + 1);

        let violations = HangmanInvariants::check_all(&state).unwrap_err();
        assert!(violations.len() >= 3);
    }

    #[test]
    fn test_two_invariants_as_set() {
        type Two = (SlotsMatchTarget, WrongCountBounded);
        assert!(Two::check_all(&fresh()).is_ok());
    }
}
