//! Revealed-slot invariants: disclosed characters agree with the word and
//! with the guessed set.

use super::super::{GameState, Letter, Slot};
use super::Invariant;

/// Invariant: one slot per character, and every revealed slot holds the
/// target character at that position.
pub struct SlotsMatchTarget;

impl Invariant<GameState> for SlotsMatchTarget {
    fn holds(state: &GameState) -> bool {
        let word = state.word().chars();
        state.slots().len() == word.len()
            && state
                .slots()
                .iter()
                .zip(word)
                .all(|(slot, target)| match slot {
                    Slot::Hidden => true,
                    Slot::Revealed(c) => c == target,
                })
    }

    fn description() -> &'static str {
        "Revealed slots match the target word"
    }
}

/// Invariant: a slot is revealed only if its character was guessed.
pub struct RevealedLettersGuessed;

impl Invariant<GameState> for RevealedLettersGuessed {
    fn holds(state: &GameState) -> bool {
        state.slots().iter().all(|slot| match slot {
            Slot::Hidden => true,
            Slot::Revealed(c) => Letter::try_from(*c)
                .map(|letter| state.guessed().contains(&letter))
                .unwrap_or(false),
        })
    }

    fn description() -> &'static str {
        "Every revealed letter has been guessed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::hangman::{Hangman, MAX_WRONG, TargetWord};

    #[test]
    fn test_holds_after_correct_guess() {
        let mut game = Hangman::new(TargetWord::new("twerk").unwrap(), MAX_WRONG);
        game.guess(Letter::try_from('t').unwrap()).unwrap();
        assert!(SlotsMatchTarget::holds(game.state()));
        assert!(RevealedLettersGuessed::holds(game.state()));
    }

    #[test]
    fn test_contradictory_slot_violates() {
        let mut state = GameState::new(TargetWord::new("twerk").unwrap(), MAX_WRONG);
        state.slots_mut()[1] = Slot::Revealed('t');
        assert!(!SlotsMatchTarget::holds(&state));
    }

    #[test]
    fn test_unguessed_reveal_violates() {
        let mut state = GameState::new(TargetWord::new("twerk").unwrap(), MAX_WRONG);
        state.slots_mut()[0] = Slot::Revealed('t');
        assert!(SlotsMatchTarget::holds(&state));
        assert!(!RevealedLettersGuessed::holds(&state));
    }
}
