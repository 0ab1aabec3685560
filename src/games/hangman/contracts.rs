//! Contract-based validation for hangman transitions.
//!
//! Preconditions decide whether an event may be applied at all; the
//! postcondition re-checks every invariant on the resulting state.

use super::action::{GuessError, GuessEvent};
use super::invariants::{HangmanInvariants, InvariantSet};
use super::types::{GameState, Letter, Matches};
use tracing::{instrument, warn};

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), GuessError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), GuessError>;
}

/// Precondition: the game accepts guesses.
pub struct GameInPlay;

impl GameInPlay {
    /// Rejects guesses once the game is won or lost.
    pub fn check(state: &GameState) -> Result<(), GuessError> {
        if state.status().is_terminal() {
            Err(GuessError::GameOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: no other guess is in flight.
pub struct NothingPending;

impl NothingPending {
    /// Rejects a submission while a prior one awaits validation.
    pub fn check(state: &GameState) -> Result<(), GuessError> {
        match state.pending() {
            Some(pending) => Err(GuessError::GuessPending(pending)),
            None => Ok(()),
        }
    }
}

/// Precondition: the letter has not been used this session.
pub struct LetterUnused;

impl LetterUnused {
    /// Rejects a second submission of the same letter.
    pub fn check(state: &GameState, letter: Letter) -> Result<(), GuessError> {
        if state.guessed().contains(&letter) {
            Err(GuessError::AlreadyGuessed(letter))
        } else {
            Ok(())
        }
    }
}

/// Precondition: a result belongs to the letter currently pending.
pub struct IsPending;

impl IsPending {
    /// Rejects results for letters that are not awaiting validation.
    pub fn check(state: &GameState, letter: Letter) -> Result<(), GuessError> {
        if state.pending() == Some(letter) {
            Ok(())
        } else {
            Err(GuessError::Stale(letter))
        }
    }
}

/// Precondition: every reported index holds the guessed letter.
pub struct MatchesAgreeWithWord;

impl MatchesAgreeWithWord {
    /// Rejects results that would reveal a wrong or out-of-range slot.
    pub fn check(state: &GameState, letter: Letter, matches: &Matches) -> Result<(), GuessError> {
        let word = state.word();
        match matches
            .indices()
            .iter()
            .find(|&&i| word.get(i) != Some(letter.as_char()))
        {
            Some(&index) => Err(GuessError::InconsistentMatches { letter, index }),
            None => Ok(()),
        }
    }
}

/// Contract for every [`GuessEvent`].
pub struct GuessContract;

impl Contract<GameState, GuessEvent> for GuessContract {
    #[instrument(level = "trace", skip(state))]
    fn pre(state: &GameState, event: &GuessEvent) -> Result<(), GuessError> {
        match event {
            GuessEvent::Submitted(letter) => {
                GameInPlay::check(state)?;
                NothingPending::check(state)?;
                LetterUnused::check(state, *letter)
            }
            GuessEvent::Resolved { letter, matches } => {
                IsPending::check(state, *letter)?;
                MatchesAgreeWithWord::check(state, *letter, matches)
            }
            GuessEvent::Abandoned { letter, .. } => IsPending::check(state, *letter),
            GuessEvent::Reset => Ok(()),
        }
    }

    fn post(_before: &GameState, after: &GameState) -> Result<(), GuessError> {
        HangmanInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            warn!(%descriptions, "Postcondition failed");
            GuessError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::hangman::{MAX_WRONG, TargetWord};

    fn letter(c: char) -> Letter {
        Letter::try_from(c).unwrap()
    }

    #[test]
    fn test_resolution_must_match_pending() {
        let state = GameState::new(TargetWord::new("twerk").unwrap(), MAX_WRONG);
        let event = GuessEvent::Resolved {
            letter: letter('t'),
            matches: Matches::new(vec![0]),
        };
        assert_eq!(GuessContract::pre(&state, &event), Err(GuessError::Stale(letter('t'))));
    }

    #[test]
    fn test_matches_must_agree_with_word() {
        let state = GameState::new(TargetWord::new("twerk").unwrap(), MAX_WRONG);
        assert!(MatchesAgreeWithWord::check(&state, letter('t'), &Matches::new(vec![0])).is_ok());
        assert_eq!(
            MatchesAgreeWithWord::check(&state, letter('t'), &Matches::new(vec![0, 1])),
            Err(GuessError::InconsistentMatches { letter: letter('t'), index: 1 })
        );
        assert_eq!(
            MatchesAgreeWithWord::check(&state, letter('t'), &Matches::new(vec![9])),
            Err(GuessError::InconsistentMatches { letter: letter('t'), index: 9 })
        );
    }

    #[test]
    fn test_reset_always_allowed() {
        let state = GameState::new(TargetWord::new("twerk").unwrap(), MAX_WRONG);
        assert!(GuessContract::pre(&state, &GuessEvent::Reset).is_ok());
    }
}
