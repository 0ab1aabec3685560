//! First-class events for the hangman state machine.
//!
//! A guess is split into submission and resolution so that the validation
//! round trip can suspend between them without leaving the state ambiguous.

use super::types::{GameStatus, Letter, Matches};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Input to [`reduce`](super::rules::reduce).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuessEvent {
    /// A letter was submitted and is now used.
    Submitted(Letter),
    /// The validator answered for the pending letter.
    Resolved {
        /// The letter that was validated.
        letter: Letter,
        /// Where it occurs in the target word.
        matches: Matches,
    },
    /// The validation round trip did not complete.
    Abandoned {
        /// The letter that was pending.
        letter: Letter,
        /// Whether the letter stays used.
        policy: UnresolvedGuessPolicy,
    },
    /// Start over with the same target word.
    Reset,
}

/// Result of a resolved guess.
#[derive(Debug, Clone, PartialEq, Eq, Getters, derive_new::new, Serialize, Deserialize)]
pub struct GuessOutcome {
    /// The guessed letter.
    letter: Letter,
    /// Positions it was revealed at; empty on a miss.
    matches: Matches,
    /// Status after the guess was applied.
    status: GameStatus,
}

impl GuessOutcome {
    /// True when the letter occurs in the word.
    pub fn is_hit(&self) -> bool {
        !self.matches.is_empty()
    }
}

/// What to do with a letter whose validation never completed.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UnresolvedGuessPolicy {
    /// The letter stays used and cannot be submitted again.
    #[default]
    Consume,
    /// The letter is returned to play.
    Release,
}

/// A guess was refused. State is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GuessError {
    /// The game is already won or lost.
    #[display("Game is already over")]
    GameOver,

    /// The letter was submitted earlier this session.
    #[display("Letter '{}' was already guessed", _0)]
    AlreadyGuessed(#[error(not(source))] Letter),

    /// Another guess is still waiting on validation.
    #[display("Still validating '{}'", _0)]
    GuessPending(#[error(not(source))] Letter),

    /// A result arrived for a letter that is no longer pending.
    #[display("Result for '{}' is stale", _0)]
    Stale(#[error(not(source))] Letter),

    /// The validator reported a position that does not hold the letter.
    #[display("Index {} does not hold '{}'", index, letter)]
    InconsistentMatches {
        /// Offending letter.
        letter: Letter,
        /// Offending index.
        index: usize,
    },

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(#[error(not(source))] String),
}

impl GuessError {
    /// Soft rejections a player can cause by normal play.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            GuessError::GameOver | GuessError::AlreadyGuessed(_) | GuessError::GuessPending(_)
        )
    }
}
