//! Hangman: a fixed target word, letter guesses, and a wrong-guess limit.

mod action;
mod contracts;
pub mod invariants;
mod rules;
mod types;
mod validator;

pub use action::{GuessError, GuessEvent, GuessOutcome, UnresolvedGuessPolicy};
pub use contracts::{Contract, GuessContract};
pub use rules::{Hangman, derive_status, reduce};
pub use types::{
    DEFAULT_WORD, GameState, GameStatus, Letter, LetterError, MAX_WRONG, Matches, Slot,
    TargetWord, WordError,
};
pub use validator::{ValidationError, find_matches, matches_in, validate};
