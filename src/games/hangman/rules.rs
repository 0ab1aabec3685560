//! Transition rules for hangman.
//!
//! [`reduce`] is a pure function from a state and an event to the next
//! state. [`Hangman`] owns a state and feeds events through it.

use super::action::{GuessError, GuessEvent, GuessOutcome, UnresolvedGuessPolicy};
use super::contracts::{Contract, GuessContract};
use super::types::{GameState, GameStatus, Letter, Matches, TargetWord};
use super::validator::matches_in;
use tracing::{debug, info, instrument};

/// Status implied by the slots and wrong count. Won takes priority over Lost.
pub fn derive_status(state: &GameState) -> GameStatus {
    if state.is_fully_revealed() {
        GameStatus::Won
    } else if state.wrong() >= state.max_wrong() {
        GameStatus::Lost
    } else {
        GameStatus::Playing
    }
}

/// Applies one event to a state, returning the next state.
///
/// The input state is never modified. A rejected event returns an error and
/// the caller keeps the old state.
///
/// # Errors
///
/// Returns a [`GuessError`] when a precondition fails, or, in debug builds,
/// when the resulting state violates an invariant.
#[instrument(level = "debug", skip(state), fields(status = %state.status(), wrong = state.wrong()))]
pub fn reduce(state: &GameState, event: &GuessEvent) -> Result<GameState, GuessError> {
    GuessContract::pre(state, event)?;

    let mut next = state.clone();
    match event {
        GuessEvent::Submitted(letter) => {
            next.mark_guessed(*letter);
            next.set_pending(Some(*letter));
        }
        GuessEvent::Resolved { letter, matches } => {
            next.set_pending(None);
            if matches.is_empty() {
                next.record_miss();
            } else {
                for &index in matches.indices() {
                    next.reveal(index, letter.as_char());
                }
            }
            let status = derive_status(&next);
            next.set_status(status);
        }
        GuessEvent::Abandoned { letter, policy } => {
            next.set_pending(None);
            if *policy == UnresolvedGuessPolicy::Release {
                next.unmark_guessed(*letter);
            }
        }
        GuessEvent::Reset => {
            next = GameState::new(state.word().clone(), state.max_wrong());
        }
    }

    #[cfg(debug_assertions)]
    GuessContract::post(state, &next)?;

    Ok(next)
}

/// Hangman engine owning the authoritative state of one session.
#[derive(Debug, Clone)]
pub struct Hangman {
    state: GameState,
}

impl Hangman {
    /// Creates a new game.
    #[instrument(skip(word), fields(len = word.len()))]
    pub fn new(word: TargetWord, max_wrong: u8) -> Self {
        Self {
            state: GameState::new(word, max_wrong),
        }
    }

    /// Returns the current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    fn apply(&mut self, event: GuessEvent) -> Result<(), GuessError> {
        self.state = reduce(&self.state, &event)?;
        Ok(())
    }

    /// Marks `letter` used and pending. Validation happens elsewhere.
    #[instrument(skip(self))]
    pub fn submit(&mut self, letter: Letter) -> Result<(), GuessError> {
        self.apply(GuessEvent::Submitted(letter))?;
        debug!(%letter, "Guess submitted");
        Ok(())
    }

    /// Applies the validator's answer for the pending letter.
    #[instrument(skip(self))]
    pub fn resolve(&mut self, letter: Letter, matches: Matches) -> Result<GuessOutcome, GuessError> {
        self.apply(GuessEvent::Resolved {
            letter,
            matches: matches.clone(),
        })?;
        info!(
            %letter,
            hits = matches.len(),
            wrong = self.state.wrong(),
            status = %self.state.status(),
            "Guess resolved"
        );
        Ok(GuessOutcome::new(letter, matches, self.state.status()))
    }

    /// Clears the pending letter after a failed round trip.
    #[instrument(skip(self))]
    pub fn abandon(&mut self, letter: Letter, policy: UnresolvedGuessPolicy) -> Result<(), GuessError> {
        self.apply(GuessEvent::Abandoned { letter, policy })
    }

    /// Restores the initial state for the same word.
    #[instrument(skip(self))]
    pub fn reset(&mut self) -> Result<(), GuessError> {
        self.apply(GuessEvent::Reset)?;
        info!("Game reset");
        Ok(())
    }

    /// Submits and resolves `letter` in one step using the in-process validator.
    pub fn guess(&mut self, letter: Letter) -> Result<GuessOutcome, GuessError> {
        self.submit(letter)?;
        let matches = matches_in(self.state.word(), letter.as_char());
        self.resolve(letter, matches)
    }
}
