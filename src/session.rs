//! Game session: one authoritative hangman state plus a validator.
//!
//! A session processes one guess at a time. The engine lock is released
//! while the validator round trip is in flight; a second guess arriving in
//! that window is refused with [`GuessError::GuessPending`]. Every submission
//! is numbered, and a result only settles the submission it was issued for.

use crate::config::{ConfigError, GameConfig};
use crate::games::hangman::{
    GameState, GuessError, GuessOutcome, Hangman, Letter, TargetWord, UnresolvedGuessPolicy,
};
use crate::validator_client::{GuessValidator, TransportError};
use derive_more::{Display, Error, From};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{info, instrument, warn};

/// A guess submitted through a session failed.
#[derive(Debug, Display, Error, From)]
pub enum SessionError {
    /// The state machine refused the guess or its result.
    #[display("{}", _0)]
    Guess(GuessError),
    /// The validator round trip did not complete.
    #[display("{}", _0)]
    Transport(TransportError),
}

impl SessionError {
    /// Whether the player can simply keep playing.
    pub fn is_recoverable(&self) -> bool {
        match self {
            SessionError::Guess(e) => e.is_precondition() || matches!(e, GuessError::Stale(_)),
            SessionError::Transport(_) => true,
        }
    }
}

/// The engine plus the number of the latest submission.
#[derive(Debug)]
struct Engine {
    game: Hangman,
    ticket: u64,
}

fn lock(engine: &Mutex<Engine>) -> MutexGuard<'_, Engine> {
    engine.lock().unwrap_or_else(PoisonError::into_inner)
}

fn release_pending(game: &mut Hangman, letter: Letter, policy: UnresolvedGuessPolicy) {
    if let Err(e) = game.abandon(letter, policy) {
        info!(error = %e, "Nothing pending to abandon");
    }
}

/// A submitted guess whose round trip has not finished.
///
/// Dropping it while armed (the caller's future was cancelled) abandons the
/// guess, provided no later submission has replaced it.
struct InFlight<'a> {
    engine: &'a Mutex<Engine>,
    letter: Letter,
    ticket: u64,
    policy: UnresolvedGuessPolicy,
    armed: bool,
}

impl InFlight<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut engine = lock(self.engine);
        if engine.ticket == self.ticket {
            warn!(letter = %self.letter, policy = %self.policy, "Validation dropped before completing");
            release_pending(&mut engine.game, self.letter, self.policy);
        }
    }
}

/// One hangman game and the validator it consults.
#[derive(Debug)]
pub struct GameSession<V> {
    engine: Mutex<Engine>,
    validator: V,
    policy: UnresolvedGuessPolicy,
}

impl<V: GuessValidator> GameSession<V> {
    /// Creates a session for `word`.
    #[instrument(skip(word, validator), fields(len = word.len()))]
    pub fn new(word: TargetWord, max_wrong: u8, validator: V, policy: UnresolvedGuessPolicy) -> Self {
        info!(%policy, "Creating game session");
        Self {
            engine: Mutex::new(Engine {
                game: Hangman::new(word, max_wrong),
                ticket: 0,
            }),
            validator,
            policy,
        }
    }

    /// Creates a session from configuration.
    pub fn from_config(config: &GameConfig, validator: V) -> Result<Self, ConfigError> {
        Ok(Self::new(
            config.target_word()?,
            *config.max_wrong(),
            validator,
            *config.unresolved_guess(),
        ))
    }

    fn lock(&self) -> MutexGuard<'_, Engine> {
        lock(&self.engine)
    }

    /// A copy of the current authoritative state.
    pub fn snapshot(&self) -> GameState {
        self.lock().game.state().clone()
    }

    /// The validator this session consults.
    pub fn validator(&self) -> &V {
        &self.validator
    }

    /// The policy applied when a round trip fails.
    pub fn policy(&self) -> UnresolvedGuessPolicy {
        self.policy
    }

    /// Submits a guess, validates it, and applies the result.
    ///
    /// Dropping the returned future before it completes abandons the guess
    /// under the session policy, so play is never left blocked.
    ///
    /// # Errors
    ///
    /// - [`SessionError::Guess`] when the guess is refused before validation
    ///   (state unchanged) or when the result cannot be applied.
    /// - [`SessionError::Transport`] when the round trip fails; the letter is
    ///   then consumed or released according to the session policy.
    #[instrument(skip(self))]
    pub async fn submit_guess(&self, letter: Letter) -> Result<GuessOutcome, SessionError> {
        let (word, ticket) = {
            let mut engine = self.lock();
            engine.game.submit(letter)?;
            engine.ticket += 1;
            (engine.game.state().word().clone(), engine.ticket)
        };
        let in_flight = InFlight {
            engine: &self.engine,
            letter,
            ticket,
            policy: self.policy,
            armed: true,
        };

        let result = self.validator.validate(&word, letter).await;
        in_flight.disarm();

        let mut engine = self.lock();
        if engine.ticket != ticket {
            info!(%letter, ticket, "Discarding result for an earlier submission");
            return Err(GuessError::Stale(letter).into());
        }
        let game = &mut engine.game;
        match result {
            Ok(matches) => match game.resolve(letter, matches) {
                Ok(outcome) => Ok(outcome),
                Err(GuessError::Stale(l)) => {
                    info!(letter = %l, "Discarding result for a reset game");
                    Err(GuessError::Stale(l).into())
                }
                Err(e) => {
                    warn!(error = %e, "Validator result rejected");
                    release_pending(game, letter, self.policy);
                    Err(e.into())
                }
            },
            Err(e) => {
                warn!(error = %e, policy = %self.policy, "Validation round trip failed");
                release_pending(game, letter, self.policy);
                Err(e.into())
            }
        }
    }

    /// Restores the initial state. A guess still in flight becomes stale.
    #[instrument(skip(self))]
    pub fn reset(&self) -> Result<(), SessionError> {
        self.lock().game.reset()?;
        Ok(())
    }
}
