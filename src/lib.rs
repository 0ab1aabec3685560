//! Strictly Hangman library - a type-safe hangman state machine
//!
//! The authoritative game state lives in a session; guess validation is a
//! stateless function reachable in-process or over HTTP.
//!
//! # Architecture
//!
//! - **Games**: the hangman reducer, its invariants and contracts
//! - **Protocol**: the `/api/validate` request and response bodies
//! - **Server**: axum router serving the validator
//! - **Session**: one game plus a validator, one guess in flight at a time
//!
//! # Example
//!
//! ```
//! use strictly_hangman::{GameStatus, Hangman, Letter, MAX_WRONG, TargetWord};
//!
//! let mut game = Hangman::new(TargetWord::new("twerk").unwrap(), MAX_WRONG);
//! game.guess(Letter::try_from('t').unwrap()).unwrap();
//! assert_eq!(game.state().display_word(), "t _ _ _ _");
//! assert_eq!(game.state().status(), GameStatus::Playing);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod games;
mod protocol;
mod server;
mod session;
mod terminal;
mod validator_client;

// Crate-level exports - Configuration
pub use config::{ConfigError, DEFAULT_HOST, DEFAULT_PORT, GameConfig};

// Crate-level exports - Game types
pub use games::hangman::{
    Contract, DEFAULT_WORD, GameState, GameStatus, GuessContract, GuessError, GuessEvent,
    GuessOutcome, Hangman, Letter, LetterError, MAX_WRONG, Matches, Slot, TargetWord,
    UnresolvedGuessPolicy, ValidationError, WordError, derive_status, find_matches, invariants,
    matches_in, reduce, validate,
};

// Crate-level exports - Wire contract
pub use protocol::{HealthResponse, VALIDATE_PATH, ValidateRequest, ValidateResponse, schemas};

// Crate-level exports - Server
pub use server::{bind, router, serve, serve_on};

// Crate-level exports - Sessions and validators
pub use session::{GameSession, SessionError};
pub use terminal::{render, run_play};
pub use validator_client::{GuessValidator, HttpValidator, LocalValidator, TransportError};
