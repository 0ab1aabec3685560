//! Wire contract for guess validation.
//!
//! Request: `{ "word": string, "guess": string }`.
//! Success: `{ "ok": true, "matches": [index, ...] }`.
//! Failure: `{ "ok": false, "error": string }` with no `matches` field.

use crate::games::hangman::{Letter, Matches, TargetWord, ValidationError, validate};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Path of the validation endpoint.
pub const VALIDATE_PATH: &str = "/api/validate";

/// Request body for guess validation.
///
/// Both fields are optional at the type level so that a missing field is
/// reported through [`ValidateResponse::failure`] rather than a framework
/// rejection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ValidateRequest {
    /// The full target word.
    #[serde(default)]
    pub word: Option<String>,
    /// A single guessed character.
    #[serde(default)]
    pub guess: Option<String>,
}

impl ValidateRequest {
    /// Builds the request a session sends for `letter`.
    pub fn for_guess(word: &TargetWord, letter: Letter) -> Self {
        Self {
            word: Some(word.to_string()),
            guess: Some(letter.to_string()),
        }
    }

    /// Checks the request and computes the matches.
    pub fn validate(&self) -> Result<Matches, ValidationError> {
        validate(self.word.as_deref(), self.guess.as_deref())
    }
}

/// Response body for guess validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ValidateResponse {
    /// Whether the request was valid.
    pub ok: bool,
    /// Ascending indices of the guess in the word. Present only on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matches: Option<Vec<usize>>,
    /// Reason for failure. Present only when `ok` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidateResponse {
    /// A successful response.
    pub fn success(matches: Matches) -> Self {
        Self {
            ok: true,
            matches: Some(matches.into_inner()),
            error: None,
        }
    }

    /// A failure response.
    pub fn failure(error: impl Display) -> Self {
        Self {
            ok: false,
            matches: None,
            error: Some(error.to_string()),
        }
    }
}

/// Liveness response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct HealthResponse {
    /// Always true while the server is up.
    pub ok: bool,
}

/// JSON Schemas of the request and response, pretty-printed.
pub fn schemas() -> serde_json::Result<String> {
    let schemas = serde_json::json!({
        "request": schemars::schema_for!(ValidateRequest),
        "response": schemars::schema_for!(ValidateResponse),
    });
    serde_json::to_string_pretty(&schemas)
}
