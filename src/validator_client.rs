//! Validator seam between a session and the guess validator.
//!
//! [`LocalValidator`] answers in-process. [`HttpValidator`] performs the
//! round trip to a validation server.

use crate::games::hangman::{Letter, Matches, TargetWord, matches_in};
use crate::protocol::{VALIDATE_PATH, ValidateRequest, ValidateResponse};
use async_trait::async_trait;
use derive_more::{Display, Error, From};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// A validation round trip did not complete.
#[derive(Debug, Display, Error, From)]
pub enum TransportError {
    /// The request could not be sent, timed out, or the body did not decode.
    #[display("Request failed: {}", _0)]
    #[from]
    Request(reqwest::Error),

    /// The server answered with a failure response.
    #[display("Server rejected request ({}): {}", status, message)]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Error message from the response body.
        message: String,
    },

    /// A success response carried no `matches` field.
    #[display("Response is missing matches")]
    MissingMatches,
}

/// Answers "where does this letter occur in the word".
#[async_trait]
pub trait GuessValidator: Send + Sync {
    /// Returns the positions of `letter` in `word`.
    async fn validate(&self, word: &TargetWord, letter: Letter) -> Result<Matches, TransportError>;
}

/// Validator that runs in the calling process.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalValidator;

#[async_trait]
impl GuessValidator for LocalValidator {
    async fn validate(&self, word: &TargetWord, letter: Letter) -> Result<Matches, TransportError> {
        Ok(matches_in(word, letter.as_char()))
    }
}

/// Validator backed by a remote validation server.
#[derive(Debug, Clone)]
pub struct HttpValidator {
    url: String,
    client: reqwest::Client,
}

impl HttpValidator {
    /// Creates a client for the server at `base_url`.
    #[instrument(skip_all, fields(base_url = %base_url.as_ref()))]
    pub fn new(base_url: impl AsRef<str>, timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let url = format!("{}{}", base_url.as_ref().trim_end_matches('/'), VALIDATE_PATH);
        debug!(%url, ?timeout, "Created validation client");
        Ok(Self { url, client })
    }

    /// Full URL of the validation endpoint.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl GuessValidator for HttpValidator {
    #[instrument(skip(self, word), fields(url = %self.url))]
    async fn validate(&self, word: &TargetWord, letter: Letter) -> Result<Matches, TransportError> {
        let response = self
            .client
            .post(&self.url)
            .json(&ValidateRequest::for_guess(word, letter))
            .send()
            .await?;

        let status = response.status();
        let body: ValidateResponse = response.json().await?;
        debug!(%status, ok = body.ok, "Got validation response");

        if !status.is_success() || !body.ok {
            let message = body.error.unwrap_or_default();
            warn!(%status, %message, "Validation rejected");
            return Err(TransportError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        body.matches
            .map(Matches::new)
            .ok_or(TransportError::MissingMatches)
    }
}
