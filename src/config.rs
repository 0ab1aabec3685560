//! Game and server configuration.
//!
//! Game settings come from an optional TOML file; server settings come from
//! the environment (`PORT`, `HOST`) with command-line overrides.

use crate::games::hangman::{DEFAULT_WORD, MAX_WRONG, TargetWord, UnresolvedGuessPolicy};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Port the validation server listens on when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 4000;

/// Host the validation server binds when `HOST` is unset.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Settings for one game session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// The fixed target word.
    #[serde(default = "default_word")]
    word: String,

    /// Wrong guesses allowed before the game is lost.
    #[serde(default = "default_max_wrong")]
    max_wrong: u8,

    /// Base URL of the validation server.
    #[serde(default = "default_server_url")]
    server_url: String,

    /// Timeout for one validation round trip, in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    request_timeout_ms: u64,

    /// Whether a letter whose validation failed stays used.
    #[serde(default)]
    unresolved_guess: UnresolvedGuessPolicy,
}

fn default_word() -> String {
    DEFAULT_WORD.to_string()
}

fn default_max_wrong() -> u8 {
    MAX_WRONG
}

fn default_server_url() -> String {
    format!("http://localhost:{}", DEFAULT_PORT)
}

fn default_request_timeout_ms() -> u64 {
    5000
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            word: default_word(),
            max_wrong: default_max_wrong(),
            server_url: default_server_url(),
            request_timeout_ms: default_request_timeout_ms(),
            unresolved_guess: UnresolvedGuessPolicy::default(),
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file. Missing keys take defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(word_len = config.word.chars().count(), max_wrong = config.max_wrong, "Config loaded successfully");
        Ok(config)
    }

    /// Parses and checks configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.check()?;
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!(path = %path.as_ref().display(), "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Overrides the server URL.
    pub fn with_server_url(mut self, server_url: impl Into<String>) -> Self {
        self.server_url = server_url.into();
        self
    }

    fn check(&self) -> Result<(), ConfigError> {
        self.target_word()?;
        if self.max_wrong == 0 {
            return Err(ConfigError::new("max_wrong must be at least 1".to_string()));
        }
        Ok(())
    }

    /// The configured word as a [`TargetWord`].
    pub fn target_word(&self) -> Result<TargetWord, ConfigError> {
        TargetWord::new(&self.word).map_err(|e| ConfigError::new(e.to_string()))
    }

    /// Round-trip timeout as a [`Duration`].
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_game() {
        let config = GameConfig::default();
        assert_eq!(config.word(), "twerk");
        assert_eq!(*config.max_wrong(), 7);
        assert_eq!(config.server_url(), "http://localhost:4000");
        assert_eq!(*config.unresolved_guess(), UnresolvedGuessPolicy::Consume);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = GameConfig::from_toml("word = \"rust\"\nunresolved_guess = \"release\"\n").unwrap();
        assert_eq!(config.word(), "rust");
        assert_eq!(*config.max_wrong(), 7);
        assert_eq!(*config.unresolved_guess(), UnresolvedGuessPolicy::Release);
    }

    #[test]
    fn test_rejects_empty_word_and_zero_limit() {
        assert!(GameConfig::from_toml("word = \"\"").is_err());
        assert!(GameConfig::from_toml("max_wrong = 0").is_err());
    }
}
