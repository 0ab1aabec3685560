//! Stateless guess validation.
//!
//! Comparison is exact character equality. No case folding or locale-aware
//! matching happens here; callers normalize before validating.

use super::types::{Matches, TargetWord};
use derive_more::{Display, Error};
use tracing::instrument;

/// A validation request was structurally invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum ValidationError {
    /// `word` was absent or empty.
    #[display("Missing target word")]
    MissingWord,
    /// `guess` was absent or empty.
    #[display("Missing guess")]
    MissingGuess,
    /// `guess` held more than one character.
    #[display("Guess must be a single character")]
    GuessNotSingleChar,
}

/// Returns every index `i` where `target[i] == guess`, ascending.
pub fn find_matches(target: &[char], guess: char) -> Matches {
    Matches::new(
        target
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == guess)
            .map(|(i, _)| i)
            .collect(),
    )
}

/// Matches a guess against a [`TargetWord`].
pub fn matches_in(word: &TargetWord, guess: char) -> Matches {
    find_matches(word.chars(), guess)
}

/// Checked entry point for untrusted input.
///
/// Absent and empty arguments are errors rather than an empty result.
#[instrument(level = "debug")]
pub fn validate(word: Option<&str>, guess: Option<&str>) -> Result<Matches, ValidationError> {
    let word = word
        .filter(|w| !w.is_empty())
        .ok_or(ValidationError::MissingWord)?;
    let guess = guess
        .filter(|g| !g.is_empty())
        .ok_or(ValidationError::MissingGuess)?;

    let mut chars = guess.chars();
    let guess = match (chars.next(), chars.next()) {
        (Some(c), None) => c,
        _ => return Err(ValidationError::GuessNotSingleChar),
    };

    let target: Vec<char> = word.chars().collect();
    Ok(find_matches(&target, guess))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_match() {
        assert_eq!(validate(Some("twerk"), Some("t")).unwrap().indices(), &[0]);
    }

    #[test]
    fn test_repeated_letter() {
        assert_eq!(validate(Some("banana"), Some("a")).unwrap().indices(), &[1, 3, 5]);
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        assert!(validate(Some("twerk"), Some("z")).unwrap().is_empty());
    }

    #[test]
    fn test_case_sensitive() {
        assert!(validate(Some("twerk"), Some("T")).unwrap().is_empty());
        assert_eq!(validate(Some("Twerk"), Some("T")).unwrap().indices(), &[0]);
    }

    #[test]
    fn test_missing_arguments() {
        assert_eq!(validate(None, Some("t")), Err(ValidationError::MissingWord));
        assert_eq!(validate(Some(""), Some("t")), Err(ValidationError::MissingWord));
        assert_eq!(validate(Some("twerk"), None), Err(ValidationError::MissingGuess));
        assert_eq!(validate(Some("twerk"), Some("")), Err(ValidationError::MissingGuess));
    }

    #[test]
    fn test_multi_char_guess_rejected() {
        assert_eq!(
            validate(Some("twerk"), Some("tw")),
            Err(ValidationError::GuessNotSingleChar)
        );
    }

    #[test]
    fn test_indices_count_chars_not_bytes() {
        assert_eq!(validate(Some("café!"), Some("!")).unwrap().indices(), &[4]);
    }
}
