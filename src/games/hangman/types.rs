//! Core domain types for hangman.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Wrong guesses allowed before the game is lost.
pub const MAX_WRONG: u8 = 7;

/// Target word used when no configuration overrides it.
pub const DEFAULT_WORD: &str = "twerk";

/// A single guessable letter (`a`-`z`).
///
/// Letters are lower-case by construction. Normalization happens here, on the
/// submitting side, never inside the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub struct Letter(char);

/// Input that cannot be turned into a [`Letter`].
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum LetterError {
    /// No character was supplied.
    #[display("Guess is empty")]
    Empty,
    /// More than one character was supplied.
    #[display("Guess must be a single letter, got {:?}", _0)]
    TooLong(#[error(not(source))] String),
    /// The character is outside `a`-`z`.
    #[display("{:?} is not a letter a-z", _0)]
    NotALetter(#[error(not(source))] char),
}

impl Letter {
    /// Parses raw player input, trimming whitespace and lower-casing it.
    pub fn from_input(input: &str) -> Result<Self, LetterError> {
        let mut chars = input.trim().chars();
        let first = chars.next().ok_or(LetterError::Empty)?;
        if chars.next().is_some() {
            return Err(LetterError::TooLong(input.trim().to_string()));
        }
        Self::try_from(first.to_ascii_lowercase())
    }

    /// Returns the underlying character.
    pub fn as_char(self) -> char {
        self.0
    }
}

impl TryFrom<char> for Letter {
    type Error = LetterError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        if c.is_ascii_lowercase() {
            Ok(Self(c))
        } else {
            Err(LetterError::NotALetter(c))
        }
    }
}

impl From<Letter> for char {
    fn from(letter: Letter) -> Self {
        letter.0
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The word cannot be played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum WordError {
    /// The word was empty.
    #[display("Target word must not be empty")]
    Empty,
    /// The word holds a character no [`Letter`] can reveal.
    #[display("Target word contains {:?}; only letters a-z can be guessed", _0)]
    Unguessable(#[error(not(source))] char),
}

/// The hidden word. Immutable for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TargetWord(Vec<char>);

impl TargetWord {
    /// Creates a target word from a non-empty string of letters `a-z`.
    ///
    /// Every character must be revealable by some [`Letter`], otherwise the
    /// game could never be won.
    pub fn new(word: &str) -> Result<Self, WordError> {
        if word.is_empty() {
            return Err(WordError::Empty);
        }
        if let Some(c) = word.chars().find(|c| !c.is_ascii_lowercase()) {
            return Err(WordError::Unguessable(c));
        }
        Ok(Self(word.chars().collect()))
    }

    /// Characters of the word.
    pub fn chars(&self) -> &[char] {
        &self.0
    }

    /// Number of characters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Character at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<char> {
        self.0.get(index).copied()
    }
}

impl TryFrom<String> for TargetWord {
    type Error = WordError;

    fn try_from(word: String) -> Result<Self, Self::Error> {
        Self::new(&word)
    }
}

impl From<TargetWord> for String {
    fn from(word: TargetWord) -> Self {
        word.0.into_iter().collect()
    }
}

impl fmt::Display for TargetWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|c| write!(f, "{}", c))
    }
}

/// One position of the revealed word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Slot {
    /// Not yet guessed.
    Hidden,
    /// Disclosed by a correct guess.
    Revealed(char),
}

impl Slot {
    /// Whether the slot has been disclosed.
    pub fn is_revealed(self) -> bool {
        matches!(self, Slot::Revealed(_))
    }
}

/// Current phase of a game session.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GameStatus {
    /// Guesses are accepted.
    Playing,
    /// Every slot is revealed.
    Won,
    /// The wrong count reached its limit.
    Lost,
}

impl GameStatus {
    /// Won or Lost.
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Playing)
    }
}

/// Ascending, duplicate-free positions where a guess occurs in the target word.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Matches(Vec<usize>);

impl Matches {
    /// Builds a match set, sorting and deduplicating the indices.
    pub fn new(mut indices: Vec<usize>) -> Self {
        indices.sort_unstable();
        indices.dedup();
        Self(indices)
    }

    /// The matched indices, ascending.
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// True when the guess occurs nowhere.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of matched positions.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Consumes the set, returning the indices.
    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }
}

/// Complete, authoritative state of one hangman session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    word: TargetWord,
    slots: Vec<Slot>,
    guessed: BTreeSet<Letter>,
    wrong: u8,
    max_wrong: u8,
    status: GameStatus,
    pending: Option<Letter>,
}

impl GameState {
    /// Creates a fresh game for `word`. A `max_wrong` of zero is raised to one.
    pub fn new(word: TargetWord, max_wrong: u8) -> Self {
        let slots = vec![Slot::Hidden; word.len()];
        Self {
            word,
            slots,
            guessed: BTreeSet::new(),
            wrong: 0,
            max_wrong: max_wrong.max(1),
            status: GameStatus::Playing,
            pending: None,
        }
    }

    /// The hidden word.
    pub fn word(&self) -> &TargetWord {
        &self.word
    }

    /// Revealed slots, one per character of the word.
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Letters submitted so far, alphabetical.
    pub fn guessed(&self) -> &BTreeSet<Letter> {
        &self.guessed
    }

    /// Guesses that matched nothing.
    pub fn wrong(&self) -> u8 {
        self.wrong
    }

    /// Wrong guesses allowed before the game is lost.
    pub fn max_wrong(&self) -> u8 {
        self.max_wrong
    }

    /// Current status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Letter awaiting validation, if any.
    pub fn pending(&self) -> Option<Letter> {
        self.pending
    }

    /// Whether every slot has been revealed.
    pub fn is_fully_revealed(&self) -> bool {
        self.slots.iter().all(|s| s.is_revealed())
    }

    /// The revealed word with `_` for hidden slots, e.g. `t _ _ _ _`.
    pub fn display_word(&self) -> String {
        self.slots
            .iter()
            .map(|slot| match slot {
                Slot::Hidden => "_".to_string(),
                Slot::Revealed(c) => c.to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub(super) fn mark_guessed(&mut self, letter: Letter) -> bool {
        self.guessed.insert(letter)
    }

    pub(super) fn unmark_guessed(&mut self, letter: Letter) {
        self.guessed.remove(&letter);
    }

    pub(super) fn set_pending(&mut self, pending: Option<Letter>) {
        self.pending = pending;
    }

    pub(super) fn reveal(&mut self, index: usize, c: char) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = Slot::Revealed(c);
        }
    }

    pub(super) fn record_miss(&mut self) {
        self.wrong = self.wrong.saturating_add(1).min(self.max_wrong);
    }

    pub(super) fn set_status(&mut self, status: GameStatus) {
        self.status = status;
    }

    #[cfg(test)]
    pub(crate) fn slots_mut(&mut self) -> &mut Vec<Slot> {
        &mut self.slots
    }

    #[cfg(test)]
    pub(crate) fn set_wrong(&mut self, wrong: u8) {
        self.wrong = wrong;
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guessed: String = self.guessed.iter().map(|l| l.as_char()).collect();
        write!(
            f,
            "{}  wrong {}/{}  guessed [{}]  {}",
            self.display_word(),
            self.wrong,
            self.max_wrong,
            guessed,
            self.status
        )
    }
}
