//! Tests for game sessions: single guess in flight, transport failures,
//! cancelled round trips, and results that arrive after a reset.

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use strictly_hangman::{
    GameSession, GameState, GameStatus, GuessError, GuessValidator, Letter, MAX_WRONG, Matches,
    SessionError, Slot, TargetWord, TransportError, UnresolvedGuessPolicy, matches_in,
};
use tokio::sync::Notify;

fn letter(c: char) -> Letter {
    Letter::try_from(c).unwrap()
}

fn twerk() -> TargetWord {
    TargetWord::new("twerk").unwrap()
}

/// Blocks inside `validate` until released.
#[derive(Default)]
struct GatedValidator {
    entered: Notify,
    release: Notify,
}

#[async_trait]
impl GuessValidator for GatedValidator {
    async fn validate(&self, word: &TargetWord, letter: Letter) -> Result<Matches, TransportError> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok(matches_in(word, letter.as_char()))
    }
}

/// Always fails as if the server were unreachable.
#[derive(Default)]
struct FailingValidator {
    calls: AtomicUsize,
}

#[async_trait]
impl GuessValidator for FailingValidator {
    async fn validate(&self, _word: &TargetWord, _letter: Letter) -> Result<Matches, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(TransportError::MissingMatches)
    }
}

/// Never answers for one letter; answers in-process for the rest.
struct StallingValidator {
    stall: Letter,
}

#[async_trait]
impl GuessValidator for StallingValidator {
    async fn validate(&self, word: &TargetWord, letter: Letter) -> Result<Matches, TransportError> {
        if letter == self.stall {
            std::future::pending::<()>().await;
        }
        Ok(matches_in(word, letter.as_char()))
    }
}

/// Reports a position that does not hold the letter.
struct LyingValidator;

#[async_trait]
impl GuessValidator for LyingValidator {
    async fn validate(&self, _word: &TargetWord, _letter: Letter) -> Result<Matches, TransportError> {
        Ok(Matches::new(vec![9]))
    }
}

#[tokio::test]
async fn test_second_guess_rejected_while_pending() {
    let session = Arc::new(GameSession::new(
        twerk(),
        MAX_WRONG,
        GatedValidator::default(),
        UnresolvedGuessPolicy::Consume,
    ));

    let first = tokio::spawn({
        let session = Arc::clone(&session);
        async move { session.submit_guess(letter('t')).await }
    });
    session.validator().entered.notified().await;

    let err = session.submit_guess(letter('w')).await.unwrap_err();
    assert!(matches!(err, SessionError::Guess(GuessError::GuessPending(l)) if l == letter('t')));
    assert!(!session.snapshot().guessed().contains(&letter('w')));

    session.validator().release.notify_one();
    let outcome = first.await.unwrap().unwrap();
    assert!(outcome.is_hit());
    assert_eq!(session.snapshot().pending(), None);
}

#[tokio::test]
async fn test_result_after_reset_is_discarded() {
    let session = Arc::new(GameSession::new(
        twerk(),
        MAX_WRONG,
        GatedValidator::default(),
        UnresolvedGuessPolicy::Consume,
    ));

    let pending = tokio::spawn({
        let session = Arc::clone(&session);
        async move { session.submit_guess(letter('t')).await }
    });
    session.validator().entered.notified().await;

    session.reset().unwrap();
    session.validator().release.notify_one();

    let err = pending.await.unwrap().unwrap_err();
    assert!(matches!(err, SessionError::Guess(GuessError::Stale(_))));
    assert_eq!(session.snapshot(), GameState::new(twerk(), MAX_WRONG));
}

#[tokio::test]
async fn test_transport_failure_consumes_letter() {
    let session = GameSession::new(
        twerk(),
        MAX_WRONG,
        FailingValidator::default(),
        UnresolvedGuessPolicy::Consume,
    );

    let err = session.submit_guess(letter('t')).await.unwrap_err();
    assert!(matches!(err, SessionError::Transport(_)));
    assert!(err.is_recoverable());

    let state = session.snapshot();
    assert!(state.guessed().contains(&letter('t')));
    assert_eq!(state.wrong(), 0);
    assert!(state.slots().iter().all(|s| *s == Slot::Hidden));
    assert_eq!(state.pending(), None);
    assert_eq!(state.status(), GameStatus::Playing);

    let err = session.submit_guess(letter('t')).await.unwrap_err();
    assert!(matches!(err, SessionError::Guess(GuessError::AlreadyGuessed(_))));
    assert_eq!(session.validator().calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_transport_failure_release_allows_retry() {
    let session = GameSession::new(
        twerk(),
        MAX_WRONG,
        FailingValidator::default(),
        UnresolvedGuessPolicy::Release,
    );

    assert!(session.submit_guess(letter('t')).await.is_err());
    assert!(session.snapshot().guessed().is_empty());

    let err = session.submit_guess(letter('t')).await.unwrap_err();
    assert!(matches!(err, SessionError::Transport(_)));
    assert_eq!(session.validator().calls.load(Ordering::SeqCst), 2);
    assert_eq!(session.snapshot().wrong(), 0);
}

#[tokio::test]
async fn test_inconsistent_result_leaves_slots_untouched() {
    let session = GameSession::new(twerk(), MAX_WRONG, LyingValidator, UnresolvedGuessPolicy::Consume);

    let err = session.submit_guess(letter('t')).await.unwrap_err();
    assert!(matches!(
        err,
        SessionError::Guess(GuessError::InconsistentMatches { index: 9, .. })
    ));
    assert!(!err.is_recoverable());

    let state = session.snapshot();
    assert_eq!(state.pending(), None);
    assert_eq!(state.wrong(), 0);
    assert!(state.slots().iter().all(|s| *s == Slot::Hidden));
}

#[tokio::test]
async fn test_guess_after_loss_is_no_op() {
    let session = GameSession::new(
        TargetWord::new("q").unwrap(),
        1,
        strictly_hangman::LocalValidator,
        UnresolvedGuessPolicy::Consume,
    );
    session.submit_guess(letter('a')).await.unwrap();
    let lost = session.snapshot();
    assert_eq!(lost.status(), GameStatus::Lost);

    let err = session.submit_guess(letter('q')).await.unwrap_err();
    assert!(matches!(err, SessionError::Guess(GuessError::GameOver)));
    assert_eq!(session.snapshot(), lost);
}

#[tokio::test]
async fn test_timed_out_guess_does_not_block_play() {
    let session = GameSession::new(
        twerk(),
        MAX_WRONG,
        StallingValidator { stall: letter('t') },
        UnresolvedGuessPolicy::Consume,
    );

    let timed_out =
        tokio::time::timeout(Duration::from_millis(10), session.submit_guess(letter('t'))).await;
    assert!(timed_out.is_err());

    let state = session.snapshot();
    assert_eq!(state.pending(), None);
    assert!(state.guessed().contains(&letter('t')));
    assert_eq!(state.wrong(), 0);
    assert!(state.slots().iter().all(|s| *s == Slot::Hidden));

    let outcome = session.submit_guess(letter('w')).await.unwrap();
    assert!(outcome.is_hit());
    assert_eq!(session.snapshot().display_word(), "_ w _ _ _");
}

#[tokio::test]
async fn test_aborted_guess_released_under_release_policy() {
    let session = Arc::new(GameSession::new(
        twerk(),
        MAX_WRONG,
        GatedValidator::default(),
        UnresolvedGuessPolicy::Release,
    ));

    let task = tokio::spawn({
        let session = Arc::clone(&session);
        async move { session.submit_guess(letter('t')).await }
    });
    session.validator().entered.notified().await;
    task.abort();
    assert!(task.await.unwrap_err().is_cancelled());

    let state = session.snapshot();
    assert_eq!(state.pending(), None);
    assert!(state.guessed().is_empty());
}

#[tokio::test]
async fn test_earlier_result_does_not_settle_resubmitted_letter() {
    let session = Arc::new(GameSession::new(
        twerk(),
        MAX_WRONG,
        GatedValidator::default(),
        UnresolvedGuessPolicy::Consume,
    ));
    let spawn_guess = |c: char| {
        let session = Arc::clone(&session);
        tokio::spawn(async move { session.submit_guess(letter(c)).await })
    };

    let first = spawn_guess('t');
    session.validator().entered.notified().await;
    session.reset().unwrap();
    let second = spawn_guess('t');
    session.validator().entered.notified().await;

    session.validator().release.notify_one();
    session.validator().release.notify_one();

    let first = first.await.unwrap().unwrap_err();
    assert!(matches!(first, SessionError::Guess(GuessError::Stale(l)) if l == letter('t')));
    let second = second.await.unwrap().unwrap();
    assert!(second.is_hit());

    let state = session.snapshot();
    assert_eq!(state.pending(), None);
    assert_eq!(state.display_word(), "t _ _ _ _");
}
