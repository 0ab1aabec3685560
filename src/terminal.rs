//! Line-based terminal front end.
//!
//! Each input line is one guess. `reset` starts over and `quit` exits. The
//! state printed is always the session's last confirmed state.

use crate::games::hangman::{GameState, GameStatus, Letter};
use crate::session::GameSession;
use crate::validator_client::GuessValidator;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, instrument};

/// Plays one session over `input`/`output` until `quit` or end of input.
#[instrument(skip_all)]
pub async fn run_play<V, R, W>(session: &GameSession<V>, input: R, mut output: W) -> anyhow::Result<()>
where
    V: GuessValidator,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    output.write_all(render(&session.snapshot()).as_bytes()).await?;
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        debug!(line, "Read input");
        match line {
            "" => continue,
            "quit" | "exit" => break,
            "reset" => {
                if let Err(e) = session.reset() {
                    output.write_all(format!("! {}\n", e).as_bytes()).await?;
                }
            }
            other => match Letter::from_input(other) {
                Ok(letter) => {
                    if let Err(e) = session.submit_guess(letter).await {
                        output.write_all(format!("! {}\n", e).as_bytes()).await?;
                    }
                }
                Err(e) => output.write_all(format!("! {}\n", e).as_bytes()).await?,
            },
        }
        output.write_all(render(&session.snapshot()).as_bytes()).await?;
    }

    output.flush().await?;
    Ok(())
}

/// Text rendering of a state, one block per transition.
pub fn render(state: &GameState) -> String {
    let banner = match state.status() {
        GameStatus::Playing => "Guess a letter:",
        GameStatus::Won => "You won! Type `reset` to play again.",
        GameStatus::Lost => "You lost. Type `reset` to play again.",
    };
    let mut text = format!("{}\n", state);
    if state.status() == GameStatus::Lost {
        text.push_str(&format!("The word was: {}\n", state.word()));
    }
    text.push_str(banner);
    text.push('\n');
    text
}
