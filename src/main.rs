//! Strictly Hangman - Unified CLI

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::path::Path;
use strictly_hangman::{GameConfig, GameSession, HttpValidator, LocalValidator, run_play};
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing();

    match cli.command {
        Command::Serve { port, host } => run_server(host, port).await,
        Command::Play {
            config,
            server_url,
            local,
        } => run_terminal(&config, server_url, local).await,
        Command::Schema => {
            println!("{}", strictly_hangman::schemas()?);
            Ok(())
        }
    }
}

/// Run the validation server
async fn run_server(host: String, port: u16) -> Result<()> {
    info!(%host, port, "Starting hangman validation server");
    strictly_hangman::serve(&host, port).await
}

/// Run a terminal game against a server or the local validator
#[instrument(skip(config_path), fields(config = %config_path.display()))]
async fn run_terminal(config_path: &Path, server_url: Option<String>, local: bool) -> Result<()> {
    let mut config = GameConfig::load_or_default(config_path)?;
    if let Some(url) = server_url {
        config = config.with_server_url(url);
    }

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();

    if local {
        info!("Validating guesses in-process");
        let session = GameSession::from_config(&config, LocalValidator)?;
        run_play(&session, stdin, stdout).await
    } else {
        info!(server_url = %config.server_url(), "Validating guesses over HTTP");
        let validator = HttpValidator::new(config.server_url(), config.request_timeout())?;
        let session = GameSession::from_config(&config, validator)?;
        run_play(&session, stdin, stdout).await
    }
}

fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,strictly_hangman=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
