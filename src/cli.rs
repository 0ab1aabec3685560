//! Command-line interface for strictly_hangman.

use strictly_hangman::{DEFAULT_HOST, DEFAULT_PORT};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Hangman - guess-validation server and terminal client
#[derive(Parser, Debug)]
#[command(name = "strictly_hangman")]
#[command(about = "Hangman state machine with an HTTP guess validator", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the guess-validation HTTP server
    Serve {
        /// Port to bind to
        #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
        port: u16,

        /// Host to bind to
        #[arg(long, env = "HOST", default_value = DEFAULT_HOST)]
        host: String,
    },

    /// Play in the terminal, one letter per line
    Play {
        /// Path to the game config file
        #[arg(short, long, default_value = "hangman.toml")]
        config: PathBuf,

        /// Validation server URL (overrides the config file)
        #[arg(long)]
        server_url: Option<String>,

        /// Validate in-process instead of calling a server
        #[arg(long)]
        local: bool,
    },

    /// Print the JSON Schemas of the validation request and response
    Schema,
}
