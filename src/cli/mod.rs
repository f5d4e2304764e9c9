//! CLI module for the newsdesk server
//!
//! Provides subcommands for running the service:
//! - `serve`: run the HTTP API server (default)
//! - `migrate`: apply database migrations and exit

pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

/// Newsdesk - personal news tracking with user accounts
#[derive(Parser)]
#[command(name = "newsdesk")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server (default mode)
    Serve,

    /// Apply pending database migrations and exit
    Migrate,
}
