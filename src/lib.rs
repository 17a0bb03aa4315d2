//! notes - multi-user note-taking web service

pub mod accounts;
pub mod cli;
pub mod domain;
pub mod forms;
pub mod infra;
pub mod notes;
pub mod store;
pub mod web;

use anyhow::Result;
use clap::Parser;

use cli::{
    Cli, Command,
    config::Config,
    handlers::{handle_add_user, handle_serve},
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    cli::logging::init(cli.verbose);
    let config = Config::load(cli.config.as_deref())?;

    match &cli.command {
        Command::Serve(args) => handle_serve(args, &config),
        Command::AddUser(args) => handle_add_user(args, &config),
    }
}
