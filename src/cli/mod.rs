//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod logging;

use clap::{ArgAction, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

/// notes - multi-user note-taking web service
#[derive(Parser, Debug)]
#[command(name = "notes", version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: <config dir>/notes/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the web server
    Serve(ServeArgs),

    /// Create a user account
    AddUser(AddUserArgs),
}

/// Arguments for the `serve` command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to listen on (overrides config file)
    #[arg(short, long)]
    pub bind: Option<SocketAddr>,

    /// SQLite database file (overrides config file)
    #[arg(long)]
    pub db: Option<PathBuf>,
}

/// Arguments for the `add-user` command
#[derive(Parser, Debug)]
pub struct AddUserArgs {
    /// Login name for the new account
    pub username: String,

    /// Password for the new account
    #[arg(short, long, env = "NOTES_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// SQLite database file (overrides config file)
    #[arg(long)]
    pub db: Option<PathBuf>,
}
