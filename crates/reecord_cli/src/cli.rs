//! CLI command definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "reecord")]
#[command(about = "Manage reecord notes and user accounts", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Store file to open (created when missing)
    #[arg(long, global = true, default_value = "./reecord.db")]
    pub db: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off when omitted
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage user accounts
    #[command(subcommand)]
    User(UserCommand),

    /// Manage notes
    #[command(subcommand)]
    Note(NoteCommand),
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// Register a new user
    Add { username: String, password: String },

    /// Delete a user
    Remove { username: String },

    /// Replace a user's password
    Passwd {
        username: String,
        new_password: String,
    },

    /// Check a username/password pair
    Login { username: String, password: String },
}

#[derive(Subcommand, Debug)]
pub enum NoteCommand {
    /// Record a new note dated now
    Add(NoteFields),

    /// List all notes in insertion order
    List,

    /// Show one note
    Show { id: String },

    /// Replace every field of a note and re-date it
    Update {
        id: String,

        #[command(flatten)]
        fields: NoteFields,
    },

    /// Delete a note
    Remove { id: String },
}

#[derive(Args, Debug)]
pub struct NoteFields {
    #[arg(short, long)]
    pub title: String,

    #[arg(short, long, default_value = "")]
    pub link: String,

    #[arg(short, long, default_value = "")]
    pub details: String,

    #[arg(short, long, default_value = "")]
    pub author: String,
}
