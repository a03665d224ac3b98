// Passbank — CLI Module
//
// Command-line surface using clap derive macros. With no subcommand the
// interactive add/view session runs; `write-key` manages the key file.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::vault::DEFAULT_KEY_FILE;

pub use commands::execute;

/// Passbank: store and recall account passwords from the terminal.
#[derive(Parser, Debug)]
#[command(name = "passbank")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Load database settings from this file instead of `.env`.
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,

    /// Key file used to encrypt and decrypt stored passwords.
    #[arg(long, global = true, default_value = DEFAULT_KEY_FILE)]
    pub key_file: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a new key file. Passwords stored under the old key become unreadable.
    WriteKey {
        /// Required: confirms the existing key may be replaced.
        #[arg(long = "override")]
        authorize: bool,
    },
}
