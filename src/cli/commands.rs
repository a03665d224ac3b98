// Passbank — CLI Command Handlers
//
// `session` loads configuration, connects, runs one menu round and prints
// the resulting record. `write-key` performs the gated key generation.

use std::path::Path;

use crate::bank::{connect, Passbank};
use crate::config::{load_env_file, DbSettings};
use crate::error::PassbankError;
use crate::prompt::TerminalPrompter;
use crate::store::{Credential, SqliteCredentialStore};
use crate::vault::KeyFile;

use super::{Cli, Commands};

/// Execute the parsed CLI invocation.
pub fn execute(cli: Cli) -> Result<(), PassbankError> {
    match cli.command {
        Some(Commands::WriteKey { authorize }) => cmd_write_key(&cli.key_file, authorize),
        None => cmd_session(cli.env_file.as_deref(), &cli.key_file),
    }
}

// ─── Write Key ───────────────────────────────────────────────────────────────

fn cmd_write_key(key_file: &Path, authorize: bool) -> Result<(), PassbankError> {
    KeyFile::new(key_file).write_key(authorize)?;

    println!("✓ Key written to {}", key_file.display());
    println!("  Passwords stored under any previous key can no longer be decrypted.");
    Ok(())
}

// ─── Session ─────────────────────────────────────────────────────────────────

fn cmd_session(env_file: Option<&Path>, key_file: &Path) -> Result<(), PassbankError> {
    if let Some(loaded) = load_env_file(env_file)? {
        tracing::debug!(path = %loaded.display(), "Loaded env file");
    }
    let settings = DbSettings::from_env()?;

    println!("Connecting to {}", settings.name);
    let db = connect(&settings)?;
    println!("{} connection successful", settings.name);
    println!();

    let mut prompter = TerminalPrompter::new();
    let outcome = {
        let mut bank = Passbank::new(SqliteCredentialStore::new(&db), KeyFile::new(key_file));
        let outcome = bank.run_menu(&mut prompter);
        if outcome.is_ok() {
            print_entry(bank.entry());
        }
        outcome
    };

    let closed = db.close();
    println!();
    println!("Disconnected from {}", settings.name);

    outcome?;
    closed?;
    Ok(())
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn print_entry(entry: Option<&Credential>) {
    println!();
    match entry {
        Some(cred) => {
            println!("  Account:  {}", cred.account);
            println!("  Username: {}", cred.username);
            println!("  Password: {}", cred.password());
        }
        None => println!("No entry"),
    }
}
