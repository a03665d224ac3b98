// Passbank — Credential Store Facade
//
// One session object mediates between the terminal menu and the credential
// table: it owns the store and the key source, seals passwords on the way in,
// opens them on the way out, and remembers the last record it handled.

use chrono::Utc;

use crate::config::DbSettings;
use crate::error::{PassbankError, Result};
use crate::prompt::Prompter;
use crate::store::{Credential, CredentialStore, Database, StoredCredential};
use crate::vault::{self, KeySource, SecretCipher};

/// How many invalid answers a prompt tolerates before giving up.
pub const MAX_ATTEMPTS: usize = 3;

const ACCOUNT_PROMPT: &str =
    "Please enter the name of the website or business you have an account with: ";
const USERNAME_PROMPT: &str = "Username: ";
const GENERATE_PROMPT: &str = "Would you like to generate a password? y/n: ";
const PASSWORD_PROMPT: &str = "Password: ";
const VIEW_PROMPT: &str = "Which account do you wish to view? ";

/// Top-level menu options, numbered from 1 in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    View,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 2] = [MenuChoice::Add, MenuChoice::View];

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::Add => "Add",
            MenuChoice::View => "View",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::Add),
            "2" => Some(MenuChoice::View),
            _ => None,
        }
    }
}

/// Open the credential database described by `settings`.
///
/// The database key is derived from the configured credentials, so a wrong
/// username or password fails here with `PassbankError::Connection`.
pub fn connect(settings: &DbSettings) -> Result<Database> {
    let db_key = vault::derive_db_key(&settings.username, &settings.name, settings.password())?;
    let hex_key = vault::key_to_hex(&db_key);

    let path = settings.database_path();
    tracing::debug!(target_db = %settings, path = %path.display(), "Connecting");

    Database::open(&path, &hex_key).map_err(|source| PassbankError::Connection {
        target: settings.name.clone(),
        source,
    })
}

/// An interactive session over one credential store.
pub struct Passbank<S, K> {
    store: S,
    keys: K,
    entry: Option<Credential>,
}

impl<S: CredentialStore, K: KeySource> Passbank<S, K> {
    pub fn new(store: S, keys: K) -> Self {
        Self {
            store,
            keys,
            entry: None,
        }
    }

    /// The record most recently written or successfully looked up.
    pub fn entry(&self) -> Option<&Credential> {
        self.entry.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The key is reloaded for every use so that key problems surface in the
    /// operation that needs it.
    fn cipher(&self) -> Result<SecretCipher> {
        let key = self.keys.load_key()?;
        Ok(SecretCipher::new(&key)?)
    }

    /// Look up an account by exact name and decrypt its password.
    ///
    /// Returns `Ok(None)` when no such account exists. A decryption failure
    /// aborts the lookup without recording a partial entry.
    pub fn find_account(&mut self, account: &str) -> Result<Option<&Credential>> {
        self.entry = None;

        let Some(stored) = self.store.find(normalize_account(account))? else {
            return Ok(None);
        };

        let password = self.cipher()?.decrypt(stored.token())?;
        self.entry = Some(Credential::new(
            stored.account,
            stored.username,
            password.as_str().to_string(),
        ));

        Ok(self.entry.as_ref())
    }

    /// Encrypt the password and write the record, replacing any existing
    /// record for the same account.
    pub fn upsert_record(&mut self, mut record: Credential) -> Result<()> {
        record.account = normalize_account(&record.account).to_string();
        if record.account.is_empty() {
            return Err(PassbankError::InvalidInput(
                "account name must not be empty".to_string(),
            ));
        }

        let token = self.cipher()?.encrypt(record.password())?;
        let stored = StoredCredential::new(
            record.account.clone(),
            record.username.clone(),
            token,
            Utc::now(),
        );

        self.store.upsert(&stored)?;
        self.entry = Some(record);
        Ok(())
    }

    /// Collect account, username and password from the user, then upsert.
    pub fn prompt_and_upsert<P: Prompter>(&mut self, prompter: &mut P) -> Result<()> {
        let account = ask_account(prompter)?;
        let username = prompter.ask(USERNAME_PROMPT)?;
        let password = ask_password(prompter)?;

        self.upsert_record(Credential::new(account, username, password))
    }

    /// Ask which account to show and look it up, reporting a miss to the user.
    pub fn prompt_and_view<P: Prompter>(&mut self, prompter: &mut P) -> Result<()> {
        let answer = prompter.ask(VIEW_PROMPT)?;
        let account = normalize_account(&answer);
        if self.find_account(account)?.is_none() {
            prompter.say(&format!("No account found with the name '{}'", account))?;
        }
        Ok(())
    }

    /// Show the menu and dispatch one choice.
    ///
    /// Invalid choices are re-prompted up to `MAX_ATTEMPTS` times; after that
    /// the menu returns `Ok(None)` without doing anything.
    pub fn run_menu<P: Prompter>(&mut self, prompter: &mut P) -> Result<Option<MenuChoice>> {
        prompter.say("What would you like to do?")?;
        for (num, choice) in MenuChoice::ALL.iter().enumerate() {
            prompter.say(&format!("{}. {}", num + 1, choice.label()))?;
        }

        for _ in 0..MAX_ATTEMPTS {
            let answer = prompter.ask("> ")?;
            match MenuChoice::parse(&answer) {
                Some(choice) => {
                    match choice {
                        MenuChoice::Add => self.prompt_and_upsert(prompter)?,
                        MenuChoice::View => self.prompt_and_view(prompter)?,
                    }
                    return Ok(Some(choice));
                }
                None => prompter.say(&format!(
                    "'{}' is not an option, enter 1 or 2",
                    answer.trim()
                ))?,
            }
        }

        prompter.say("No valid option selected.")?;
        Ok(None)
    }
}

/// Account names are matched exactly and case-sensitively once surrounding
/// whitespace is removed. Every path into the store goes through here.
fn normalize_account(account: &str) -> &str {
    account.trim()
}

fn ask_account<P: Prompter>(prompter: &mut P) -> Result<String> {
    for _ in 0..MAX_ATTEMPTS {
        let account = normalize_account(&prompter.ask(ACCOUNT_PROMPT)?).to_string();
        if !account.is_empty() {
            return Ok(account);
        }
        prompter.say("Account name cannot be empty.")?;
    }

    Err(PassbankError::InvalidInput(
        "no account name given".to_string(),
    ))
}

fn ask_password<P: Prompter>(prompter: &mut P) -> Result<String> {
    for _ in 0..MAX_ATTEMPTS {
        let answer = prompter.ask(GENERATE_PROMPT)?;
        match answer.trim().to_ascii_lowercase().as_str() {
            "y" => return Ok(vault::generate_password()),
            "n" => return Ok(prompter.ask_secret(PASSWORD_PROMPT)?),
            _ => prompter.say("Please answer 'y' or 'n'.")?,
        }
    }

    Err(PassbankError::InvalidInput(
        "expected 'y' or 'n' when asked to generate a password".to_string(),
    ))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
