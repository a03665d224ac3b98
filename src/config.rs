// Passbank — Database Configuration
//
// Connection settings come from five environment variables, optionally
// supplied by a `.env` file whose values override the inherited process
// environment.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;
use zeroize::Zeroizing;

/// Directory name used under the platform data directory.
const APP_DIR: &str = "passbank";

/// Host value that selects the platform data directory.
const LOCAL_HOST: &str = "localhost";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load env file: {0}")]
    EnvFile(#[from] dotenvy::Error),

    #[error("Missing environment variable `{0}`")]
    Missing(&'static str),

    #[error("Environment variable `{0}` must not be empty")]
    Empty(&'static str),

    #[error("Invalid db_port `{0}`: expected a number between 0 and 65535")]
    InvalidPort(String),
}

/// File name looked for in the working directory when no env file is given.
const DEFAULT_ENV_FILE: &str = ".env";

/// Load a `.env` file, overriding variables already set in the process.
///
/// With an explicit path the file must exist. Without one, only `.env` in the
/// working directory is considered and its absence is not an error. Parent
/// directories are never searched. Returns the path that was loaded, if any.
pub fn load_env_file(path: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
    load_env_file_in(Path::new(""), path)
}

fn load_env_file_in(dir: &Path, path: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
    match path {
        Some(p) => {
            dotenvy::from_path_override(p)?;
            Ok(Some(p.to_path_buf()))
        }
        None => {
            let default = dir.join(DEFAULT_ENV_FILE);
            match dotenvy::from_path_override(&default) {
                Ok(()) => Ok(Some(default)),
                Err(e) if e.not_found() => Ok(None),
                Err(e) => Err(e.into()),
            }
        }
    }
}

/// Settings needed to open the credential database.
#[derive(Clone)]
pub struct DbSettings {
    pub username: String,
    password: Zeroizing<String>,
    pub host: String,
    pub port: u16,
    pub name: String,
}

impl DbSettings {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));

        let username = get("db_username")?;
        let password = Zeroizing::new(get("db_password")?);
        let host = get("db_host")?;
        let port_str = get("db_port")?;
        let name = get("db_name")?;

        if name.trim().is_empty() {
            return Err(ConfigError::Empty("db_name"));
        }
        let port = port_str
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort(port_str.clone()))?;

        Ok(Self {
            username,
            password,
            host,
            port,
            name,
        })
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Directory that holds the database file.
    pub fn database_dir(&self) -> PathBuf {
        let host = self.host.trim();
        if host.is_empty() || host.eq_ignore_ascii_case(LOCAL_HOST) {
            dirs_next::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR)
        } else {
            PathBuf::from(host)
        }
    }

    /// Full path of the database file.
    pub fn database_path(&self) -> PathBuf {
        self.database_dir().join(format!("{}.db", self.name))
    }
}

impl fmt::Debug for DbSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbSettings")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .finish()
    }
}

/// Connection target as shown to the user, never including the password.
impl fmt::Display for DbSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}:{}/{}", self.username, self.host, self.port, self.name)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn full() -> HashMap<String, String> {
        vars(&[
            ("db_username", "alice"),
            ("db_password", "0123"),
            ("db_host", "/var/lib/bank"),
            ("db_port", "5432"),
            ("db_name", "passbank"),
        ])
    }

    #[test]
    fn test_from_lookup_reads_all_variables() {
        let env = full();
        let settings = DbSettings::from_lookup(|k| env.get(k).cloned()).unwrap();

        assert_eq!(settings.username, "alice");
        assert_eq!(settings.password(), "0123", "Numeric passwords stay verbatim");
        assert_eq!(settings.port, 5432);
        assert_eq!(settings.database_path(), PathBuf::from("/var/lib/bank/passbank.db"));
    }

    #[test]
    fn test_missing_variable_is_reported_by_name() {
        let mut env = full();
        env.remove("db_password");

        let err = DbSettings::from_lookup(|k| env.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("db_password")));
    }

    #[test]
    fn test_empty_db_name_is_rejected() {
        let mut env = full();
        env.insert("db_name".to_string(), "  ".to_string());

        let err = DbSettings::from_lookup(|k| env.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::Empty("db_name")));
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let mut env = full();
        env.insert("db_port".to_string(), "70000".to_string());

        let err = DbSettings::from_lookup(|k| env.get(k).cloned()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort(_)));
    }

    #[test]
    fn test_localhost_maps_to_data_dir() {
        let mut env = full();
        env.insert("db_host".to_string(), "localhost".to_string());

        let settings = DbSettings::from_lookup(|k| env.get(k).cloned()).unwrap();
        let path = settings.database_path();
        assert!(path.ends_with("passbank/passbank.db"));
    }

    #[test]
    fn test_debug_and_display_never_show_password() {
        let mut env = full();
        env.insert("db_password".to_string(), "hunter2".to_string());
        let settings = DbSettings::from_lookup(|k| env.get(k).cloned()).unwrap();

        assert!(!format!("{:?}", settings).contains("hunter2"));
        assert!(!settings.to_string().contains("hunter2"));
        assert_eq!(settings.to_string(), "alice@/var/lib/bank:5432/passbank");
    }

    #[test]
    fn test_env_file_overrides_and_missing_explicit_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bank.env");
        std::fs::write(&path, "PASSBANK_TEST_OVERRIDE=from-file\n").unwrap();

        std::env::set_var("PASSBANK_TEST_OVERRIDE", "from-process");
        let loaded = load_env_file(Some(path.as_path())).unwrap();
        assert_eq!(loaded.as_deref(), Some(path.as_path()));
        assert_eq!(std::env::var("PASSBANK_TEST_OVERRIDE").unwrap(), "from-file");

        let absent = dir.path().join("absent.env");
        let missing = load_env_file(Some(absent.as_path()));
        assert!(matches!(missing, Err(ConfigError::EnvFile(_))));
    }

    #[test]
    fn test_default_env_file_is_loaded_from_given_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".env"), "PASSBANK_TEST_LOCAL_ENV=here\n").unwrap();

        let loaded = load_env_file_in(dir.path(), None).unwrap();
        assert_eq!(loaded, Some(dir.path().join(".env")));
        assert_eq!(std::env::var("PASSBANK_TEST_LOCAL_ENV").unwrap(), "here");
    }

    #[test]
    fn test_env_file_in_parent_directory_is_ignored() {
        let parent = tempfile::tempdir().unwrap();
        std::fs::write(parent.path().join(".env"), "PASSBANK_TEST_PARENT_ENV=leaked\n").unwrap();
        let child = parent.path().join("work");
        std::fs::create_dir(&child).unwrap();

        let loaded = load_env_file_in(&child, None).unwrap();
        assert!(loaded.is_none());
        assert!(std::env::var("PASSBANK_TEST_PARENT_ENV").is_err());
    }
}
