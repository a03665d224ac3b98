// Passbank — Key File Management
//
// The symmetric key that seals stored passwords lives in a local file
// (default `key.key`). Writing it is an explicit, gated operation because a
// new key makes every previously stored token unreadable.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::RngCore;
use zeroize::Zeroizing;

use super::VaultError;

/// File name used when no key path is configured.
pub const DEFAULT_KEY_FILE: &str = "key.key";

/// Length of the raw symmetric key in bytes (AES-256).
pub const KEY_LEN: usize = 32;

/// Source of the symmetric key. Implementations are consulted on every
/// encrypt and decrypt, so key problems abort only the operation at hand.
pub trait KeySource {
    fn load_key(&self) -> Result<Zeroizing<Vec<u8>>, VaultError>;
}

/// Key stored base64-encoded in a file on disk.
#[derive(Debug, Clone)]
pub struct KeyFile {
    path: PathBuf,
}

impl KeyFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Generate a fresh key and write it, replacing any existing key file.
    /// Refuses unless `authorized` is set.
    pub fn write_key(&self, authorized: bool) -> Result<(), VaultError> {
        if !authorized {
            tracing::warn!(path = %self.path.display(), "Refused to write key without override");
            return Err(VaultError::Unauthorized);
        }

        let key = Self::generate_key();
        let encoded = Zeroizing::new(URL_SAFE_NO_PAD.encode(key.as_slice()));

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&self.path).map_err(|source| self.io_error(source))?;
        file.write_all(encoded.as_bytes())
            .map_err(|source| self.io_error(source))?;

        tracing::info!(path = %self.path.display(), "New key written");
        Ok(())
    }

    fn generate_key() -> Zeroizing<Vec<u8>> {
        let mut key = Zeroizing::new(vec![0u8; KEY_LEN]);
        rand::rng().fill_bytes(&mut key);
        key
    }

    fn io_error(&self, source: std::io::Error) -> VaultError {
        VaultError::KeyFile {
            path: self.path.clone(),
            source,
        }
    }
}

impl Default for KeyFile {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_FILE)
    }
}

impl KeySource for KeyFile {
    fn load_key(&self) -> Result<Zeroizing<Vec<u8>>, VaultError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(s) => Zeroizing::new(s),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(VaultError::KeyMissing(self.path.clone()));
            }
            Err(e) => return Err(self.io_error(e)),
        };

        let key = URL_SAFE_NO_PAD
            .decode(contents.trim().trim_end_matches('='))
            .map(Zeroizing::new)
            .map_err(|e| VaultError::InvalidKey(format!("key file is not valid base64: {}", e)))?;

        if key.len() != KEY_LEN {
            return Err(VaultError::InvalidKey(format!(
                "expected {} key bytes, found {}",
                KEY_LEN,
                key.len()
            )));
        }

        tracing::debug!(path = %self.path.display(), "Key loaded");
        Ok(key)
    }
}

// ─── In-Memory Mock for Testing ──────────────────────────────────────────────

/// Key sources that never touch the filesystem.
#[cfg(test)]
pub mod mock {
    use super::*;

    /// Holds a fixed key, or nothing to simulate a missing key file.
    pub struct StaticKey {
        key: Option<Vec<u8>>,
    }

    impl StaticKey {
        pub fn new(byte: u8) -> Self {
            Self {
                key: Some(vec![byte; KEY_LEN]),
            }
        }

        pub fn missing() -> Self {
            Self { key: None }
        }
    }

    impl KeySource for StaticKey {
        fn load_key(&self) -> Result<Zeroizing<Vec<u8>>, VaultError> {
            self.key
                .clone()
                .map(Zeroizing::new)
                .ok_or_else(|| VaultError::KeyMissing(PathBuf::from("<memory>")))
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
