// Passbank — Vault error types

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VaultError {
    #[error("no authorization: pass --override to write a new key")]
    Unauthorized,

    #[error("Key file not found at {0}. Run `passbank write-key --override` first")]
    KeyMissing(PathBuf),

    #[error("Key file error at {path}: {source}")]
    KeyFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Encryption failed: {0}")]
    Encryption(String),

    #[error("Invalid token: wrong key or corrupted ciphertext")]
    InvalidToken,

    #[error("Key derivation error: {0}")]
    Derivation(String),
}
