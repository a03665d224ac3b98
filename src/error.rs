// Passbank — Top-level error types
//
// Aggregates module errors into the categories the session reports at the
// application boundary. An account lookup miss is not an error; it is `None`.

use thiserror::Error;

use crate::config::ConfigError;
use crate::store::StoreError;
use crate::vault::VaultError;

/// Top-level error type for all Passbank operations.
#[derive(Debug, Error)]
pub enum PassbankError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Bad credentials or an unreachable/unopenable database.
    #[error("Error connecting to {target}: {source}")]
    Connection {
        target: String,
        #[source]
        source: StoreError,
    },

    /// Missing or malformed key, or a token that fails authentication.
    #[error("Crypto error: {0}")]
    Crypto(#[from] VaultError),

    /// A read or write against an open database failed.
    #[error("Persistence error: {0}")]
    Persistence(#[from] StoreError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PassbankError>;
