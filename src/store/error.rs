// Passbank — Store error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Account name must not be empty")]
    EmptyAccount,

    #[error("Invalid database credentials: the derived key does not open this database")]
    InvalidKey,

    #[error("Failed to close database connection: {0}")]
    Close(rusqlite::Error),
}
