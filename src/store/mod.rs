// Passbank — Store Module
//
// Encrypted single-table credential storage using SQLCipher. Passwords are
// additionally sealed into vault tokens before they reach this layer.

mod db;
mod error;
mod models;
mod repository;

pub use db::Database;
pub use error::StoreError;
pub use models::{Credential, StoredCredential};
pub use repository::{CredentialStore, SqliteCredentialStore};
