// Passbank — Library root
//
// Re-exports the session facade, store, vault, configuration and CLI modules.

pub mod bank;
pub mod cli;
pub mod config;
pub mod error;
pub mod prompt;
pub mod store;
pub mod vault;

pub use bank::Passbank;
pub use error::{PassbankError, Result};
