// Passbank — Vault Module
//
// Everything that touches key material: the key file behind stored password
// tokens, the token cipher itself, database key derivation, and password
// generation.

mod cipher;
mod derive;
mod error;
mod key;
mod password;

pub use cipher::SecretCipher;
pub use derive::{derive_db_key, key_to_hex};
pub use error::VaultError;
pub use key::{KeyFile, KeySource, DEFAULT_KEY_FILE, KEY_LEN};
pub use password::{generate_password, meets_policy, PASSWORD_LEN};

#[cfg(test)]
pub use key::mock;
