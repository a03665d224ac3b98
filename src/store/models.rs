// Passbank — Credential data models
//
// SECURITY: The password field is private on both record types. It is never
// included in Debug output or log messages. Access goes through explicit
// getter methods.

use chrono::{DateTime, Utc};
use std::fmt;

/// A credential as the user sees it: account, username and plaintext password.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    /// Website or business name; the sole lookup key.
    pub account: String,
    pub username: String,
    /// Plaintext password. Never logged or Debug-displayed.
    password: String,
}

impl Credential {
    pub fn new(account: String, username: String, password: String) -> Self {
        Self {
            account,
            username,
            password,
        }
    }

    /// Access the plaintext password.
    pub fn password(&self) -> &str {
        &self.password
    }
}

/// Custom Debug implementation that NEVER reveals the password.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("account", &self.account)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Human-readable summary without the password.
impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.account, self.username)
    }
}

/// A row of the `userpws` table. The password column holds an encrypted token.
#[derive(Clone)]
pub struct StoredCredential {
    pub account: String,
    pub username: String,
    token: String,
    pub updated_at: DateTime<Utc>,
}

impl StoredCredential {
    pub fn new(account: String, username: String, token: String, updated_at: DateTime<Utc>) -> Self {
        Self {
            account,
            username,
            token,
            updated_at,
        }
    }

    /// The encrypted password token exactly as persisted.
    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for StoredCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredCredential")
            .field("account", &self.account)
            .field("username", &self.username)
            .field("token", &"[ENCRYPTED]")
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_debug_redacts_password() {
        let cred = Credential::new(
            "github".to_string(),
            "alice".to_string(),
            "hunter2-super-secret".to_string(),
        );

        let debug_output = format!("{:?}", cred);
        assert!(debug_output.contains("[REDACTED]"));
        assert!(
            !debug_output.contains("hunter2-super-secret"),
            "Debug output must NEVER contain the raw password"
        );
    }

    #[test]
    fn test_credential_display_shows_account_and_username_only() {
        let cred = Credential::new(
            "slack".to_string(),
            "bob".to_string(),
            "xoxb-password".to_string(),
        );

        let display_output = cred.to_string();
        assert_eq!(display_output, "slack (bob)");
    }

    #[test]
    fn test_password_accessor_returns_plaintext() {
        let cred = Credential::new("aws".to_string(), "ops".to_string(), "Secret123".to_string());
        assert_eq!(cred.password(), "Secret123");
    }

    #[test]
    fn test_stored_credential_debug_hides_token() {
        let stored = StoredCredential::new(
            "github".to_string(),
            "alice".to_string(),
            "gAAAAA-token-bytes".to_string(),
            Utc::now(),
        );

        let debug_output = format!("{:?}", stored);
        assert!(debug_output.contains("[ENCRYPTED]"));
        assert!(!debug_output.contains("gAAAAA-token-bytes"));
        assert_eq!(stored.token(), "gAAAAA-token-bytes");
    }
}
