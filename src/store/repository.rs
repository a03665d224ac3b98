// Passbank — Credential Store Repository
//
// Single-table persistence for credential rows. Rows are keyed by account
// name; writing an existing account overwrites every other column.

use chrono::Utc;
use rusqlite::{params, OptionalExtension};

use super::db::Database;
use super::models::StoredCredential;
use super::StoreError;

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over credential persistence.
pub trait CredentialStore {
    /// Look up one row by exact, case-sensitive account match.
    fn find(&self, account: &str) -> Result<Option<StoredCredential>, StoreError>;

    /// Insert the row, or replace every non-key column if the account exists.
    /// The write is committed before this returns.
    fn upsert(&self, record: &StoredCredential) -> Result<(), StoreError>;
}

// ─── SQLite Implementation ──────────────────────────────────────────────────

pub struct SqliteCredentialStore<'a> {
    db: &'a Database,
}

impl<'a> SqliteCredentialStore<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    fn row_to_stored(row: &rusqlite::Row<'_>) -> rusqlite::Result<StoredCredential> {
        let account: String = row.get(0)?;
        let username: String = row.get(1)?;
        let token: String = row.get(2)?;
        let updated_at_str: String = row.get(3)?;

        let updated_at = chrono::DateTime::parse_from_rfc3339(&updated_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
            })?;

        Ok(StoredCredential::new(account, username, token, updated_at))
    }
}

impl<'a> CredentialStore for SqliteCredentialStore<'a> {
    fn find(&self, account: &str) -> Result<Option<StoredCredential>, StoreError> {
        let record = self
            .db
            .conn()
            .query_row(
                "SELECT account, username, password, updated_at
                 FROM userpws WHERE account = ?1",
                params![account],
                Self::row_to_stored,
            )
            .optional()?;

        tracing::debug!(account = %account, found = record.is_some(), "Account lookup");
        Ok(record)
    }

    fn upsert(&self, record: &StoredCredential) -> Result<(), StoreError> {
        if record.account.is_empty() {
            return Err(StoreError::EmptyAccount);
        }

        let tx = self.db.conn().unchecked_transaction()?;

        tx.execute(
            "INSERT INTO userpws (account, username, password, updated_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(account) DO UPDATE SET
                username   = excluded.username,
                password   = excluded.password,
                updated_at = excluded.updated_at",
            params![
                record.account,
                record.username,
                record.token(),
                record.updated_at.to_rfc3339(),
            ],
        )?;

        tx.commit()?;

        tracing::info!(account = %record.account, "Credential stored successfully");
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(account: &str, username: &str, token: &str) -> StoredCredential {
        StoredCredential::new(
            account.to_string(),
            username.to_string(),
            token.to_string(),
            Utc::now(),
        )
    }

    fn row_count(db: &Database, account: &str) -> i64 {
        db.conn()
            .query_row(
                "SELECT count(*) FROM userpws WHERE account = ?1",
                params![account],
                |row| row.get(0),
            )
            .unwrap()
    }

    #[test]
    fn test_upsert_then_find_returns_row() {
        let db = Database::open_in_memory().unwrap();
        let store = SqliteCredentialStore::new(&db);

        store.upsert(&stored("github", "alice", "token-1")).unwrap();

        let found = store.find("github").unwrap().expect("row should exist");
        assert_eq!(found.account, "github");
        assert_eq!(found.username, "alice");
        assert_eq!(found.token(), "token-1");
    }

    #[test]
    fn test_upsert_same_account_is_last_write_wins() {
        let db = Database::open_in_memory().unwrap();
        let store = SqliteCredentialStore::new(&db);

        store.upsert(&stored("github", "alice", "token-1")).unwrap();
        store.upsert(&stored("github", "bob", "token-2")).unwrap();

        assert_eq!(row_count(&db, "github"), 1, "No duplicate key rows");
        let found = store.find("github").unwrap().unwrap();
        assert_eq!(found.username, "bob");
        assert_eq!(found.token(), "token-2");
    }

    #[test]
    fn test_find_nonexistent_returns_none() {
        let db = Database::open_in_memory().unwrap();
        let store = SqliteCredentialStore::new(&db);

        store.upsert(&stored("github", "alice", "token-1")).unwrap();
        assert!(store.find("gitlab").unwrap().is_none());
    }

    #[test]
    fn test_find_is_case_sensitive() {
        let db = Database::open_in_memory().unwrap();
        let store = SqliteCredentialStore::new(&db);

        store.upsert(&stored("GitHub", "alice", "token-1")).unwrap();
        assert!(store.find("github").unwrap().is_none());
        assert!(store.find("GitHub").unwrap().is_some());
    }

    #[test]
    fn test_find_treats_account_as_parameter_not_sql() {
        let db = Database::open_in_memory().unwrap();
        let store = SqliteCredentialStore::new(&db);

        store.upsert(&stored("github", "alice", "token-1")).unwrap();
        assert!(store.find("' OR '1'='1").unwrap().is_none());
    }

    #[test]
    fn test_upsert_rejects_empty_account() {
        let db = Database::open_in_memory().unwrap();
        let store = SqliteCredentialStore::new(&db);

        let result = store.upsert(&stored("", "alice", "token-1"));
        assert!(matches!(result, Err(StoreError::EmptyAccount)));
    }

    #[test]
    fn test_distinct_accounts_are_independent_rows() {
        let db = Database::open_in_memory().unwrap();
        let store = SqliteCredentialStore::new(&db);

        for account in &["github", "slack", "openai"] {
            store.upsert(&stored(account, "user", "token")).unwrap();
        }

        let total: i64 = db
            .conn()
            .query_row("SELECT count(*) FROM userpws", [], |row| row.get(0))
            .unwrap();
        assert_eq!(total, 3);
    }
}
