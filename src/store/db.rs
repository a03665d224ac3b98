// Passbank — SQLCipher Database Management
//
// Opens and initializes the encrypted database that holds the `userpws`
// table. The key is derived from the configured database credentials and
// set via PRAGMA before any table is touched.

use std::path::Path;

use rusqlite::Connection;

use super::StoreError;

/// Wrapper around a SQLCipher-encrypted SQLite connection.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) an encrypted database at the given path.
    /// The `hex_key` must be the hex-encoded 32-byte key derived from the database credentials.
    pub fn open(path: &Path, hex_key: &str) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;

        conn.pragma_update(None, "key", format!("x'{}'", hex_key))?;

        // A wrong key surfaces here as "file is not a database"
        conn.execute_batch("SELECT count(*) FROM sqlite_master;")
            .map_err(|_| StoreError::InvalidKey)?;

        let db = Self { conn };
        db.run_migrations()?;

        tracing::debug!(path = %path.display(), "Database opened");
        Ok(db)
    }

    /// Open an in-memory database (unencrypted, for testing only).
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.run_migrations()?;
        Ok(db)
    }

    /// Get a reference to the underlying connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Close the connection, surfacing any error SQLite reports on shutdown.
    pub fn close(self) -> Result<(), StoreError> {
        self.conn.close().map_err(|(_, e)| StoreError::Close(e))
    }

    /// Create the credentials table if this is the first use of the database.
    fn run_migrations(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS userpws (
                account     TEXT PRIMARY KEY NOT NULL,
                username    TEXT NOT NULL,
                password    TEXT NOT NULL,
                updated_at  TEXT NOT NULL
            );
            ",
        )?;

        tracing::debug!("Database migrations completed successfully");
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
