// Persisted token slot backed by SQLite

use anyhow::{Context, Result};
use chrono::Utc;
use std::path::Path;
use std::sync::Mutex;

/// Key under which the bearer token is stored
pub const TOKEN_KEY: &str = "authToken";

/// A named slot that survives process restarts
pub trait TokenSlot: Send + Sync {
    fn read(&self) -> Result<Option<String>>;
    fn write(&self, token: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// Token slot stored in an `auth_kv` table
pub struct SqliteSlot {
    conn: Mutex<rusqlite::Connection>,
}

impl SqliteSlot {
    /// Open (or create) the credential database
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create directory: {}", parent.display())
                })?;
            }
        }

        let conn = rusqlite::Connection::open(path)
            .with_context(|| format!("Failed to open SQLite database: {}", path.display()))?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS auth_kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )
        .context("Failed to create auth_kv table")?;

        tracing::debug!("Credential database ready: {}", path.display());

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<std::sync::MutexGuard<'_, rusqlite::Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow::anyhow!("Credential database lock poisoned"))
    }
}

impl TokenSlot for SqliteSlot {
    fn read(&self) -> Result<Option<String>> {
        let conn = self.conn()?;
        let result = conn.query_row(
            "SELECT value FROM auth_kv WHERE key = ?",
            [TOKEN_KEY],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(token) => Ok(Some(token)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e).context("Failed to load token from SQLite"),
        }
    }

    fn write(&self, token: &str) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO auth_kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            rusqlite::params![TOKEN_KEY, token, Utc::now().to_rfc3339()],
        )
        .context("Failed to save token to SQLite")?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM auth_kv WHERE key = ?", [TOKEN_KEY])
            .context("Failed to delete token from SQLite")?;
        Ok(())
    }
}

/// Slot that lives only as long as the process
#[derive(Default)]
pub struct MemorySlot {
    value: Mutex<Option<String>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot that already holds a token, as if saved by an earlier run
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenSlot for MemorySlot {
    fn read(&self) -> Result<Option<String>> {
        let value = self
            .value
            .lock()
            .map_err(|_| anyhow::anyhow!("Token slot lock poisoned"))?;
        Ok(value.clone())
    }

    fn write(&self, token: &str) -> Result<()> {
        let mut value = self
            .value
            .lock()
            .map_err(|_| anyhow::anyhow!("Token slot lock poisoned"))?;
        *value = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut value = self
            .value
            .lock()
            .map_err(|_| anyhow::anyhow!("Token slot lock poisoned"))?;
        *value = None;
        Ok(())
    }
}
