use anyhow::Result;
use std::path::Path;
use tokio::sync::RwLock;

use super::slot::{MemorySlot, SqliteSlot, TokenSlot};

/// Credential store
/// Holds the single active bearer token in memory and mirrors it to a persisted slot
pub struct CredentialStore {
    /// Current access token
    access_token: RwLock<Option<String>>,

    /// Persisted slot the token is written through to
    slot: Box<dyn TokenSlot>,
}

impl CredentialStore {
    /// Create a store over any slot. Nothing is read until [`load`](Self::load).
    pub fn new(slot: Box<dyn TokenSlot>) -> Self {
        Self {
            access_token: RwLock::new(None),
            slot,
        }
    }

    /// Create a store persisted in a SQLite file
    pub fn open(path: &Path) -> Result<Self> {
        tracing::info!("Opening credential store: {}", path.display());
        Ok(Self::new(Box::new(SqliteSlot::open(path)?)))
    }

    /// Create a store that forgets everything on exit
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemorySlot::new()))
    }

    /// Read the persisted token into memory, returning it
    pub async fn load(&self) -> Result<Option<String>> {
        let persisted = self.slot.read()?;
        let mut access_token = self.access_token.write().await;
        *access_token = persisted.clone();

        match persisted {
            Some(ref t) => tracing::debug!("Loaded saved token ({}...)", token_prefix(t)),
            None => tracing::debug!("No saved token"),
        }

        Ok(persisted)
    }

    /// Get the current token, if any
    pub async fn get(&self) -> Option<String> {
        self.access_token.read().await.clone()
    }

    /// Whether a token is currently held
    pub async fn is_authenticated(&self) -> bool {
        self.access_token.read().await.is_some()
    }

    /// Store a token, replacing any previous one, and persist it
    pub async fn set(&self, token: &str) -> Result<()> {
        self.slot.write(token)?;
        let mut access_token = self.access_token.write().await;
        *access_token = Some(token.to_string());
        tracing::info!("Stored access token ({}...)", token_prefix(token));
        Ok(())
    }

    /// Drop the token from memory and from the persisted slot
    pub async fn clear(&self) -> Result<()> {
        self.slot.clear()?;
        let mut access_token = self.access_token.write().await;
        *access_token = None;
        tracing::info!("Cleared access token");
        Ok(())
    }
}

/// First few characters of a token, safe to log
fn token_prefix(token: &str) -> &str {
    let end = token
        .char_indices()
        .nth(8)
        .map(|(i, _)| i)
        .unwrap_or(token.len());
    &token[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_store_starts_empty() {
        let store = CredentialStore::in_memory();
        assert_eq!(store.load().await.unwrap(), None);
        assert_eq!(store.get().await, None);
        assert!(!store.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_set_updates_memory_and_slot() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("creds.sqlite3");

        let store = CredentialStore::open(&path).unwrap();
        store.set("abc123").await.unwrap();
        assert_eq!(store.get().await, Some("abc123".to_string()));

        // A fresh store over the same file sees the token only after load
        let reopened = CredentialStore::open(&path).unwrap();
        assert_eq!(reopened.get().await, None);
        assert_eq!(reopened.load().await.unwrap(), Some("abc123".to_string()));
        assert_eq!(reopened.get().await, Some("abc123".to_string()));
    }

    #[tokio::test]
    async fn test_set_overwrites_previous_token() {
        let store = CredentialStore::in_memory();
        store.set("old").await.unwrap();
        store.set("new").await.unwrap();
        assert_eq!(store.get().await, Some("new".to_string()));
        assert_eq!(store.load().await.unwrap(), Some("new".to_string()));
    }

    #[tokio::test]
    async fn test_clear_removes_persisted_token() {
        let store = CredentialStore::new(Box::new(MemorySlot::with_token("saved")));
        store.load().await.unwrap();
        assert!(store.is_authenticated().await);

        store.clear().await.unwrap();
        assert!(!store.is_authenticated().await);
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[test]
    fn test_token_prefix() {
        assert_eq!(token_prefix("abcdefghijklmnop"), "abcdefgh");
        assert_eq!(token_prefix("abc"), "abc");
        assert_eq!(token_prefix(""), "");
    }
}
