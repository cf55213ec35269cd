//! Durable credential storage.
//!
//! The session persists exactly two values: the opaque bearer token and the
//! serialized user record. They are always written together and cleared
//! together; no other component touches them. The store is an injectable
//! seam so embedders and tests can choose where the pair lives.
//!
//! The user record is kept serialized at this layer. Corruption is only
//! detected at rehydration, where the session clears the pair and stays
//! unauthenticated.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur reading or writing stored credentials.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failure.
    #[error("credential storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored data exists but is not readable.
    #[error("stored credentials are corrupted: {0}")]
    Corrupted(String),
}

/// The persisted token/user pair.
///
/// `user_json` is the serialized user record exactly as the backend sent
/// it; the session deserializes it at rehydration time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCredentials {
    /// Opaque bearer token.
    pub token: String,
    /// Serialized user record.
    pub user_json: String,
}

/// Durable storage for the authenticated session's credential pair.
///
/// Reads and writes are synchronous; the pair is small and the store is
/// consulted on every outbound request for the bearer token.
pub trait CredentialStore: Send + Sync {
    /// Load the stored pair, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store exists but cannot be read.
    fn load(&self) -> Result<Option<StoredCredentials>, StorageError>;

    /// Persist the pair, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the pair cannot be written.
    fn save(&self, credentials: &StoredCredentials) -> Result<(), StorageError>;

    /// Remove the pair. Clearing an empty store is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if removal fails.
    fn clear(&self) -> Result<(), StorageError>;

    /// Convenience accessor for the bearer token alone.
    ///
    /// Unreadable storage yields `None`; callers needing the distinction
    /// use [`CredentialStore::load`].
    fn token(&self) -> Option<String> {
        self.load().ok().flatten().map(|c| c.token)
    }
}

/// In-memory credential store for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    inner: Mutex<Option<StoredCredentials>>,
}

impl MemoryCredentialStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<StoredCredentials>, StorageError> {
        Ok(self
            .inner
            .lock()
            .map_err(|e| StorageError::Corrupted(e.to_string()))?
            .clone())
    }

    fn save(&self, credentials: &StoredCredentials) -> Result<(), StorageError> {
        *self
            .inner
            .lock()
            .map_err(|e| StorageError::Corrupted(e.to_string()))? = Some(credentials.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        *self
            .inner
            .lock()
            .map_err(|e| StorageError::Corrupted(e.to_string()))? = None;
        Ok(())
    }
}

/// File-backed credential store.
///
/// Persists the pair as a single JSON document. A missing file is an empty
/// store; an unreadable file is reported as [`StorageError::Corrupted`] so
/// the session can clear it at rehydration.
#[derive(Debug)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Create a store backed by the given file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<StoredCredentials>, StorageError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StorageError::Io(e)),
        };
        let credentials = serde_json::from_str(&raw)
            .map_err(|e| StorageError::Corrupted(e.to_string()))?;
        Ok(Some(credentials))
    }

    fn save(&self, credentials: &StoredCredentials) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string(credentials)
            .map_err(|e| StorageError::Corrupted(e.to_string()))?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> StoredCredentials {
        StoredCredentials {
            token: "t1".to_string(),
            user_json: r#"{"id":1,"name":"A","email":"a@b.com","role":"customer"}"#.to_string(),
        }
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryCredentialStore::new();
        assert!(store.load().unwrap().is_none());

        store.save(&sample()).unwrap();
        assert_eq!(store.load().unwrap(), Some(sample()));
        assert_eq!(store.token(), Some("t1".to_string()));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        assert!(store.token().is_none());
    }

    #[test]
    fn test_memory_store_clear_when_empty() {
        let store = MemoryCredentialStore::new();
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_file_store_roundtrip() {
        let path = std::env::temp_dir().join(format!(
            "tavola-store-roundtrip-{}.json",
            std::process::id()
        ));
        let store = FileCredentialStore::new(&path);
        store.clear().unwrap();

        assert!(store.load().unwrap().is_none());
        store.save(&sample()).unwrap();
        assert_eq!(store.load().unwrap(), Some(sample()));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        assert!(!path.exists());
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let store = FileCredentialStore::new("/nonexistent-dir-tavola/missing.json");
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_file_store_unreadable_json_is_corrupted() {
        let path = std::env::temp_dir().join(format!(
            "tavola-store-corrupt-{}.json",
            std::process::id()
        ));
        std::fs::write(&path, "not json at all").unwrap();
        let store = FileCredentialStore::new(&path);

        assert!(matches!(store.load(), Err(StorageError::Corrupted(_))));
        // token() hides the error from the bearer-attachment path
        assert!(store.token().is_none());

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }
}
