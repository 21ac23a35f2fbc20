use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mentor_core::model::{AuthSession, MasteryState, Profile};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::records::LocalRecords;

/// Errors surfaced by storage adapters.
///
/// Unreadable records never show up here; they are discarded and reported as empty.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// String-keyed durable storage, shaped like browser local storage.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, overwriting any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value under `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    async fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Signed-in session record.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Load the stored session. Expired or unreadable sessions are cleared and yield `None`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for backend failures.
    async fn load_session(&self, now: DateTime<Utc>) -> Result<Option<AuthSession>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the session cannot be stored.
    async fn save_session(&self, session: &AuthSession) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be removed.
    async fn clear_session(&self) -> Result<(), StorageError>;
}

/// Per-email study profiles, stored together as one map.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` for backend failures.
    async fn load_profiles(&self) -> Result<BTreeMap<String, Profile>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` for backend failures.
    async fn load_profile(&self, email: &str) -> Result<Option<Profile>, StorageError>;

    /// Insert or replace the profile for `email`, keeping every other entry.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the map cannot be stored.
    async fn save_profile(&self, email: &str, profile: &Profile) -> Result<(), StorageError>;
}

/// Quiz progress record owned by the quiz engine.
#[async_trait]
pub trait MasteryRepository: Send + Sync {
    /// Load the stored progress, or all-false defaults when missing or unreadable.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` for backend failures.
    async fn load_mastery(&self) -> Result<MasteryState, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    async fn save_mastery(&self, state: &MasteryState) -> Result<(), StorageError>;
}

/// Simple in-memory store for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .items
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .items
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self
            .items
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(key);
        Ok(())
    }
}

/// Bundle of repositories handed to the services layer.
#[derive(Clone)]
pub struct Storage {
    pub store: Arc<dyn KeyValueStore>,
    pub sessions: Arc<dyn SessionRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub mastery: Arc<dyn MasteryRepository>,
}

impl Storage {
    /// Wire the typed repositories over any key-value backend.
    #[must_use]
    pub fn from_store(store: Arc<dyn KeyValueStore>) -> Self {
        let records = LocalRecords::new(Arc::clone(&store));
        let sessions: Arc<dyn SessionRepository> = Arc::new(records.clone());
        let profiles: Arc<dyn ProfileRepository> = Arc::new(records.clone());
        let mastery: Arc<dyn MasteryRepository> = Arc::new(records);
        Self {
            store,
            sessions,
            profiles,
            mastery,
        }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_store(Arc::new(InMemoryStore::new()))
    }
}
