//! Typed, self-healing records on top of a [`KeyValueStore`].
//!
//! Reads never fail because of bad data: anything that does not parse, is
//! missing a required field, or has expired is removed from the store and
//! reported as empty.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mentor_core::model::{AuthSession, MasteryState, Profile, normalize_email};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::repository::{
    KeyValueStore, MasteryRepository, ProfileRepository, SessionRepository, StorageError,
};

mod mapping;

use mapping::{ProfileMapRecord, ProfileRecord, QuizProgressRecord, SessionRecord};

pub const SESSION_KEY: &str = "physicsMentor.session";
pub const PROFILES_KEY: &str = "physicsMentor.profiles";
pub const QUIZ_PROGRESS_KEY: &str = "physicsMentor.quizProgress";

#[derive(Clone)]
pub struct LocalRecords {
    store: Arc<dyn KeyValueStore>,
}

impl LocalRecords {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    async fn read_json<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(raw) = self.store.get_item(key).await? else {
            return Ok(None);
        };
        match serde_json::from_str::<T>(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                self.discard(key, &err.to_string()).await?;
                Ok(None)
            }
        }
    }

    async fn write_json<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.store.set_item(key, &raw).await
    }

    async fn discard(&self, key: &str, reason: &str) -> Result<(), StorageError> {
        warn!(key, reason, "discarding stored record");
        self.store.remove_item(key).await
    }
}

#[async_trait]
impl SessionRepository for LocalRecords {
    async fn load_session(&self, now: DateTime<Utc>) -> Result<Option<AuthSession>, StorageError> {
        let Some(record) = self.read_json::<SessionRecord>(SESSION_KEY).await? else {
            return Ok(None);
        };
        let Some(session) = record.into_session() else {
            self.discard(SESSION_KEY, "missing required session field").await?;
            return Ok(None);
        };
        if session.is_expired(now) {
            debug!(email = session.email(), "stored session expired");
            self.discard(SESSION_KEY, "session expired").await?;
            return Ok(None);
        }
        Ok(Some(session))
    }

    async fn save_session(&self, session: &AuthSession) -> Result<(), StorageError> {
        self.write_json(SESSION_KEY, &SessionRecord::from_session(session))
            .await
    }

    async fn clear_session(&self) -> Result<(), StorageError> {
        self.store.remove_item(SESSION_KEY).await
    }
}

#[async_trait]
impl ProfileRepository for LocalRecords {
    async fn load_profiles(&self) -> Result<BTreeMap<String, Profile>, StorageError> {
        let Some(records) = self.read_json::<ProfileMapRecord>(PROFILES_KEY).await? else {
            return Ok(BTreeMap::new());
        };

        let mut profiles = BTreeMap::new();
        for (email, record) in records {
            let Some(profile) = record.into_profile() else {
                self.discard(PROFILES_KEY, "profile field out of range").await?;
                return Ok(BTreeMap::new());
            };
            profiles.insert(email, profile);
        }
        Ok(profiles)
    }

    async fn load_profile(&self, email: &str) -> Result<Option<Profile>, StorageError> {
        let mut profiles = self.load_profiles().await?;
        Ok(profiles.remove(&normalize_email(email)))
    }

    async fn save_profile(&self, email: &str, profile: &Profile) -> Result<(), StorageError> {
        let mut records: ProfileMapRecord = self
            .load_profiles()
            .await?
            .iter()
            .map(|(key, profile)| (key.clone(), ProfileRecord::from_profile(profile)))
            .collect();
        records.insert(normalize_email(email), ProfileRecord::from_profile(profile));
        self.write_json(PROFILES_KEY, &records).await
    }
}

#[async_trait]
impl MasteryRepository for LocalRecords {
    async fn load_mastery(&self) -> Result<MasteryState, StorageError> {
        Ok(self
            .read_json::<QuizProgressRecord>(QUIZ_PROGRESS_KEY)
            .await?
            .map(QuizProgressRecord::into_state)
            .unwrap_or_default())
    }

    async fn save_mastery(&self, state: &MasteryState) -> Result<(), StorageError> {
        self.write_json(QUIZ_PROGRESS_KEY, &QuizProgressRecord::from_state(state))
            .await
    }
}
