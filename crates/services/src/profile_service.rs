use std::sync::Arc;

use tracing::info;

use mentor_core::Clock;
use mentor_core::model::{Profile, ProfileDraft, normalize_email};
use storage::repository::ProfileRepository;

use crate::error::ProfileServiceError;

#[derive(Clone)]
pub struct ProfileService {
    clock: Clock,
    repo: Arc<dyn ProfileRepository>,
}

impl ProfileService {
    #[must_use]
    pub fn new(clock: Clock, repo: Arc<dyn ProfileRepository>) -> Self {
        Self { clock, repo }
    }

    /// Load the stored profile for `email` (or defaults if missing).
    ///
    /// # Errors
    ///
    /// Returns `ProfileServiceError` on storage failures.
    pub async fn load(&self, email: &str) -> Result<Profile, ProfileServiceError> {
        let profile = self.repo.load_profile(&normalize_email(email)).await?;
        Ok(profile.unwrap_or_default())
    }

    /// Validate the form values, stamp them and persist.
    ///
    /// # Errors
    ///
    /// Returns `ProfileServiceError` if validation fails or persistence fails.
    pub async fn save(
        &self,
        email: &str,
        draft: ProfileDraft,
    ) -> Result<Profile, ProfileServiceError> {
        let profile = draft.validate(self.clock.now())?;
        let key = normalize_email(email);
        self.repo.save_profile(&key, &profile).await?;
        info!(email = %key, "profile saved");
        Ok(profile)
    }
}
