use std::sync::Arc;

use mentor_core::model::QuestionCatalog;
use storage::Storage;
use storage::repository::MasteryRepository;

use crate::Clock;
use crate::auth::{AuthService, IdentityConfig, IdentityProvider, RestIdentityProvider};
use crate::error::AppServicesError;
use crate::profile_service::ProfileService;
use crate::quiz::{ProgressChannel, ProgressSink, QuizEngine};

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    catalog: Arc<QuestionCatalog>,
    mastery: Arc<dyn MasteryRepository>,
    progress: ProgressChannel,
    auth: Arc<AuthService>,
    profiles: Arc<ProfileService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// `identity` of `None` leaves accounts disabled.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or the HTTP client fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        identity: Option<IdentityConfig>,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Self::from_storage(storage, clock, identity)
    }

    /// Build services over any storage bundle.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Auth` if the identity client cannot be built.
    pub fn from_storage(
        storage: Storage,
        clock: Clock,
        identity: Option<IdentityConfig>,
    ) -> Result<Self, AppServicesError> {
        let provider = match identity {
            Some(config) => {
                let provider: Arc<dyn IdentityProvider> =
                    Arc::new(RestIdentityProvider::new(config)?);
                Some(provider)
            }
            None => None,
        };
        Ok(Self::with_provider(storage, clock, provider))
    }

    /// Build services with an explicit identity backend.
    #[must_use]
    pub fn with_provider(
        storage: Storage,
        clock: Clock,
        provider: Option<Arc<dyn IdentityProvider>>,
    ) -> Self {
        let auth = Arc::new(AuthService::new(
            clock,
            provider,
            Arc::clone(&storage.sessions),
            Arc::clone(&storage.profiles),
        ));
        let profiles = Arc::new(ProfileService::new(clock, Arc::clone(&storage.profiles)));

        Self {
            clock,
            catalog: Arc::new(QuestionCatalog::builtin()),
            mastery: Arc::clone(&storage.mastery),
            progress: ProgressChannel::new(),
            auth,
            profiles,
        }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<QuestionCatalog> {
        Arc::clone(&self.catalog)
    }

    /// Channel the quiz engine publishes progress to.
    #[must_use]
    pub fn progress(&self) -> ProgressChannel {
        self.progress.clone()
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn profiles(&self) -> Arc<ProfileService> {
        Arc::clone(&self.profiles)
    }

    /// A new engine wired to the shared catalog, mastery record and progress channel.
    ///
    /// Call [`QuizEngine::load`] before use.
    #[must_use]
    pub fn quiz_engine(&self) -> QuizEngine {
        let sink: Arc<dyn ProgressSink> = Arc::new(self.progress.clone());
        QuizEngine::new(self.catalog(), Arc::clone(&self.mastery), sink)
    }
}
