use std::sync::Arc;

use tokio::sync::Mutex;

use services::{AppServices, AuthService, Clock, ProfileService, ProgressChannel, QuizEngine};

/// What the UI needs from the composition root.
pub trait UiApp: Send + Sync {
    fn clock(&self) -> Clock;
    fn auth(&self) -> Arc<AuthService>;
    fn profiles(&self) -> Arc<ProfileService>;
    fn progress(&self) -> ProgressChannel;
    fn quiz_engine(&self) -> QuizEngine;
}

impl UiApp for AppServices {
    fn clock(&self) -> Clock {
        AppServices::clock(self)
    }

    fn auth(&self) -> Arc<AuthService> {
        AppServices::auth(self)
    }

    fn profiles(&self) -> Arc<ProfileService> {
        AppServices::profiles(self)
    }

    fn progress(&self) -> ProgressChannel {
        AppServices::progress(self)
    }

    fn quiz_engine(&self) -> QuizEngine {
        AppServices::quiz_engine(self)
    }
}

#[derive(Clone)]
pub struct AppContext {
    clock: Clock,
    auth: Arc<AuthService>,
    profiles: Arc<ProfileService>,
    progress: ProgressChannel,
    engine: Arc<Mutex<QuizEngine>>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            clock: app.clock(),
            auth: app.auth(),
            profiles: app.profiles(),
            progress: app.progress(),
            engine: Arc::new(Mutex::new(app.quiz_engine())),
        }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn profiles(&self) -> Arc<ProfileService> {
        Arc::clone(&self.profiles)
    }

    #[must_use]
    pub fn progress(&self) -> ProgressChannel {
        self.progress.clone()
    }

    /// The one quiz engine shared by every view.
    #[must_use]
    pub fn engine(&self) -> Arc<Mutex<QuizEngine>> {
        Arc::clone(&self.engine)
    }

    /// Read stored quiz progress into the engine and publish it.
    pub async fn load_progress(&self) {
        self.engine.lock().await.load().await;
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
