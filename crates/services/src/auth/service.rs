use std::sync::Arc;

use tracing::{info, warn};

use mentor_core::Clock;
use mentor_core::model::{
    AuthSession, MIN_PASSWORD_LEN, Profile, is_plausible_email, normalize_email,
};
use storage::repository::{ProfileRepository, SessionRepository};

use super::provider::{IdentityProvider, IdentityTokens};
use crate::error::AuthError;

/// Account flows layered over an `IdentityProvider` and the session record.
#[derive(Clone)]
pub struct AuthService {
    clock: Clock,
    provider: Option<Arc<dyn IdentityProvider>>,
    sessions: Arc<dyn SessionRepository>,
    profiles: Arc<dyn ProfileRepository>,
}

impl AuthService {
    #[must_use]
    pub fn new(
        clock: Clock,
        provider: Option<Arc<dyn IdentityProvider>>,
        sessions: Arc<dyn SessionRepository>,
        profiles: Arc<dyn ProfileRepository>,
    ) -> Self {
        Self {
            clock,
            provider,
            sessions,
            profiles,
        }
    }

    /// Whether an identity provider is configured.
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.provider.is_some()
    }

    /// Create an account, store its session and seed an empty profile.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` for invalid input (checked before any request), provider
    /// rejections, transport failures, or when the session cannot be stored.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let provider = self.provider()?;
        let email = validated_email(email)?;
        if password.is_empty() {
            return Err(AuthError::MissingPassword);
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::PasswordTooShort {
                min: MIN_PASSWORD_LEN,
            });
        }

        let tokens = provider.sign_up(&email, password).await?;
        let session = self.store_session(tokens).await?;
        self.seed_profile(session.email()).await;
        info!(email = session.email(), "account created");
        Ok(session)
    }

    /// Sign in with existing credentials and store the session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError` for invalid input, provider rejections, transport
    /// failures, or when the session cannot be stored.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let provider = self.provider()?;
        let email = validated_email(email)?;
        if password.is_empty() {
            return Err(AuthError::MissingPassword);
        }

        let tokens = provider.sign_in(&email, password).await?;
        let session = self.store_session(tokens).await?;
        info!(email = session.email(), "signed in");
        Ok(session)
    }

    /// # Errors
    ///
    /// Returns `AuthError::Storage` if the session record cannot be removed.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        self.sessions.clear_session().await?;
        info!("signed out");
        Ok(())
    }

    /// Restore the stored session; expired or unreadable sessions are cleared.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Storage` for backend failures.
    pub async fn current_session(&self) -> Result<Option<AuthSession>, AuthError> {
        Ok(self.sessions.load_session(self.clock.now()).await?)
    }

    /// # Errors
    ///
    /// Returns `AuthError::Storage` for backend failures.
    pub async fn current_email(&self) -> Result<Option<String>, AuthError> {
        Ok(self
            .current_session()
            .await?
            .map(|session| session.email().to_string()))
    }

    fn provider(&self) -> Result<&Arc<dyn IdentityProvider>, AuthError> {
        self.provider.as_ref().ok_or(AuthError::Disabled)
    }

    async fn store_session(&self, tokens: IdentityTokens) -> Result<AuthSession, AuthError> {
        let expires_in = tokens.expires_in;
        let session = AuthSession::issued(
            normalize_email(&tokens.email),
            tokens.id_token,
            tokens.refresh_token,
            expires_in,
            self.clock.now(),
        )
        .ok_or_else(|| AuthError::InvalidResponse(format!("expiresIn {expires_in} out of range")))?;
        self.sessions.save_session(&session).await?;
        Ok(session)
    }

    async fn seed_profile(&self, email: &str) {
        match self.profiles.load_profile(email).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                let profile = Profile::for_new_account(email);
                if let Err(err) = self.profiles.save_profile(email, &profile).await {
                    warn!(error = %err, email, "could not seed profile");
                }
            }
            Err(err) => warn!(error = %err, email, "could not read profiles"),
        }
    }
}

fn validated_email(raw: &str) -> Result<String, AuthError> {
    if !is_plausible_email(raw) {
        return Err(AuthError::InvalidEmail);
    }
    Ok(normalize_email(raw))
}
