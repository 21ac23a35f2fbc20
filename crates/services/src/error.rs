//! Shared error types for the services crate.

use thiserror::Error;

use mentor_core::model::ProfileError;
use mentor_core::quiz::QuizError;
use storage::StorageError;
use storage::sqlite::SqliteInitError;

use crate::auth::messages;

/// Errors emitted by the auth gateway.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error("authentication is not configured")]
    Disabled,
    #[error("invalid email address")]
    InvalidEmail,
    #[error("password is required")]
    MissingPassword,
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("identity provider rejected the request: {0}")]
    Provider(String),
    #[error("identity request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("invalid identity provider configuration: {0}")]
    InvalidConfig(String),
    #[error("unexpected identity response: {0}")]
    InvalidResponse(String),
    #[error("identity provider unreachable: {0}")]
    Network(#[from] reqwest::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl AuthError {
    /// Message suitable for showing next to the sign-in form.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            AuthError::Disabled => "Accounts are not available right now.".to_string(),
            AuthError::InvalidEmail => messages::provider_message("INVALID_EMAIL").to_string(),
            AuthError::MissingPassword => {
                messages::provider_message("MISSING_PASSWORD").to_string()
            }
            AuthError::PasswordTooShort { min } => {
                format!("Password should be at least {min} characters.")
            }
            AuthError::Provider(code) => messages::provider_message(code).to_string(),
            AuthError::Network(err) if !err.is_decode() => messages::NETWORK_MESSAGE.to_string(),
            AuthError::Storage(_) => "Signed in, but your session could not be saved.".to_string(),
            AuthError::HttpStatus(_)
            | AuthError::InvalidConfig(_)
            | AuthError::InvalidResponse(_)
            | AuthError::Network(_) => messages::GENERIC_MESSAGE.to_string(),
        }
    }
}

/// Errors emitted by the quiz engine.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ProfileService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProfileServiceError {
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Auth(#[from] AuthError),
}
