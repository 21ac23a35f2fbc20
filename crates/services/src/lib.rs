#![forbid(unsafe_code)]

pub mod app_services;
pub mod auth;
pub mod error;
pub mod profile_service;
pub mod quiz;

pub use mentor_core::Clock;

pub use app_services::AppServices;
pub use auth::{
    AuthService, IdentityConfig, IdentityProvider, IdentityTokens, RestIdentityProvider,
};
pub use error::{AppServicesError, AuthError, ProfileServiceError, QuizServiceError};
pub use profile_service::ProfileService;
pub use quiz::{ProgressChannel, ProgressSink, QuizEngine};
