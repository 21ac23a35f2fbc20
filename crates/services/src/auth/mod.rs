mod config;
pub mod messages;
mod provider;
mod service;

pub use config::{DEFAULT_IDENTITY_URL, IdentityConfig};
pub use provider::{IdentityProvider, IdentityTokens, RestIdentityProvider};
pub use service::AuthService;
