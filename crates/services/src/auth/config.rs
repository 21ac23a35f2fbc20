use std::env;

use url::Url;

use crate::error::AuthError;

pub const DEFAULT_IDENTITY_URL: &str = "https://identitytoolkit.googleapis.com/v1";

/// Where and how to reach the identity provider.
#[derive(Clone, Debug)]
pub struct IdentityConfig {
    api_key: String,
    base_url: Url,
}

impl IdentityConfig {
    /// # Errors
    ///
    /// Returns `AuthError::InvalidConfig` for a blank key or an unparsable URL.
    pub fn new(api_key: impl Into<String>, base_url: &str) -> Result<Self, AuthError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(AuthError::InvalidConfig("api key is empty".into()));
        }
        let trimmed = base_url.trim().trim_end_matches('/');
        let base_url = Url::parse(trimmed)
            .map_err(|err| AuthError::InvalidConfig(format!("{trimmed}: {err}")))?;
        if base_url.cannot_be_a_base() {
            return Err(AuthError::InvalidConfig(format!(
                "{trimmed}: not a base url"
            )));
        }
        Ok(Self { api_key, base_url })
    }

    /// Read `PHYSICS_MENTOR_API_KEY` and `PHYSICS_MENTOR_IDENTITY_URL`.
    ///
    /// Returns `None` when no key is set, which leaves accounts disabled.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidConfig` if a key is set but the URL is invalid.
    pub fn from_env() -> Result<Option<Self>, AuthError> {
        let Ok(api_key) = env::var("PHYSICS_MENTOR_API_KEY") else {
            return Ok(None);
        };
        if api_key.trim().is_empty() {
            return Ok(None);
        }
        let base_url = env::var("PHYSICS_MENTOR_IDENTITY_URL")
            .unwrap_or_else(|_| DEFAULT_IDENTITY_URL.into());
        Self::new(api_key, &base_url).map(Some)
    }

    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Endpoint for an `accounts:<action>` call with the key in the query.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidConfig` if the URL cannot be built.
    pub fn endpoint(&self, action: &str) -> Result<Url, AuthError> {
        let raw = format!(
            "{}/accounts:{action}",
            self.base_url.as_str().trim_end_matches('/')
        );
        Url::parse_with_params(&raw, &[("key", self.api_key.as_str())])
            .map_err(|err| AuthError::InvalidConfig(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_carries_action_and_key() {
        let config = IdentityConfig::new("abc123", "https://id.example.com/v1/").unwrap();
        let url = config.endpoint("signUp").unwrap();
        assert_eq!(
            url.as_str(),
            "https://id.example.com/v1/accounts:signUp?key=abc123"
        );
    }

    #[test]
    fn rejects_blank_key_and_bad_url() {
        assert!(matches!(
            IdentityConfig::new("  ", DEFAULT_IDENTITY_URL),
            Err(AuthError::InvalidConfig(_))
        ));
        assert!(matches!(
            IdentityConfig::new("key", "not a url"),
            Err(AuthError::InvalidConfig(_))
        ));
    }
}
