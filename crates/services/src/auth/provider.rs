use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use mentor_core::model::AuthSession;

use super::config::IdentityConfig;
use super::messages::error_code;
use crate::error::AuthError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Tokens returned by a successful sign-up or sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityTokens {
    pub email: String,
    pub id_token: String,
    pub refresh_token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

/// Email/password identity backend.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Create an account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Provider` with the backend's code when the account is rejected.
    async fn sign_up(&self, email: &str, password: &str) -> Result<IdentityTokens, AuthError>;

    /// Verify credentials for an existing account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Provider` with the backend's code when the credentials are rejected.
    async fn sign_in(&self, email: &str, password: &str) -> Result<IdentityTokens, AuthError>;
}

/// `IdentityProvider` speaking the identity toolkit REST protocol.
#[derive(Clone)]
pub struct RestIdentityProvider {
    client: Client,
    config: IdentityConfig,
}

impl RestIdentityProvider {
    /// # Errors
    ///
    /// Returns `AuthError::Network` if the HTTP client cannot be built.
    pub fn new(config: IdentityConfig) -> Result<Self, AuthError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, config })
    }

    #[must_use]
    pub fn config(&self) -> &IdentityConfig {
        &self.config
    }

    async fn call(
        &self,
        action: &str,
        email: &str,
        password: &str,
    ) -> Result<IdentityTokens, AuthError> {
        let url = self.config.endpoint(action)?;
        let payload = PasswordRequest {
            email,
            password,
            return_secure_token: true,
        };

        let response = self.client.post(url).json(&payload).send().await?;
        let status = response.status();
        debug!(%status, action, "identity provider responded");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(parsed) => AuthError::Provider(error_code(&parsed.error.message).to_string()),
                Err(_) => AuthError::HttpStatus(status),
            });
        }

        let body: TokenResponse = response.json().await?;
        body.into_tokens(email)
    }
}

#[async_trait]
impl IdentityProvider for RestIdentityProvider {
    #[instrument(skip(self, password))]
    async fn sign_up(&self, email: &str, password: &str) -> Result<IdentityTokens, AuthError> {
        self.call("signUp", email, password).await
    }

    #[instrument(skip(self, password))]
    async fn sign_in(&self, email: &str, password: &str) -> Result<IdentityTokens, AuthError> {
        self.call("signInWithPassword", email, password).await
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponse {
    #[serde(default)]
    email: Option<String>,
    id_token: String,
    #[serde(default)]
    refresh_token: String,
    expires_in: ExpiresIn,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ExpiresIn {
    Seconds(i64),
    Text(String),
}

impl ExpiresIn {
    fn seconds(&self) -> Result<i64, AuthError> {
        let secs = match self {
            ExpiresIn::Seconds(secs) => *secs,
            ExpiresIn::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| AuthError::InvalidResponse(format!("expiresIn `{text}`")))?,
        };
        if !AuthSession::is_representable_lifetime(secs) {
            return Err(AuthError::InvalidResponse(format!(
                "expiresIn {secs} out of range"
            )));
        }
        Ok(secs)
    }
}

impl TokenResponse {
    fn into_tokens(self, requested_email: &str) -> Result<IdentityTokens, AuthError> {
        if self.id_token.trim().is_empty() {
            return Err(AuthError::InvalidResponse("missing idToken".into()));
        }
        let expires_in = self.expires_in.seconds()?;
        let email = self
            .email
            .filter(|email| !email.trim().is_empty())
            .unwrap_or_else(|| requested_email.to_string());
        Ok(IdentityTokens {
            email,
            id_token: self.id_token,
            refresh_token: self.refresh_token,
            expires_in,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(server: &MockServer) -> RestIdentityProvider {
        let config = IdentityConfig::new("test-key", &format!("{}/v1", server.uri())).unwrap();
        RestIdentityProvider::new(config).unwrap()
    }

    #[tokio::test]
    async fn sign_up_posts_credentials_and_reads_string_expiry() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:signUp"))
            .and(query_param("key", "test-key"))
            .and(body_json(json!({
                "email": "ada@example.com",
                "password": "secret1",
                "returnSecureToken": true
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "email": "ada@example.com",
                "idToken": "id-1",
                "refreshToken": "refresh-1",
                "expiresIn": "3600"
            })))
            .mount(&server)
            .await;

        let tokens = provider_for(&server)
            .sign_up("ada@example.com", "secret1")
            .await
            .unwrap();
        assert_eq!(
            tokens,
            IdentityTokens {
                email: "ada@example.com".into(),
                id_token: "id-1".into(),
                refresh_token: "refresh-1".into(),
                expires_in: 3600,
            }
        );
    }

    #[tokio::test]
    async fn sign_in_accepts_numeric_expiry() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:signInWithPassword"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "idToken": "id-2",
                "refreshToken": "refresh-2",
                "expiresIn": 1800
            })))
            .mount(&server)
            .await;

        let tokens = provider_for(&server)
            .sign_in("grace@example.com", "hunter22")
            .await
            .unwrap();
        assert_eq!(tokens.email, "grace@example.com");
        assert_eq!(tokens.expires_in, 1800);
    }

    #[tokio::test]
    async fn provider_error_code_is_reduced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:signUp"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": { "code": 400, "message": "WEAK_PASSWORD : Password should be at least 6 characters" }
            })))
            .mount(&server)
            .await;

        let err = provider_for(&server)
            .sign_up("ada@example.com", "abcdef")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Provider(ref code) if code == "WEAK_PASSWORD"));
        assert_eq!(
            err.user_message(),
            "Password should be at least 6 characters."
        );
    }

    #[tokio::test]
    async fn unparsable_failure_reports_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:signInWithPassword"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
            .mount(&server)
            .await;

        let err = provider_for(&server)
            .sign_in("ada@example.com", "secret1")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::HttpStatus(status) if status.as_u16() == 503));
        assert_eq!(err.user_message(), "Authentication failed. Please try again.");
    }

    #[tokio::test]
    async fn missing_id_token_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:signInWithPassword"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "idToken": "",
                "expiresIn": "3600"
            })))
            .mount(&server)
            .await;

        let err = provider_for(&server)
            .sign_in("ada@example.com", "secret1")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn oversized_expiry_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts:signInWithPassword"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "idToken": "id-3",
                "refreshToken": "refresh-3",
                "expiresIn": "9223372036854775807"
            })))
            .mount(&server)
            .await;

        let err = provider_for(&server)
            .sign_in("ada@example.com", "secret1")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn unreachable_server_maps_to_connectivity_message() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = IdentityConfig::new("test-key", &format!("http://{addr}/v1")).unwrap();
        let err = RestIdentityProvider::new(config)
            .unwrap()
            .sign_in("ada@example.com", "secret1")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Network(_)));
        assert_eq!(err.user_message(), crate::auth::messages::NETWORK_MESSAGE);
    }
}
