//! Access-token refresh against the identity provider
//!
//! POSTs `grant_type=refresh_token` with the long-lived secret and reads
//! the `access_token` field out of the JSON reply. The broker owns the
//! retry policy; this module performs exactly one call per invocation.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::credential::CredentialError;

/// Default identity-provider token endpoint.
pub const DEFAULT_TOKEN_URL: &str =
    "https://identity.sa.gov.au/auth/realms/sagov-idx/protocol/openid-connect/token";

/// OAuth client id registered for the registration-check consumer.
pub const DEFAULT_CLIENT_ID: &str = "DigitalPass";

/// Environment variable consulted for the refresh secret by default.
pub const DEFAULT_SECRET_ENV: &str = "REFRESH_TOKEN";

/// Configuration for the token refresh call.
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    token_url: String,
    client_id: String,
    secret: Option<String>,
    secret_env: String,
}

impl RefreshConfig {
    /// Build a config, reading the refresh secret from `secret_env` now.
    ///
    /// An absent or empty variable is not an immediate error: the failure
    /// surfaces as [`CredentialError::MissingSecret`] on the first refresh,
    /// and callers may check [`has_secret`](Self::has_secret) up front to
    /// fail before issuing any lookups.
    pub fn from_env(secret_env: &str) -> Self {
        Self {
            token_url: DEFAULT_TOKEN_URL.to_string(),
            client_id: DEFAULT_CLIENT_ID.to_string(),
            secret: std::env::var(secret_env).ok().filter(|s| !s.is_empty()),
            secret_env: secret_env.to_string(),
        }
    }

    /// Override the token endpoint.
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }

    /// Override the OAuth client id.
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self
    }

    /// Supply the refresh secret directly instead of via the environment.
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    /// Whether a refresh secret is available.
    pub fn has_secret(&self) -> bool {
        self.secret.is_some()
    }

    fn secret(&self) -> Result<&str, CredentialError> {
        self.secret
            .as_deref()
            .ok_or_else(|| CredentialError::MissingSecret(self.secret_env.clone()))
    }
}

/// Response from the token endpoint; only the access token is consumed.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Produces fresh access tokens for the broker.
///
/// The seam exists so the single-flight property can be exercised without
/// a live identity provider; production code uses [`IdentityProvider`].
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Fetch one fresh access token.
    async fn fetch_token(&self) -> Result<String, CredentialError>;
}

/// Identity-provider-backed token source.
pub struct IdentityProvider {
    client: reqwest::Client,
    config: RefreshConfig,
}

impl IdentityProvider {
    /// Create a token source over a shared HTTP client.
    pub fn new(client: reqwest::Client, config: RefreshConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl TokenSource for IdentityProvider {
    async fn fetch_token(&self) -> Result<String, CredentialError> {
        let secret = self.config.secret()?;

        debug!(endpoint = %self.config.token_url, "requesting access token");
        let response = self
            .client
            .post(&self.config.token_url)
            .form(&[
                ("client_id", self.config.client_id.as_str()),
                ("grant_type", "refresh_token"),
                ("refresh_token", secret),
            ])
            .send()
            .await
            .map_err(|e| CredentialError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("<no body>"));
            return Err(CredentialError::Endpoint {
                status: status.as_u16(),
                body,
            });
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| CredentialError::MalformedResponse(e.to_string()))?;
        Ok(token.access_token)
    }
}
