//! reqwest-backed registry client
//!
//! One shared HTTP client serves both plate lookups and token refreshes.
//! The client is global so connection pooling works across every
//! concurrent lookup, and carries explicit timeouts to prevent indefinite
//! hangs.

use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;
use tracing::debug;

use crate::credential::Credential;
use crate::keyspace::Plate;
use crate::registry::{Exchange, RegistryLookup};

/// Default registration-check endpoint; the plate is appended per request.
pub const DEFAULT_BASE_URL: &str = "https://api.sa.gov.au/mysagov/checkvehicles";

/// API-gateway subscription key header name.
pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Default subscription key issued for the registration-check product.
pub const DEFAULT_SUBSCRIPTION_KEY: &str = "4b761fe5b77d443f883698da01afa5e3";

/// HTTP connect timeout (seconds) - time to establish the TCP connection
const HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;
/// HTTP request timeout (seconds) - overall time for the entire request
const HTTP_REQUEST_TIMEOUT_SECS: u64 = 30;

static SHARED_HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .connect_timeout(Duration::from_secs(HTTP_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(HTTP_REQUEST_TIMEOUT_SECS))
        .build()
        .unwrap_or_else(|e| {
            panic!("FATAL: failed to build HTTP client: {e}. Check system TLS configuration.");
        })
});

/// Get the shared HTTP client.
///
/// `reqwest::Client` clones cheaply (Arc internally), so every caller
/// receives a handle onto the same connection pool.
pub fn shared_http_client() -> Client {
    SHARED_HTTP_CLIENT.clone()
}

/// HTTP client for the vehicle-registration service.
pub struct RegistryClient {
    client: Client,
    base_url: String,
    subscription_key: String,
}

impl RegistryClient {
    /// Create a registry client.
    ///
    /// # Arguments
    /// * `client` - Shared HTTP client
    /// * `base_url` - Registration-check endpoint without the plate segment
    /// * `subscription_key` - Value for the API-gateway subscription header
    pub fn new(
        client: Client,
        base_url: impl Into<String>,
        subscription_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            subscription_key: subscription_key.into(),
        }
    }

    fn plate_url(&self, plate: &Plate) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), plate)
    }
}

#[async_trait]
impl RegistryLookup for RegistryClient {
    async fn lookup(&self, plate: &Plate, credential: &Credential) -> Exchange {
        let url = self.plate_url(plate);
        debug!(plate = %plate, "issuing registration lookup");

        let response = match self
            .client
            .get(&url)
            .bearer_auth(credential.token())
            .header(SUBSCRIPTION_KEY_HEADER, &self.subscription_key)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return Exchange::Transport(e.to_string()),
        };

        let status = response.status().as_u16();
        // A body that fails to decode is surfaced as Reply { body: None };
        // the classifier decides what that means for the given status.
        let body = response.json().await.ok();
        Exchange::Reply { status, body }
    }
}
