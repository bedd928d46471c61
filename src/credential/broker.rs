//! Single-flight credential broker
//!
//! Owns the process-wide bearer token. The refresh critical section is a
//! tokio mutex held across the refresh call, so callers that observe a
//! missing credential concurrently coalesce into one token-endpoint
//! request and all receive the same refreshed credential.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::credential::refresh::TokenSource;
use crate::credential::CredentialError;

/// Bearer token shared read-many across in-flight lookups.
#[derive(Debug, Clone)]
pub struct Credential {
    token: Arc<str>,
}

impl Credential {
    fn new(token: String) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// The raw bearer token.
    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Owns the current credential and serializes refreshes.
pub struct CredentialBroker {
    source: Arc<dyn TokenSource>,
    current: Mutex<Option<Credential>>,
    refreshes: AtomicU64,
}

impl CredentialBroker {
    /// Create a broker over a token source.
    pub fn new(source: Arc<dyn TokenSource>) -> Self {
        Self {
            source,
            current: Mutex::new(None),
            refreshes: AtomicU64::new(0),
        }
    }

    /// Return the current credential, refreshing it first if absent.
    ///
    /// Callers that arrive while a refresh is in flight block on the lock
    /// and then see the freshly cached credential without triggering a
    /// second refresh. A failed refresh leaves the broker unrefreshed, so
    /// the next `acquire` retries the token endpoint.
    pub async fn acquire(&self) -> Result<Credential, CredentialError> {
        let mut current = self.current.lock().await;
        if let Some(credential) = current.as_ref() {
            return Ok(credential.clone());
        }

        info!("refreshing bearer token");
        let token = self.source.fetch_token().await?;
        self.refreshes.fetch_add(1, Ordering::Relaxed);
        crate::metrics::credential_refreshed();

        let credential = Credential::new(token);
        *current = Some(credential.clone());
        Ok(credential)
    }

    /// Drop the cached credential after an observed authorization failure.
    ///
    /// Invalidation never contacts the identity provider; the next
    /// `acquire` call performs the refresh.
    pub async fn invalidate(&self) {
        debug!("bearer token invalidated");
        *self.current.lock().await = None;
    }

    /// Number of refreshes completed so far.
    pub fn refresh_count(&self) -> u64 {
        self.refreshes.load(Ordering::Relaxed)
    }
}
