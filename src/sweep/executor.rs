//! Per-plate retry loop
//!
//! Drives one plate through the retry state machine: attempting(n) →
//! awaiting refresh → awaiting cooldown → terminal. Transient failures
//! consume the attempt budget; a single refresh-granted retry is allowed
//! per plate; 404 and success are terminal on first occurrence.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::credential::CredentialBroker;
use crate::keyspace::Plate;
use crate::registry::RegistryLookup;
use crate::sweep::classify::{classify, Action};
use crate::sweep::config::SweepConfig;

/// Terminal result for one plate.
#[derive(Debug)]
pub enum Outcome {
    /// The registry returned a record for this plate.
    Success(serde_json::Value),
    /// The plate does not exist (404); terminal, but not a failure.
    Abandoned,
    /// The attempt budget was spent without a terminal answer.
    ExhaustedRetries {
        /// Transient attempts actually charged
        attempts: u32,
        /// Reason from the last failed attempt
        last_error: String,
    },
}

impl Outcome {
    /// Whether this outcome carries a payload to persist.
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }
}

/// Drives one plate to a terminal outcome.
///
/// Holds no per-plate state between calls: the attempt counter and the
/// refresh grant live on the stack of one `execute` invocation and are
/// discarded with it.
pub struct RequestExecutor {
    registry: Arc<dyn RegistryLookup>,
    config: SweepConfig,
}

impl RequestExecutor {
    /// Create an executor over a registry lookup implementation.
    pub fn new(registry: Arc<dyn RegistryLookup>, config: SweepConfig) -> Self {
        Self { registry, config }
    }

    /// Execute the retry loop for `plate`.
    ///
    /// At most `max_attempts` transient failures are charged, plus one
    /// retry granted for a credential refresh. A 401 after that grant is
    /// charged as a transient failure and does not invalidate again, so a
    /// service that answers 401 forever cannot loop the executor.
    pub async fn execute(&self, plate: &Plate, broker: &CredentialBroker) -> Outcome {
        let mut attempts = 0u32;
        let mut refresh_granted = false;
        let mut last_error = String::from("no attempt issued");

        while attempts < self.config.max_attempts {
            let credential = match broker.acquire().await {
                Ok(credential) => credential,
                Err(e) => {
                    warn!(plate = %plate, error = %e, "credential unavailable");
                    last_error = e.to_string();
                    attempts += 1;
                    if attempts < self.config.max_attempts {
                        tokio::time::sleep(self.config.retry_backoff).await;
                    }
                    continue;
                }
            };

            crate::metrics::lookup_issued();
            let exchange = self.registry.lookup(plate, &credential).await;

            match classify(exchange) {
                Action::Success(payload) => {
                    debug!(plate = %plate, "lookup succeeded");
                    return Outcome::Success(payload);
                }
                Action::Abandon => {
                    debug!(plate = %plate, "plate not registered, giving up");
                    return Outcome::Abandoned;
                }
                Action::RefreshAndRetry if !refresh_granted => {
                    info!(plate = %plate, "unauthorized, refreshing bearer token");
                    refresh_granted = true;
                    broker.invalidate().await;
                }
                Action::RefreshAndRetry => {
                    warn!(plate = %plate, "unauthorized again after refresh");
                    crate::metrics::attempt_failed();
                    last_error = String::from("unauthorized after credential refresh");
                    attempts += 1;
                    if attempts < self.config.max_attempts {
                        tokio::time::sleep(self.config.retry_backoff).await;
                    }
                }
                Action::RetryAfterCooldown => {
                    warn!(
                        plate = %plate,
                        cooldown_secs = self.config.rate_limit_cooldown.as_secs(),
                        "rate limited, pausing this task"
                    );
                    crate::metrics::rate_limited();
                    tokio::time::sleep(self.config.rate_limit_cooldown).await;
                }
                Action::Transient(reason) => {
                    warn!(
                        plate = %plate,
                        attempt = attempts + 1,
                        max_attempts = self.config.max_attempts,
                        reason = %reason,
                        "attempt failed"
                    );
                    crate::metrics::attempt_failed();
                    last_error = reason;
                    attempts += 1;
                    if attempts < self.config.max_attempts {
                        tokio::time::sleep(self.config.retry_backoff).await;
                    }
                }
            }
        }

        Outcome::ExhaustedRetries {
            attempts,
            last_error,
        }
    }
}
