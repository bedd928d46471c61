//! Integration tests for the per-plate retry policy
//!
//! Drives the executor through the public API with a scripted registry,
//! verifying the classification table end to end without a network.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use rego_sweep::credential::{Credential, CredentialBroker, CredentialError, TokenSource};
use rego_sweep::keyspace::{Plate, Prefix};
use rego_sweep::registry::{Exchange, RegistryLookup};
use rego_sweep::sweep::{Outcome, RequestExecutor, SweepConfig};

struct StaticTokens {
    fetches: AtomicU32,
}

impl StaticTokens {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            fetches: AtomicU32::new(0),
        })
    }
}

#[async_trait]
impl TokenSource for StaticTokens {
    async fn fetch_token(&self) -> Result<String, CredentialError> {
        let fetch = self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(format!("token-{fetch}"))
    }
}

struct ScriptedRegistry {
    script: Mutex<VecDeque<Exchange>>,
    lookups: AtomicU32,
}

impl ScriptedRegistry {
    fn new(script: Vec<Exchange>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            lookups: AtomicU32::new(0),
        })
    }
}

#[async_trait]
impl RegistryLookup for ScriptedRegistry {
    async fn lookup(&self, _plate: &Plate, _credential: &Credential) -> Exchange {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Exchange::Transport(String::from("script exhausted")))
    }
}

fn test_plate() -> Plate {
    Plate::sequence(Prefix::parse("XYZ").unwrap())
        .next()
        .unwrap()
}

fn config() -> SweepConfig {
    SweepConfig::default()
        .with_max_attempts(3)
        .with_retry_backoff(Duration::from_secs(5))
}

#[tokio::test(start_paused = true)]
async fn unknown_plate_is_abandoned_without_retry() {
    let registry = ScriptedRegistry::new(vec![Exchange::Reply {
        status: 404,
        body: None,
    }]);
    let broker = CredentialBroker::new(StaticTokens::new());
    let executor = RequestExecutor::new(registry.clone(), config());

    let outcome = executor.execute(&test_plate(), &broker).await;

    assert!(matches!(outcome, Outcome::Abandoned));
    assert_eq!(registry.lookups.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn transport_errors_spend_the_attempt_budget() {
    let registry = ScriptedRegistry::new(vec![
        Exchange::Transport(String::from("connection reset")),
        Exchange::Transport(String::from("connection reset")),
        Exchange::Transport(String::from("connection reset")),
    ]);
    let broker = CredentialBroker::new(StaticTokens::new());
    let executor = RequestExecutor::new(registry.clone(), config());

    let outcome = executor.execute(&test_plate(), &broker).await;

    match outcome {
        Outcome::ExhaustedRetries {
            attempts,
            last_error,
        } => {
            assert_eq!(attempts, 3);
            assert_eq!(last_error, "connection reset");
        }
        other => panic!("expected ExhaustedRetries, got {other:?}"),
    }
    assert_eq!(registry.lookups.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn stale_credential_recovers_in_two_attempts() {
    let payload = json!({"plate": "XYZ000", "registered": true});
    let registry = ScriptedRegistry::new(vec![
        Exchange::Reply {
            status: 401,
            body: None,
        },
        Exchange::Reply {
            status: 200,
            body: Some(payload.clone()),
        },
    ]);
    let tokens = StaticTokens::new();
    let broker = CredentialBroker::new(tokens.clone());
    let executor = RequestExecutor::new(registry.clone(), config());

    let outcome = executor.execute(&test_plate(), &broker).await;

    match outcome {
        Outcome::Success(value) => assert_eq!(value, payload),
        other => panic!("expected Success, got {other:?}"),
    }
    assert_eq!(registry.lookups.load(Ordering::SeqCst), 2);
    // Initial acquire plus the invalidate-forced refresh, nothing more.
    assert_eq!(tokens.fetches.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn mixed_transients_then_success_within_budget() {
    let payload = json!({"registered": true});
    let registry = ScriptedRegistry::new(vec![
        Exchange::Reply {
            status: 503,
            body: None,
        },
        Exchange::Transport(String::from("timeout")),
        Exchange::Reply {
            status: 200,
            body: Some(payload),
        },
    ]);
    let broker = CredentialBroker::new(StaticTokens::new());
    let executor = RequestExecutor::new(registry.clone(), config());

    let outcome = executor.execute(&test_plate(), &broker).await;

    assert!(outcome.is_success());
    assert_eq!(registry.lookups.load(Ordering::SeqCst), 3);
}
