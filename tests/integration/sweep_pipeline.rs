//! End-to-end sweep pipeline test
//!
//! Dispatcher, executor, broker, and the JSON file sink wired together,
//! with a registry stub that answers per plate: only the plates the stub
//! "knows" end up as files on disk.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use rego_sweep::credential::{Credential, CredentialBroker, CredentialError, TokenSource};
use rego_sweep::keyspace::{Plate, Prefix};
use rego_sweep::registry::{Exchange, RegistryLookup};
use rego_sweep::sink::JsonFileSink;
use rego_sweep::sweep::{Dispatcher, RequestExecutor, SweepConfig};

struct StaticTokens;

#[async_trait]
impl TokenSource for StaticTokens {
    async fn fetch_token(&self) -> Result<String, CredentialError> {
        Ok(String::from("token"))
    }
}

/// Answers by the plate's final digit: 0-4 registered, 5-7 unknown,
/// 8-9 persistently failing.
struct DigitRegistry;

#[async_trait]
impl RegistryLookup for DigitRegistry {
    async fn lookup(&self, plate: &Plate, _credential: &Credential) -> Exchange {
        let last = plate.as_str().chars().last().unwrap();
        match last {
            '0'..='4' => Exchange::Reply {
                status: 200,
                body: Some(json!({"plate": plate.as_str(), "registered": true})),
            },
            '5'..='7' => Exchange::Reply {
                status: 404,
                body: None,
            },
            _ => Exchange::Reply {
                status: 500,
                body: None,
            },
        }
    }
}

#[tokio::test(start_paused = true)]
async fn sweep_persists_exactly_the_registered_plates() {
    let dir = tempfile::tempdir().unwrap();
    let output_dir = dir.path().join("plates");

    let config = SweepConfig::default()
        .with_concurrency(8)
        .with_max_attempts(2)
        .with_retry_backoff(Duration::from_millis(100))
        .with_output_dir(&output_dir);

    let broker = Arc::new(CredentialBroker::new(Arc::new(StaticTokens)));
    let executor = Arc::new(RequestExecutor::new(Arc::new(DigitRegistry), config.clone()));
    let dispatcher = Dispatcher::new(executor, broker, config.concurrency);
    let sink = JsonFileSink::new(&output_dir).unwrap();

    let prefix = Prefix::parse("AAA").unwrap();
    let plates: Vec<Plate> = Plate::sequence(prefix).take(20).collect();
    let summary = dispatcher.run(plates, &sink).await;

    // 20 plates: ten end in 0-4, six in 5-7, four in 8-9.
    assert_eq!(summary.saved, 10);
    assert_eq!(summary.abandoned, 6);
    assert_eq!(summary.exhausted, 4);
    assert_eq!(summary.total(), 20);

    let mut files: Vec<String> = std::fs::read_dir(&output_dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    files.sort();
    assert_eq!(files.len(), 10);
    assert_eq!(files[0], "AAA000.json");
    assert_eq!(files[9], "AAA014.json");

    // Payloads round-trip through the pretty printer.
    let body: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(output_dir.join("AAA003.json")).unwrap())
            .unwrap();
    assert_eq!(body["plate"], "AAA003");
}
