//! # rego-sweep
//!
//! A concurrent sweeper for a vehicle-registration keyspace. Enumerates
//! plate identifiers from a persisted prefix cursor, queries the remote
//! registration service for each, and persists every hit as a JSON file,
//! while many in-flight requests share one expiring bearer credential.
//!
//! ## Features
//!
//! - **Bounded concurrency**: a fixed window of in-flight lookups is the
//!   backpressure mechanism; nothing else queues work
//! - **Single-flight credential refresh**: concurrent 401s collapse into
//!   one token-endpoint call
//! - **Declarative retry policy**: HTTP outcomes are classified into
//!   success/refresh/abandon/cooldown/transient actions in one pure function
//! - **Deterministic keyspace**: three-letter prefix advanced via a small
//!   cursor file, one thousand plates per prefix per run
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use rego_sweep::credential::{CredentialBroker, IdentityProvider, RefreshConfig};
//! use rego_sweep::keyspace::{Plate, Prefix};
//! use rego_sweep::registry::client::{shared_http_client, DEFAULT_BASE_URL, DEFAULT_SUBSCRIPTION_KEY};
//! use rego_sweep::registry::RegistryClient;
//! use rego_sweep::sink::JsonFileSink;
//! use rego_sweep::sweep::{Dispatcher, RequestExecutor, SweepConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = shared_http_client();
//! let refresh = RefreshConfig::from_env("REFRESH_TOKEN");
//! let broker = Arc::new(CredentialBroker::new(Arc::new(IdentityProvider::new(
//!     client.clone(),
//!     refresh,
//! ))));
//! let registry = Arc::new(RegistryClient::new(
//!     client,
//!     DEFAULT_BASE_URL,
//!     DEFAULT_SUBSCRIPTION_KEY,
//! ));
//!
//! let config = SweepConfig::default();
//! let sink = JsonFileSink::new(&config.output_dir)?;
//! let executor = Arc::new(RequestExecutor::new(registry, config.clone()));
//! let dispatcher = Dispatcher::new(executor, broker, config.concurrency);
//!
//! let prefix = Prefix::parse("AAA")?;
//! let summary = dispatcher.run(Plate::sequence(prefix), &sink).await;
//! println!("saved {} plates", summary.saved);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`keyspace`] - Plate generation and prefix cursor persistence
//! - [`credential`] - Shared bearer credential with single-flight refresh
//! - [`registry`] - Authenticated HTTP interface to the remote service
//! - [`sweep`] - Classification, per-plate retry loop, bounded dispatch
//! - [`sink`] - Outcome persistence (one JSON file per hit)
//! - [`shutdown`] - Early-abort coordination
//! - [`metrics`] - Counters over the `metrics` facade

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod credential;
pub mod keyspace;
pub mod metrics;
pub mod registry;
pub mod shutdown;
pub mod sink;
pub mod sweep;

pub use keyspace::{Plate, Prefix};
pub use sweep::{Dispatcher, Outcome, RequestExecutor, SweepConfig, SweepSummary};
