//! Sweep and advance-prefix command implementations

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::cli::CliError;
use crate::credential::refresh::DEFAULT_SECRET_ENV;
use crate::credential::{CredentialBroker, IdentityProvider, RefreshConfig};
use crate::keyspace::{Plate, PrefixCursor, DEFAULT_CURSOR_FILE, PLATES_PER_PREFIX};
use crate::registry::client::{
    shared_http_client, DEFAULT_BASE_URL, DEFAULT_SUBSCRIPTION_KEY,
};
use crate::registry::RegistryClient;
use crate::shutdown::SharedAbort;
use crate::sink::{JsonFileSink, Sink, SinkError};
use crate::sweep::config::{DEFAULT_CONCURRENCY, DEFAULT_OUTPUT_DIR, MAX_CONCURRENCY};
use crate::sweep::{Dispatcher, Outcome, RequestExecutor, SweepConfig, SweepSummary};

/// Parse and validate a concurrency value.
fn parse_concurrency(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if value == 0 {
        return Err("concurrency must be at least 1".to_string());
    }
    if value > MAX_CONCURRENCY {
        return Err(format!(
            "concurrency {value} exceeds maximum of {MAX_CONCURRENCY}"
        ));
    }
    Ok(value)
}

/// Registration keyspace sweeper CLI
#[derive(Parser, Debug)]
#[command(name = "rego-sweep")]
#[command(about = "Sweep the registration keyspace against the registry service", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sweep the current prefix's 1000 plates
    Sweep(SweepArgs),

    /// Advance the persisted prefix cursor by one step
    AdvancePrefix(AdvancePrefixArgs),
}

/// Arguments for the sweep command
#[derive(Args, Debug)]
pub struct SweepArgs {
    /// Number of concurrently in-flight lookups
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY, value_parser = parse_concurrency)]
    pub concurrency: usize,

    /// Maximum attempts per plate for transient failures
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..=20))]
    pub max_attempts: u32,

    /// Seconds to wait before retrying a transient failure
    #[arg(long, default_value_t = 5)]
    pub backoff_secs: u64,

    /// Seconds to pause a task after a 429 response
    #[arg(long, default_value_t = 60)]
    pub cooldown_secs: u64,

    /// Directory receiving one JSON file per matched plate
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Prefix cursor state file
    #[arg(long, default_value = DEFAULT_CURSOR_FILE)]
    pub cursor_file: PathBuf,

    /// Environment variable holding the long-lived refresh secret
    #[arg(long, default_value = DEFAULT_SECRET_ENV)]
    pub secret_env: String,

    /// Registration-check base URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// API-gateway subscription key
    #[arg(long, default_value = DEFAULT_SUBSCRIPTION_KEY)]
    pub subscription_key: String,
}

/// Sink decorator that ticks the progress bar per terminal outcome.
struct ProgressSink<S> {
    inner: S,
    bar: ProgressBar,
}

impl<S: Sink> Sink for ProgressSink<S> {
    fn record(&self, plate: &Plate, outcome: &Outcome) -> Result<(), SinkError> {
        let result = self.inner.record(plate, outcome);
        self.bar.inc(1);
        result
    }
}

fn create_progress_bar(len: u64) -> ProgressBar {
    let bar = ProgressBar::new(len);
    bar.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} plates",
        )
        .expect("progress template is valid")
        .progress_chars("#>-"),
    );
    bar
}

impl SweepArgs {
    /// Run one sweep over the current prefix.
    pub async fn execute(&self, abort: SharedAbort) -> Result<SweepSummary, CliError> {
        let cursor = PrefixCursor::new(&self.cursor_file);
        let prefix = cursor.load()?;
        info!(prefix = %prefix, concurrency = self.concurrency, "starting sweep");

        let refresh = RefreshConfig::from_env(&self.secret_env);
        if !refresh.has_secret() {
            return Err(CliError::InvalidArgument(format!(
                "refresh secret missing: set the {} environment variable",
                self.secret_env
            )));
        }

        let client = shared_http_client();
        let broker = Arc::new(CredentialBroker::new(Arc::new(IdentityProvider::new(
            client.clone(),
            refresh,
        ))));
        let registry = Arc::new(RegistryClient::new(
            client,
            &self.base_url,
            &self.subscription_key,
        ));

        let config = SweepConfig::default()
            .with_concurrency(self.concurrency)
            .with_max_attempts(self.max_attempts)
            .with_retry_backoff(Duration::from_secs(self.backoff_secs))
            .with_rate_limit_cooldown(Duration::from_secs(self.cooldown_secs))
            .with_output_dir(&self.output_dir);

        let bar = create_progress_bar(PLATES_PER_PREFIX as u64);
        let sink = ProgressSink {
            inner: JsonFileSink::new(&config.output_dir)?,
            bar: bar.clone(),
        };

        let executor = Arc::new(RequestExecutor::new(registry, config.clone()));
        let dispatcher =
            Dispatcher::new(executor, broker, config.concurrency).with_abort(abort);

        let summary = dispatcher.run(Plate::sequence(prefix), &sink).await;
        bar.finish_and_clear();

        println!("Sweep of prefix {prefix} complete");
        println!("Saved: {}", summary.saved);
        println!("Not registered: {}", summary.abandoned);
        println!("Failed: {}", summary.exhausted);

        Ok(summary)
    }
}

/// Arguments for the advance-prefix command
#[derive(Args, Debug)]
pub struct AdvancePrefixArgs {
    /// Prefix cursor state file
    #[arg(long, default_value = DEFAULT_CURSOR_FILE)]
    pub cursor_file: PathBuf,
}

impl AdvancePrefixArgs {
    /// Advance the cursor one step and report the new prefix.
    pub fn execute(&self) -> Result<(), CliError> {
        let cursor = PrefixCursor::new(&self.cursor_file);
        let next = cursor.advance()?;
        println!("Updated prefix: {next}");
        Ok(())
    }
}
