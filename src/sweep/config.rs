//! Sweep policy constants and runtime configuration

use std::path::PathBuf;
use std::time::Duration;

/// Maximum attempts per plate for transient failures.
/// 3 attempts recovers from blips without hammering a service that is
/// clearly refusing the plate.
pub const MAX_ATTEMPTS: u32 = 3;

/// Fixed delay before retrying a transient failure.
pub const RETRY_BACKOFF: Duration = Duration::from_secs(5);

/// Cooldown applied when the service answers 429.
/// Long enough for the gateway's rate window to reset; the paused task
/// also thins overall request pressure while it waits.
pub const RATE_LIMIT_COOLDOWN: Duration = Duration::from_secs(60);

/// Default number of concurrently in-flight lookups.
pub const DEFAULT_CONCURRENCY: usize = 15;

/// Upper bound on concurrency to prevent self-inflicted rate limiting.
pub const MAX_CONCURRENCY: usize = 64;

/// Default directory receiving one JSON file per matched plate.
pub const DEFAULT_OUTPUT_DIR: &str = "plates";

/// Runtime configuration for one sweep.
///
/// Assembled from CLI flags; the constants above are only defaults, not
/// contracts of the engine itself.
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Concurrency window enforced by the [`Dispatcher`](crate::sweep::Dispatcher)
    pub concurrency: usize,
    /// Attempt budget for transient failures per plate
    pub max_attempts: u32,
    /// Delay between transient-failure attempts
    pub retry_backoff: Duration,
    /// Per-task pause after a 429 response
    pub rate_limit_cooldown: Duration,
    /// Directory receiving successful payloads
    pub output_dir: PathBuf,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            max_attempts: MAX_ATTEMPTS,
            retry_backoff: RETRY_BACKOFF,
            rate_limit_cooldown: RATE_LIMIT_COOLDOWN,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl SweepConfig {
    /// Set the concurrency window.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Set the transient-failure attempt budget.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Set the delay between transient-failure attempts.
    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    /// Set the pause applied after a 429 response.
    pub fn with_rate_limit_cooldown(mut self, cooldown: Duration) -> Self {
        self.rate_limit_cooldown = cooldown;
        self
    }

    /// Set the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }
}
