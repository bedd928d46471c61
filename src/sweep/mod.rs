//! The concurrent sweep engine
//!
//! This is the policy layer governing when and how registry lookups are
//! issued and retried:
//!
//! 1. **Classification**: [`classify`] maps each HTTP exchange to an action
//! 2. **Retry loop**: [`executor::RequestExecutor`] drives one plate to a
//!    terminal outcome under the attempt budget
//! 3. **Scheduling**: [`dispatcher::Dispatcher`] bounds how many plates are
//!    in flight at once and forwards every outcome to the sink
//! 4. **Configuration**: [`config`] holds the policy knobs and defaults
//!
//! The dispatcher never retries a plate itself; retries, refresh-triggered
//! re-attempts, and rate-limit cooldowns all live inside the executor, so
//! one plate's trouble never stalls the scheduling of another beyond the
//! concurrency window it occupies.

pub mod classify;
pub mod config;
pub mod dispatcher;
pub mod executor;

pub use classify::{classify, Action};
pub use config::SweepConfig;
pub use dispatcher::{Dispatcher, SweepSummary};
pub use executor::{Outcome, RequestExecutor};
