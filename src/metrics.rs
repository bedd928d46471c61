//! Sweep observability counters
//!
//! Thin wrappers over the `metrics` facade so call sites stay terse and
//! metric names live in one place. Without an installed recorder these
//! are no-ops, which keeps the library free of any export concern.

use metrics::counter;

/// Count one issued registry lookup.
pub fn lookup_issued() {
    counter!("sweep_lookups_total").increment(1);
}

/// Count one failed attempt (transient classification).
pub fn attempt_failed() {
    counter!("sweep_attempts_failed_total").increment(1);
}

/// Count one rate-limit cooldown.
pub fn rate_limited() {
    counter!("sweep_rate_limited_total").increment(1);
}

/// Count one completed credential refresh.
pub fn credential_refreshed() {
    counter!("sweep_credential_refreshes_total").increment(1);
}

/// Count one terminal outcome by kind ("saved", "abandoned", "exhausted").
pub fn outcome_recorded(kind: &'static str) {
    counter!("sweep_outcomes_total", "kind" => kind).increment(1);
}
