//! Bounded-concurrency dispatch over the plate sequence
//!
//! Purely a scheduling layer: keeps at most `concurrency` executor
//! invocations in flight, forwards every terminal outcome to the sink,
//! and never retries a plate at its own level. Completion order between
//! plates is not defined; within one plate, attempts are sequential
//! inside the executor.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{error, info};

use crate::credential::CredentialBroker;
use crate::keyspace::Plate;
use crate::shutdown::SharedAbort;
use crate::sink::Sink;
use crate::sweep::executor::{Outcome, RequestExecutor};

/// Counts of terminal outcomes for one sweep.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SweepSummary {
    /// Plates whose payload was handed to the sink
    pub saved: u64,
    /// Plates the registry does not know (404)
    pub abandoned: u64,
    /// Plates that spent their attempt budget
    pub exhausted: u64,
}

impl SweepSummary {
    /// Total terminal outcomes observed.
    pub fn total(&self) -> u64 {
        self.saved + self.abandoned + self.exhausted
    }

    fn absorb(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Success(_) => {
                self.saved += 1;
                crate::metrics::outcome_recorded("saved");
            }
            Outcome::Abandoned => {
                self.abandoned += 1;
                crate::metrics::outcome_recorded("abandoned");
            }
            Outcome::ExhaustedRetries { .. } => {
                self.exhausted += 1;
                crate::metrics::outcome_recorded("exhausted");
            }
        }
    }
}

/// Schedules plate executions within the concurrency window.
pub struct Dispatcher {
    executor: Arc<RequestExecutor>,
    broker: Arc<CredentialBroker>,
    concurrency: usize,
    abort: Option<SharedAbort>,
}

impl Dispatcher {
    /// Create a dispatcher.
    pub fn new(
        executor: Arc<RequestExecutor>,
        broker: Arc<CredentialBroker>,
        concurrency: usize,
    ) -> Self {
        Self {
            executor,
            broker,
            concurrency,
            abort: None,
        }
    }

    /// Attach an abort handle for early termination.
    pub fn with_abort(mut self, abort: SharedAbort) -> Self {
        self.abort = Some(abort);
        self
    }

    /// Drive every plate to a terminal outcome, recording each with `sink`.
    ///
    /// Returns once no plate is left in flight. Sink failures are logged
    /// and do not stop the sweep. After an abort is triggered, plates not
    /// yet dispatched resolve as exhausted without touching the network.
    pub async fn run<I>(&self, plates: I, sink: &dyn Sink) -> SweepSummary
    where
        I: IntoIterator<Item = Plate>,
    {
        let mut summary = SweepSummary::default();

        let mut outcomes = stream::iter(plates)
            .map(|plate| {
                let executor = Arc::clone(&self.executor);
                let broker = Arc::clone(&self.broker);
                let abort = self.abort.clone();
                async move {
                    if abort.is_some_and(|a| a.is_triggered()) {
                        return (
                            plate,
                            Outcome::ExhaustedRetries {
                                attempts: 0,
                                last_error: String::from("sweep aborted before dispatch"),
                            },
                        );
                    }
                    let outcome = executor.execute(&plate, &broker).await;
                    (plate, outcome)
                }
            })
            .buffer_unordered(self.concurrency.max(1));

        while let Some((plate, outcome)) = outcomes.next().await {
            summary.absorb(&outcome);
            if let Err(e) = sink.record(&plate, &outcome) {
                error!(plate = %plate, error = %e, "failed to record outcome");
            }
        }

        info!(
            saved = summary.saved,
            abandoned = summary.abandoned,
            exhausted = summary.exhausted,
            "sweep complete"
        );
        summary
    }
}
