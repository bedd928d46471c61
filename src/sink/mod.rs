//! Outcome persistence
//!
//! The sink is a collaborator of the sweep engine, not part of it: the
//! dispatcher hands it every terminal outcome and consumes no return
//! value beyond logging failures.

use crate::keyspace::Plate;
use crate::sweep::Outcome;

pub mod json;

pub use json::JsonFileSink;

/// Sink errors
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// IO error
    #[error("IO error: {0}")]
    Io(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Receives every terminal outcome of a sweep.
pub trait Sink: Send + Sync {
    /// Record one plate's terminal outcome.
    fn record(&self, plate: &Plate, outcome: &Outcome) -> Result<(), SinkError>;
}
