//! Per-plate JSON file sink

use std::fs;
use std::path::PathBuf;

use tracing::{info, warn};

use crate::keyspace::Plate;
use crate::sink::{Sink, SinkError};
use crate::sweep::Outcome;

/// Writes one pretty-printed JSON file per successful plate.
///
/// Terminal failures produce a log line only; absence of a file is how a
/// failed or unknown plate is represented on disk.
pub struct JsonFileSink {
    output_dir: PathBuf,
}

impl JsonFileSink {
    /// Create the sink, ensuring the output directory exists.
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self, SinkError> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).map_err(|e| {
            SinkError::Io(format!(
                "failed to create {}: {e}",
                output_dir.display()
            ))
        })?;
        Ok(Self { output_dir })
    }

    fn plate_path(&self, plate: &Plate) -> PathBuf {
        self.output_dir.join(format!("{plate}.json"))
    }
}

impl Sink for JsonFileSink {
    fn record(&self, plate: &Plate, outcome: &Outcome) -> Result<(), SinkError> {
        match outcome {
            Outcome::Success(payload) => {
                let pretty = serde_json::to_string_pretty(payload)
                    .map_err(|e| SinkError::Serialization(e.to_string()))?;
                let path = self.plate_path(plate);
                fs::write(&path, pretty)
                    .map_err(|e| SinkError::Io(format!("failed to write {}: {e}", path.display())))?;
                info!(plate = %plate, path = %path.display(), "saved registration record");
            }
            Outcome::Abandoned => {
                info!(plate = %plate, "no registration found");
            }
            Outcome::ExhaustedRetries {
                attempts,
                last_error,
            } => {
                warn!(
                    plate = %plate,
                    attempts,
                    reason = %last_error,
                    "failed to retrieve data after multiple attempts"
                );
            }
        }
        Ok(())
    }
}
