//! CLI command implementations

pub mod error;
pub mod sweep;

pub use error::CliError;
pub use sweep::{AdvancePrefixArgs, Cli, Commands, SweepArgs};
