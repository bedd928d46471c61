//! CLI error types and conversions

use crate::credential::CredentialError;
use crate::keyspace::KeyspaceError;
use crate::sink::SinkError;

/// CLI errors
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Keyspace error
    #[error("keyspace error: {0}")]
    Keyspace(#[from] KeyspaceError),

    /// Credential error
    #[error("credential error: {0}")]
    Credential(#[from] CredentialError),

    /// Sink error
    #[error("sink error: {0}")]
    Sink(#[from] SinkError),

    /// Invalid argument
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
