//! Shared bearer credential management
//!
//! Exactly one live credential exists per process. It is read by every
//! in-flight lookup and replaced only by the [`broker::CredentialBroker`],
//! whose refresh critical section guarantees that concurrent authorization
//! failures collapse into a single token-endpoint call.

pub mod broker;
pub mod refresh;

pub use broker::{Credential, CredentialBroker};
pub use refresh::{IdentityProvider, RefreshConfig, TokenSource};

/// Credential errors
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// The long-lived refresh secret was not configured
    #[error("refresh secret missing: set the {0} environment variable")]
    MissingSecret(String),

    /// The token endpoint could not be reached
    #[error("token endpoint request failed: {0}")]
    Transport(String),

    /// The token endpoint answered with a non-2xx status
    #[error("token endpoint returned {status}: {body}")]
    Endpoint {
        /// HTTP status code from the token endpoint
        status: u16,
        /// Response body, for operator diagnosis
        body: String,
    },

    /// The token endpoint answered 2xx but the payload was not usable
    #[error("malformed token response: {0}")]
    MalformedResponse(String),
}
