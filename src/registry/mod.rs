//! Remote registration-service interface
//!
//! The registry is reached once per plate via an authenticated GET. This
//! module isolates transport from policy: every failure mode of one HTTP
//! attempt is folded into [`Exchange`], so the retry engine can be driven
//! by synthetic exchanges in tests without a network.

use async_trait::async_trait;
use serde_json::Value;

use crate::credential::Credential;
use crate::keyspace::Plate;

pub mod client;

pub use client::RegistryClient;

/// Raw result of one HTTP exchange, before retry policy applies.
#[derive(Debug)]
pub enum Exchange {
    /// The service answered with a status; `body` carries the decoded JSON
    /// payload when the response had one.
    Reply {
        /// HTTP status code
        status: u16,
        /// Decoded JSON body, if the response carried one
        body: Option<Value>,
    },
    /// The request never produced a status (connect failure, timeout).
    Transport(String),
}

/// One plate lookup against the remote registry.
#[async_trait]
pub trait RegistryLookup: Send + Sync {
    /// Issue the authenticated GET for `plate`.
    ///
    /// Never fails at the call level: transport errors are folded into the
    /// returned [`Exchange`] so the classifier sees the complete picture.
    async fn lookup(&self, plate: &Plate, credential: &Credential) -> Exchange;
}
