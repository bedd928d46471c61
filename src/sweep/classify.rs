//! HTTP outcome classification
//!
//! Pure mapping from one transport result to the action the executor
//! takes next. Centralizing this keeps the retry policy declarative and
//! lets it be tested against synthetic status codes without a network.

use serde_json::Value;

use crate::registry::Exchange;

/// Action the executor takes for one exchange.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// 2xx with a decodable JSON body; terminal, persist the payload.
    Success(Value),
    /// 401: invalidate the shared credential, then retry.
    RefreshAndRetry,
    /// 404: the plate does not exist; terminal, no retry.
    Abandon,
    /// 429: pause this task for the rate-limit cooldown, then retry.
    RetryAfterCooldown,
    /// Everything else (5xx, undecodable success body, transport failure);
    /// counts against the attempt budget.
    Transient(String),
}

/// Map one exchange to its action.
pub fn classify(exchange: Exchange) -> Action {
    match exchange {
        Exchange::Reply { status, body } if (200..300).contains(&status) => match body {
            Some(payload) => Action::Success(payload),
            None => Action::Transient(format!("status {status} without decodable JSON body")),
        },
        Exchange::Reply { status: 401, .. } => Action::RefreshAndRetry,
        Exchange::Reply { status: 404, .. } => Action::Abandon,
        Exchange::Reply { status: 429, .. } => Action::RetryAfterCooldown,
        Exchange::Reply { status, .. } => Action::Transient(format!("unexpected status {status}")),
        Exchange::Transport(reason) => Action::Transient(reason),
    }
}
