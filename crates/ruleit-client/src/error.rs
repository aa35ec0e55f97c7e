//! Error types for the RuleIt client

use ruleit_core::CoreError;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Failures a gateway call (or its local pre-validation) can surface.
///
/// The gateway performs no retries and no backoff: every failure is
/// reported synchronously to the operation that triggered it, and any
/// editor or cache state the response would have replaced is left exactly
/// as it was before the call.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Locally detected structural problem; never sent to the network
    #[error("validation error: {0}")]
    Validation(#[from] CoreError),

    /// Evaluation input that is not valid JSON text; rejected before the
    /// network call
    #[error("invalid JSON input: {0}")]
    InvalidJson(String),

    /// The requested rule or page does not exist (HTTP 404), surfaced
    /// distinctly so a caller can render "not found" rather than "retry"
    #[error("rule not found: {0}")]
    NotFound(String),

    /// Any other non-2xx response; `message` carries the body's `error`
    /// field when the server supplied one
    #[error("server rejected request ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Server-provided error message, or the raw body
        message: String,
    },

    /// Transport-level failure (connection refused, timeout, ...)
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 2xx response whose body does not match the wire contract
    #[error("unexpected response body: {0}")]
    UnexpectedResponse(String),
}

impl ClientError {
    /// Whether a caller could reasonably retry the same operation.
    ///
    /// Validation and not-found failures are deterministic; everything
    /// else is a transient failure of this one round trip.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ClientError::Api { .. }
                | ClientError::Transport(_)
                | ClientError::UnexpectedResponse(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(ClientError::Api {
            status: 500,
            message: "boom".to_string()
        }
        .is_transient());
        assert!(ClientError::UnexpectedResponse("bad".to_string()).is_transient());
        assert!(!ClientError::NotFound("42".to_string()).is_transient());
        assert!(!ClientError::InvalidJson("nope".to_string()).is_transient());
        assert!(!ClientError::Validation(CoreError::EmptyExpression).is_transient());
    }
}
