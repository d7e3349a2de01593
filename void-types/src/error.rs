//! Error types for all void crates.

use std::time::Duration;

/// Errors surfaced to the caller of a streaming exchange.
///
/// Malformed frames are not represented here: they are logged and skipped by
/// the stream consumer and never abort an exchange.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    // Retryable errors
    /// Connection, DNS, or send failure before a response arrived.
    #[error("network error: {0}")]
    Network(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// The response body failed mid-stream.
    #[error("stream read error: {0}")]
    Read(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// Connecting to the backend took longer than the configured timeout.
    #[error("timeout after {0:?}")]
    Timeout(Duration),

    // Terminal errors (unless the status says otherwise)
    /// The backend answered the initial request with a non-success status.
    #[error("request rejected with HTTP {status}: {body}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },
    /// The credential provider could not produce a token.
    #[error("credential error: {0}")]
    Credentials(String),
    /// The client configuration is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl StreamError {
    /// Whether this error is likely transient and the request can be retried.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::Read(_) | Self::Timeout(_) => true,
            Self::Rejected { status, .. } => *status == 429 || *status >= 500,
            Self::Credentials(_) | Self::InvalidConfig(_) => false,
        }
    }

    /// The HTTP status of a rejected request, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_display_names_status() {
        let err = StreamError::Rejected {
            status: 500,
            body: "internal error".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("500"), "expected status in message: {msg}");
        assert!(msg.contains("internal error"), "expected body in message: {msg}");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn server_errors_and_rate_limits_are_retryable() {
        for status in [429, 500, 502, 503] {
            let err = StreamError::Rejected {
                status,
                body: String::new(),
            };
            assert!(err.is_retryable(), "HTTP {status} should be retryable");
        }
    }

    #[test]
    fn client_errors_are_not_retryable() {
        for status in [400, 401, 403, 404] {
            let err = StreamError::Rejected {
                status,
                body: String::new(),
            };
            assert!(!err.is_retryable(), "HTTP {status} should not be retryable");
        }
        assert!(!StreamError::Credentials("expired".into()).is_retryable());
        assert!(!StreamError::InvalidConfig("bad url".into()).is_retryable());
    }

    #[test]
    fn transport_errors_are_retryable() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset");
        assert!(StreamError::Read(Box::new(io)).is_retryable());
        assert!(StreamError::Timeout(Duration::from_secs(10)).is_retryable());
        assert_eq!(StreamError::Timeout(Duration::from_secs(1)).status(), None);
    }

    #[test]
    fn network_error_keeps_source() {
        use std::error::Error as _;
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = StreamError::Network(Box::new(io));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("refused"));
    }
}
