//! Internal error helpers for mapping HTTP/reqwest errors to [`StreamError`].

use std::time::Duration;

use void_types::StreamError;

/// Map a non-success status on the initial request to [`StreamError::Rejected`].
pub(crate) fn map_http_status(status: reqwest::StatusCode, body: &str) -> StreamError {
    StreamError::Rejected {
        status: status.as_u16(),
        body: body.to_string(),
    }
}

/// Map a [`reqwest::Error`] raised while sending the request.
pub(crate) fn map_reqwest_error(err: reqwest::Error, connect_timeout: Duration) -> StreamError {
    if err.is_timeout() {
        StreamError::Timeout(connect_timeout)
    } else {
        StreamError::Network(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_500_maps_to_rejected() {
        let err = map_http_status(reqwest::StatusCode::INTERNAL_SERVER_ERROR, "boom");
        assert!(matches!(err, StreamError::Rejected { status: 500, ref body } if body == "boom"));
        assert!(err.is_retryable());
    }

    #[test]
    fn status_401_maps_to_rejected_and_is_terminal() {
        let err = map_http_status(reqwest::StatusCode::UNAUTHORIZED, "");
        assert_eq!(err.status(), Some(401));
        assert!(!err.is_retryable());
    }

    #[test]
    fn empty_body_preserved_in_error() {
        let err = map_http_status(reqwest::StatusCode::BAD_REQUEST, "");
        assert!(matches!(err, StreamError::Rejected { ref body, .. } if body.is_empty()));
    }
}
