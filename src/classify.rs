//! Error classification: decides whether a failed attempt is worth retrying.

use tracing::{debug, info, warn};

use crate::Error;

/// Statuses that signal a malformed request. These are only retried when the
/// remote marks the failure as an idempotency error.
const INVALID_REQUEST_STATUSES: [u16; 3] = [400, 404, 415];

/// Classify a failure as retryable (`true`) or fatal (`false`).
///
/// The policy is conservative: everything is retried except HTTP 400/404/415
/// responses without the `idempotency_error` marker, which indicate the
/// request itself is invalid and cannot succeed on a retry. Each branch logs
/// its decision; logging has no control-flow effect.
pub fn is_retryable(err: &Error) -> bool {
    match err {
        Error::Api {
            status,
            error_type,
            message,
        } if INVALID_REQUEST_STATUSES.contains(status) => {
            if error_type.as_deref() == Some("idempotency_error") {
                info!(
                    status,
                    message = message.as_deref().unwrap_or(""),
                    "retrying after idempotency error"
                );
                true
            } else {
                info!(
                    status,
                    error_type = error_type.as_deref().unwrap_or(""),
                    "invalid request, not retrying"
                );
                false
            }
        }
        Error::Api {
            status, message, ..
        } => {
            info!(
                status,
                message = message.as_deref().unwrap_or(""),
                "retrying after API error"
            );
            true
        }
        Error::Transport(e) if e.is_connect() => {
            info!("retrying after connection error");
            true
        }
        Error::Transport(e) if e.is_timeout() => {
            info!("retrying after a timeout error");
            true
        }
        Error::Transport(e) if e.is_body() || e.is_decode() => {
            info!("retrying after a read error");
            true
        }
        other => {
            warn!(error = %other, "retrying after an unexpected error");
            debug!(error = ?other, "unexpected error detail");
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(status: u16, error_type: Option<&str>) -> Error {
        Error::Api {
            status,
            error_type: error_type.map(str::to_string),
            message: Some("test".to_string()),
        }
    }

    #[test]
    fn invalid_request_statuses_are_fatal() {
        for status in [400, 404, 415] {
            assert!(!is_retryable(&api_error(status, Some("invalid_request_error"))));
            assert!(!is_retryable(&api_error(status, None)));
        }
    }

    #[test]
    fn idempotency_error_is_retryable_despite_invalid_status() {
        for status in [400, 404, 415] {
            assert!(is_retryable(&api_error(status, Some("idempotency_error"))));
        }
    }

    #[test]
    fn other_statuses_are_retryable() {
        for status in [401, 403, 429, 500, 502, 503] {
            assert!(is_retryable(&api_error(status, Some("server_error"))));
        }
    }

    #[test]
    fn unclassified_errors_are_retryable() {
        assert!(is_retryable(&Error::Runtime("boom".to_string())));
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        assert!(is_retryable(&Error::Serialization(json_err)));
    }
}
