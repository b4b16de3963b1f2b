use thiserror::Error;

/// Unified error type for the inference client.
///
/// Aggregates transport-level failures and remote API errors into one enum so
/// the retry layer can classify any failure with a single predicate.
#[derive(Debug, Error)]
pub enum Error {
    /// The remote API responded with a non-success HTTP status.
    ///
    /// `error_type` and `message` are parsed from the standard
    /// `{"error": {"type": ..., "message": ...}}` body shape when present.
    #[error("API error: HTTP {status}{}", format_remote(.error_type, .message))]
    Api {
        status: u16,
        error_type: Option<String>,
        message: Option<String>,
    },

    /// Network transport failure (connect, timeout, body read).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("runtime error: {0}")]
    Runtime(String),
}

fn format_remote(error_type: &Option<String>, message: &Option<String>) -> String {
    match (error_type, message) {
        (Some(t), Some(m)) => format!(" ({}): {}", t, m),
        (Some(t), None) => format!(" ({})", t),
        (None, Some(m)) => format!(": {}", m),
        (None, None) => String::new(),
    }
}

impl Error {
    /// HTTP status carried by the error, if the remote responded at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display_includes_status_and_metadata() {
        let err = Error::Api {
            status: 429,
            error_type: Some("rate_limit_error".to_string()),
            message: Some("slow down".to_string()),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("429"));
        assert!(rendered.contains("rate_limit_error"));
        assert!(rendered.contains("slow down"));
    }

    #[test]
    fn api_error_display_without_metadata() {
        let err = Error::Api {
            status: 503,
            error_type: None,
            message: None,
        };
        assert_eq!(err.to_string(), "API error: HTTP 503");
    }

    #[test]
    fn status_extraction() {
        let err = Error::Api {
            status: 400,
            error_type: None,
            message: None,
        };
        assert_eq!(err.status(), Some(400));
        assert_eq!(Error::Runtime("x".into()).status(), None);
    }
}
