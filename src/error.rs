//! Error types for walls
//!
//! Every failure in the pipeline is terminal: errors propagate uncaught to
//! the binary's entry point, which turns them into a single stderr line and
//! exit code 1. Nothing below that layer catches or retries.

use thiserror::Error;

/// Result type alias for walls operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for walls
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "image_dir")
        key: Option<String>,
    },

    /// Upstream response did not match the expected shape
    ///
    /// Raised when Flickr returns data the parser cannot make sense of
    /// (wrong container type, missing keys, non-numeric dimensions). This is
    /// deliberately distinct from a legitimate "no qualifying size" outcome:
    /// malformed data usually means the API contract changed and the operator
    /// should hear about it rather than get a silently degraded search.
    #[error("unexpected data from Flickr: {0}")]
    MalformedResponse(String),

    /// Non-success HTTP status from a fetch or download
    #[error("transport error: HTTP {status} from {url}")]
    Transport {
        /// The HTTP status code that was returned
        status: u16,
        /// The URL that returned the non-success status
        url: String,
    },

    /// Network error (connect failure, timeout, interrupted body)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a configuration error tied to a specific key
    pub fn config(message: impl Into<String>, key: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.into()),
        }
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_displays_message() {
        let err = Error::config("the directory /nope does not exist", "image_dir");
        assert_eq!(
            err.to_string(),
            "configuration error: the directory /nope does not exist"
        );
    }

    #[test]
    fn config_helper_records_key() {
        let err = Error::config("bad value", "width");
        match err {
            Error::Config { key, .. } => assert_eq!(key.as_deref(), Some("width")),
            other => panic!("expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_response_display_names_flickr() {
        let err = Error::MalformedResponse("sizes.size is not an array".into());
        assert_eq!(
            err.to_string(),
            "unexpected data from Flickr: sizes.size is not an array"
        );
    }

    #[test]
    fn transport_error_display_includes_status_and_url() {
        let err = Error::Transport {
            status: 404,
            url: "https://live.staticflickr.com/x.jpg".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("404"), "message should contain the status: {msg}");
        assert!(
            msg.contains("live.staticflickr.com"),
            "message should contain the URL: {msg}"
        );
    }

    #[test]
    fn io_error_converts_via_from() {
        let err: Error = std::io::Error::other("disk fail").into();
        assert!(matches!(err, Error::Io(_)));
    }
}
