//! Error types for the RT client.
//!
//! `RtError` covers the transport layer and response envelope;
//! [`DecodeError`](crate::decode::DecodeError) covers the payload decoder
//! and surfaces here wrapped in [`RtError::Decode`].
//!
//! # Security
//!
//! The RT password travels as a query parameter, so it can end up in error
//! text built from URLs or response bodies. Use `sanitize_message()` before
//! logging anything derived from an external source.

use reqwest::StatusCode;
use thiserror::Error;

use crate::decode::DecodeError;

/// Unified error type for all RT client operations.
///
/// Every error is returned to the immediate caller; nothing is retried or
/// suppressed internally.
#[derive(Error, Debug)]
pub enum RtError {
    /// Configuration error, missing or invalid environment variables.
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP client initialization failed.
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// The request could not be sent or the response could not be read.
    #[error("HTTP request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The server refused the provided user credentials (HTTP 401).
    #[error("server refused the provided user credentials")]
    Auth,

    /// The server returned a status other than 200 or 401.
    #[error("server returned status code {status}")]
    ServerStatus {
        /// The HTTP status code returned.
        status: StatusCode,
    },

    /// The response envelope was malformed: fewer than three newline-split
    /// parts, or a status line without the `RT` marker.
    #[error("invalid response from server: {detail}")]
    Protocol {
        /// Sanitized description of what was received.
        detail: String,
    },

    /// The payload failed to decode.
    #[error("error parsing response: {0}")]
    Decode(#[from] DecodeError),
}

impl RtError {
    /// Creates a configuration error for a missing environment variable.
    pub fn missing_env(var_name: &str) -> Self {
        RtError::Config(format!(
            "missing required environment variable: {}",
            var_name
        ))
    }

    /// Creates a configuration error for an invalid value.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        RtError::Config(message.into())
    }

    /// Creates a protocol error from a malformed response.
    pub fn protocol(detail: impl Into<String>) -> Self {
        RtError::Protocol {
            detail: detail.into(),
        }
    }

    /// Sanitizes a message to remove any occurrence of the password.
    ///
    /// Credentials must never appear in logs or error messages.
    #[must_use]
    pub fn sanitize_message(message: &str, password: &str) -> String {
        if password.is_empty() {
            return message.to_string();
        }
        message.replace(password, "[REDACTED]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_env_names_the_variable() {
        let err = RtError::missing_env("RT_PASSWORD");
        assert!(err.to_string().contains("RT_PASSWORD"));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn server_status_includes_code() {
        let err = RtError::ServerStatus {
            status: StatusCode::BAD_GATEWAY,
        };
        assert!(err.to_string().contains("502"));
    }

    #[test]
    fn decode_error_is_wrapped() {
        let err: RtError = DecodeError::MalformedLine {
            line: "oops".to_string(),
        }
        .into();
        assert!(err.to_string().contains("error parsing response"));
        assert!(err.to_string().contains("oops"));
    }

    #[test]
    fn sanitize_message_removes_password() {
        let sanitized = RtError::sanitize_message("GET /?user=a&pass=hunter2 failed", "hunter2");
        assert!(!sanitized.contains("hunter2"));
        assert!(sanitized.contains("[REDACTED]"));
    }

    #[test]
    fn sanitize_message_empty_password() {
        assert_eq!(RtError::sanitize_message("unchanged", ""), "unchanged");
    }
}
