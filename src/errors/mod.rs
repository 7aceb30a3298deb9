//! Error types for the kelner client.
//!
//! Provides an error taxonomy covering file access, text decoding,
//! transport, and response-parsing failures. Nothing is retried or
//! swallowed; every failure surfaces to the immediate caller.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for kelner operations.
pub type KelnerResult<T> = Result<T, KelnerError>;

/// Error type for kelner client operations.
#[derive(Debug, Error)]
pub enum KelnerError {
    /// Configuration error (invalid endpoint URL, etc.)
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message describing the configuration issue.
        message: String,
    },

    /// File access error (missing or unreadable file).
    #[error("File error for {path}: {message}")]
    File {
        /// Error message from the filesystem.
        message: String,
        /// The path that could not be read.
        path: PathBuf,
    },

    /// Text decoding error (payload did not match the guessed encoding).
    #[error("Decode error ({encoding}): {message}")]
    Decode {
        /// Error message describing the decoding failure.
        message: String,
        /// The character encoding that was attempted.
        encoding: String,
    },

    /// Network/connection error.
    #[error("Network error: {message}")]
    Network {
        /// Error message.
        message: String,
        /// Underlying cause.
        cause: Option<String>,
    },

    /// Timeout error.
    #[error("Request timeout: {message}")]
    Timeout {
        /// Error message.
        message: String,
    },

    /// Server error (non-2xx status from the classification service).
    #[error("Server error (HTTP {status_code}): {message}")]
    Server {
        /// Error message.
        message: String,
        /// HTTP status code.
        status_code: u16,
    },

    /// Response shape error (non-JSON body, missing score vector).
    #[error("Response error: {message}")]
    Response {
        /// Error message describing what was wrong with the response.
        message: String,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message.
        message: String,
    },
}

impl KelnerError {
    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        KelnerError::Configuration {
            message: message.into(),
        }
    }

    /// Creates a file access error.
    pub fn file(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        KelnerError::File {
            message: message.into(),
            path: path.into(),
        }
    }

    /// Creates a decoding error.
    pub fn decode(encoding: impl Into<String>, message: impl Into<String>) -> Self {
        KelnerError::Decode {
            message: message.into(),
            encoding: encoding.into(),
        }
    }

    /// Creates a response shape error.
    pub fn response(message: impl Into<String>) -> Self {
        KelnerError::Response {
            message: message.into(),
        }
    }

    /// Creates a server error.
    pub fn server(status_code: u16, message: impl Into<String>) -> Self {
        KelnerError::Server {
            message: message.into(),
            status_code,
        }
    }
}

impl From<serde_json::Error> for KelnerError {
    fn from(err: serde_json::Error) -> Self {
        KelnerError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for KelnerError {
    fn from(err: serde_yaml::Error) -> Self {
        KelnerError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<url::ParseError> for KelnerError {
    fn from(err: url::ParseError) -> Self {
        KelnerError::Configuration {
            message: format!("Invalid URL: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_error_display_includes_path() {
        let error = KelnerError::file("/tmp/missing.png", "No such file or directory");
        let message = error.to_string();
        assert!(message.contains("/tmp/missing.png"));
        assert!(message.contains("No such file"));
    }

    #[test]
    fn test_server_error_display_includes_status() {
        let error = KelnerError::server(503, "service unavailable");
        assert!(error.to_string().contains("503"));
    }

    #[test]
    fn test_serde_json_error_maps_to_serialization() {
        let err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let error = KelnerError::from(err);
        assert!(matches!(error, KelnerError::Serialization { .. }));
    }

    #[test]
    fn test_url_parse_error_maps_to_configuration() {
        let err = "not a url".parse::<url::Url>().unwrap_err();
        let error = KelnerError::from(err);
        assert!(matches!(error, KelnerError::Configuration { .. }));
    }
}
