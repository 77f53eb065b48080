//! Error types for fetching and parsing dictionary search pages
//!
//! Parsing itself is infallible; these errors cover the fetch boundary,
//! parser construction from configuration, and feedback output.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DictError {
    #[error("HTTP request failed: {status} - {message}")]
    HttpRequestFailed {
        status: u16,
        message: String,
        url: String,
    },

    #[error("Network error while fetching {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid element query: {selector} - {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("URL resolution failed: {url} - {reason}")]
    UrlResolutionFailed { url: String, reason: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String, field: String },

    #[error("Failed to serialize feedback: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DictError {
    /// Create an invalid selector error
    pub fn invalid_selector(selector: &str, reason: &str) -> Self {
        Self::InvalidSelector {
            selector: selector.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a configuration error for the named field
    pub fn configuration(field: &str, message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
            field: field.to_string(),
        }
    }

    /// Whether this error was raised at the fetch boundary
    pub const fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Self::HttpRequestFailed { .. } | Self::Network { .. } | Self::UrlResolutionFailed { .. }
        )
    }

    /// HTTP status code, if the server answered at all
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::HttpRequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type DictResult<T> = Result<T, DictError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_failure_is_fetch_failure() {
        let err = DictError::HttpRequestFailed {
            status: 503,
            message: "Service Unavailable".to_string(),
            url: "http://dic.daum.net/search.do?q=a".to_string(),
        };
        assert!(err.is_fetch_failure());
        assert_eq!(err.status(), Some(503));
        assert_eq!(
            err.to_string(),
            "HTTP request failed: 503 - Service Unavailable"
        );
    }

    #[test]
    fn test_configuration_error_is_not_fetch_failure() {
        let err = DictError::configuration("dictionary.base_url", "relative URL without a base");
        assert!(!err.is_fetch_failure());
        assert_eq!(err.status(), None);
        assert!(err.to_string().contains("relative URL"));
    }
}
