//! Error types for Brandscope.
//!
//! Library crates use [`BrandscopeError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Failure of a single HTTP retrieval.
///
/// The variant decides whether the fetcher's retry loop keeps going.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// HTTP 401/403. Short-circuits the retry loop.
    #[error("{url}: HTTP {status} (not retried)")]
    NonRetryable { url: String, status: u16 },

    /// Timeout, connection failure, or any other non-2xx status.
    #[error("{url}: {message}")]
    Retryable { url: String, message: String },
}

impl FetchError {
    /// Whether another attempt may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Retryable { .. })
    }

    /// Classify an HTTP status that is not a success.
    pub fn from_status(url: impl Into<String>, status: u16) -> Self {
        let url = url.into();
        match status {
            401 | 403 => Self::NonRetryable { url, status },
            _ => Self::Retryable {
                url,
                message: format!("HTTP {status}"),
            },
        }
    }

    /// Wrap a transport-level failure (timeout, DNS, connection reset, body read).
    pub fn transport(url: impl Into<String>, msg: impl std::fmt::Display) -> Self {
        Self::Retryable {
            url: url.into(),
            message: msg.to_string(),
        }
    }
}

/// Top-level error type for all Brandscope operations.
#[derive(Debug, thiserror::Error)]
pub enum BrandscopeError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Primary page retrieval failed.
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// A token pass or the tone analyzer failed; aborts the whole extraction.
    #[error("extraction failed: {message}")]
    Extraction { message: String },

    /// Database or storage layer error.
    #[error("storage error: {0}")]
    Storage(String),

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Input validation error (bad URL, malformed record, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BrandscopeError>;

impl BrandscopeError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create an extraction error from any displayable message.
    pub fn extraction(msg: impl Into<String>) -> Self {
        Self::Extraction {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = BrandscopeError::config("missing home directory");
        assert_eq!(err.to_string(), "config error: missing home directory");

        let err = BrandscopeError::extraction("invalid selector `h1[`");
        assert!(err.to_string().starts_with("extraction failed:"));
    }

    #[test]
    fn auth_statuses_are_not_retryable() {
        assert!(!FetchError::from_status("https://a.test", 401).is_retryable());
        assert!(!FetchError::from_status("https://a.test", 403).is_retryable());
        assert!(FetchError::from_status("https://a.test", 404).is_retryable());
        assert!(FetchError::from_status("https://a.test", 503).is_retryable());
    }

    #[test]
    fn fetch_error_wraps_into_top_level() {
        let err: BrandscopeError = FetchError::from_status("https://a.test/", 403).into();
        assert_eq!(
            err.to_string(),
            "fetch error: https://a.test/: HTTP 403 (not retried)"
        );
    }
}
