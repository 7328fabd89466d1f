// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types.

/// Application error type for the export pipeline and report generation.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Non-2xx response from the Strava API.
    #[error("Strava API error: HTTP {status} for {url}: {body}")]
    Api {
        status: u16,
        url: String,
        body: String,
    },

    /// Transport-level failure (DNS, connection reset, timeout) or an
    /// undecodable response body.
    #[error("Strava transport error for {url}: {message}")]
    Transport { url: String, message: String },

    /// Local archive failure. Fatal: resumability depends on the archive
    /// being readable and writable.
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// True for failures of a single outbound request (status-coded or
    /// transport-coded). These are recoverable at the per-item boundary;
    /// everything else aborts the run.
    pub fn is_remote(&self) -> bool {
        matches!(self, AppError::Api { .. } | AppError::Transport { .. })
    }
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_errors_are_recoverable() {
        let err = AppError::Api {
            status: 500,
            url: "https://example.com/x".to_string(),
            body: "oops".to_string(),
        };
        assert!(err.is_remote());

        let err = AppError::Transport {
            url: "https://example.com/x".to_string(),
            message: "connection reset".to_string(),
        };
        assert!(err.is_remote());
    }

    #[test]
    fn test_storage_errors_are_fatal() {
        let err = AppError::Storage("disk full".to_string());
        assert!(!err.is_remote());

        let err = AppError::Internal(anyhow::anyhow!("boom"));
        assert!(!err.is_remote());
    }
}
