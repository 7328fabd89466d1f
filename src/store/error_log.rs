// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Durable error record for per-item export failures.
//!
//! Failures are also reported through tracing as they happen; this file is
//! the record that survives the run for later inspection.

use crate::error::{AppError, Result};
use crate::time_utils::format_utc_rfc3339;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;

/// Append-only `error.log` in the archive root. One line per failure:
/// `[<RFC3339 timestamp>] <message>`.
#[derive(Debug, Clone)]
pub struct ErrorLog {
    path: PathBuf,
}

impl ErrorLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Append one timestamped line. A failure here is a storage failure
    /// and aborts the run, like any other archive write failure.
    pub async fn append(&self, message: &str) -> Result<()> {
        let line = format!("[{}] {}\n", format_utc_rfc3339(chrono::Utc::now()), message);

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| AppError::Storage(format!("open {}: {}", self.path.display(), e)))?;

        file.write_all(line.as_bytes())
            .await
            .map_err(|e| AppError::Storage(format!("write {}: {}", self.path.display(), e)))?;

        Ok(())
    }
}
