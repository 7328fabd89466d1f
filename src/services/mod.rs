// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - export pipeline and report generation.

pub mod activity_stream;
pub mod exporter;
pub mod rate_limit;
pub mod report;
pub mod strava;

pub use activity_stream::{activity_stream, ActivityStream};
pub use exporter::{Exporter, ExportStep, ExportSummary, ItemFailure};
pub use rate_limit::RateLimiter;
pub use report::{render_csv, ReportBuilder, ReportRow};
pub use strava::{ActivityApi, StravaClient};
