// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod activity;
pub mod zones;

pub use activity::{ActivityRecord, ActivitySummary};
pub use zones::{ZoneBucket, ZoneEntry};
