// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava-Archive: incremental export of Strava activity history.
//!
//! This crate walks the paginated activity list, fetches each activity's
//! detail and zones documents through a rate-limited client, and persists
//! them to a local JSON archive that interrupted runs can resume from.
//! A separate report step flattens the archive into a CSV summary table.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;
pub mod time_utils;
