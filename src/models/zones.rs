// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Read-side view of a stored activity zones document.

use serde::Deserialize;

/// One zone-type entry (heartrate, pace, power, ...) from the zones
/// endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ZoneEntry {
    /// Zone type: "heartrate", "pace", ...
    #[serde(rename = "type")]
    pub zone_type: Option<String>,
    /// Ordered time-in-zone buckets
    #[serde(default)]
    pub distribution_buckets: Vec<ZoneBucket>,
}

/// One time-in-zone bucket.
#[derive(Debug, Clone, Deserialize)]
pub struct ZoneBucket {
    /// Bucket lower bound (bpm or m/s depending on zone type)
    pub min: Option<f64>,
    /// Bucket upper bound
    pub max: Option<f64>,
    /// Time spent in this bucket, in seconds
    #[serde(default)]
    pub time: f64,
}
