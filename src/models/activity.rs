// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava activity models.
//!
//! The export pipeline persists detail documents as opaque JSON so nothing
//! the API returns is dropped. The typed structs here are the minimal
//! in-flight pagination record and the lenient read-side view the report
//! projects from.

use serde::Deserialize;

/// Summary activity yielded by the paginated list endpoint.
///
/// Only exists in flight between the enumerator and the orchestrator;
/// it is never persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct ActivitySummary {
    /// Strava activity ID
    pub id: u64,
    /// Activity name/title (for log output)
    pub name: Option<String>,
}

/// Read-side view of a stored activity detail document.
///
/// Every projection field is optional: stored documents are whatever the
/// API returned, and older exports may predate fields Strava added later.
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityRecord {
    /// Strava activity ID
    pub id: u64,
    /// Activity name/title
    pub name: Option<String>,
    /// Sport type (Run, Ride, Hike, etc.)
    pub sport_type: Option<String>,
    /// Start date/time in the athlete's local timezone (ISO 8601)
    pub start_date_local: Option<String>,
    /// Distance in meters
    pub distance: Option<f64>,
    /// Moving time in seconds
    pub moving_time: Option<u64>,
    /// Total elevation gain in meters
    pub total_elevation_gain: Option<f64>,
    /// Average speed in meters per second
    pub average_speed: Option<f64>,
    /// Average heart rate in bpm
    pub average_heartrate: Option<f64>,
    /// Max heart rate in bpm
    pub max_heartrate: Option<f64>,
    /// Calories burned
    pub calories: Option<f64>,
    /// Average cadence; Strava reports half-cycles (one leg) for runs
    pub average_cadence: Option<f64>,
    /// Workout type code; 1 means race for runs
    pub workout_type: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_ignores_unknown_fields() {
        let summary: ActivitySummary = serde_json::from_str(
            r#"{"id": 101, "name": "Morning Run", "sport_type": "Run", "kudos_count": 3}"#,
        )
        .expect("should deserialize");
        assert_eq!(summary.id, 101);
        assert_eq!(summary.name.as_deref(), Some("Morning Run"));
    }

    #[test]
    fn test_record_tolerates_sparse_documents() {
        let record: ActivityRecord =
            serde_json::from_str(r#"{"id": 7}"#).expect("should deserialize");
        assert_eq!(record.id, 7);
        assert!(record.sport_type.is_none());
        assert!(record.moving_time.is_none());
    }
}
