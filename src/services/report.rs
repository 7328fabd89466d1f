// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Tabular report over the archive.
//!
//! Reads every stored activity document, filters to one sport type, joins
//! the matching zones document when present, and projects a fixed column
//! set into CSV. This is a stateless batch transform over the store's read
//! interface; it never talks to the Strava API.

use crate::error::Result;
use crate::models::{ActivityRecord, ZoneEntry};
use crate::store::{Collection, JsonStore};
use crate::time_utils::format_hms;
use chrono::NaiveDateTime;

/// Heart rate zone columns in the report.
pub const HEART_RATE_ZONE_COUNT: usize = 5;

/// Pace zone columns in the report.
pub const PACE_ZONE_COUNT: usize = 6;

/// One row of the report, already formatted for output.
/// Empty strings render as empty CSV cells.
#[derive(Debug, Clone)]
pub struct ReportRow {
    pub activity_id: u64,
    pub name: String,
    pub start_date_local: String,
    pub distance_m: String,
    pub moving_time: String,
    pub elevation_gain_m: String,
    pub pace_min_per_km: String,
    pub avg_heart_rate: String,
    pub max_heart_rate: String,
    pub avg_cadence_spm: String,
    pub calories: String,
    pub race: String,
    /// Seconds in heart rate zones 1-5
    pub heart_rate_zones: [String; HEART_RATE_ZONE_COUNT],
    /// Seconds in pace zones 1-6
    pub pace_zones: [String; PACE_ZONE_COUNT],
}

/// Builds report rows from the archive.
pub struct ReportBuilder {
    store: JsonStore,
}

impl ReportBuilder {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    /// Build one row per stored activity of the given sport type, in
    /// ascending activity-id order. Activities without a zones record get
    /// empty zone columns.
    pub async fn build(&self, sport_type: &str) -> Result<Vec<ReportRow>> {
        let mut rows = Vec::new();

        for id in self.store.list_ids(Collection::Activities).await? {
            let document = self.store.load(Collection::Activities, id).await?;

            // Documents are stored as-is from the API; one that does not
            // match the lenient read-side view is skipped, not fatal.
            let record: ActivityRecord = match serde_json::from_value(document) {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!(activity_id = id, error = %e, "Skipping unreadable activity");
                    continue;
                }
            };

            if record.sport_type.as_deref() != Some(sport_type) {
                continue;
            }

            let zones: Vec<ZoneEntry> = if self.store.exists(Collection::Zones, id) {
                let document = self.store.load(Collection::Zones, id).await?;
                serde_json::from_value(document).unwrap_or_default()
            } else {
                Vec::new()
            };

            rows.push(build_row(&record, &zones));
        }

        tracing::info!(sport_type, rows = rows.len(), "Report built");
        Ok(rows)
    }

    /// Build the report and write it as CSV.
    pub async fn write_csv(&self, sport_type: &str, path: &std::path::Path) -> Result<usize> {
        let rows = self.build(sport_type).await?;
        let csv = render_csv(&rows);

        tokio::fs::write(path, csv).await.map_err(|e| {
            crate::error::AppError::Storage(format!("write {}: {}", path.display(), e))
        })?;

        Ok(rows.len())
    }
}

/// Project one activity (and its zones, possibly empty) into a row.
fn build_row(record: &ActivityRecord, zones: &[ZoneEntry]) -> ReportRow {
    let mut heart_rate_zones: [String; HEART_RATE_ZONE_COUNT] = Default::default();
    let mut pace_zones: [String; PACE_ZONE_COUNT] = Default::default();

    for entry in zones {
        match entry.zone_type.as_deref() {
            Some("heartrate") => {
                fill_zone_seconds(&mut heart_rate_zones, entry);
            }
            Some("pace") => {
                fill_zone_seconds(&mut pace_zones, entry);
            }
            _ => {}
        }
    }

    ReportRow {
        activity_id: record.id,
        name: record.name.clone().unwrap_or_default(),
        start_date_local: record
            .start_date_local
            .as_deref()
            .and_then(format_local_date)
            .unwrap_or_default(),
        distance_m: record.distance.map(format_number).unwrap_or_default(),
        moving_time: record
            .moving_time
            .map(format_hms)
            .unwrap_or_default(),
        elevation_gain_m: record
            .total_elevation_gain
            .map(format_number)
            .unwrap_or_default(),
        pace_min_per_km: record
            .average_speed
            .and_then(format_pace)
            .unwrap_or_default(),
        avg_heart_rate: record
            .average_heartrate
            .map(format_number)
            .unwrap_or_default(),
        max_heart_rate: record
            .max_heartrate
            .map(format_number)
            .unwrap_or_default(),
        // Strava reports running cadence per leg; double it for steps/min.
        avg_cadence_spm: record
            .average_cadence
            .map(|cadence| format_number(cadence * 2.0))
            .unwrap_or_default(),
        calories: record.calories.map(format_number).unwrap_or_default(),
        race: if record.workout_type == Some(1) {
            "Yes".to_string()
        } else {
            "No".to_string()
        },
        heart_rate_zones,
        pace_zones,
    }
}

/// Copy time-in-zone seconds into the fixed column slots, truncating extra
/// buckets and leaving missing ones empty.
fn fill_zone_seconds<const N: usize>(columns: &mut [String; N], entry: &ZoneEntry) {
    for (slot, bucket) in columns.iter_mut().zip(&entry.distribution_buckets) {
        *slot = format_number(bucket.time);
    }
}

/// Pace in min/km from average speed in m/s, as `m:ss`.
fn format_pace(avg_speed: f64) -> Option<String> {
    if avg_speed <= 0.0 {
        return None;
    }
    let pace_min_per_km = (1000.0 / avg_speed) / 60.0;
    let minutes = pace_min_per_km as u64;
    let seconds = ((pace_min_per_km - minutes as f64) * 60.0) as u64;
    Some(format!("{}:{:02}", minutes, seconds))
}

/// ISO 8601 local date to `YYYY-MM-DD HH:MM:SS`.
fn format_local_date(raw: &str) -> Option<String> {
    // Strava's start_date_local carries a Z suffix but is already local
    // wall-clock time, so the offset is ignored rather than applied.
    let trimmed = raw.trim_end_matches('Z');
    let parsed = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S").ok()?;
    Some(parsed.format("%Y-%m-%d %H:%M:%S").to_string())
}

/// Render a number without a trailing `.0` for whole values.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Fixed column header, matching the original export layout.
fn header() -> Vec<String> {
    let mut columns = vec![
        "Activity ID".to_string(),
        "Name".to_string(),
        "Start Date (Local)".to_string(),
        "Distance (m)".to_string(),
        "Moving Time (s)".to_string(),
        "Elevation Gain (m)".to_string(),
        "Pace (min/km)".to_string(),
        "Avg Heart Rate".to_string(),
        "Max Heart Rate".to_string(),
        "Avg Cadence (steps/min)".to_string(),
        "Calories".to_string(),
        "Race".to_string(),
    ];
    for i in 1..=HEART_RATE_ZONE_COUNT {
        columns.push(format!("Heart Rate - Zone {}", i));
    }
    for i in 1..=PACE_ZONE_COUNT {
        columns.push(format!("Pace - Zone {}", i));
    }
    columns
}

/// Render rows as CSV with the fixed header.
pub fn render_csv(rows: &[ReportRow]) -> String {
    let mut out = String::new();
    write_csv_record(&mut out, &header());

    for row in rows {
        let mut record = vec![
            row.activity_id.to_string(),
            row.name.clone(),
            row.start_date_local.clone(),
            row.distance_m.clone(),
            row.moving_time.clone(),
            row.elevation_gain_m.clone(),
            row.pace_min_per_km.clone(),
            row.avg_heart_rate.clone(),
            row.max_heart_rate.clone(),
            row.avg_cadence_spm.clone(),
            row.calories.clone(),
            row.race.clone(),
        ];
        record.extend(row.heart_rate_zones.iter().cloned());
        record.extend(row.pace_zones.iter().cloned());
        write_csv_record(&mut out, &record);
    }

    out
}

fn write_csv_record(out: &mut String, fields: &[String]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&escape_csv_field(field));
    }
    out.push('\n');
}

/// Quote a field when it contains a delimiter, quote, or newline.
fn escape_csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
