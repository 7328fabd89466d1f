// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Export orchestrator.
//!
//! Drives the activity stream and, for each activity, runs two symmetric
//! idempotent steps: fetch-and-save the detail document, then the zones
//! document. Each step is skipped when its record already exists, so an
//! interrupted export re-run fetches only the gaps.
//!
//! A remote failure in one step is logged and recorded without stopping
//! the run; the other step and all later activities still proceed. Storage
//! failures and page-fetch failures abort the run.

use crate::error::Result;
use crate::models::ActivitySummary;
use crate::services::{activity_stream, ActivityApi};
use crate::store::{Collection, ErrorLog, JsonStore};
use futures_util::StreamExt;
use serde_json::Value;
use std::sync::Arc;

/// Which of the two per-activity steps failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportStep {
    Detail,
    Zones,
}

impl std::fmt::Display for ExportStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportStep::Detail => f.write_str("detail"),
            ExportStep::Zones => f.write_str("zones"),
        }
    }
}

/// One per-item failure that the run continued past.
///
/// Failures are not persisted as tombstones: on the next run a failed item
/// looks identical to one that was never fetched, and is retried.
#[derive(Debug, Clone)]
pub struct ItemFailure {
    pub activity_id: u64,
    pub step: ExportStep,
    pub error: String,
}

/// Counters and failures for one export run.
#[derive(Debug, Default)]
pub struct ExportSummary {
    pub activities_saved: usize,
    pub activities_skipped: usize,
    pub zones_saved: usize,
    pub zones_skipped: usize,
    pub failures: Vec<ItemFailure>,
}

impl ExportSummary {
    /// Total activities seen during the walk.
    pub fn activities_seen(&self) -> usize {
        self.activities_saved + self.activities_skipped
            + self
                .failures
                .iter()
                .filter(|f| f.step == ExportStep::Detail)
                .count()
    }
}

/// Export orchestrator: walks the activity history and fills the archive.
pub struct Exporter {
    api: Arc<dyn ActivityApi>,
    store: JsonStore,
    error_log: ErrorLog,
    page_size: u32,
}

impl Exporter {
    pub fn new(
        api: Arc<dyn ActivityApi>,
        store: JsonStore,
        error_log: ErrorLog,
        page_size: u32,
    ) -> Self {
        Self {
            api,
            store,
            error_log,
            page_size,
        }
    }

    /// Run the export to completion.
    ///
    /// Returns the run summary, or an error if pagination failed or the
    /// archive became unwritable. Per-item remote failures do not surface
    /// here; they are in [`ExportSummary::failures`].
    pub async fn run(&self) -> Result<ExportSummary> {
        let mut summary = ExportSummary::default();
        let mut stream = activity_stream(self.api.as_ref(), self.page_size);

        while let Some(item) = stream.next().await {
            // A broken page walk cannot safely be skipped past: it would
            // silently drop every activity after the failed page.
            let activity = item?;

            self.export_step(&activity, ExportStep::Detail, &mut summary)
                .await?;
            self.export_step(&activity, ExportStep::Zones, &mut summary)
                .await?;
        }

        tracing::info!(
            activities_saved = summary.activities_saved,
            activities_skipped = summary.activities_skipped,
            zones_saved = summary.zones_saved,
            zones_skipped = summary.zones_skipped,
            failures = summary.failures.len(),
            "Export run complete"
        );

        Ok(summary)
    }

    /// One idempotent step: skip if stored, otherwise fetch and save.
    async fn export_step(
        &self,
        activity: &ActivitySummary,
        step: ExportStep,
        summary: &mut ExportSummary,
    ) -> Result<()> {
        let id = activity.id;
        let collection = match step {
            ExportStep::Detail => Collection::Activities,
            ExportStep::Zones => Collection::Zones,
        };

        if self.store.exists(collection, id) {
            tracing::debug!(activity_id = id, %step, "Skipping existing record");
            match step {
                ExportStep::Detail => summary.activities_skipped += 1,
                ExportStep::Zones => summary.zones_skipped += 1,
            }
            return Ok(());
        }

        match self.fetch(step, id).await {
            Ok(document) => {
                self.store.save(collection, id, &document).await?;
                tracing::info!(
                    activity_id = id,
                    name = activity.name.as_deref().unwrap_or(""),
                    %step,
                    "Saved record"
                );
                match step {
                    ExportStep::Detail => summary.activities_saved += 1,
                    ExportStep::Zones => summary.zones_saved += 1,
                }
                Ok(())
            }
            Err(e) if e.is_remote() => {
                tracing::warn!(activity_id = id, %step, error = %e, "Fetch failed, continuing");
                self.error_log
                    .append(&format!("activity {} {} fetch failed: {}", id, step, e))
                    .await?;
                summary.failures.push(ItemFailure {
                    activity_id: id,
                    step,
                    error: e.to_string(),
                });
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    async fn fetch(&self, step: ExportStep, id: u64) -> Result<Value> {
        match step {
            ExportStep::Detail => self.api.get_activity(id).await,
            ExportStep::Zones => self.api.get_activity_zones(id).await,
        }
    }
}

impl std::fmt::Display for ExportSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} activities saved ({} skipped), {} zone reports saved ({} skipped), {} failures",
            self.activities_saved,
            self.activities_skipped,
            self.zones_saved,
            self.zones_skipped,
            self.failures.len()
        )
    }
}
