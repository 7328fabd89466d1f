// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared test helpers: a scripted Strava API stub and archive fixtures.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use strava_archive::error::{AppError, Result};
use strava_archive::models::ActivitySummary;
use strava_archive::services::ActivityApi;

/// Scripted in-memory stand-in for the Strava API.
///
/// Pages are fixed up front; any page past the scripted ones is empty.
/// Individual detail/zones fetches can be made to fail with a given HTTP
/// status, and one list page can be made to fail wholesale. Every call is
/// recorded so tests can assert on exactly which requests went out.
#[allow(dead_code)]
pub struct StubApi {
    pages: Vec<Vec<u64>>,
    fail_detail: HashMap<u64, u16>,
    fail_zones: HashMap<u64, u16>,
    fail_page: Option<u32>,
    pub list_calls: AtomicUsize,
    pub detail_calls: Mutex<Vec<u64>>,
    pub zones_calls: Mutex<Vec<u64>>,
}

#[allow(dead_code)]
impl StubApi {
    pub fn new(pages: Vec<Vec<u64>>) -> Self {
        Self {
            pages,
            fail_detail: HashMap::new(),
            fail_zones: HashMap::new(),
            fail_page: None,
            list_calls: AtomicUsize::new(0),
            detail_calls: Mutex::new(Vec::new()),
            zones_calls: Mutex::new(Vec::new()),
        }
    }

    /// Make the detail fetch for `id` fail with an HTTP status.
    pub fn with_detail_failure(mut self, id: u64, status: u16) -> Self {
        self.fail_detail.insert(id, status);
        self
    }

    /// Make the zones fetch for `id` fail with an HTTP status.
    pub fn with_zones_failure(mut self, id: u64, status: u16) -> Self {
        self.fail_zones.insert(id, status);
        self
    }

    /// Make the list fetch for a whole (1-based) page fail.
    pub fn with_page_failure(mut self, page: u32) -> Self {
        self.fail_page = Some(page);
        self
    }

    pub fn detail_ids_fetched(&self) -> Vec<u64> {
        self.detail_calls.lock().expect("lock").clone()
    }

    pub fn zones_ids_fetched(&self) -> Vec<u64> {
        self.zones_calls.lock().expect("lock").clone()
    }

    /// The detail document the stub serves for `id`.
    pub fn detail_document(id: u64) -> Value {
        json!({
            "id": id,
            "name": format!("Activity {}", id),
            "sport_type": "Run",
            "distance": 5000.0,
            "moving_time": 1500,
        })
    }

    /// The zones document the stub serves for `id`.
    pub fn zones_document(id: u64) -> Value {
        json!([
            {
                "type": "heartrate",
                "distribution_buckets": [
                    {"min": 0, "max": 140, "time": (id % 100) * 10},
                    {"min": 140, "max": 180, "time": 300},
                ],
            }
        ])
    }

    fn api_error(status: u16, url: &str) -> AppError {
        AppError::Api {
            status,
            url: url.to_string(),
            body: "stub failure".to_string(),
        }
    }
}

#[async_trait]
impl ActivityApi for StubApi {
    async fn list_activities(&self, page: u32, _per_page: u32) -> Result<Vec<ActivitySummary>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_page == Some(page) {
            return Err(Self::api_error(500, "stub:/athlete/activities"));
        }

        let ids = self
            .pages
            .get((page - 1) as usize)
            .cloned()
            .unwrap_or_default();

        Ok(ids
            .into_iter()
            .map(|id| ActivitySummary {
                id,
                name: Some(format!("Activity {}", id)),
            })
            .collect())
    }

    async fn get_activity(&self, activity_id: u64) -> Result<Value> {
        self.detail_calls.lock().expect("lock").push(activity_id);

        if let Some(&status) = self.fail_detail.get(&activity_id) {
            return Err(Self::api_error(status, "stub:/activities"));
        }
        Ok(Self::detail_document(activity_id))
    }

    async fn get_activity_zones(&self, activity_id: u64) -> Result<Value> {
        self.zones_calls.lock().expect("lock").push(activity_id);

        if let Some(&status) = self.fail_zones.get(&activity_id) {
            return Err(Self::api_error(status, "stub:/activities/zones"));
        }
        Ok(Self::zones_document(activity_id))
    }
}
