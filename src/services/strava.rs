// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava API client.
//!
//! Handles:
//! - Paginated activity listing
//! - Detail and zones fetches by activity id
//! - Bearer token injection and rate limiting on every request
//!
//! Detail and zones documents are kept as opaque JSON: the archive stores
//! exactly what the API returned, without schema assumptions.

use crate::error::{AppError, Result};
use crate::models::ActivitySummary;
use crate::services::RateLimiter;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// The Strava API surface the export pipeline consumes.
///
/// The orchestrator and enumerator depend on this trait rather than the
/// concrete client so tests can drive them with a scripted stub.
#[async_trait]
pub trait ActivityApi: Send + Sync {
    /// Fetch one page of activity summaries. Pages are 1-based; an empty
    /// page signals the end of the collection.
    async fn list_activities(&self, page: u32, per_page: u32) -> Result<Vec<ActivitySummary>>;

    /// Fetch the full detail document for one activity.
    async fn get_activity(&self, activity_id: u64) -> Result<Value>;

    /// Fetch the zones document for one activity.
    async fn get_activity_zones(&self, activity_id: u64) -> Result<Value>;
}

/// Strava API client.
///
/// Every request acquires the shared rate limiter before going out, so the
/// global spacing invariant covers list, detail, and zones calls alike.
#[derive(Clone)]
pub struct StravaClient {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
    limiter: Arc<RateLimiter>,
}

impl StravaClient {
    /// Create a new client. The token is the opaque bearer credential for
    /// this process run; the limiter is the process-wide shared instance.
    pub fn new(base_url: String, access_token: String, limiter: Arc<RateLimiter>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            access_token,
            limiter,
        }
    }

    /// Rate-limited GET with bearer auth and JSON response.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        self.limiter.acquire().await;

        let response = self
            .http
            .get(url)
            .bearer_auth(&self.access_token)
            .query(query)
            .send()
            .await
            .map_err(|e| AppError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        self.check_response_json(url, response).await
    }

    /// Check response status and parse the JSON body.
    async fn check_response_json<T: DeserializeOwned>(
        &self,
        url: &str,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                tracing::warn!(url, "Strava rate limit hit (429)");
            }

            return Err(AppError::Api {
                status: status.as_u16(),
                url: url.to_string(),
                body,
            });
        }

        response.json().await.map_err(|e| AppError::Transport {
            url: url.to_string(),
            message: format!("JSON parse error: {}", e),
        })
    }
}

#[async_trait]
impl ActivityApi for StravaClient {
    async fn list_activities(&self, page: u32, per_page: u32) -> Result<Vec<ActivitySummary>> {
        let url = format!("{}/athlete/activities", self.base_url);
        self.get_json(
            &url,
            &[
                ("page", page.to_string()),
                ("per_page", per_page.to_string()),
            ],
        )
        .await
    }

    async fn get_activity(&self, activity_id: u64) -> Result<Value> {
        let url = format!("{}/activities/{}", self.base_url, activity_id);
        self.get_json(&url, &[]).await
    }

    async fn get_activity_zones(&self, activity_id: u64) -> Result<Value> {
        let url = format!("{}/activities/{}/zones", self.base_url, activity_id);
        self.get_json(&url, &[]).await
    }
}
