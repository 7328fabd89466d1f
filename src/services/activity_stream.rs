// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Lazy enumeration of the full activity history.
//!
//! The list endpoint is paginated; this module hides the page walk behind a
//! stream of individual summaries. The walk is not restartable: every call
//! to [`activity_stream`] begins again at page 1. A failed page fetch is
//! yielded as the final item and ends the stream; retry policy stays with
//! the caller.

use crate::error::Result;
use crate::models::ActivitySummary;
use crate::services::ActivityApi;
use async_stream::try_stream;
use futures_util::Stream;
use std::pin::Pin;

/// Stream of activity summaries in the API's native order
/// (reverse-chronological).
pub type ActivityStream<'a> = Pin<Box<dyn Stream<Item = Result<ActivitySummary>> + Send + 'a>>;

/// Walk the paginated activity list, yielding each summary.
///
/// Fetches pages of `per_page` starting from page 1 and terminates after
/// the first empty page. A short (non-empty) page does not end the walk;
/// only an empty page does.
pub fn activity_stream(api: &dyn ActivityApi, per_page: u32) -> ActivityStream<'_> {
    Box::pin(try_stream! {
        let mut page: u32 = 1;
        loop {
            let batch = api.list_activities(page, per_page).await?;
            if batch.is_empty() {
                break;
            }
            tracing::debug!(page, count = batch.len(), "Fetched activity page");
            for summary in batch {
                yield summary;
            }
            page += 1;
        }
    })
}
