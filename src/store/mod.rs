// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Local archive layer.
//!
//! Documents are stored one file per record at
//! `<root>/<collection>/<id>.json`. Existence of a record is determined by
//! file presence alone; there is no index. This is what makes interrupted
//! exports resumable: a re-run skips every key that already has a file.

pub mod error_log;
pub mod json_store;

pub use error_log::ErrorLog;
pub use json_store::{Collection, JsonStore};
