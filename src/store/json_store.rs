// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Filesystem-backed JSON document store.

use crate::error::{AppError, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// The two independent archive collections. An activity's detail document
/// and its zones document are separate records under the same id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Activities,
    Zones,
}

impl Collection {
    /// Directory name under the archive root.
    pub fn dir_name(self) -> &'static str {
        match self {
            Collection::Activities => "activities",
            Collection::Zones => "zones",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// JSON document store rooted at the archive directory.
///
/// `save` is permitted to overwrite at this level; the exporter checks
/// `exists` first and never saves over an existing key, so a racing
/// duplicate save can only rewrite identical content.
#[derive(Debug, Clone)]
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    /// Create a store rooted at `root`. No I/O happens until the first
    /// `save`; collection directories are created on demand.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The archive root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// True iff a document was previously written for this key.
    pub fn exists(&self, collection: Collection, id: u64) -> bool {
        self.document_path(collection, id).is_file()
    }

    /// Persist one complete document under (collection, id).
    pub async fn save(&self, collection: Collection, id: u64, document: &Value) -> Result<()> {
        let path = self.document_path(collection, id);
        let dir = self.root.join(collection.dir_name());

        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| AppError::Storage(format!("create {}: {}", dir.display(), e)))?;

        let bytes = serde_json::to_vec_pretty(document)
            .map_err(|e| AppError::Storage(format!("serialize {}/{}: {}", collection, id, e)))?;

        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| AppError::Storage(format!("write {}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Load the document stored under (collection, id).
    pub async fn load(&self, collection: Collection, id: u64) -> Result<Value> {
        let path = self.document_path(collection, id);

        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| AppError::Storage(format!("read {}: {}", path.display(), e)))?;

        serde_json::from_slice(&bytes)
            .map_err(|e| AppError::Storage(format!("parse {}: {}", path.display(), e)))
    }

    /// List the ids of every document in a collection, ascending.
    ///
    /// A collection that was never written to is an empty list, not an
    /// error. Files that are not `<id>.json` are ignored.
    pub async fn list_ids(&self, collection: Collection) -> Result<Vec<u64>> {
        let dir = self.root.join(collection.dir_name());

        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(AppError::Storage(format!("read {}: {}", dir.display(), e)));
            }
        };

        let mut ids = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| AppError::Storage(format!("read {}: {}", dir.display(), e)))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            if let Some(id) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| stem.parse::<u64>().ok())
            {
                ids.push(id);
            }
        }

        ids.sort_unstable();
        Ok(ids)
    }

    fn document_path(&self, collection: Collection, id: u64) -> PathBuf {
        self.root
            .join(collection.dir_name())
            .join(format!("{}.json", id))
    }
}
