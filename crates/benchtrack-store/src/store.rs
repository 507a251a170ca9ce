// Dweve Benchtrack - Benchmark History and Regression Tracking
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Copy-on-write history store.

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use benchtrack_core::{Entry, HistoryDocument, MergeOutcome, PruneOutcome, RetentionPolicy};
use benchtrack_json::{from_document_str, to_document_string, DocumentFormat};
use parking_lot::{Mutex, RwLock};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// Durable history document shared between writers and readers.
///
/// Writers are serialized by a single mutex. Each write clones the current
/// document, applies the change, persists the clone atomically (temporary
/// file in the same directory, fsync, rename) and only then publishes it.
/// Readers take [`snapshot`](Self::snapshot)s and never block on disk I/O.
///
/// A failed write leaves both the file and the published document as they
/// were.
///
/// # Example
///
/// ```no_run
/// use benchtrack_core::{BenchResult, Commit, Entry};
/// use benchtrack_store::{HistoryStore, StoreConfig};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let store = HistoryStore::open(StoreConfig::new("dev/bench/data.js"))?;
/// store.merge("My Suite", Entry {
///     commit: Commit::new("abc123", "Speed up parser"),
///     date: 1_760_000_000_000,
///     tool: "cargo".into(),
///     benches: vec![BenchResult::new("parse", 812.0, "ns/iter")],
/// })?;
/// let snapshot = store.snapshot();
/// assert!(snapshot.latest("My Suite").is_some());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct HistoryStore {
    config: StoreConfig,
    format: DocumentFormat,
    current: RwLock<Arc<HistoryDocument>>,
    writer: Mutex<()>,
}

impl HistoryStore {
    /// Loads the history file, or starts empty if it does not exist yet.
    ///
    /// Nothing is written until the first successful change.
    ///
    /// # Errors
    ///
    /// [`StoreError::Config`] for an invalid configuration,
    /// [`StoreError::FileTooLarge`] above the size limit, and
    /// [`StoreError::Io`] / [`StoreError::Codec`] for unreadable files.
    pub fn open(config: StoreConfig) -> StoreResult<Self> {
        config.validate().map_err(StoreError::Config)?;
        let format = config.resolved_format();
        let doc = load(&config)?;

        for violation in doc.check_invariants() {
            warn!("{}: {}", config.path.display(), violation);
        }

        Ok(Self {
            config,
            format,
            current: RwLock::new(Arc::new(doc)),
            writer: Mutex::new(()),
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// History file location.
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Framing used when writing.
    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    /// Current published document.
    ///
    /// The snapshot stays valid and unchanged while later writes proceed.
    pub fn snapshot(&self) -> Arc<HistoryDocument> {
        Arc::clone(&self.current.read())
    }

    /// Merges an entry and persists the result.
    ///
    /// The entry must pass [`Entry::validate`]; otherwise
    /// [`StoreError::Validation`] is returned and nothing is written. A
    /// duplicate commit id returns [`MergeOutcome::Duplicate`] without
    /// touching the file.
    pub fn merge(&self, suite: &str, entry: Entry) -> StoreResult<MergeOutcome> {
        if let Err(err) = entry.validate() {
            warn!("Refusing to merge {:?} into '{}': {}", entry.commit_id(), suite, err);
            return Err(err.into());
        }

        let _guard = self.writer.lock();
        let base = self.snapshot();

        if base.suite(suite).is_some_and(|s| s.contains_commit(entry.commit_id())) {
            debug!("Commit {} already recorded in '{}', skipping", entry.commit_id(), suite);
            return Ok(MergeOutcome::Duplicate);
        }

        let commit_id = entry.commit.id.clone();
        let mut next = HistoryDocument::clone(&base);
        let outcome = next.merge(suite, entry);
        self.publish(next)?;

        info!("Recorded {} in '{}' ({:?})", commit_id, suite, outcome);
        Ok(outcome)
    }

    /// Applies a retention policy to one suite and persists the result.
    ///
    /// Nothing is written when no entry is removed.
    pub fn prune(&self, suite: &str, policy: &RetentionPolicy, now_millis: i64) -> StoreResult<PruneOutcome> {
        let _guard = self.writer.lock();
        let base = self.snapshot();

        let mut next = HistoryDocument::clone(&base);
        let outcome = next.prune(suite, policy, now_millis);
        if outcome.removed == 0 {
            debug!("Retention removed nothing from '{}'", suite);
            return Ok(outcome);
        }

        self.publish(next)?;
        info!(
            "Pruned {} entries from '{}', {} remaining",
            outcome.removed, suite, outcome.remaining
        );
        Ok(outcome)
    }

    /// Persists `next` and makes it the published document. Caller holds the writer lock.
    fn publish(&self, next: HistoryDocument) -> StoreResult<()> {
        persist(&self.config.path, self.format, &next)?;
        *self.current.write() = Arc::new(next);
        Ok(())
    }
}

fn load(config: &StoreConfig) -> StoreResult<HistoryDocument> {
    let path = &config.path;
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!("No history at {}, starting empty", path.display());
            return Ok(HistoryDocument::new(config.repo_url.clone()));
        }
        Err(err) => return Err(StoreError::io(path, err)),
    };

    if metadata.len() > config.max_file_size {
        return Err(StoreError::FileTooLarge {
            path: path.clone(),
            size: metadata.len(),
            limit: config.max_file_size,
        });
    }

    let text = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    let doc = from_document_str(&text).map_err(|e| StoreError::codec(path, e))?;

    if !config.repo_url.is_empty() && doc.repo_url != config.repo_url {
        warn!(
            "{} belongs to {}, not {}",
            path.display(),
            doc.repo_url,
            config.repo_url
        );
    }

    debug!(
        "Loaded {} entries in {} suites from {}",
        doc.entry_count(),
        doc.suites().len(),
        path.display()
    );
    Ok(doc)
}

fn persist(path: &Path, format: DocumentFormat, doc: &HistoryDocument) -> StoreResult<()> {
    let text = to_document_string(doc, format).map_err(|e| StoreError::codec(path, e))?;

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(parent).map_err(|e| StoreError::io(parent, e))?;
    temp.write_all(text.as_bytes())
        .map_err(|e| StoreError::io(temp.path(), e))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| StoreError::io(temp.path(), e))?;
    temp.persist(path).map_err(|e| StoreError::io(path, e.error))?;

    debug!("Wrote {} bytes to {}", text.len(), path.display());
    Ok(())
}
