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

//! The ingest pipeline: validate, merge, retain, detect.

use crate::config::TrackerConfig;
use crate::error::{TrackerError, TrackerResult};
use benchtrack_core::{
    parse_run_json, DetectionReport, Detector, Entry, HistoryDocument, MergeOutcome,
    PruneOutcome, RetentionPolicy,
};
use benchtrack_store::HistoryStore;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Outcome of one [`Tracker::ingest`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct IngestReport {
    /// Suite the run was merged into.
    pub suite: String,
    /// Commit of the run.
    pub commit_id: String,
    /// Whether the run was inserted or already known.
    pub outcome: MergeOutcome,
    /// Retention result, when a policy is configured.
    pub pruned: Option<PruneOutcome>,
    /// Comparison of the submitted measurements against their baseline.
    pub detection: DetectionReport,
}

impl IngestReport {
    /// Returns true if the run was already recorded.
    pub fn is_duplicate(&self) -> bool {
        !self.outcome.is_inserted()
    }

    /// Returns true if any regression was found.
    pub fn has_regressions(&self) -> bool {
        self.detection.has_regressions()
    }
}

/// Benchmark history tracker bound to one history file.
///
/// # Example
///
/// ```no_run
/// use benchtrack::{Tracker, TrackerConfig};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let tracker = Tracker::open(TrackerConfig::new("dev/bench/data.js"))?;
/// let payload = std::fs::read_to_string("run.json")?;
/// let report = tracker.ingest("My Suite", &payload)?;
/// for finding in &report.detection.findings {
///     println!("{} regressed to {:.1}%", finding.bench_name, finding.ratio * 100.0);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Tracker {
    store: HistoryStore,
    detector: Detector,
    retention: RetentionPolicy,
}

impl Tracker {
    /// Validates the configuration and opens the history file.
    pub fn open(config: TrackerConfig) -> TrackerResult<Self> {
        config.validate()?;
        let TrackerConfig {
            store,
            detector,
            retention,
        } = config;

        debug!(
            "Opening {} (window {}, threshold {})",
            store.path.display(),
            detector.window,
            detector.threshold_ratio
        );

        Ok(Self {
            store: HistoryStore::open(store)?,
            detector: Detector::new(detector),
            retention,
        })
    }

    /// Underlying store.
    pub fn store(&self) -> &HistoryStore {
        &self.store
    }

    /// Configured detector.
    pub fn detector(&self) -> &Detector {
        &self.detector
    }

    /// Configured retention policy.
    pub fn retention(&self) -> &RetentionPolicy {
        &self.retention
    }

    /// Current published history.
    pub fn snapshot(&self) -> Arc<HistoryDocument> {
        self.store.snapshot()
    }

    /// Validates a JSON run payload and ingests it.
    ///
    /// A rejected payload leaves the history untouched.
    pub fn ingest(&self, suite: &str, payload: &str) -> TrackerResult<IngestReport> {
        let entry = parse_run_json(payload).map_err(|e| {
            warn!("Rejected run for '{}': {}", suite, e);
            e
        })?;
        self.ingest_entry(suite, entry)
    }

    /// Validates an entry, merges it, applies retention and runs detection.
    ///
    /// Retention runs for duplicates too, so a retry after a failed prune
    /// write still trims the suite. Detection always compares the submitted
    /// measurements, including for a duplicate commit, whose baseline is then
    /// the history before the stored run.
    pub fn ingest_entry(&self, suite: &str, entry: Entry) -> TrackerResult<IngestReport> {
        entry.validate().map_err(|e| {
            warn!("Rejected run for '{}': {}", suite, e);
            e
        })?;
        let outcome = self.store.merge(suite, entry.clone())?;

        let pruned = if self.retention.is_disabled() {
            None
        } else {
            Some(self.store.prune(suite, &self.retention, now_millis())?)
        };

        let snapshot = self.store.snapshot();
        let detection = self.detector.analyze(&snapshot, suite, &entry);

        if detection.has_regressions() {
            warn!(
                "{} regression(s) in '{}' at {}",
                detection.findings.len(),
                suite,
                entry.commit_id()
            );
        } else {
            info!("No regressions in '{}' at {}", suite, entry.commit_id());
        }

        Ok(IngestReport {
            suite: suite.to_string(),
            commit_id: entry.commit.id,
            outcome,
            pruned,
            detection,
        })
    }

    /// Runs detection for a recorded commit, or the newest entry of the suite.
    pub fn detect(&self, suite: &str, commit_id: Option<&str>) -> TrackerResult<DetectionReport> {
        let snapshot = self.store.snapshot();
        let entries = snapshot
            .suite(suite)
            .ok_or_else(|| TrackerError::NotFound(format!("suite '{}' not found", suite)))?;

        let entry = match commit_id {
            Some(id) => entries
                .position_of(id)
                .map(|i| &entries.entries()[i])
                .ok_or_else(|| {
                    TrackerError::NotFound(format!("commit '{}' not found in suite '{}'", id, suite))
                })?,
            None => entries
                .latest()
                .ok_or_else(|| TrackerError::NotFound(format!("suite '{}' is empty", suite)))?,
        };

        Ok(self.detector.analyze(&snapshot, suite, entry))
    }

    /// Prunes a suite with `policy`, or the configured policy when `None`.
    pub fn prune(&self, suite: &str, policy: Option<&RetentionPolicy>) -> TrackerResult<PruneOutcome> {
        let policy = policy.unwrap_or(&self.retention);
        policy.validate().map_err(TrackerError::Config)?;
        if self.store.snapshot().suite(suite).is_none() {
            return Err(TrackerError::NotFound(format!("suite '{}' not found", suite)));
        }
        Ok(self.store.prune(suite, policy, now_millis())?)
    }
}

/// Wall-clock time in epoch milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
