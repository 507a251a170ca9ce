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

//! Merge engine: ordered, idempotent insertion and retention pruning.
//!
//! These are the only operations that mutate a [`HistoryDocument`]. Both are
//! pure in-memory transformations; durability is layered on top by the store.

use crate::document::HistoryDocument;
use crate::entry::Entry;
use serde::{Deserialize, Serialize};

/// Result of merging one entry into a suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The entry was inserted at `index` of the suite.
    Inserted {
        /// Position of the new entry
        index: usize,
    },
    /// The suite already holds an entry for this commit; nothing changed.
    Duplicate,
}

impl MergeOutcome {
    /// Returns true if the document was mutated.
    pub fn is_inserted(&self) -> bool {
        matches!(self, Self::Inserted { .. })
    }
}

/// Retention limits for a suite. Disabled by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RetentionPolicy {
    /// Keep at most this many of the newest entries.
    pub max_entries: Option<usize>,
    /// Drop entries older than this many milliseconds before "now".
    pub max_age_millis: Option<i64>,
}

impl RetentionPolicy {
    /// Policy that keeps only the `n` newest entries.
    pub fn keep_last(n: usize) -> Self {
        Self {
            max_entries: Some(n),
            max_age_millis: None,
        }
    }

    /// Policy that drops entries older than `millis`.
    pub fn max_age(millis: i64) -> Self {
        Self {
            max_entries: None,
            max_age_millis: Some(millis),
        }
    }

    /// Returns true if neither bound is set.
    pub fn is_disabled(&self) -> bool {
        self.max_entries.is_none() && self.max_age_millis.is_none()
    }

    /// Rejects bounds that would empty a suite unconditionally.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_entries == Some(0) {
            return Err("retention max_entries must be at least 1".to_string());
        }
        if let Some(age) = self.max_age_millis {
            if age <= 0 {
                return Err(format!("retention max_age_millis must be positive, got {}", age));
            }
        }
        Ok(())
    }
}

/// Result of a prune.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PruneOutcome {
    /// Number of entries removed.
    pub removed: usize,
    /// Number of entries left in the suite.
    pub remaining: usize,
}

impl HistoryDocument {
    /// Merges `entry` into the suite named `suite_name`.
    ///
    /// The suite is created if absent. An entry whose commit id is already
    /// present is a [`MergeOutcome::Duplicate`] and leaves the document
    /// untouched. Otherwise the entry is placed after every entry with a date
    /// less than or equal to its own, so the suite stays sorted even when runs
    /// arrive out of order.
    ///
    /// The entry is not validated here. Entries from outside the process
    /// should come from [`parse_run`](crate::parse_run) or pass
    /// [`Entry::validate`] first; the durable store and the tracker enforce it.
    ///
    /// # Examples
    ///
    /// ```
    /// use benchtrack_core::{BenchResult, Commit, Entry, HistoryDocument, MergeOutcome};
    ///
    /// let mut doc = HistoryDocument::new("https://example.com/repo");
    /// let run = |id: &str, date| Entry {
    ///     commit: Commit::new(id, "msg"),
    ///     date,
    ///     tool: "cargo".to_string(),
    ///     benches: vec![BenchResult::new("x", 1.0, "ns/iter")],
    /// };
    ///
    /// assert_eq!(doc.merge("suite", run("b", 2000)), MergeOutcome::Inserted { index: 0 });
    /// assert_eq!(doc.merge("suite", run("a", 1000)), MergeOutcome::Inserted { index: 0 });
    /// assert_eq!(doc.merge("suite", run("a", 1000)), MergeOutcome::Duplicate);
    /// assert_eq!(doc.last_update, 2000);
    /// ```
    pub fn merge(&mut self, suite_name: &str, entry: Entry) -> MergeOutcome {
        let suite = self.suite_mut_or_insert(suite_name);
        if suite.commit_ids.contains(&entry.commit.id) {
            return MergeOutcome::Duplicate;
        }

        let date = entry.date;
        let index = match suite.entries.last() {
            Some(last) if last.date > date => suite.entries.partition_point(|e| e.date <= date),
            _ => suite.entries.len(),
        };

        suite.commit_ids.insert(entry.commit.id.clone());
        suite.entries.insert(index, entry);

        if date > self.last_update {
            self.last_update = date;
        }

        MergeOutcome::Inserted { index }
    }

    /// Removes the oldest entries of a suite beyond the retention bounds.
    ///
    /// `now_millis` anchors the age bound. The surviving entries keep their
    /// relative order. A missing suite or a disabled policy removes nothing.
    pub fn prune(&mut self, suite_name: &str, policy: &RetentionPolicy, now_millis: i64) -> PruneOutcome {
        let Some(suite) = self.suite_mut(suite_name) else {
            return PruneOutcome::default();
        };

        let len = suite.entries.len();
        let count_cut = policy
            .max_entries
            .map_or(0, |keep| len.saturating_sub(keep));
        let age_cut = policy.max_age_millis.map_or(0, |age| {
            let cutoff = now_millis.saturating_sub(age);
            suite.entries.partition_point(|e| e.date < cutoff)
        });
        let cut = count_cut.max(age_cut);

        for removed in suite.entries.drain(..cut) {
            suite.commit_ids.remove(&removed.commit.id);
        }

        PruneOutcome {
            removed: cut,
            remaining: suite.entries.len(),
        }
    }
}
