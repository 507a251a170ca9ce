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

//! The history document: suites of date-ordered entries.
//!
//! A [`HistoryDocument`] is an explicit value that is loaded, mutated through
//! the merge engine (see [`crate::merge`]) and saved again. Suites keep their
//! insertion order, which is also the key order of the persisted `entries`
//! object.

use crate::entry::Entry;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeMap, SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A named, date-ordered series of entries.
///
/// Entries are only reachable through shared accessors; mutation goes through
/// the merge engine so that ordering and commit uniqueness always hold.
#[derive(Debug, Clone, PartialEq)]
pub struct Suite {
    name: String,
    pub(crate) entries: Vec<Entry>,
    pub(crate) commit_ids: HashSet<String>,
}

impl Suite {
    /// Creates an empty suite.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
            commit_ids: HashSet::new(),
        }
    }

    /// Builds a suite from already-persisted entries, kept as given.
    pub fn from_entries(name: impl Into<String>, entries: Vec<Entry>) -> Self {
        let commit_ids = entries.iter().map(|e| e.commit.id.clone()).collect();
        Self {
            name: name.into(),
            entries,
            commit_ids,
        }
    }

    /// Suite name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entries in ascending date order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the suite has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if an entry for `commit_id` is present.
    pub fn contains_commit(&self, commit_id: &str) -> bool {
        self.commit_ids.contains(commit_id)
    }

    /// Position of the entry for `commit_id`.
    pub fn position_of(&self, commit_id: &str) -> Option<usize> {
        if !self.contains_commit(commit_id) {
            return None;
        }
        self.entries.iter().position(|e| e.commit.id == commit_id)
    }

    /// Most recent entry.
    pub fn latest(&self) -> Option<&Entry> {
        self.entries.last()
    }

    /// Greatest entry date in the suite.
    pub fn max_date(&self) -> Option<i64> {
        self.entries.iter().map(|e| e.date).max()
    }
}

impl Serialize for Suite {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.entries.serialize(serializer)
    }
}

/// A persisted benchmark history.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "PersistedDocument")]
pub struct HistoryDocument {
    /// Newest run date seen by this document, in epoch milliseconds.
    pub last_update: i64,
    /// Repository the history belongs to.
    pub repo_url: String,
    pub(crate) suites: Vec<Suite>,
}

impl HistoryDocument {
    /// Creates an empty document for a repository.
    pub fn new(repo_url: impl Into<String>) -> Self {
        Self {
            last_update: 0,
            repo_url: repo_url.into(),
            suites: Vec::new(),
        }
    }

    /// Assembles a document from parts without reordering anything.
    pub fn from_parts(last_update: i64, repo_url: impl Into<String>, suites: Vec<Suite>) -> Self {
        Self {
            last_update,
            repo_url: repo_url.into(),
            suites,
        }
    }

    /// Looks up a suite by name.
    pub fn suite(&self, name: &str) -> Option<&Suite> {
        self.suites.iter().find(|s| s.name == name)
    }

    /// All suites in document order.
    pub fn suites(&self) -> &[Suite] {
        &self.suites
    }

    /// Total number of entries across all suites.
    pub fn entry_count(&self) -> usize {
        self.suites.iter().map(Suite::len).sum()
    }

    /// Greatest entry date across every suite.
    pub fn max_date(&self) -> Option<i64> {
        self.suites.iter().filter_map(Suite::max_date).max()
    }

    pub(crate) fn suite_mut_or_insert(&mut self, name: &str) -> &mut Suite {
        let idx = match self.suites.iter().position(|s| s.name == name) {
            Some(idx) => idx,
            None => {
                self.suites.push(Suite::new(name));
                self.suites.len() - 1
            }
        };
        &mut self.suites[idx]
    }

    pub(crate) fn suite_mut(&mut self, name: &str) -> Option<&mut Suite> {
        self.suites.iter_mut().find(|s| s.name == name)
    }

    /// Checks the structural invariants of the document.
    ///
    /// Documents built through the merge engine always pass. Documents loaded
    /// from disk may have been written by other tools and are reported rather
    /// than rejected.
    pub fn check_invariants(&self) -> Vec<InvariantViolation> {
        let mut violations = Vec::new();

        for suite in &self.suites {
            for (idx, pair) in suite.entries.windows(2).enumerate() {
                if pair[1].date < pair[0].date {
                    violations.push(InvariantViolation::Unsorted {
                        suite: suite.name.clone(),
                        index: idx + 1,
                    });
                }
            }

            let mut seen = HashSet::new();
            for entry in &suite.entries {
                if !seen.insert(entry.commit.id.as_str()) {
                    violations.push(InvariantViolation::DuplicateCommit {
                        suite: suite.name.clone(),
                        commit_id: entry.commit.id.clone(),
                    });
                }

                let mut names = HashSet::new();
                for bench in &entry.benches {
                    if !names.insert(bench.name.as_str()) {
                        violations.push(InvariantViolation::DuplicateBench {
                            suite: suite.name.clone(),
                            commit_id: entry.commit.id.clone(),
                            bench: bench.name.clone(),
                        });
                    }
                }
            }
        }

        if let Some(max) = self.max_date() {
            if self.last_update < max {
                violations.push(InvariantViolation::StaleLastUpdate {
                    last_update: self.last_update,
                    max_date: max,
                });
            }
        }

        violations
    }
}

/// A broken structural invariant found by [`HistoryDocument::check_invariants`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// An entry is dated before its predecessor.
    Unsorted {
        /// Suite name
        suite: String,
        /// Index of the out-of-order entry
        index: usize,
    },
    /// A commit id occurs more than once in a suite.
    DuplicateCommit {
        /// Suite name
        suite: String,
        /// Repeated commit id
        commit_id: String,
    },
    /// A bench name occurs more than once in an entry.
    DuplicateBench {
        /// Suite name
        suite: String,
        /// Commit of the entry
        commit_id: String,
        /// Repeated bench name
        bench: String,
    },
    /// `lastUpdate` is older than the newest entry.
    StaleLastUpdate {
        /// Stored value
        last_update: i64,
        /// Newest entry date
        max_date: i64,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsorted { suite, index } => {
                write!(f, "suite '{}': entry {} is dated before its predecessor", suite, index)
            }
            Self::DuplicateCommit { suite, commit_id } => {
                write!(f, "suite '{}': commit {} appears more than once", suite, commit_id)
            }
            Self::DuplicateBench {
                suite,
                commit_id,
                bench,
            } => write!(
                f,
                "suite '{}': commit {} has bench '{}' more than once",
                suite, commit_id, bench
            ),
            Self::StaleLastUpdate {
                last_update,
                max_date,
            } => write!(
                f,
                "lastUpdate {} is older than newest entry date {}",
                last_update, max_date
            ),
        }
    }
}

impl Serialize for HistoryDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("HistoryDocument", 3)?;
        state.serialize_field("lastUpdate", &self.last_update)?;
        state.serialize_field("repoUrl", &self.repo_url)?;
        state.serialize_field("entries", &SuiteMap(&self.suites))?;
        state.end()
    }
}

struct SuiteMap<'a>(&'a [Suite]);

impl Serialize for SuiteMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for suite in self.0 {
            map.serialize_entry(&suite.name, &suite.entries)?;
        }
        map.end()
    }
}

#[derive(Deserialize)]
struct PersistedDocument {
    #[serde(rename = "lastUpdate", default)]
    last_update: i64,
    #[serde(rename = "repoUrl", default)]
    repo_url: String,
    #[serde(default)]
    entries: OrderedSuites,
}

impl From<PersistedDocument> for HistoryDocument {
    fn from(raw: PersistedDocument) -> Self {
        Self {
            last_update: raw.last_update,
            repo_url: raw.repo_url,
            suites: raw.entries.0,
        }
    }
}

#[derive(Default)]
struct OrderedSuites(Vec<Suite>);

impl<'de> Deserialize<'de> for OrderedSuites {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OrderedSuitesVisitor)
    }
}

struct OrderedSuitesVisitor;

impl<'de> Visitor<'de> for OrderedSuitesVisitor {
    type Value = OrderedSuites;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of suite names to entry arrays")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut suites: Vec<Suite> = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((name, entries)) = access.next_entry::<String, Vec<Entry>>()? {
            // Later keys win, as in JSON.parse.
            match suites.iter_mut().find(|s| s.name == name) {
                Some(existing) => *existing = Suite::from_entries(name, entries),
                None => suites.push(Suite::from_entries(name, entries)),
            }
        }
        Ok(OrderedSuites(suites))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{BenchResult, Commit};

    fn entry(id: &str, date: i64) -> Entry {
        Entry {
            commit: Commit::new(id, "msg"),
            date,
            tool: "cargo".to_string(),
            benches: vec![BenchResult::new("x", 1.0, "ns/iter")],
        }
    }

    #[test]
    fn test_suite_key_order_preserved() {
        let json = r#"{"lastUpdate":5,"repoUrl":"r","entries":{"zeta":[],"alpha":[],"mid":[]}}"#;
        let doc: HistoryDocument = serde_json::from_str(json).unwrap();
        let names: Vec<_> = doc.suites().iter().map(Suite::name).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
        assert_eq!(serde_json::to_string(&doc).unwrap(), json);
    }

    #[test]
    fn test_duplicate_suite_key_last_wins() {
        let json = r#"{"lastUpdate":5,"repoUrl":"r","entries":{"a":[],"b":[],"a":[{"commit":{"id":"c1"},"date":5,"tool":"t","benches":[]}]}}"#;
        let doc: HistoryDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.suites().len(), 2);
        assert_eq!(doc.suite("a").unwrap().len(), 1);
        assert!(doc.suite("a").unwrap().contains_commit("c1"));
    }

    #[test]
    fn test_missing_fields_default() {
        let doc: HistoryDocument = serde_json::from_str("{}").unwrap();
        assert_eq!(doc, HistoryDocument::new(""));
    }

    #[test]
    fn test_clean_document_has_no_violations() {
        let suite = Suite::from_entries("s", vec![entry("a", 1), entry("b", 2)]);
        let doc = HistoryDocument::from_parts(2, "r", vec![suite]);
        assert!(doc.check_invariants().is_empty());
    }

    #[test]
    fn test_violations_reported() {
        let mut dup = entry("b", 1);
        dup.benches.push(BenchResult::new("x", 2.0, "ns/iter"));
        let suite = Suite::from_entries("s", vec![entry("a", 5), dup, entry("a", 7)]);
        let doc = HistoryDocument::from_parts(3, "r", vec![suite]);
        let violations = doc.check_invariants();

        assert!(violations.contains(&InvariantViolation::Unsorted {
            suite: "s".to_string(),
            index: 1
        }));
        assert!(violations.contains(&InvariantViolation::DuplicateCommit {
            suite: "s".to_string(),
            commit_id: "a".to_string()
        }));
        assert!(violations.contains(&InvariantViolation::DuplicateBench {
            suite: "s".to_string(),
            commit_id: "b".to_string(),
            bench: "x".to_string()
        }));
        assert!(violations.contains(&InvariantViolation::StaleLastUpdate {
            last_update: 3,
            max_date: 7
        }));
    }

    #[test]
    fn test_suite_accessors() {
        let suite = Suite::from_entries("s", vec![entry("a", 1), entry("b", 2)]);
        assert_eq!(suite.position_of("b"), Some(1));
        assert_eq!(suite.position_of("zz"), None);
        assert_eq!(suite.latest().map(Entry::commit_id), Some("b"));
        assert_eq!(suite.max_date(), Some(2));
        assert!(Suite::new("empty").latest().is_none());
    }
}
