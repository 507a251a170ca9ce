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

//! Fluent builders for entries and documents.

use benchtrack_core::{BenchExtra, BenchResult, Commit, Entry, HistoryDocument, Person};

/// Builder for [`Entry`] fixtures.
///
/// # Examples
///
/// ```
/// use benchtrack_test::fixtures::builders::EntryBuilder;
///
/// let entry = EntryBuilder::new("abc", 1000)
///     .tool("cargo")
///     .bench("parse", 12.5, "ns/iter")
///     .build();
///
/// assert_eq!(entry.commit.id, "abc");
/// assert_eq!(entry.tool, "cargo");
/// ```
#[derive(Debug, Clone)]
pub struct EntryBuilder {
    commit: Commit,
    date: i64,
    tool: String,
    benches: Vec<BenchResult>,
}

impl EntryBuilder {
    /// Starts an entry for `commit_id` at `date`.
    pub fn new(commit_id: impl Into<String>, date: i64) -> Self {
        let commit_id = commit_id.into();
        let mut commit = Commit::new(commit_id.clone(), format!("commit {}", commit_id));
        commit.author = Person::named("CI");
        commit.committer = Person::named("CI");
        Self {
            commit,
            date,
            tool: "jmh".to_string(),
            benches: Vec::new(),
        }
    }

    /// Sets the harness name.
    pub fn tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = tool.into();
        self
    }

    /// Sets the commit message.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.commit.message = message.into();
        self
    }

    /// Adds a measurement.
    pub fn bench(mut self, name: impl Into<String>, value: f64, unit: impl Into<String>) -> Self {
        self.benches.push(BenchResult::new(name, value, unit));
        self
    }

    /// Adds a measurement with harness parameters.
    pub fn bench_with_extra(
        mut self,
        name: impl Into<String>,
        value: f64,
        unit: impl Into<String>,
        extra: impl Into<BenchExtra>,
    ) -> Self {
        self.benches.push(BenchResult::new(name, value, unit).with_extra(extra));
        self
    }

    /// Builds the entry.
    pub fn build(self) -> Entry {
        Entry {
            commit: self.commit,
            date: self.date,
            tool: self.tool,
            benches: self.benches,
        }
    }
}

/// Builder for [`HistoryDocument`] fixtures.
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    doc: HistoryDocument,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentBuilder {
    /// Creates an empty document for `https://github.com/example/project`.
    pub fn new() -> Self {
        Self {
            doc: HistoryDocument::new("https://github.com/example/project"),
        }
    }

    /// Merges an entry into `suite`.
    pub fn entry(mut self, suite: &str, entry: Entry) -> Self {
        self.doc.merge(suite, entry);
        self
    }

    /// Merges one single-bench entry per value, dated 1000, 2000, ...
    ///
    /// Commit ids are `h0`, `h1`, ...
    pub fn series(mut self, suite: &str, bench: &str, unit: &str, values: &[f64]) -> Self {
        for (i, value) in values.iter().enumerate() {
            let entry = EntryBuilder::new(format!("h{}", i), 1000 * (i as i64 + 1))
                .bench(bench, *value, unit)
                .build();
            self.doc.merge(suite, entry);
        }
        self
    }

    /// Builds the document.
    pub fn build(self) -> HistoryDocument {
        self.doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_builder() {
        let doc = DocumentBuilder::new()
            .series("s", "x", "ops/s", &[1.0, 2.0, 3.0])
            .build();
        assert_eq!(crate::suite_dates(&doc, "s"), vec![1000, 2000, 3000]);
        assert_eq!(doc.last_update, 3000);
    }
}
