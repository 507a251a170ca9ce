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

//! Run records: commits, measurements and entries.
//!
//! Field order and optional-field handling mirror the persisted document so
//! that a document written by the dashboard tooling round-trips byte-exactly.

use crate::error::{ValidationError, ValidationResult};
use crate::extra::BenchExtra;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Git identity of a commit author or committer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Email address, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Forge username, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl Person {
    /// Creates a person with only a display name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Commit metadata a run is tied to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Commit author.
    #[serde(default)]
    pub author: Person,
    /// Commit committer.
    #[serde(default)]
    pub committer: Person,
    /// Whether the commit was distinct in its push event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distinct: Option<bool>,
    /// Commit identifier (SHA). Unique within a suite.
    pub id: String,
    /// Commit message.
    #[serde(default)]
    pub message: String,
    /// ISO-8601 commit timestamp as reported by the forge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Tree identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tree_id: Option<String>,
    /// Web URL of the commit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Commit {
    /// Creates a commit with an id and message, everything else empty.
    pub fn new(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
            ..Self::default()
        }
    }

    /// Parses the ISO timestamp, if present and well-formed.
    pub fn parsed_timestamp(&self) -> Option<DateTime<FixedOffset>> {
        self.timestamp
            .as_deref()
            .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
    }
}

/// One named measurement within a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchResult {
    /// Benchmark name, unique within its entry.
    pub name: String,
    /// Measured value.
    pub value: f64,
    /// Spread reported by the harness (e.g. `"± 2%"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    /// Unit of `value` (e.g. `ops/s`, `ns/iter`).
    pub unit: String,
    /// Harness parameters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<BenchExtra>,
}

impl BenchResult {
    /// Creates a measurement without range or extra information.
    pub fn new(name: impl Into<String>, value: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value,
            range: None,
            unit: unit.into(),
            extra: None,
        }
    }

    /// Attaches harness parameters.
    pub fn with_extra(mut self, extra: impl Into<BenchExtra>) -> Self {
        self.extra = Some(extra.into());
        self
    }

    /// Attaches a range string.
    pub fn with_range(mut self, range: impl Into<String>) -> Self {
        self.range = Some(range.into());
        self
    }
}

/// A full benchmark run tied to one commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Commit the run measured.
    pub commit: Commit,
    /// Run time in epoch milliseconds. Suites are ordered by this field.
    pub date: i64,
    /// Harness identifier (e.g. `jmh`, `cargo`).
    pub tool: String,
    /// Measurements in harness order.
    pub benches: Vec<BenchResult>,
}

impl Entry {
    /// Shorthand for `self.commit.id`.
    pub fn commit_id(&self) -> &str {
        &self.commit.id
    }

    /// Looks up a measurement by name.
    pub fn bench(&self, name: &str) -> Option<&BenchResult> {
        self.benches.iter().find(|b| b.name == name)
    }

    /// Checks the rules every stored entry must satisfy.
    ///
    /// Measurements are checked in order, so the first offending bench is
    /// the one reported.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::EmptyCommitId`] if the commit id is blank
    /// - [`ValidationError::NonPositiveDate`] if `date <= 0`
    /// - [`ValidationError::NonFiniteValue`] if a value is NaN or infinite
    /// - [`ValidationError::DuplicateBenchName`] if two measurements share a name
    pub fn validate(&self) -> ValidationResult<()> {
        if self.commit.id.trim().is_empty() {
            return Err(ValidationError::EmptyCommitId);
        }
        if self.date <= 0 {
            return Err(ValidationError::NonPositiveDate { date: self.date });
        }

        let mut seen = HashSet::with_capacity(self.benches.len());
        for bench in &self.benches {
            if !bench.value.is_finite() {
                return Err(ValidationError::NonFiniteValue {
                    bench: bench.name.clone(),
                    value: bench.value,
                });
            }
            if !seen.insert(bench.name.as_str()) {
                return Err(ValidationError::DuplicateBenchName {
                    name: bench.name.clone(),
                });
            }
        }
        Ok(())
    }
}
