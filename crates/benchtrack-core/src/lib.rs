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

//! Data model, merge engine and regression detector for benchmark history.
//!
//! A [`HistoryDocument`] holds one ordered list of [`Entry`] values per
//! benchmark suite. CI runs are validated with [`parse_run`], folded in with
//! [`HistoryDocument::merge`] and compared against a rolling baseline by the
//! [`Detector`].
//!
//! # Guarantees
//!
//! - Entries in a suite are sorted by date, ties kept in insertion order
//! - A commit id appears at most once per suite; re-merging is a no-op
//! - Bench names are unique within an entry
//! - `lastUpdate` never moves backwards
//!
//! Serialization to the on-disk format lives in `benchtrack-json`;
//! durability and concurrency live in `benchtrack-store`.

mod detect;
mod document;
mod entry;
mod error;
mod extra;
mod ingest;
mod merge;
mod query;
mod units;

pub use detect::{
    format_findings, Comparison, DetectionNote, DetectionReport, Detector, DetectorConfig,
    RegressionFinding, Severity, SeverityBands, DEFAULT_THRESHOLD_RATIO, DEFAULT_WINDOW,
};
pub use document::{HistoryDocument, InvariantViolation, Suite};
pub use entry::{BenchResult, Commit, Entry, Person};
pub use error::{ValidationError, ValidationResult};
pub use extra::{BenchExtra, RunParams};
pub use ingest::{parse_run, parse_run_json, RawBench, RawCommit, RawRun};
pub use merge::{MergeOutcome, PruneOutcome, RetentionPolicy};
pub use query::{BenchSeries, Series, SeriesPoint};
pub use units::{Direction, UnitRegistry, DEFAULT_HIGHER_IS_BETTER, DEFAULT_LOWER_IS_BETTER};
