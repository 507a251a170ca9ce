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

//! Shared test fixtures for benchtrack crates.
//!
//! # Quick Start
//!
//! ```rust
//! use benchtrack_test::fixtures::{self, builders::EntryBuilder};
//!
//! // Real history written by the chart front end
//! let text = fixtures::sample_data_js();
//! assert!(text.starts_with("window.BENCHMARK_DATA = "));
//!
//! // Custom entries
//! let entry = EntryBuilder::new("abc123", 1_000)
//!     .bench("parse", 812.5, "ops/s")
//!     .build();
//! assert_eq!(entry.benches.len(), 1);
//!
//! // Ingestion payloads
//! let payload = fixtures::run_payload("abc123", 1_000, &[("parse", 812.5, "ops/s")]);
//! assert!(payload.contains("\"abc123\""));
//! ```

pub mod fixtures;

use benchtrack_core::HistoryDocument;

/// Dates of a suite in stored order, empty when the suite is missing.
pub fn suite_dates(doc: &HistoryDocument, suite: &str) -> Vec<i64> {
    doc.suite(suite)
        .map(|s| s.entries().iter().map(|e| e.date).collect())
        .unwrap_or_default()
}

/// Commit ids of a suite in stored order.
pub fn suite_commits(doc: &HistoryDocument, suite: &str) -> Vec<String> {
    doc.suite(suite)
        .map(|s| s.entries().iter().map(|e| e.commit.id.clone()).collect())
        .unwrap_or_default()
}
