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

//! Ingestion payloads.

use std::fmt::Write;

/// Builds a run payload with the given measurements.
///
/// Values are written with Rust's float formatting, which is valid JSON for
/// finite numbers.
pub fn run_payload(commit_id: &str, date: i64, benches: &[(&str, f64, &str)]) -> String {
    let mut list = String::new();
    for (i, (name, value, unit)) in benches.iter().enumerate() {
        if i > 0 {
            list.push_str(", ");
        }
        let _ = write!(
            list,
            r#"{{"name": "{}", "value": {}, "unit": "{}"}}"#,
            name, value, unit
        );
    }
    format!(
        r#"{{"commit": {{"id": "{}", "message": "run {}", "author": {{"name": "CI"}}, "committer": {{"name": "CI"}}}}, "date": {}, "tool": "jmh", "benches": [{}]}}"#,
        commit_id, commit_id, date, list
    )
}

/// A payload shaped like a GitHub push event commit with JMH parameters.
pub fn jmh_run_payload() -> &'static str {
    r#"{
  "commit": {
    "author": {"email": "dev@example.com", "name": "Dev", "username": "dev"},
    "committer": {"email": "noreply@github.com", "name": "GitHub", "username": "web-flow"},
    "distinct": true,
    "id": "0123456789abcdef0123456789abcdef01234567",
    "message": "Tune schema cache",
    "timestamp": "2025-10-20T08:15:00-04:00",
    "tree_id": "89abcdef0123456789abcdef0123456789abcdef",
    "url": "https://github.com/example/project/commit/0123456789abcdef0123456789abcdef01234567"
  },
  "date": 1760962600000,
  "tool": "jmh",
  "benches": [
    {"name": "basic", "value": 4810.5, "unit": "ops/s", "extra": {"iterations": 3, "forks": 1, "threads": 1}},
    {"name": "latency", "value": 0.21, "range": "± 0.01", "unit": "ms/op", "extra": "warmup: 2"}
  ]
}"#
}

/// Payloads the ingestion parser must reject.
///
/// Returns (name, payload) pairs.
pub fn invalid_run_payloads() -> Vec<(&'static str, String)> {
    vec![
        ("malformed", "{\"commit\": ".to_string()),
        ("empty_commit_id", run_payload("  ", 1000, &[("a", 1.0, "ops/s")])),
        ("zero_date", run_payload("abc", 0, &[("a", 1.0, "ops/s")])),
        ("negative_date", run_payload("abc", -5, &[("a", 1.0, "ops/s")])),
        (
            "duplicate_bench",
            run_payload("abc", 1000, &[("a", 1.0, "ops/s"), ("a", 2.0, "ops/s")]),
        ),
        ("missing_benches", r#"{"commit": {"id": "abc"}, "date": 1, "tool": "jmh"}"#.to_string()),
    ]
}
