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

//! Persisted history samples.

/// A real `data.js` written by the chart front end for a JMH project.
///
/// Eight entries in one suite, eleven `ops/s` benchmarks each, every optional
/// commit field present.
pub fn sample_data_js() -> &'static str {
    include_str!("../../data/data.js")
}

/// Suite name used by [`sample_data_js`].
pub const SAMPLE_SUITE: &str = "JSON Schema Validator Benchmark";

/// Repository URL stored in [`sample_data_js`].
pub const SAMPLE_REPO_URL: &str = "https://github.com/networknt/json-schema-validator";

/// `lastUpdate` stored in [`sample_data_js`]. Greater than the newest entry date.
pub const SAMPLE_LAST_UPDATE: i64 = 1_760_962_584_869;

/// Number of entries in [`SAMPLE_SUITE`].
pub const SAMPLE_ENTRY_COUNT: usize = 8;

/// Date of the newest entry in [`SAMPLE_SUITE`].
pub const SAMPLE_LATEST_DATE: i64 = 1_760_962_584_316;

/// Commit id of the newest entry in [`SAMPLE_SUITE`].
pub const SAMPLE_LATEST_COMMIT: &str = "b4abbc296cb421ebb0ba59e866d16099a2f62803";

/// Benchmark present in every entry of [`SAMPLE_SUITE`].
pub const SAMPLE_BASIC_BENCH: &str = "com.networknt.schema.benchmark.NetworkntBenchmark.basic";

/// Minimal empty document in plain JSON framing.
pub fn empty_json_document(repo_url: &str) -> String {
    format!(
        "{{\n  \"lastUpdate\": 0,\n  \"repoUrl\": \"{}\",\n  \"entries\": {{}}\n}}",
        repo_url
    )
}

/// Texts that are not valid history documents.
///
/// Returns (name, text) pairs.
pub fn invalid_documents() -> Vec<(&'static str, &'static str)> {
    vec![
        ("empty", ""),
        ("wrong_target", "window.OTHER_DATA = {}"),
        ("missing_assignment", "window.BENCHMARK_DATA {}"),
        ("truncated", "window.BENCHMARK_DATA = {\"lastUpdate\": 1"),
        ("entries_not_object", "{\"lastUpdate\": 1, \"repoUrl\": \"r\", \"entries\": []}"),
        ("missing_date", "{\"lastUpdate\": 1, \"repoUrl\": \"r\", \"entries\": {\"s\": [{\"commit\": {\"id\": \"a\", \"message\": \"m\", \"author\": {\"name\": \"n\"}, \"committer\": {\"name\": \"n\"}}, \"tool\": \"t\", \"benches\": []}]}}"),
    ]
}
