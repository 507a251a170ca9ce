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

//! Ingestion parser: raw harness payloads to validated entries.
//!
//! The parser is a pure function. It never touches a document and either
//! returns an [`Entry`] that satisfies every per-entry invariant or a
//! [`ValidationError`](crate::ValidationError).

use crate::entry::{BenchResult, Commit, Entry, Person};
use crate::error::ValidationResult;
use crate::extra::BenchExtra;
use serde::Deserialize;

/// Commit metadata as sent by the harness.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawCommit {
    /// Commit identifier.
    #[serde(default)]
    pub id: String,
    /// Commit message.
    #[serde(default)]
    pub message: String,
    /// ISO-8601 timestamp.
    #[serde(default)]
    pub timestamp: Option<String>,
    /// Author identity.
    #[serde(default)]
    pub author: Option<Person>,
    /// Committer identity.
    #[serde(default)]
    pub committer: Option<Person>,
    /// Push-event distinct flag.
    #[serde(default)]
    pub distinct: Option<bool>,
    /// Tree identifier.
    #[serde(default)]
    pub tree_id: Option<String>,
    /// Web URL of the commit.
    #[serde(default)]
    pub url: Option<String>,
}

/// One measurement as sent by the harness.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawBench {
    /// Benchmark name.
    pub name: String,
    /// Measured value.
    pub value: f64,
    /// Unit string.
    pub unit: String,
    /// Optional spread string.
    #[serde(default)]
    pub range: Option<String>,
    /// Harness parameters: a string or a `{iterations, forks, threads}` object.
    #[serde(default)]
    pub extra: Option<BenchExtra>,
}

/// A complete run payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawRun {
    /// Commit the run measured.
    pub commit: RawCommit,
    /// Run time in epoch milliseconds.
    pub date: i64,
    /// Harness identifier.
    pub tool: String,
    /// Measurements in harness order.
    pub benches: Vec<RawBench>,
}

/// Validates and normalizes a raw run into an [`Entry`].
///
/// The commit id is trimmed; optional identities default to empty.
///
/// # Errors
///
/// Any error of [`Entry::validate`].
pub fn parse_run(raw: RawRun) -> ValidationResult<Entry> {
    let benches = raw
        .benches
        .into_iter()
        .map(|bench| BenchResult {
            name: bench.name,
            value: bench.value,
            range: bench.range,
            unit: bench.unit,
            extra: bench.extra,
        })
        .collect();

    let commit = Commit {
        author: raw.commit.author.unwrap_or_default(),
        committer: raw.commit.committer.unwrap_or_default(),
        distinct: raw.commit.distinct,
        id: raw.commit.id.trim().to_string(),
        message: raw.commit.message,
        timestamp: raw.commit.timestamp,
        tree_id: raw.commit.tree_id,
        url: raw.commit.url,
    };

    let entry = Entry {
        commit,
        date: raw.date,
        tool: raw.tool,
        benches,
    };
    entry.validate()?;
    Ok(entry)
}

/// Decodes a JSON run payload and validates it.
///
/// # Examples
///
/// ```
/// use benchtrack_core::parse_run_json;
///
/// let entry = parse_run_json(r#"{
///     "commit": {"id": "abc123", "message": "Speed up parser"},
///     "date": 1758381708186,
///     "tool": "jmh",
///     "benches": [{"name": "basic", "value": 8126.5, "unit": "ops/s"}]
/// }"#).unwrap();
///
/// assert_eq!(entry.commit_id(), "abc123");
/// assert_eq!(entry.benches.len(), 1);
/// ```
///
/// # Errors
///
/// Returns [`ValidationError::Malformed`](crate::ValidationError::Malformed) for
/// undecodable JSON, otherwise the errors of [`parse_run`].
pub fn parse_run_json(json: &str) -> ValidationResult<Entry> {
    let raw: RawRun = serde_json::from_str(json)?;
    parse_run(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::extra::RunParams;

    fn raw(id: &str, date: i64, benches: Vec<RawBench>) -> RawRun {
        RawRun {
            commit: RawCommit {
                id: id.to_string(),
                message: "msg".to_string(),
                ..RawCommit::default()
            },
            date,
            tool: "jmh".to_string(),
            benches,
        }
    }

    fn bench(name: &str, value: f64) -> RawBench {
        RawBench {
            name: name.to_string(),
            value,
            unit: "ops/s".to_string(),
            range: None,
            extra: None,
        }
    }

    #[test]
    fn test_valid_run() {
        let entry = parse_run(raw("abc", 1000, vec![bench("a", 1.0), bench("b", 2.0)])).unwrap();
        assert_eq!(entry.commit.id, "abc");
        assert_eq!(entry.date, 1000);
        let names: Vec<_> = entry.benches.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_commit_id_is_trimmed() {
        let entry = parse_run(raw("  abc\n", 1000, vec![])).unwrap();
        assert_eq!(entry.commit.id, "abc");
    }

    #[test]
    fn test_empty_commit_id() {
        assert_eq!(
            parse_run(raw("", 1000, vec![])),
            Err(ValidationError::EmptyCommitId)
        );
        assert_eq!(
            parse_run(raw("   ", 1000, vec![])),
            Err(ValidationError::EmptyCommitId)
        );
    }

    #[test]
    fn test_non_positive_date() {
        assert_eq!(
            parse_run(raw("abc", 0, vec![])),
            Err(ValidationError::NonPositiveDate { date: 0 })
        );
        assert_eq!(
            parse_run(raw("abc", -1, vec![])),
            Err(ValidationError::NonPositiveDate { date: -1 })
        );
    }

    #[test]
    fn test_non_finite_values() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = parse_run(raw("abc", 1, vec![bench("a", value)])).unwrap_err();
            assert_eq!(err.code(), "non_finite_value");
        }
    }

    #[test]
    fn test_duplicate_bench_name() {
        let err = parse_run(raw("abc", 1, vec![bench("a", 1.0), bench("a", 2.0)])).unwrap_err();
        assert_eq!(
            err,
            ValidationError::DuplicateBenchName {
                name: "a".to_string()
            }
        );
    }

    #[test]
    fn test_json_with_structured_and_string_extra() {
        let json = r#"{
            "commit": {
                "id": "abc",
                "message": "m",
                "timestamp": "2025-09-20T11:15:24-04:00",
                "author": {"name": "Justin", "email": "j@example.com"},
                "committer": {"name": "GitHub"}
            },
            "date": 1758381708186,
            "tool": "jmh",
            "benches": [
                {"name": "a", "value": 1, "unit": "ops/s", "extra": {"iterations": 3, "forks": 1, "threads": 1}},
                {"name": "b", "value": 2.5, "unit": "ops/s", "extra": "iterations: 3\nforks: 1\nthreads: 1"},
                {"name": "c", "value": 3, "unit": "ms", "extra": "custom"}
            ]
        }"#;
        let entry = parse_run_json(json).unwrap();
        let expected = RunParams {
            iterations: 3,
            forks: 1,
            threads: 1,
        };
        assert_eq!(entry.benches[0].extra, Some(BenchExtra::Params(expected)));
        assert_eq!(entry.benches[1].extra, Some(BenchExtra::Params(expected)));
        assert_eq!(
            entry.benches[2].extra,
            Some(BenchExtra::Opaque("custom".to_string()))
        );
        assert_eq!(entry.commit.author.name, "Justin");
        assert_eq!(entry.commit.committer.name, "GitHub");
        assert!(entry.commit.parsed_timestamp().is_some());
    }

    #[test]
    fn test_malformed_json() {
        let err = parse_run_json(r#"{"commit": {"id": "a"}, "date": "yesterday"}"#).unwrap_err();
        assert_eq!(err.code(), "malformed");
        assert_eq!(parse_run_json("not json").unwrap_err().code(), "malformed");
    }
}
