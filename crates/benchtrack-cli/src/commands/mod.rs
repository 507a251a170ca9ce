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

//! CLI command implementations

mod check;
mod detect;
mod ingest;
mod prune;
mod query;

pub use check::check;
pub use detect::detect;
pub use ingest::ingest;
pub use prune::prune;
pub use query::{latest, series, suites};

use crate::error::{CliError, CliResult};
use benchtrack::store::max_file_size_from_env;
use benchtrack::{format_findings, DetectionReport};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Read an input file, or stdin for `-`, with size validation.
///
/// The limit is the one used for history files (`BENCHTRACK_MAX_FILE_SIZE`).
pub fn read_input(path: &Path) -> CliResult<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| CliError::io_error(path, e))?;
        return Ok(text);
    }

    let metadata = fs::metadata(path).map_err(|e| CliError::io_error(path, e))?;
    let max = max_file_size_from_env();
    if metadata.len() > max {
        return Err(CliError::file_too_large(path, metadata.len(), max));
    }

    fs::read_to_string(path).map_err(|e| CliError::io_error(path, e))
}

/// Print a JSON value to stdout.
pub(crate) fn print_json(value: &Value) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Render epoch milliseconds as an RFC 3339 UTC timestamp.
pub(crate) fn format_date(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_else(|| millis.to_string())
}

/// Print findings and notes in text form.
pub(crate) fn print_detection(report: &DetectionReport) {
    println!("{}", format_findings(report).trim_end());
    for note in &report.notes {
        println!("note: {}", note);
    }
}

/// Fail when regressions were found and the caller asked for it.
pub(crate) fn regression_gate(report: &DetectionReport, fail_on_regression: bool) -> CliResult<()> {
    if fail_on_regression && report.has_regressions() {
        return Err(CliError::RegressionsDetected {
            count: report.findings.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(1758381708186), "2025-09-20T15:21:48.186Z");
        assert_eq!(format_date(0), "1970-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_read_input_missing() {
        let err = read_input(Path::new("/nonexistent/run.json")).unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
    }
}
