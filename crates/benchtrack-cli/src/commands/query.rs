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

//! Query commands - series, latest run and suite listing

use super::{format_date, print_json};
use crate::cli::GlobalArgs;
use crate::error::CliResult;
use benchtrack::json::js_number;
use benchtrack::{SeriesPoint, TrackerError};
use serde_json::json;

/// Print the time series of `bench` in `suite`.
pub fn series(global: &GlobalArgs, suite: &str, bench: &str) -> CliResult<()> {
    let tracker = global.open_tracker()?;
    let doc = tracker.snapshot();
    let points: Vec<SeriesPoint> = doc
        .series(suite, bench)
        .ok_or_else(|| TrackerError::NotFound(format!("suite '{}' not found", suite)))?
        .collect();

    if points.is_empty() {
        return Err(TrackerError::NotFound(format!(
            "benchmark '{}' not found in suite '{}'",
            bench, suite
        ))
        .into());
    }

    if global.json {
        print_json(&json!({ "suite": suite, "bench": bench, "points": points }))?;
    } else {
        for point in &points {
            println!("{}\t{}", format_date(point.date), js_number(point.value));
        }
    }
    Ok(())
}

/// Print the newest run of `suite`.
pub fn latest(global: &GlobalArgs, suite: &str) -> CliResult<()> {
    let tracker = global.open_tracker()?;
    let doc = tracker.snapshot();
    let entry = doc
        .latest(suite)
        .ok_or_else(|| TrackerError::NotFound(format!("suite '{}' not found", suite)))?;

    if global.json {
        print_json(&serde_json::to_value(entry)?)?;
    } else {
        println!(
            "commit {} at {} ({})",
            entry.commit_id(),
            format_date(entry.date),
            entry.tool
        );
        if !entry.commit.message.is_empty() {
            println!("    {}", entry.commit.message.lines().next().unwrap_or_default());
        }
        for bench in &entry.benches {
            println!("  {}: {} {}", bench.name, js_number(bench.value), bench.unit);
        }
    }
    Ok(())
}

/// List suites with their run counts.
pub fn suites(global: &GlobalArgs) -> CliResult<()> {
    let tracker = global.open_tracker()?;
    let doc = tracker.snapshot();

    if global.json {
        let list: Vec<_> = doc
            .suites()
            .iter()
            .map(|s| {
                json!({
                    "name": s.name(),
                    "entries": s.len(),
                    "latest_date": s.max_date(),
                })
            })
            .collect();
        print_json(&json!(list))?;
    } else {
        for suite in doc.suites() {
            println!("{}\t{} run(s)", suite.name(), suite.len());
        }
    }
    Ok(())
}
