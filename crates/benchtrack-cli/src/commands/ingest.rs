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

//! Ingest command - merge a run and compare it to the baseline

use super::{print_detection, print_json, read_input, regression_gate};
use crate::cli::GlobalArgs;
use crate::error::CliResult;
use benchtrack::MergeOutcome;
use colored::Colorize;
use serde_json::json;
use std::path::Path;

/// Validate a run payload, merge it into `suite` and report regressions.
///
/// # Errors
///
/// Returns `Err` if the payload is invalid, the history cannot be written, or
/// `fail_on_regression` is set and a regression was found.
pub fn ingest(global: &GlobalArgs, suite: &str, run: &Path, fail_on_regression: bool) -> CliResult<()> {
    let payload = read_input(run)?;
    let tracker = global.open_tracker()?;
    let report = tracker.ingest(suite, &payload)?;

    if global.json {
        let (outcome, index) = match report.outcome {
            MergeOutcome::Inserted { index } => ("inserted", Some(index)),
            MergeOutcome::Duplicate => ("duplicate", None),
        };
        print_json(&json!({
            "suite": report.suite,
            "commit": report.commit_id,
            "outcome": outcome,
            "index": index,
            "pruned": report.pruned.map(|p| p.removed),
            "detection": report.detection,
        }))?;
    } else {
        match report.outcome {
            MergeOutcome::Inserted { index } => println!(
                "{} Recorded {} in '{}' (position {})",
                "✓".green().bold(),
                report.commit_id,
                report.suite,
                index
            ),
            MergeOutcome::Duplicate => println!(
                "{} {} already recorded in '{}'; history unchanged",
                "=".yellow().bold(),
                report.commit_id,
                report.suite
            ),
        }
        if let Some(pruned) = report.pruned.filter(|p| p.removed > 0) {
            println!(
                "Pruned {} old run(s), {} remaining",
                pruned.removed, pruned.remaining
            );
        }
        print_detection(&report.detection);
    }

    regression_gate(&report.detection, fail_on_regression)
}
