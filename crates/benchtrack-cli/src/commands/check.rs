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

//! Check command - history file verification

use super::{format_date, print_json};
use crate::cli::GlobalArgs;
use crate::error::{CliError, CliResult};
use colored::Colorize;
use serde_json::json;

/// Load the history file and verify its ordering and uniqueness rules.
///
/// # Output
///
/// Prints one line per problem, or a summary with suite and run counts.
pub fn check(global: &GlobalArgs) -> CliResult<()> {
    let tracker = global.open_tracker()?;
    let doc = tracker.snapshot();
    let violations = doc.check_invariants();
    let path = tracker.store().path().display().to_string();

    if global.json {
        print_json(&json!({
            "path": path,
            "suites": doc.suites().len(),
            "entries": doc.entry_count(),
            "last_update": doc.last_update,
            "violations": violations.iter().map(ToString::to_string).collect::<Vec<_>>(),
        }))?;
    } else if violations.is_empty() {
        println!(
            "{} {}: {} suite(s), {} run(s), last update {}",
            "✓".green().bold(),
            path,
            doc.suites().len(),
            doc.entry_count(),
            format_date(doc.last_update)
        );
    } else {
        for violation in &violations {
            println!("{} {}", "✗".red().bold(), violation);
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(CliError::CheckFailed {
            count: violations.len(),
        })
    }
}
