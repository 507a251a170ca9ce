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

//! Prune command - retention for one suite

use super::print_json;
use crate::cli::GlobalArgs;
use crate::error::{CliError, CliResult};
use benchtrack::RetentionPolicy;
use serde_json::json;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Remove the oldest runs of `suite` beyond the given or configured bounds.
pub fn prune(
    global: &GlobalArgs,
    suite: &str,
    keep: Option<usize>,
    max_age_days: Option<u32>,
) -> CliResult<()> {
    let tracker = global.open_tracker()?;

    let policy = if keep.is_some() || max_age_days.is_some() {
        Some(RetentionPolicy {
            max_entries: keep,
            max_age_millis: max_age_days.map(|d| i64::from(d) * MILLIS_PER_DAY),
        })
    } else if tracker.retention().is_disabled() {
        return Err(CliError::InvalidArguments(
            "no retention bound given; use --keep or --max-age-days".to_string(),
        ));
    } else {
        None
    };

    let outcome = tracker.prune(suite, policy.as_ref())?;

    if global.json {
        print_json(&json!({
            "suite": suite,
            "removed": outcome.removed,
            "remaining": outcome.remaining,
        }))?;
    } else {
        println!(
            "Pruned {} run(s) from '{}', {} remaining",
            outcome.removed, suite, outcome.remaining
        );
    }
    Ok(())
}
