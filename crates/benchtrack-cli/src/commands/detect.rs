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

//! Detect command - compare a recorded run to its baseline

use super::{print_detection, print_json, regression_gate};
use crate::cli::GlobalArgs;
use crate::error::CliResult;

/// Compare a recorded run (the newest by default) against its baseline.
pub fn detect(
    global: &GlobalArgs,
    suite: &str,
    commit: Option<&str>,
    fail_on_regression: bool,
) -> CliResult<()> {
    let tracker = global.open_tracker()?;
    let report = tracker.detect(suite, commit)?;

    if global.json {
        print_json(&serde_json::to_value(&report)?)?;
    } else {
        print_detection(&report);
    }

    regression_gate(&report, fail_on_regression)
}
