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

//! Commands that change or verify the history file.

use super::GlobalArgs;
use crate::commands;
use crate::error::CliResult;
use clap::Subcommand;
use std::path::PathBuf;

/// History commands.
///
/// - **Ingest**: validate and merge a run, then compare it to the baseline
/// - **Detect**: compare a recorded run to its baseline
/// - **Prune**: drop old runs beyond a retention bound
/// - **Check**: verify ordering and uniqueness of the history file
#[derive(Subcommand, Debug)]
pub enum HistoryCommands {
    /// Merge a benchmark run into the history
    ///
    /// The run file holds one JSON object with `commit`, `date` (epoch
    /// milliseconds), `tool` and `benches`. Re-ingesting a commit that is
    /// already recorded changes nothing.
    Ingest {
        /// Suite to merge into
        #[arg(value_name = "SUITE")]
        suite: String,

        /// Run payload file, or `-` for stdin
        #[arg(value_name = "RUN")]
        run: PathBuf,

        /// Exit with status 1 when a regression is found
        #[arg(long)]
        fail_on_regression: bool,
    },

    /// Compare a recorded run against its baseline
    Detect {
        /// Suite to inspect
        #[arg(value_name = "SUITE")]
        suite: String,

        /// Commit to compare (defaults to the newest run)
        #[arg(long, value_name = "ID")]
        commit: Option<String>,

        /// Exit with status 1 when a regression is found
        #[arg(long)]
        fail_on_regression: bool,
    },

    /// Remove the oldest runs of a suite
    ///
    /// Without bounds on the command line the configured retention is used.
    Prune {
        /// Suite to prune
        #[arg(value_name = "SUITE")]
        suite: String,

        /// Keep at most this many newest runs
        #[arg(long, value_name = "N")]
        keep: Option<usize>,

        /// Drop runs older than this many days
        #[arg(long, value_name = "DAYS")]
        max_age_days: Option<u32>,
    },

    /// Verify the history file
    Check,
}

impl HistoryCommands {
    /// Execute the history command.
    pub fn execute(self, global: &GlobalArgs) -> CliResult<()> {
        match self {
            HistoryCommands::Ingest {
                suite,
                run,
                fail_on_regression,
            } => commands::ingest(global, &suite, &run, fail_on_regression),
            HistoryCommands::Detect {
                suite,
                commit,
                fail_on_regression,
            } => commands::detect(global, &suite, commit.as_deref(), fail_on_regression),
            HistoryCommands::Prune {
                suite,
                keep,
                max_age_days,
            } => commands::prune(global, &suite, keep, max_age_days),
            HistoryCommands::Check => commands::check(global),
        }
    }
}
