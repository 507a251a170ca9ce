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

//! Read-only views of the history.

use super::GlobalArgs;
use crate::commands;
use crate::error::CliResult;
use clap::Subcommand;

/// Query commands.
#[derive(Subcommand, Debug)]
pub enum QueryCommands {
    /// Print the time series of one benchmark
    Series {
        /// Suite name
        #[arg(value_name = "SUITE")]
        suite: String,

        /// Benchmark name
        #[arg(value_name = "BENCH")]
        bench: String,
    },

    /// Print the newest run of a suite
    Latest {
        /// Suite name
        #[arg(value_name = "SUITE")]
        suite: String,
    },

    /// List suites and their run counts
    Suites,
}

impl QueryCommands {
    /// Execute the query command.
    pub fn execute(self, global: &GlobalArgs) -> CliResult<()> {
        match self {
            QueryCommands::Series { suite, bench } => commands::series(global, &suite, &bench),
            QueryCommands::Latest { suite } => commands::latest(global, &suite),
            QueryCommands::Suites => commands::suites(global),
        }
    }
}
