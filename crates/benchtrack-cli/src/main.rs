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

//! benchtrack Command Line Interface

use benchtrack_cli::cli::{Commands, GlobalArgs};
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// benchtrack - benchmark history and regression tracking
///
/// Merges CI benchmark runs into a `data.js` history file and flags runs
/// that are slower than the recent baseline.
///
/// # Examples
///
/// ```bash
/// # Record a run and fail the build on regressions
/// benchtrack --data dev/bench/data.js ingest "Rust Benchmark" run.json --fail-on-regression
///
/// # Show the history of one benchmark
/// benchtrack --data dev/bench/data.js series "Rust Benchmark" parse
///
/// # Keep only the newest 500 runs
/// benchtrack --data dev/bench/data.js prune "Rust Benchmark" --keep 500
/// ```
#[derive(Parser)]
#[command(name = "benchtrack")]
#[command(author, version, about = "benchtrack - benchmark history and regression tracking", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "benchtrack=debug" } else { "benchtrack=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    match cli.command.execute(&cli.global) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
