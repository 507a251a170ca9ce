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

//! benchtrack CLI library for command-line parsing and execution.
//!
//! # Commands
//!
//! ## History
//!
//! - **ingest**: validate a run, merge it and compare it to the baseline
//! - **detect**: compare a recorded run to its baseline
//! - **prune**: drop old runs beyond a retention bound
//! - **check**: verify ordering and uniqueness of the history file
//!
//! ## Queries
//!
//! - **series**: time series of one benchmark
//! - **latest**: newest run of a suite
//! - **suites**: suites and their run counts
//!
//! # Examples
//!
//! ```no_run
//! use benchtrack_cli::cli::GlobalArgs;
//! use benchtrack_cli::commands::ingest;
//! use std::path::{Path, PathBuf};
//!
//! # fn main() -> Result<(), benchtrack_cli::error::CliError> {
//! let global = GlobalArgs {
//!     data: Some(PathBuf::from("dev/bench/data.js")),
//!     ..GlobalArgs::default()
//! };
//! ingest(&global, "Rust Benchmark", Path::new("run.json"), true)?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod error;
