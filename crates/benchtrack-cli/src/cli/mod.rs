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

//! CLI argument definitions.
//!
//! - [`history`]: commands that change or verify the history file
//! - [`query`]: read-only views of the history

mod history;
mod query;

use crate::error::{CliError, CliResult};
use benchtrack::{Tracker, TrackerConfig};
use clap::{Args, Subcommand};
use std::path::PathBuf;

pub use history::HistoryCommands;
pub use query::QueryCommands;

/// Options shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// History file (data.js or JSON)
    #[arg(short, long, global = true, value_name = "FILE", env = "BENCHTRACK_DATA")]
    pub data: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long, global = true, value_name = "FILE", env = "BENCHTRACK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Number of preceding runs in the baseline
    #[arg(long, global = true, value_name = "N")]
    pub window: Option<usize>,

    /// Relative change that counts as a regression (0.1 = 10%)
    #[arg(long, global = true, value_name = "RATIO")]
    pub threshold: Option<f64>,

    /// Repository URL for a new history file
    #[arg(long, global = true, value_name = "URL")]
    pub repo_url: Option<String>,

    /// Emit JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl GlobalArgs {
    /// Builds the tracker configuration: file first, then flags.
    pub fn tracker_config(&self) -> CliResult<TrackerConfig> {
        let mut config = match &self.config {
            Some(path) => TrackerConfig::from_file(path)?,
            None => TrackerConfig::default(),
        };

        if let Some(data) = &self.data {
            config.store.path = data.clone();
        }
        if let Some(window) = self.window {
            config.detector.window = window;
        }
        if let Some(threshold) = self.threshold {
            config.detector.threshold_ratio = threshold;
        }
        if let Some(repo_url) = &self.repo_url {
            config.store.repo_url = repo_url.clone();
        }
        Ok(config)
    }

    /// Opens the tracker.
    pub fn open_tracker(&self) -> CliResult<Tracker> {
        Tracker::open(self.tracker_config()?).map_err(CliError::from)
    }
}

/// Top-level CLI commands enum.
///
/// ```text
/// Commands
/// ├── History (ingest, detect, prune, check)
/// └── Query (series, latest, suites)
/// ```
#[derive(Subcommand, Debug)]
pub enum Commands {
    // History commands - flattened to appear at top level
    #[command(flatten)]
    History(HistoryCommands),

    // Query commands - flattened to appear at top level
    #[command(flatten)]
    Query(QueryCommands),
}

impl Commands {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the history cannot be loaded or written, the input is
    /// invalid, or a regression gate fails.
    pub fn execute(self, global: &GlobalArgs) -> CliResult<()> {
        match self {
            Commands::History(cmd) => cmd.execute(global),
            Commands::Query(cmd) => cmd.execute(global),
        }
    }
}
