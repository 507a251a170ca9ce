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

//! # benchtrack - Benchmark History and Regression Tracking
//!
//! Keeps the benchmark history of a project in a single `data.js` (or JSON)
//! file, merges every CI run into it idempotently and flags runs that are
//! slower than the recent baseline.
//!
//! ## Quick Start
//!
//! ```rust
//! use benchtrack::{Tracker, TrackerConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # let dir = std::env::temp_dir().join(format!("benchtrack-doc-{}", std::process::id()));
//! # std::fs::create_dir_all(&dir)?;
//! let tracker = Tracker::open(TrackerConfig::new(dir.join("data.js")))?;
//!
//! let report = tracker.ingest("Rust Benchmark", r#"{
//!     "commit": {"id": "abc123", "message": "Speed up parser"},
//!     "date": 1760000000000,
//!     "tool": "cargo",
//!     "benches": [{"name": "parse", "value": 812, "unit": "ns/iter"}]
//! }"#)?;
//!
//! assert!(!report.is_duplicate());
//! assert!(!report.has_regressions());
//! # std::fs::remove_dir_all(&dir)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Crates
//!
//! - `benchtrack-core`: data model, merge engine, detector, series queries
//! - [`json`]: the `data.js` / JSON codec
//! - [`store`]: durable, concurrent history file

mod config;
mod error;
mod tracker;

pub use config::TrackerConfig;
pub use error::{TrackerError, TrackerResult};
pub use tracker::{now_millis, IngestReport, Tracker};

// Re-export the data model and engines
pub use benchtrack_core::{
    format_findings, parse_run, parse_run_json, BenchExtra, BenchResult, BenchSeries, Commit,
    Comparison, DetectionNote, DetectionReport, Detector, DetectorConfig, Direction, Entry,
    HistoryDocument, InvariantViolation, MergeOutcome, Person, PruneOutcome, RawBench, RawCommit,
    RawRun, RegressionFinding, RetentionPolicy, RunParams, Series, SeriesPoint, Severity,
    SeverityBands, Suite, UnitRegistry, ValidationError, ValidationResult,
};

pub mod json {
    //! History document codec
    pub use benchtrack_json::{
        detect_format, format_for_path, from_document_str, js_number, to_document_string,
        write_document, CodecError, CodecResult, DocumentFormat, DATA_JS_PREFIX,
    };
}

pub mod store {
    //! Durable history store
    pub use benchtrack_store::{
        max_file_size_from_env, HistoryStore, StoreConfig, StoreError, StoreResult,
        DEFAULT_MAX_FILE_SIZE, MAX_FILE_SIZE_ENV,
    };
}
