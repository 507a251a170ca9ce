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

//! Tracker configuration file.

use crate::error::{TrackerError, TrackerResult};
use benchtrack_core::{DetectorConfig, RetentionPolicy};
use benchtrack_store::StoreConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Complete tracker configuration.
///
/// Every section is optional in the JSON file:
///
/// ```json
/// {
///   "store": { "path": "dev/bench/data.js", "repo_url": "https://github.com/example/project" },
///   "detector": { "window": 5, "threshold_ratio": 0.1 },
///   "retention": { "max_entries": 500 }
/// }
/// ```
///
/// A relative store path is resolved against the working directory.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrackerConfig {
    /// History file settings.
    pub store: StoreConfig,
    /// Regression detector settings.
    pub detector: DetectorConfig,
    /// Retention applied after each successful ingest.
    pub retention: RetentionPolicy,
}

impl TrackerConfig {
    /// Defaults for the history file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            store: StoreConfig::new(path),
            ..Self::default()
        }
    }

    /// Sets the detector configuration.
    pub fn with_detector(mut self, detector: DetectorConfig) -> Self {
        self.detector = detector;
        self
    }

    /// Sets the retention policy.
    pub fn with_retention(mut self, retention: RetentionPolicy) -> Self {
        self.retention = retention;
        self
    }

    /// Parses a configuration from JSON text.
    pub fn from_json_str(text: &str) -> TrackerResult<Self> {
        serde_json::from_str(text).map_err(|e| TrackerError::Config(e.to_string()))
    }

    /// Reads a JSON configuration file.
    pub fn from_file(path: &Path) -> TrackerResult<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| TrackerError::Config(format!("failed to read '{}': {}", path.display(), e)))?;
        serde_json::from_str(&text)
            .map_err(|e| TrackerError::Config(format!("'{}': {}", path.display(), e)))
    }

    /// Checks every section.
    pub fn validate(&self) -> TrackerResult<()> {
        self.store.validate().map_err(TrackerError::Config)?;
        self.detector.validate().map_err(TrackerError::Config)?;
        self.retention.validate().map_err(TrackerError::Config)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use benchtrack_core::Direction;

    #[test]
    fn test_partial_file() {
        let config = TrackerConfig::from_json_str(
            r#"{
                "store": {"path": "bench/data.js"},
                "detector": {"window": 3, "units": {"units": {"frames/s": "higher_is_better"}}},
                "retention": {"max_entries": 100}
            }"#,
        )
        .unwrap();

        assert_eq!(config.store.path, PathBuf::from("bench/data.js"));
        assert_eq!(config.detector.window, 3);
        assert_eq!(config.detector.threshold_ratio, 0.10);
        assert_eq!(
            config.detector.units.direction("frames/s"),
            Some(Direction::HigherIsBetter)
        );
        // Adding a unit keeps the built-in ones.
        assert_eq!(
            config.detector.units.direction("ops/s"),
            Some(Direction::HigherIsBetter)
        );
        assert_eq!(config.detector.units.direction("ms"), Some(Direction::LowerIsBetter));
        assert_eq!(config.retention.max_entries, Some(100));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_file_is_default() {
        let config = TrackerConfig::from_json_str("{}").unwrap();
        assert_eq!(config, TrackerConfig::default());
    }

    #[test]
    fn test_rejects_unknown_and_invalid() {
        assert!(TrackerConfig::from_json_str(r#"{"stor": {}}"#).is_err());
        let bad = TrackerConfig::from_json_str(r#"{"detector": {"window": 0}}"#).unwrap();
        assert!(matches!(bad.validate(), Err(TrackerError::Config(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = TrackerConfig::from_file(Path::new("/nonexistent/benchtrack.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
