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

//! Regression detection against a rolling baseline.
//!
//! For every measurement of a new entry the detector gathers the same-named,
//! same-unit results of the `window` entries that immediately precede it in
//! the suite, averages them into a baseline and compares. The unit decides
//! which direction counts as a regression (see [`UnitRegistry`]).
//!
//! Detection is read-only and infallible. Missing history, unknown units and
//! degenerate baselines are reported as [`DetectionNote`]s, never as errors.

use crate::document::{HistoryDocument, Suite};
use crate::entry::Entry;
use crate::units::{Direction, UnitRegistry};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default number of preceding entries averaged into the baseline.
pub const DEFAULT_WINDOW: usize = 5;

/// Default relative change that counts as a regression.
pub const DEFAULT_THRESHOLD_RATIO: f64 = 0.10;

/// Regression severity classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Crossed the threshold but below the moderate band.
    Minor,
    /// Degradation at or above the moderate band.
    Moderate,
    /// Degradation at or above the severe band.
    Severe,
}

impl Severity {
    /// Returns the severity level as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minor => "minor",
            Self::Moderate => "moderate",
            Self::Severe => "severe",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Degradation levels (as fractions of the baseline) that raise severity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityBands {
    /// Degradation at which a regression becomes moderate.
    pub moderate: f64,
    /// Degradation at which a regression becomes severe.
    pub severe: f64,
}

impl Default for SeverityBands {
    fn default() -> Self {
        Self {
            moderate: 0.25,
            severe: 0.50,
        }
    }
}

impl SeverityBands {
    /// Classifies a degradation that already crossed the threshold.
    pub fn classify(&self, degradation: f64) -> Severity {
        if degradation >= self.severe {
            Severity::Severe
        } else if degradation >= self.moderate {
            Severity::Moderate
        } else {
            Severity::Minor
        }
    }
}

/// Detector configuration.
///
/// The window and threshold come from the CI caller; the defaults are only a
/// starting point.
///
/// # Example
///
/// ```
/// use benchtrack_core::DetectorConfig;
///
/// let config = DetectorConfig::default().with_window(3).with_threshold(0.1);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Number of preceding entries in the baseline.
    pub window: usize,
    /// Relative change that counts as a regression.
    pub threshold_ratio: f64,
    /// Severity bands.
    pub severity: SeverityBands,
    /// Unit direction registry.
    pub units: UnitRegistry,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            threshold_ratio: DEFAULT_THRESHOLD_RATIO,
            severity: SeverityBands::default(),
            units: UnitRegistry::default(),
        }
    }
}

impl DetectorConfig {
    /// Sets the baseline window.
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Sets the regression threshold.
    pub fn with_threshold(mut self, threshold_ratio: f64) -> Self {
        self.threshold_ratio = threshold_ratio;
        self
    }

    /// Sets the unit registry.
    pub fn with_units(mut self, units: UnitRegistry) -> Self {
        self.units = units;
        self
    }

    /// Sets the severity bands.
    pub fn with_severity(mut self, severity: SeverityBands) -> Self {
        self.severity = severity;
        self
    }

    /// Checks that the configuration is usable.
    pub fn validate(&self) -> Result<(), String> {
        if self.window == 0 {
            return Err("detector window must be at least 1".to_string());
        }
        if !self.threshold_ratio.is_finite() || self.threshold_ratio < 0.0 {
            return Err(format!(
                "detector threshold_ratio must be a non-negative number, got {}",
                self.threshold_ratio
            ));
        }
        let SeverityBands { moderate, severe } = self.severity;
        if !moderate.is_finite() || !severe.is_finite() || moderate < 0.0 || severe < moderate {
            return Err(format!(
                "severity bands must satisfy 0 <= moderate <= severe, got {} / {}",
                moderate, severe
            ));
        }
        Ok(())
    }
}

/// Baseline comparison for one measurement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    /// Benchmark name.
    pub bench_name: String,
    /// Unit of both values.
    pub unit: String,
    /// Direction used for the verdict.
    pub direction: Direction,
    /// Mean of the gathered history.
    pub baseline_value: f64,
    /// Value in the new entry.
    pub new_value: f64,
    /// `new_value / baseline_value`.
    pub ratio: f64,
    /// Number of historical values in the baseline.
    pub samples: usize,
    /// Severity if the threshold was crossed.
    pub severity: Option<Severity>,
}

impl Comparison {
    /// Relative change in the unfavorable direction (negative = improvement).
    pub fn degradation(&self) -> f64 {
        match self.direction {
            Direction::HigherIsBetter => 1.0 - self.ratio,
            Direction::LowerIsBetter => self.ratio - 1.0,
        }
    }

    /// Returns whether this comparison is a regression.
    pub fn is_regression(&self) -> bool {
        self.severity.is_some()
    }
}

/// A benchmark whose new value crossed the threshold unfavorably.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegressionFinding {
    /// Benchmark name.
    pub bench_name: String,
    /// Unit of both values.
    pub unit: String,
    /// Baseline mean.
    pub baseline_value: f64,
    /// New value.
    pub new_value: f64,
    /// `new_value / baseline_value`.
    pub ratio: f64,
    /// Severity classification.
    pub severity: Severity,
}

/// Informational signal produced while detecting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetectionNote {
    /// No earlier result exists for this benchmark in the window.
    MissingBaseline {
        /// Benchmark name
        bench: String,
    },
    /// The unit has no configured direction.
    UnknownUnit {
        /// Benchmark name
        bench: String,
        /// Unclassified unit
        unit: String,
    },
    /// The baseline mean is zero or negative, so no ratio exists.
    NonPositiveBaseline {
        /// Benchmark name
        bench: String,
    },
}

impl fmt::Display for DetectionNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingBaseline { bench } => write!(f, "{}: no baseline in window", bench),
            Self::UnknownUnit { bench, unit } => {
                write!(f, "{}: unit '{}' has no configured direction", bench, unit)
            }
            Self::NonPositiveBaseline { bench } => {
                write!(f, "{}: baseline is not positive", bench)
            }
        }
    }
}

/// Everything the detector learned about one entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionReport {
    /// Suite the entry was compared in.
    pub suite: String,
    /// Commit of the compared entry.
    pub commit_id: String,
    /// Number of preceding entries that formed the window.
    pub window_entries: usize,
    /// Comparisons for every bench that had a baseline and a known unit.
    pub comparisons: Vec<Comparison>,
    /// Comparisons that crossed the threshold.
    pub findings: Vec<RegressionFinding>,
    /// Informational notes.
    pub notes: Vec<DetectionNote>,
}

impl DetectionReport {
    /// Returns true if any finding was emitted.
    pub fn has_regressions(&self) -> bool {
        !self.findings.is_empty()
    }

    /// Worst severity among the findings.
    pub fn worst_severity(&self) -> Option<Severity> {
        self.findings.iter().map(|f| f.severity).max()
    }
}

/// Compares entries against the rolling baseline of their suite.
#[derive(Debug, Clone, Default)]
pub struct Detector {
    config: DetectorConfig,
}

impl Detector {
    /// Creates a detector.
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Returns only the regression findings for `entry`.
    pub fn detect(&self, doc: &HistoryDocument, suite_name: &str, entry: &Entry) -> Vec<RegressionFinding> {
        self.analyze(doc, suite_name, entry).findings
    }

    /// Compares every measurement of `entry` against its baseline.
    ///
    /// `entry` may already be merged (it is then located by commit id) or not
    /// (its window ends where the merge engine would insert it).
    pub fn analyze(&self, doc: &HistoryDocument, suite_name: &str, entry: &Entry) -> DetectionReport {
        let window = doc
            .suite(suite_name)
            .map(|suite| preceding(suite, entry, self.config.window))
            .unwrap_or(&[]);

        let mut report = DetectionReport {
            suite: suite_name.to_string(),
            commit_id: entry.commit.id.clone(),
            window_entries: window.len(),
            comparisons: Vec::new(),
            findings: Vec::new(),
            notes: Vec::new(),
        };

        for bench in &entry.benches {
            let history: Vec<f64> = window
                .iter()
                .filter_map(|e| e.bench(&bench.name))
                .filter(|b| b.unit == bench.unit)
                .map(|b| b.value)
                .collect();

            if history.is_empty() {
                report.notes.push(DetectionNote::MissingBaseline {
                    bench: bench.name.clone(),
                });
                continue;
            }

            let Some(direction) = self.config.units.direction(&bench.unit) else {
                report.notes.push(DetectionNote::UnknownUnit {
                    bench: bench.name.clone(),
                    unit: bench.unit.clone(),
                });
                continue;
            };

            let baseline = history.iter().sum::<f64>() / history.len() as f64;
            if !(baseline.is_finite() && baseline > 0.0) {
                report.notes.push(DetectionNote::NonPositiveBaseline {
                    bench: bench.name.clone(),
                });
                continue;
            }

            let ratio = bench.value / baseline;
            let threshold = self.config.threshold_ratio;
            let regressed = match direction {
                Direction::HigherIsBetter => ratio < 1.0 - threshold,
                Direction::LowerIsBetter => ratio > 1.0 + threshold,
            };

            let mut comparison = Comparison {
                bench_name: bench.name.clone(),
                unit: bench.unit.clone(),
                direction,
                baseline_value: baseline,
                new_value: bench.value,
                ratio,
                samples: history.len(),
                severity: None,
            };

            if regressed {
                let severity = self.config.severity.classify(comparison.degradation());
                comparison.severity = Some(severity);
                report.findings.push(RegressionFinding {
                    bench_name: bench.name.clone(),
                    unit: bench.unit.clone(),
                    baseline_value: baseline,
                    new_value: bench.value,
                    ratio,
                    severity,
                });
            }

            report.comparisons.push(comparison);
        }

        report
    }
}

fn preceding<'a>(suite: &'a Suite, entry: &Entry, window: usize) -> &'a [Entry] {
    let entries = suite.entries();
    let end = suite
        .position_of(&entry.commit.id)
        .unwrap_or_else(|| entries.partition_point(|e| e.date <= entry.date));
    &entries[end.saturating_sub(window)..end]
}

/// Formats findings as a plain-text report for CI logs.
pub fn format_findings(report: &DetectionReport) -> String {
    if report.findings.is_empty() {
        return format!(
            "No regressions detected for {} in '{}'.",
            report.commit_id, report.suite
        );
    }

    let mut out = format!(
        "REGRESSION REPORT: {} detected for {} in '{}'\n\n",
        report.findings.len(),
        report.commit_id,
        report.suite
    );

    for finding in &report.findings {
        let change = (finding.ratio - 1.0) * 100.0;
        out.push_str(&format!(
            "[{}] {}: {:+.1}% vs baseline\n",
            finding.severity.as_str().to_uppercase(),
            finding.bench_name,
            change
        ));
        out.push_str(&format!(
            "  Current: {:.2} {}, Baseline: {:.2} {}, Ratio: {:.3}\n\n",
            finding.new_value, finding.unit, finding.baseline_value, finding.unit, finding.ratio
        ));
    }

    out
}
