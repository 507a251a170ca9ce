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

//! Read-side views for charting and reporting.
//!
//! Nothing here copies measurements: series are lazy iterators over the
//! suite's entries, and a series can be restarted by cloning it.

use crate::document::{HistoryDocument, Suite};
use crate::entry::Entry;
use serde::Serialize;

/// One point of a benchmark time series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    /// Run date in epoch milliseconds.
    pub date: i64,
    /// Measured value.
    pub value: f64,
}

/// Lazy, date-ordered series of one benchmark within a suite.
///
/// Entries that lack the benchmark are skipped.
#[derive(Debug, Clone)]
pub struct Series<'a> {
    entries: &'a [Entry],
    bench: &'a str,
}

impl<'a> Series<'a> {
    /// Creates a series over a suite.
    pub fn new(suite: &'a Suite, bench: &'a str) -> Self {
        Self {
            entries: suite.entries(),
            bench,
        }
    }

    /// Benchmark name this series follows.
    pub fn bench(&self) -> &str {
        self.bench
    }
}

impl<'a> Iterator for Series<'a> {
    type Item = SeriesPoint;

    fn next(&mut self) -> Option<SeriesPoint> {
        while let Some((first, rest)) = self.entries.split_first() {
            self.entries = rest;
            if let Some(bench) = first.bench(self.bench) {
                return Some(SeriesPoint {
                    date: first.date,
                    value: bench.value,
                });
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.entries.len()))
    }
}

/// A named series as used by the chart renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchSeries {
    /// Benchmark name.
    pub name: String,
    /// Unit of the first point.
    pub unit: String,
    /// Points in date order.
    pub points: Vec<SeriesPoint>,
}

impl HistoryDocument {
    /// Time series of `bench` in `suite`, or `None` for an unknown suite.
    ///
    /// # Example
    ///
    /// ```
    /// use benchtrack_core::{BenchResult, Commit, Entry, HistoryDocument};
    ///
    /// let mut doc = HistoryDocument::new("https://example.com/repo");
    /// for (id, date, value) in [("a", 1000, 10.0), ("b", 2000, 5.0)] {
    ///     doc.merge("s", Entry {
    ///         commit: Commit::new(id, "m"),
    ///         date,
    ///         tool: "jmh".into(),
    ///         benches: vec![BenchResult::new("x", value, "ms")],
    ///     });
    /// }
    /// let points: Vec<_> = doc.series("s", "x").unwrap().map(|p| (p.date, p.value)).collect();
    /// assert_eq!(points, vec![(1000, 10.0), (2000, 5.0)]);
    /// ```
    pub fn series<'a>(&'a self, suite: &str, bench: &'a str) -> Option<Series<'a>> {
        self.suite(suite).map(|s| Series::new(s, bench))
    }

    /// Newest entry of a suite.
    pub fn latest(&self, suite: &str) -> Option<&Entry> {
        self.suite(suite).and_then(Suite::latest)
    }

    /// Suite names in document order.
    pub fn suite_names(&self) -> Vec<&str> {
        self.suites.iter().map(Suite::name).collect()
    }

    /// All series of a suite, in order of first appearance.
    pub fn chart_dataset(&self, suite: &str) -> Vec<BenchSeries> {
        let Some(suite) = self.suite(suite) else {
            return Vec::new();
        };

        let mut dataset: Vec<BenchSeries> = Vec::new();
        for entry in suite.entries() {
            for bench in &entry.benches {
                let point = SeriesPoint {
                    date: entry.date,
                    value: bench.value,
                };
                match dataset.iter_mut().find(|s| s.name == bench.name) {
                    Some(series) => series.points.push(point),
                    None => dataset.push(BenchSeries {
                        name: bench.name.clone(),
                        unit: bench.unit.clone(),
                        points: vec![point],
                    }),
                }
            }
        }
        dataset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{BenchResult, Commit};

    fn run(id: &str, date: i64, benches: &[(&str, f64)]) -> Entry {
        Entry {
            commit: Commit::new(id, "m"),
            date,
            tool: "jmh".to_string(),
            benches: benches
                .iter()
                .map(|(n, v)| BenchResult::new(*n, *v, "ops/s"))
                .collect(),
        }
    }

    #[test]
    fn test_series_skips_missing_bench() {
        let mut doc = HistoryDocument::new("r");
        doc.merge("s", run("a", 1000, &[("x", 1.0)]));
        doc.merge("s", run("b", 2000, &[("y", 2.0)]));
        doc.merge("s", run("c", 3000, &[("x", 3.0), ("y", 4.0)]));

        let xs: Vec<_> = doc.series("s", "x").unwrap().collect();
        assert_eq!(
            xs,
            vec![
                SeriesPoint { date: 1000, value: 1.0 },
                SeriesPoint { date: 3000, value: 3.0 },
            ]
        );
        assert_eq!(doc.series("s", "zzz").unwrap().count(), 0);
        assert!(doc.series("nope", "x").is_none());
    }

    #[test]
    fn test_series_is_restartable() {
        let mut doc = HistoryDocument::new("r");
        doc.merge("s", run("a", 1000, &[("x", 1.0)]));
        doc.merge("s", run("b", 2000, &[("x", 2.0)]));

        let mut series = doc.series("s", "x").unwrap();
        let restart = series.clone();
        assert_eq!(series.next().map(|p| p.value), Some(1.0));
        assert_eq!(restart.count(), 2);
        assert_eq!(series.count(), 1);
    }

    #[test]
    fn test_duplicate_merge_does_not_change_series() {
        let mut doc = HistoryDocument::new("r");
        doc.merge("s", run("A", 1000, &[("x", 10.0)]));
        doc.merge("s", run("B", 2000, &[("x", 5.0)]));
        doc.merge("s", run("A", 1000, &[("x", 99.0)]));

        let points: Vec<_> = doc
            .series("s", "x")
            .unwrap()
            .map(|p| (p.date, p.value))
            .collect();
        assert_eq!(points, vec![(1000, 10.0), (2000, 5.0)]);
    }

    #[test]
    fn test_latest_and_suite_names() {
        let mut doc = HistoryDocument::new("r");
        assert!(doc.latest("s").is_none());
        doc.merge("zeta", run("a", 1000, &[("x", 1.0)]));
        doc.merge("alpha", run("b", 500, &[("x", 1.0)]));
        doc.merge("zeta", run("c", 900, &[("x", 1.0)]));

        assert_eq!(doc.suite_names(), vec!["zeta", "alpha"]);
        assert_eq!(doc.latest("zeta").map(Entry::commit_id), Some("a"));
    }

    #[test]
    fn test_chart_dataset_order() {
        let mut doc = HistoryDocument::new("r");
        doc.merge("s", run("a", 1000, &[("b", 1.0), ("a", 2.0)]));
        doc.merge("s", run("b", 2000, &[("c", 3.0), ("a", 4.0)]));

        let dataset = doc.chart_dataset("s");
        let names: Vec<_> = dataset.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
        assert_eq!(dataset[1].points.len(), 2);
        assert_eq!(dataset[1].unit, "ops/s");
        assert!(doc.chart_dataset("missing").is_empty());
    }
}
