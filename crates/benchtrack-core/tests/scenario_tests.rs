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

//! End-to-end scenarios over the in-memory model: ingest, merge, detect, query.

use benchtrack_core::{
    parse_run_json, Detector, DetectorConfig, HistoryDocument, MergeOutcome, RetentionPolicy,
    Severity, ValidationError,
};

fn payload(id: &str, date: i64, benches: &str) -> String {
    format!(
        r#"{{"commit": {{"id": "{}", "message": "run {}"}}, "date": {}, "tool": "jmh", "benches": [{}]}}"#,
        id, id, date, benches
    )
}

fn basic(value: f64) -> String {
    format!(r#"{{"name": "basic", "value": {}, "unit": "ops/s"}}"#, value)
}

#[test]
fn test_ingest_merge_detect_pipeline() {
    let mut doc = HistoryDocument::new("https://github.com/example/project");
    for (i, value) in [9000.0, 9100.0, 9050.0].iter().enumerate() {
        let entry = parse_run_json(&payload(&format!("h{}", i), 1000 + i as i64, &basic(*value))).unwrap();
        assert!(doc.merge("Java Benchmark", entry).is_inserted());
    }

    let new = parse_run_json(&payload("new", 5000, &basic(4700.0))).unwrap();
    let outcome = doc.merge("Java Benchmark", new.clone());
    assert_eq!(outcome, MergeOutcome::Inserted { index: 3 });

    let detector = Detector::new(DetectorConfig::default().with_window(3).with_threshold(0.1));
    let findings = detector.detect(&doc, "Java Benchmark", &new);
    assert_eq!(findings.len(), 1);
    assert!((findings[0].ratio - 0.519).abs() < 0.001);
    assert_eq!(findings[0].severity, Severity::Moderate);
}

#[test]
fn test_new_benchmark_has_no_finding() {
    let mut doc = HistoryDocument::new("r");
    doc.merge("s", parse_run_json(&payload("a", 1000, &basic(100.0))).unwrap());

    let both = format!(
        "{}, {}",
        basic(100.0),
        r#"{"name": "fresh", "value": 1, "unit": "ops/s"}"#
    );
    let new = parse_run_json(&payload("b", 2000, &both)).unwrap();
    let report = Detector::default().analyze(&doc, "s", &new);
    assert!(report.findings.is_empty());
    assert_eq!(report.comparisons.len(), 1);
    assert_eq!(report.notes.len(), 1);
}

#[test]
fn test_remerge_keeps_first_series() {
    let mut doc = HistoryDocument::new("r");
    doc.merge("s", parse_run_json(&payload("A", 1000, &basic(10.0))).unwrap());
    doc.merge("s", parse_run_json(&payload("B", 2000, &basic(5.0))).unwrap());
    let again = doc.merge("s", parse_run_json(&payload("A", 1000, &basic(77.0))).unwrap());
    assert_eq!(again, MergeOutcome::Duplicate);

    let points: Vec<(i64, f64)> = doc
        .series("s", "basic")
        .unwrap()
        .map(|p| (p.date, p.value))
        .collect();
    assert_eq!(points, vec![(1000, 10.0), (2000, 5.0)]);
}

#[test]
fn test_prune_to_two_newest() {
    let mut doc = HistoryDocument::new("r");
    for date in [1000, 2000, 3000, 4000, 5000] {
        let entry = parse_run_json(&payload(&format!("c{}", date), date, &basic(1.0))).unwrap();
        doc.merge("s", entry);
    }

    let outcome = doc.prune("s", &RetentionPolicy::keep_last(2), 0);
    assert_eq!(outcome.removed, 3);
    assert_eq!(outcome.remaining, 2);

    let dates: Vec<i64> = doc.suite("s").unwrap().entries().iter().map(|e| e.date).collect();
    assert_eq!(dates, vec![4000, 5000]);
    assert!(!doc.suite("s").unwrap().contains_commit("c1000"));
}

#[test]
fn test_rejected_payload_leaves_document_alone() {
    let doc = HistoryDocument::new("r");
    let err = parse_run_json(&payload("  ", 1000, &basic(1.0))).unwrap_err();
    assert_eq!(err, ValidationError::EmptyCommitId);

    let dup = format!("{}, {}", basic(1.0), basic(2.0));
    let err = parse_run_json(&payload("a", 1000, &dup)).unwrap_err();
    assert!(matches!(err, ValidationError::DuplicateBenchName { .. }));

    let err = parse_run_json(&payload("a", 0, &basic(1.0))).unwrap_err();
    assert_eq!(err, ValidationError::NonPositiveDate { date: 0 });

    assert!(matches!(parse_run_json("{not json"), Err(ValidationError::Malformed(_))));
    assert_eq!(doc.entry_count(), 0);
}
