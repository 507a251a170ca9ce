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

//! Error types for run ingestion.

use thiserror::Error;

/// A raw benchmark run was rejected by the ingestion parser.
///
/// Rejected runs are never merged. The CI caller is expected to turn any of
/// these into a pipeline failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// The commit identifier is empty or whitespace.
    #[error("commit id must not be empty")]
    EmptyCommitId,

    /// The run date (epoch milliseconds) is zero or negative.
    #[error("run date must be positive epoch milliseconds, got {date}")]
    NonPositiveDate {
        /// The offending date value
        date: i64,
    },

    /// A measurement value is NaN or infinite.
    #[error("benchmark '{bench}' has a non-finite value ({value})")]
    NonFiniteValue {
        /// Name of the benchmark carrying the value
        bench: String,
        /// The offending value
        value: f64,
    },

    /// Two measurements in the same run share a name.
    #[error("benchmark name '{name}' appears more than once in the run")]
    DuplicateBenchName {
        /// The repeated benchmark name
        name: String,
    },

    /// The payload is not a well-formed run document.
    #[error("malformed run payload: {0}")]
    Malformed(String),
}

impl ValidationError {
    /// Short machine-readable code for the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyCommitId => "empty_commit_id",
            Self::NonPositiveDate { .. } => "non_positive_date",
            Self::NonFiniteValue { .. } => "non_finite_value",
            Self::DuplicateBenchName { .. } => "duplicate_bench_name",
            Self::Malformed(_) => "malformed",
        }
    }
}

impl From<serde_json::Error> for ValidationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

/// Result type for ingestion.
pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            ValidationError::EmptyCommitId.to_string(),
            "commit id must not be empty"
        );
        assert_eq!(
            ValidationError::NonPositiveDate { date: -5 }.to_string(),
            "run date must be positive epoch milliseconds, got -5"
        );
        assert!(ValidationError::DuplicateBenchName {
            name: "basic".to_string()
        }
        .to_string()
        .contains("'basic'"));
    }

    #[test]
    fn test_codes_are_distinct() {
        let codes = [
            ValidationError::EmptyCommitId.code(),
            ValidationError::NonPositiveDate { date: 0 }.code(),
            ValidationError::NonFiniteValue {
                bench: "x".to_string(),
                value: f64::NAN,
            }
            .code(),
            ValidationError::DuplicateBenchName {
                name: "x".to_string(),
            }
            .code(),
            ValidationError::Malformed(String::new()).code(),
        ];
        let unique: std::collections::HashSet<_> = codes.iter().collect();
        assert_eq!(unique.len(), codes.len());
    }

    #[test]
    fn test_from_serde_error() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let converted = ValidationError::from(err);
        assert_eq!(converted.code(), "malformed");
    }
}
