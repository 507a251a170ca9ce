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

//! Structured error types for the benchtrack CLI.

use benchtrack::TrackerError;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for CLI operations.
///
/// Every variant maps to exit status 1.
#[derive(Error, Debug)]
pub enum CliError {
    /// Reading an input file failed.
    #[error("I/O error for '{}': {message}", .path.display())]
    Io {
        /// The file path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// An input file exceeds the size limit.
    #[error("File '{}' is too large ({actual} bytes). Maximum allowed: {max} bytes ({max_mb} MB)", .path.display())]
    FileTooLarge {
        /// The file path that exceeded the limit
        path: PathBuf,
        /// The actual file size in bytes
        actual: u64,
        /// The maximum allowed file size in bytes
        max: u64,
        /// The maximum allowed file size in MB (for display)
        max_mb: u64,
    },

    /// Loading, merging or detecting failed.
    #[error(transparent)]
    Tracker(#[from] TrackerError),

    /// Invalid combination of flags or configuration values.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Writing JSON output failed.
    #[error("JSON format error: {message}")]
    JsonFormat {
        /// The error message
        message: String,
    },

    /// Regressions were found and the caller asked to fail on them.
    #[error("{count} regression(s) detected")]
    RegressionsDetected {
        /// Number of findings
        count: usize,
    },

    /// The history file violates its ordering or uniqueness rules.
    #[error("history check failed: {count} problem(s) found")]
    CheckFailed {
        /// Number of violations
        count: usize,
    },
}

impl CliError {
    /// Create an I/O error with the path and source error.
    pub fn io_error(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Create a file-too-large error.
    pub fn file_too_large(path: impl Into<PathBuf>, actual: u64, max: u64) -> Self {
        Self::FileTooLarge {
            path: path.into(),
            actual,
            max,
            max_mb: max / (1024 * 1024),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonFormat {
            message: err.to_string(),
        }
    }
}

/// Result alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_too_large_message() {
        let err = CliError::file_too_large("run.json", 3 * 1024 * 1024, 1024 * 1024);
        assert_eq!(
            err.to_string(),
            "File 'run.json' is too large (3145728 bytes). Maximum allowed: 1048576 bytes (1 MB)"
        );
    }

    #[test]
    fn test_tracker_error_is_transparent() {
        let err: CliError = TrackerError::NotFound("suite 'x' not found".to_string()).into();
        assert_eq!(err.to_string(), "suite 'x' not found");
    }
}
