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

//! Facade error type.

use benchtrack_core::ValidationError;
use benchtrack_store::StoreError;
use thiserror::Error;

/// Errors raised by [`Tracker`](crate::Tracker) operations.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// The run payload was rejected.
    #[error("invalid run: {0}")]
    Validation(#[from] ValidationError),

    /// Loading or persisting the history failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The tracker configuration is invalid or unreadable.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The requested suite or commit is not in the history.
    #[error("{0}")]
    NotFound(String),
}

impl TrackerError {
    /// Stable error code for machine-readable output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(err) => err.code(),
            Self::Store(_) => "store",
            Self::Config(_) => "config",
            Self::NotFound(_) => "not_found",
        }
    }
}

/// Result alias for facade operations.
pub type TrackerResult<T> = Result<T, TrackerError>;
