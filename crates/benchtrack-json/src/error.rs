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

//! Codec error type.

use thiserror::Error;

/// Errors raised while reading or writing a history document.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The document body is not valid history JSON.
    #[error("invalid history document: {0}")]
    Json(#[source] serde_json::Error),

    /// The text looks like a script but not a `window.BENCHMARK_DATA` assignment.
    #[error("expected 'window.BENCHMARK_DATA = ' prefix, found '{found}'")]
    InvalidPrefix {
        /// Leading text of the document
        found: String,
    },

    /// The document could not be serialized.
    #[error("failed to serialize history document: {0}")]
    Serialize(#[source] serde_json::Error),

    /// A measurement is NaN or infinite and would be written as `null`.
    #[error("benchmark '{bench}' of commit '{commit_id}' in suite '{suite}' has a non-finite value")]
    NonFiniteValue {
        /// Suite holding the entry
        suite: String,
        /// Commit of the entry
        commit_id: String,
        /// Offending benchmark
        bench: String,
    },
}

/// Result alias for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
