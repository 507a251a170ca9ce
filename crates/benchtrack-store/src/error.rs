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

//! Store error type.

use benchtrack_core::ValidationError;
use benchtrack_json::CodecError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by [`HistoryStore`](crate::HistoryStore).
///
/// A failed operation never changes the published document.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the history file failed.
    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// The history file exceeds the configured size limit.
    #[error(
        "history file '{}' is too large ({size} bytes, limit {limit} bytes); set BENCHTRACK_MAX_FILE_SIZE to raise it",
        .path.display()
    )]
    FileTooLarge {
        /// File involved
        path: PathBuf,
        /// Actual size in bytes
        size: u64,
        /// Configured limit in bytes
        limit: u64,
    },

    /// The history file could not be decoded or encoded.
    #[error("history file '{}': {source}", .path.display())]
    Codec {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: CodecError,
    },

    /// The store configuration is invalid.
    #[error("invalid store configuration: {0}")]
    Config(String),

    /// The entry breaks a per-entry rule and was not merged.
    #[error("rejected entry: {0}")]
    Validation(#[from] ValidationError),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn codec(path: impl Into<PathBuf>, source: CodecError) -> Self {
        Self::Codec {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
