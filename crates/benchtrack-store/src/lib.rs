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

//! Durable, concurrent benchmark history store.
//!
//! [`HistoryStore`] owns one history file. Writers are serialized and every
//! change is persisted atomically before it becomes visible; readers work on
//! immutable [`Arc`](std::sync::Arc) snapshots.

mod config;
mod error;
mod store;

pub use config::{max_file_size_from_env, StoreConfig, DEFAULT_MAX_FILE_SIZE, MAX_FILE_SIZE_ENV};
pub use error::{StoreError, StoreResult};
pub use store::HistoryStore;
