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

//! Benchmark history document codec.
//!
//! Reads and writes the persisted history in the two framings the chart
//! front end understands:
//!
//! - `data.js`: `window.BENCHMARK_DATA = ` followed by the JSON object
//! - plain JSON
//!
//! Output is two-space pretty JSON with JavaScript number formatting, so a
//! document written by the front end and read back here re-serializes to the
//! same bytes.
//!
//! # Examples
//!
//! ```rust
//! use benchtrack_core::HistoryDocument;
//! use benchtrack_json::{from_document_str, to_document_string, DocumentFormat};
//!
//! let doc = HistoryDocument::new("https://example.com/repo");
//! let text = to_document_string(&doc, DocumentFormat::DataJs).unwrap();
//! assert!(text.starts_with("window.BENCHMARK_DATA = {"));
//! assert_eq!(from_document_str(&text).unwrap(), doc);
//! ```

mod codec;
mod error;
mod number;

pub use codec::{
    detect_format, format_for_path, from_document_str, to_document_string, write_document,
    DocumentFormat, DATA_JS_PREFIX,
};
pub use error::{CodecError, CodecResult};
pub use number::js_number;
