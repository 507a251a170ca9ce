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

//! Document framing: `data.js` script or plain JSON.

use crate::error::{CodecError, CodecResult};
use crate::number::JsFormatter;
use benchtrack_core::HistoryDocument;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

/// Assignment that prefixes a `data.js` document.
pub const DATA_JS_PREFIX: &str = "window.BENCHMARK_DATA = ";

const DATA_JS_TARGET: &str = "window.BENCHMARK_DATA";

/// On-disk framing of a history document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    /// Script assignment loaded by the chart page.
    #[default]
    DataJs,
    /// Bare JSON object.
    Json,
}

impl DocumentFormat {
    /// Short name of the format.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DataJs => "data.js",
            Self::Json => "json",
        }
    }
}

/// Guesses the framing of document text.
pub fn detect_format(text: &str) -> DocumentFormat {
    if strip_bom(text).trim_start().starts_with("window.") {
        DocumentFormat::DataJs
    } else {
        DocumentFormat::Json
    }
}

/// Picks the framing from a file extension (`.js` is `data.js`).
pub fn format_for_path(path: &Path) -> DocumentFormat {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("js") => DocumentFormat::DataJs,
        _ => DocumentFormat::Json,
    }
}

/// Serializes a document into `writer`.
///
/// Nothing is written if any measurement is NaN or infinite, since the
/// resulting `null` could not be read back.
pub fn write_document<W: Write>(doc: &HistoryDocument, format: DocumentFormat, mut writer: W) -> CodecResult<()> {
    check_finite(doc)?;
    if format == DocumentFormat::DataJs {
        writer
            .write_all(DATA_JS_PREFIX.as_bytes())
            .map_err(|e| CodecError::Serialize(serde::ser::Error::custom(e)))?;
    }
    let mut ser = serde_json::Serializer::with_formatter(writer, JsFormatter::new());
    doc.serialize(&mut ser).map_err(CodecError::Serialize)
}

fn check_finite(doc: &HistoryDocument) -> CodecResult<()> {
    for suite in doc.suites() {
        for entry in suite.entries() {
            if let Some(bench) = entry.benches.iter().find(|b| !b.value.is_finite()) {
                return Err(CodecError::NonFiniteValue {
                    suite: suite.name().to_string(),
                    commit_id: entry.commit.id.clone(),
                    bench: bench.name.clone(),
                });
            }
        }
    }
    Ok(())
}

/// Serializes a document to a string.
///
/// The output has no trailing newline, matching what the chart front end
/// writes.
pub fn to_document_string(doc: &HistoryDocument, format: DocumentFormat) -> CodecResult<String> {
    let mut buf = Vec::with_capacity(doc.entry_count() * 1024 + 128);
    write_document(doc, format, &mut buf)?;
    String::from_utf8(buf).map_err(|e| CodecError::Serialize(serde::ser::Error::custom(e)))
}

/// Parses a document in either framing.
///
/// # Examples
///
/// ```
/// use benchtrack_json::{from_document_str, to_document_string, DocumentFormat};
///
/// let text = "window.BENCHMARK_DATA = {\n  \"lastUpdate\": 1,\n  \"repoUrl\": \"r\",\n  \"entries\": {}\n}";
/// let doc = from_document_str(text).unwrap();
/// assert_eq!(doc.last_update, 1);
/// assert_eq!(to_document_string(&doc, DocumentFormat::DataJs).unwrap(), text);
/// ```
pub fn from_document_str(text: &str) -> CodecResult<HistoryDocument> {
    let body = strip_bom(text).trim_start();
    let json = if body.starts_with("window.") {
        let rest = body
            .strip_prefix(DATA_JS_TARGET)
            .and_then(|rest| rest.trim_start().strip_prefix('='))
            .ok_or_else(|| CodecError::InvalidPrefix {
                found: body.chars().take(40).collect(),
            })?;
        rest.trim().trim_end_matches(';')
    } else {
        body
    };
    serde_json::from_str(json).map_err(CodecError::Json)
}

fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}
