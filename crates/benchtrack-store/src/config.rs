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

//! Store configuration.

use benchtrack_json::{format_for_path, DocumentFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default maximum history file size in bytes (256 MB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 256 * 1024 * 1024;

/// Environment variable that overrides [`DEFAULT_MAX_FILE_SIZE`].
pub const MAX_FILE_SIZE_ENV: &str = "BENCHTRACK_MAX_FILE_SIZE";

/// Maximum file size from the environment, or the default.
///
/// Unparseable values fall back to the default.
pub fn max_file_size_from_env() -> u64 {
    std::env::var(MAX_FILE_SIZE_ENV)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_FILE_SIZE)
}

/// Where and how a history document is persisted.
///
/// # Example
///
/// ```
/// use benchtrack_json::DocumentFormat;
/// use benchtrack_store::StoreConfig;
///
/// let config = StoreConfig::new("dev/bench/data.js")
///     .with_repo_url("https://github.com/example/project");
/// assert_eq!(config.resolved_format(), DocumentFormat::DataJs);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// History file location.
    pub path: PathBuf,
    /// Repository URL for a document created from scratch.
    pub repo_url: String,
    /// Framing; derived from the file extension when unset.
    pub format: Option<DocumentFormat>,
    /// Refuse to load files larger than this.
    pub max_file_size: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data.js"),
            repo_url: String::new(),
            format: None,
            max_file_size: max_file_size_from_env(),
        }
    }
}

impl StoreConfig {
    /// Configuration for the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Sets the repository URL.
    pub fn with_repo_url(mut self, repo_url: impl Into<String>) -> Self {
        self.repo_url = repo_url.into();
        self
    }

    /// Forces a document framing.
    pub fn with_format(mut self, format: DocumentFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Sets the file size limit.
    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    /// History file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Framing to write with.
    pub fn resolved_format(&self) -> DocumentFormat {
        self.format.unwrap_or_else(|| format_for_path(&self.path))
    }

    /// Checks that the configuration is usable.
    pub fn validate(&self) -> Result<(), String> {
        if self.path.as_os_str().is_empty() {
            return Err("store path must not be empty".to_string());
        }
        if self.path.file_name().is_none() {
            return Err(format!("store path '{}' does not name a file", self.path.display()));
        }
        if self.max_file_size == 0 {
            return Err("max_file_size must be greater than zero".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_resolution() {
        assert_eq!(StoreConfig::new("a/data.js").resolved_format(), DocumentFormat::DataJs);
        assert_eq!(StoreConfig::new("history.json").resolved_format(), DocumentFormat::Json);
        assert_eq!(
            StoreConfig::new("history.json")
                .with_format(DocumentFormat::DataJs)
                .resolved_format(),
            DocumentFormat::DataJs
        );
    }

    #[test]
    fn test_validation() {
        assert!(StoreConfig::new("").validate().is_err());
        assert!(StoreConfig::new("dir/..").validate().is_err());
        assert!(StoreConfig::new("data.js").with_max_file_size(0).validate().is_err());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: StoreConfig =
            serde_json::from_str(r#"{"path": "bench/history.json", "format": "data_js"}"#).unwrap();
        assert_eq!(config.path, PathBuf::from("bench/history.json"));
        assert_eq!(config.format, Some(DocumentFormat::DataJs));
        assert!(config.max_file_size > 0);

        let unknown = serde_json::from_str::<StoreConfig>(r#"{"pth": "x"}"#);
        assert!(unknown.is_err());
    }
}
