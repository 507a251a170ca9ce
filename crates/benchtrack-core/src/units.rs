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

//! Unit direction registry.
//!
//! Whether a larger value is an improvement depends entirely on the unit. The
//! mapping is explicit and configurable; nothing is inferred from the unit
//! text. Units missing from the registry fall back to the registry default,
//! which is unset unless configured.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Which way a metric improves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Throughput-style units (`ops/s`): a drop is a regression.
    HigherIsBetter,
    /// Latency/size-style units (`ns`, `ms`): a rise is a regression.
    LowerIsBetter,
}

/// Throughput units treated as higher-is-better by default.
pub const DEFAULT_HIGHER_IS_BETTER: &[&str] = &[
    "ops/s", "ops/ms", "ops/us", "ops/ns", "op/s", "req/s", "it/s", "iter/s", "B/s", "KB/s",
    "MB/s", "GB/s",
];

/// Latency and size units treated as lower-is-better by default.
pub const DEFAULT_LOWER_IS_BETTER: &[&str] = &[
    "ns", "us", "µs", "ms", "s", "ns/iter", "ns/op", "us/op", "ms/op", "s/op", "B", "KB", "MB",
    "GB", "bytes",
];

/// Maps unit strings to a [`Direction`].
///
/// # Example
///
/// ```
/// use benchtrack_core::{Direction, UnitRegistry};
///
/// let registry = UnitRegistry::default().with_unit("frames/s", Direction::HigherIsBetter);
/// assert_eq!(registry.direction("ops/s"), Some(Direction::HigherIsBetter));
/// assert_eq!(registry.direction("ms"), Some(Direction::LowerIsBetter));
/// assert_eq!(registry.direction("frames/s"), Some(Direction::HigherIsBetter));
/// assert_eq!(registry.direction("widgets"), None);
/// ```
///
/// In configuration files the listed `units` extend the defaults above.
/// Set `replace_defaults` to start from an empty registry instead:
///
/// ```
/// use benchtrack_core::{Direction, UnitRegistry};
///
/// let extended: UnitRegistry =
///     serde_json::from_str(r#"{"units": {"frames/s": "higher_is_better"}}"#).unwrap();
/// assert_eq!(extended.direction("ops/s"), Some(Direction::HigherIsBetter));
///
/// let replaced: UnitRegistry = serde_json::from_str(
///     r#"{"replace_defaults": true, "units": {"frames/s": "higher_is_better"}}"#,
/// )
/// .unwrap();
/// assert_eq!(replaced.direction("ops/s"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "UnitRegistryConfig", into = "UnitRegistryConfig")]
pub struct UnitRegistry {
    /// Explicit unit mappings.
    pub units: HashMap<String, Direction>,
    /// Direction used for units not in `units`.
    pub fallback: Option<Direction>,
}

/// Configuration form of [`UnitRegistry`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct UnitRegistryConfig {
    replace_defaults: bool,
    units: HashMap<String, Direction>,
    fallback: Option<Direction>,
}

impl From<UnitRegistryConfig> for UnitRegistry {
    fn from(config: UnitRegistryConfig) -> Self {
        let mut registry = if config.replace_defaults {
            Self::empty()
        } else {
            Self::default()
        };
        registry.units.extend(config.units);
        registry.fallback = config.fallback;
        registry
    }
}

impl From<UnitRegistry> for UnitRegistryConfig {
    // The full mapping is written out, so reading it back must not merge defaults in.
    fn from(registry: UnitRegistry) -> Self {
        Self {
            replace_defaults: true,
            units: registry.units,
            fallback: registry.fallback,
        }
    }
}

impl UnitRegistry {
    /// Registry with no mappings at all.
    pub fn empty() -> Self {
        Self {
            units: HashMap::new(),
            fallback: None,
        }
    }

    /// Adds or replaces a mapping.
    pub fn with_unit(mut self, unit: impl Into<String>, direction: Direction) -> Self {
        self.units.insert(unit.into(), direction);
        self
    }

    /// Sets the direction for unknown units.
    pub fn with_fallback(mut self, direction: Direction) -> Self {
        self.fallback = Some(direction);
        self
    }

    /// Looks up the direction for a unit.
    pub fn direction(&self, unit: &str) -> Option<Direction> {
        self.units.get(unit).copied().or(self.fallback)
    }
}

impl Default for UnitRegistry {
    fn default() -> Self {
        let mut units = HashMap::new();
        for unit in DEFAULT_HIGHER_IS_BETTER {
            units.insert((*unit).to_string(), Direction::HigherIsBetter);
        }
        for unit in DEFAULT_LOWER_IS_BETTER {
            units.insert((*unit).to_string(), Direction::LowerIsBetter);
        }
        Self {
            units,
            fallback: None,
        }
    }
}
