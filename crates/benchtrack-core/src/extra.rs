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

//! Harness run parameters attached to a measurement.
//!
//! JMH-style harnesses record the iteration, fork and thread counts as a
//! free-form string such as `"iterations: 3\nforks: 1\nthreads: 1"`. The
//! string is parsed leniently into [`RunParams`]; anything that does not
//! render back to exactly the same text is kept verbatim as
//! [`BenchExtra::Opaque`], so persisted documents never change shape.

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Structured harness parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunParams {
    /// Measurement iterations.
    pub iterations: u32,
    /// Forked JVMs / processes.
    pub forks: u32,
    /// Worker threads.
    pub threads: u32,
}

impl RunParams {
    /// Renders the canonical `key: value` line form.
    pub fn render(&self) -> String {
        format!(
            "iterations: {}\nforks: {}\nthreads: {}",
            self.iterations, self.forks, self.threads
        )
    }
}

/// Extra information carried by a single measurement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BenchExtra {
    /// Recognized iteration/fork/thread counts.
    Params(RunParams),
    /// Anything else, kept as written.
    Opaque(String),
}

impl BenchExtra {
    /// Parses an extra string, falling back to [`BenchExtra::Opaque`].
    ///
    /// # Examples
    ///
    /// ```
    /// use benchtrack_core::{BenchExtra, RunParams};
    ///
    /// let extra = BenchExtra::parse_lenient("iterations: 3\nforks: 1\nthreads: 1");
    /// assert_eq!(
    ///     extra,
    ///     BenchExtra::Params(RunParams { iterations: 3, forks: 1, threads: 1 })
    /// );
    ///
    /// let other = BenchExtra::parse_lenient("warmup: 5s");
    /// assert_eq!(other, BenchExtra::Opaque("warmup: 5s".to_string()));
    /// ```
    pub fn parse_lenient(text: &str) -> Self {
        match parse_params(text) {
            Some(params) if params.render() == text => Self::Params(params),
            _ => Self::Opaque(text.to_string()),
        }
    }

    /// Returns the structured parameters when recognized.
    pub fn params(&self) -> Option<&RunParams> {
        match self {
            Self::Params(params) => Some(params),
            Self::Opaque(_) => None,
        }
    }

    /// Renders the persisted string form.
    pub fn render(&self) -> String {
        match self {
            Self::Params(params) => params.render(),
            Self::Opaque(text) => text.clone(),
        }
    }
}

impl From<RunParams> for BenchExtra {
    fn from(params: RunParams) -> Self {
        Self::Params(params)
    }
}

fn parse_params(text: &str) -> Option<RunParams> {
    let mut iterations = None;
    let mut forks = None;
    let mut threads = None;

    for line in text.lines() {
        let (key, value) = line.split_once(':')?;
        let value: u32 = value.trim().parse().ok()?;
        let slot = match key.trim() {
            "iterations" => &mut iterations,
            "forks" => &mut forks,
            "threads" => &mut threads,
            _ => return None,
        };
        if slot.replace(value).is_some() {
            return None;
        }
    }

    Some(RunParams {
        iterations: iterations?,
        forks: forks?,
        threads: threads?,
    })
}

impl Serialize for BenchExtra {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Params(params) => serializer.serialize_str(&params.render()),
            Self::Opaque(text) => serializer.serialize_str(text),
        }
    }
}

impl<'de> Deserialize<'de> for BenchExtra {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ExtraVisitor)
    }
}

struct ExtraVisitor;

impl<'de> Visitor<'de> for ExtraVisitor {
    type Value = BenchExtra;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an extra string or an {iterations, forks, threads} object")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(BenchExtra::parse_lenient(value))
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        let params = RunParams::deserialize(de::value::MapAccessDeserializer::new(map))?;
        Ok(BenchExtra::Params(params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JMH: &str = "iterations: 3\nforks: 1\nthreads: 1";

    #[test]
    fn test_parses_jmh_string() {
        let extra = BenchExtra::parse_lenient(JMH);
        assert_eq!(
            extra.params(),
            Some(&RunParams {
                iterations: 3,
                forks: 1,
                threads: 1
            })
        );
        assert_eq!(extra.render(), JMH);
    }

    #[test]
    fn test_non_canonical_spacing_stays_opaque() {
        let text = "iterations:3\nforks: 1\nthreads: 1";
        assert_eq!(
            BenchExtra::parse_lenient(text),
            BenchExtra::Opaque(text.to_string())
        );
    }

    #[test]
    fn test_reordered_keys_stay_opaque() {
        let text = "forks: 1\niterations: 3\nthreads: 1";
        assert_eq!(BenchExtra::parse_lenient(text).render(), text);
        assert!(BenchExtra::parse_lenient(text).params().is_none());
    }

    #[test]
    fn test_missing_and_unknown_keys() {
        assert!(BenchExtra::parse_lenient("iterations: 3\nforks: 1")
            .params()
            .is_none());
        assert!(BenchExtra::parse_lenient("iterations: 3\nforks: 1\nthreads: 1\nwarmup: 2")
            .params()
            .is_none());
        assert!(BenchExtra::parse_lenient("").params().is_none());
    }

    #[test]
    fn test_serializes_as_string() {
        let extra = BenchExtra::Params(RunParams {
            iterations: 5,
            forks: 2,
            threads: 4,
        });
        let json = serde_json::to_string(&extra).unwrap();
        assert_eq!(json, r#""iterations: 5\nforks: 2\nthreads: 4""#);
    }

    #[test]
    fn test_deserializes_object_form() {
        let extra: BenchExtra =
            serde_json::from_str(r#"{"iterations": 10, "forks": 1, "threads": 8}"#).unwrap();
        assert_eq!(
            extra,
            BenchExtra::Params(RunParams {
                iterations: 10,
                forks: 1,
                threads: 8
            })
        );
    }

    #[test]
    fn test_deserializes_string_form() {
        let extra: BenchExtra = serde_json::from_str(r#""median of 7 runs""#).unwrap();
        assert_eq!(extra, BenchExtra::Opaque("median of 7 runs".to_string()));
    }
}
