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

//! Number formatting compatible with JavaScript's `JSON.stringify`.
//!
//! `serde_json` writes `1.0` for an integral `f64` and switches to exponent
//! notation at different magnitudes than JavaScript does. Documents written by
//! the chart front end would then change on every rewrite, so floats go through
//! [`js_number`] instead.

use serde_json::ser::{Formatter, PrettyFormatter};
use std::io;

/// Formats a finite `f64` the way `Number.prototype.toString` does.
///
/// Non-finite values render as `null`, as `JSON.stringify` does.
///
/// # Examples
///
/// ```
/// use benchtrack_json::js_number;
///
/// assert_eq!(js_number(1.0), "1");
/// assert_eq!(js_number(8126.562931014215), "8126.562931014215");
/// assert_eq!(js_number(0.000001), "0.000001");
/// assert_eq!(js_number(1e-7), "1e-7");
/// assert_eq!(js_number(1e21), "1e+21");
/// ```
pub fn js_number(value: f64) -> String {
    if !value.is_finite() {
        return "null".to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    // `{:e}` yields the shortest round-trip digits, e.g. "-8.126562931014215e3".
    let sci = format!("{:e}", value);
    let (negative, sci) = match sci.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, sci.as_str()),
    };
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci, "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    let k = digits.len() as i32;
    let n = exp + 1;

    let mut out = String::with_capacity(digits.len() + 8);
    if negative {
        out.push('-');
    }

    if k <= n && n <= 21 {
        out.push_str(&digits);
        out.extend(std::iter::repeat('0').take((n - k) as usize));
    } else if 0 < n && n <= 21 {
        out.push_str(&digits[..n as usize]);
        out.push('.');
        out.push_str(&digits[n as usize..]);
    } else if -6 < n && n <= 0 {
        out.push_str("0.");
        out.extend(std::iter::repeat('0').take((-n) as usize));
        out.push_str(&digits);
    } else {
        out.push_str(&digits[..1]);
        if k > 1 {
            out.push('.');
            out.push_str(&digits[1..]);
        }
        let e = n - 1;
        out.push('e');
        out.push(if e >= 0 { '+' } else { '-' });
        out.push_str(&e.abs().to_string());
    }
    out
}

/// Two-space pretty printer that formats floats with [`js_number`].
pub(crate) struct JsFormatter<'a> {
    inner: PrettyFormatter<'a>,
}

impl JsFormatter<'_> {
    pub(crate) fn new() -> Self {
        Self {
            inner: PrettyFormatter::with_indent(b"  "),
        }
    }
}

impl Formatter for JsFormatter<'_> {
    fn write_f32<W: ?Sized + io::Write>(&mut self, writer: &mut W, value: f32) -> io::Result<()> {
        writer.write_all(js_number(f64::from(value)).as_bytes())
    }

    fn write_f64<W: ?Sized + io::Write>(&mut self, writer: &mut W, value: f64) -> io::Result<()> {
        writer.write_all(js_number(value).as_bytes())
    }

    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        self.inner.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.inner.end_object_value(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integral_values() {
        assert_eq!(js_number(0.0), "0");
        assert_eq!(js_number(-0.0), "0");
        assert_eq!(js_number(42.0), "42");
        assert_eq!(js_number(-42.0), "-42");
        assert_eq!(js_number(1e20), "100000000000000000000");
        assert_eq!(js_number(123e18), "123000000000000000000");
    }

    #[test]
    fn test_fractional_values() {
        assert_eq!(js_number(0.5), "0.5");
        assert_eq!(js_number(-1.25), "-1.25");
        assert_eq!(js_number(1295.2228235989185), "1295.2228235989185");
        assert_eq!(js_number(0.1 + 0.2), "0.30000000000000004");
    }

    #[test]
    fn test_exponent_boundaries() {
        assert_eq!(js_number(1e-6), "0.000001");
        assert_eq!(js_number(1.5e-6), "0.0000015");
        assert_eq!(js_number(1e-7), "1e-7");
        assert_eq!(js_number(-2.5e-8), "-2.5e-8");
        assert_eq!(js_number(1e21), "1e+21");
        assert_eq!(js_number(1.2345e25), "1.2345e+25");
        assert_eq!(js_number(f64::MAX), "1.7976931348623157e+308");
        assert_eq!(js_number(5e-324), "5e-324");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(js_number(f64::NAN), "null");
        assert_eq!(js_number(f64::INFINITY), "null");
    }

    #[test]
    fn test_shortest_round_trip() {
        for v in [8126.562931014215, 1.0 / 3.0, 2.0_f64.sqrt(), 123456.789e-3] {
            let text = js_number(v);
            assert_eq!(text.parse::<f64>().unwrap(), v, "{}", text);
        }
    }
}
