// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Dynamically typed variable values.
//!
//! Host variables are boolean, integer, float or string typed. [`Value`]
//! carries whichever of these a variable currently holds, plus `Null` for
//! "no value available". The coercion helpers in this module follow the
//! host's loose conversion rules: leading-number parsing for integers and
//! floats, and a fixed set of truthy literals for booleans.

use std::fmt;

/// A variable value as delivered by the host.
///
/// Serializes to the matching JSON scalar.
///
/// # Examples
///
/// ```
/// use device_tile::types::Value;
///
/// assert_eq!(Value::Bool(true).to_raw_string(), "true");
/// assert_eq!(Value::Int(42).to_raw_string(), "42");
/// assert_eq!(Value::Float(2.5).to_raw_string(), "2.5");
/// assert!(!Value::Text("0".into()).is_truthy());
/// ```
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// No value.
    #[default]
    Null,
    /// Boolean variable.
    Bool(bool),
    /// Integer variable.
    Int(i64),
    /// Float variable.
    Float(f64),
    /// String variable.
    Text(String),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` for values the view treats as "nothing to show":
    /// `Null` and the empty string.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Returns the raw value as a string.
    ///
    /// Booleans become `true`/`false`, numbers use their shortest decimal
    /// form and `Null` becomes the empty string.
    #[must_use]
    pub fn to_raw_string(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Int(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Text(s) => s.clone(),
        }
    }

    /// Host truthiness: `false`, `0`, `0.0`, `""`, `"0"` and `Null` are false.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Int(i) => *i != 0,
            Self::Float(f) => *f != 0.0,
            Self::Text(s) => !(s.is_empty() || s == "0"),
        }
    }

    /// Converts to an integer the way the host casts loosely typed values.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_int(&self) -> i64 {
        match self {
            Self::Null => 0,
            Self::Bool(b) => i64::from(*b),
            Self::Int(i) => *i,
            Self::Float(f) => *f as i64,
            Self::Text(s) => leading_int(s),
        }
    }

    /// Returns the numeric value of an integer or float variable.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_raw_string())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Parses the leading integer of a string, `0` if there is none.
///
/// Leading whitespace is skipped and the result saturates at the `i64`
/// bounds.
#[must_use]
pub fn leading_int(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let mut acc: i64 = 0;
    for d in digits.bytes().take_while(u8::is_ascii_digit) {
        let d = i64::from(d - b'0');
        acc = if negative {
            acc.saturating_mul(10).saturating_sub(d)
        } else {
            acc.saturating_mul(10).saturating_add(d)
        };
    }
    acc
}

/// Parses the leading decimal number of a string, `0.0` if there is none.
#[must_use]
pub fn leading_float(s: &str) -> f64 {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'-' | b'+')) {
        end = 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return 0.0;
    }

    // Exponent only counts when followed by at least one digit.
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'-' | b'+')) {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().unwrap_or(0.0)
}

/// Interprets a configured literal as a boolean.
///
/// `1`, `true`, `on` and `yes` (case-insensitive, surrounding whitespace
/// ignored) are true; everything else is false.
#[must_use]
pub fn parse_bool_literal(s: &str) -> bool {
    matches!(
        s.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "on" | "yes"
    )
}

/// Reads a number out of loosely typed JSON metadata.
///
/// Accepts JSON numbers and strings that hold a complete decimal number.
#[must_use]
pub fn json_number(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => {
            let s = s.trim_start();
            let first = s.chars().next()?;
            // Rejects "inf"/"NaN", which `f64::from_str` would accept.
            if !(first.is_ascii_digit() || matches!(first, '-' | '+' | '.')) {
                return None;
            }
            s.parse::<f64>().ok().filter(|f| f.is_finite())
        }
        _ => None,
    }
}
