// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Countdown ("progress term") parsing.
//!
//! Appliances report their remaining run time either as a number of seconds
//! or as an `HH:MM:SS` string. The tile always wants seconds.
//!
//! # Examples
//!
//! ```
//! use device_tile::types::{countdown_seconds, Value};
//!
//! assert_eq!(countdown_seconds(&Value::from("01:02:03")), Some(3723));
//! assert_eq!(countdown_seconds(&Value::from("45")), Some(45));
//! assert_eq!(countdown_seconds(&Value::from("abc")), Some(0));
//! assert_eq!(countdown_seconds(&Value::Int(90)), Some(90));
//! assert_eq!(countdown_seconds(&Value::Null), None);
//! ```

use std::sync::LazyLock;

use regex::Regex;

use super::Value;

static HMS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{2}):(\d{2}):(\d{2})$").expect("valid countdown pattern"));

/// Converts an `HH:MM:SS` string into seconds.
///
/// Returns `None` unless the string is exactly two digits per field. Fields
/// are not range checked, so `"00:90:00"` is 5400 seconds.
#[must_use]
pub fn parse_hms(s: &str) -> Option<i64> {
    let caps = HMS.captures(s)?;
    let field = |i: usize| caps[i].parse::<i64>().ok();
    Some(field(1)? * 3600 + field(2)? * 60 + field(3)?)
}

/// Returns the countdown in seconds for a term variable value.
///
/// `HH:MM:SS` strings are converted; anything else goes through the loose
/// integer cast, so malformed strings become `0` rather than an error.
/// `Null` (no variable) yields `None`.
#[must_use]
pub fn countdown_seconds(value: &Value) -> Option<i64> {
    match value {
        Value::Null => None,
        Value::Text(s) => Some(parse_hms(s).unwrap_or_else(|| value.to_int())),
        other => Some(other.to_int()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hms_valid() {
        assert_eq!(parse_hms("01:02:03"), Some(3723));
        assert_eq!(parse_hms("00:00:00"), Some(0));
        assert_eq!(parse_hms("99:59:59"), Some(359_999));
    }

    #[test]
    fn parse_hms_rejects_other_shapes() {
        assert_eq!(parse_hms("1:02:03"), None);
        assert_eq!(parse_hms("01:02"), None);
        assert_eq!(parse_hms(" 01:02:03"), None);
        assert_eq!(parse_hms("01:02:03 "), None);
        assert_eq!(parse_hms("100:00:00"), None);
    }

    #[test]
    fn countdown_falls_back_to_integer_cast() {
        assert_eq!(countdown_seconds(&Value::from("45")), Some(45));
        assert_eq!(countdown_seconds(&Value::from("abc")), Some(0));
        assert_eq!(countdown_seconds(&Value::from("12:30")), Some(12));
        assert_eq!(countdown_seconds(&Value::Float(59.9)), Some(59));
    }

    #[test]
    fn countdown_of_missing_variable() {
        assert_eq!(countdown_seconds(&Value::Null), None);
    }
}
