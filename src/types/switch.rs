// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Switch typing and on/off state resolution.
//!
//! The tile switch drives a host variable of any type. The operator
//! configures two literals, "on" and "off", and a [`SwitchType`] telling
//! how those literals are coerced before they are written to, or compared
//! against, the variable. Reading and writing use the same coercion so that
//! writing "on" and reading back yields [`SwitchState::On`].

use std::fmt;

use super::Value;
use super::value::{leading_float, leading_int, parse_bool_literal};

/// How the configured on/off literals are interpreted.
///
/// Stored in the property store as an integer code: `0` boolean, `1`
/// integer, `2` float, anything else string.
///
/// # Examples
///
/// ```
/// use device_tile::types::{SwitchType, Value};
///
/// assert_eq!(SwitchType::Boolean.coerce("true"), Value::Bool(true));
/// assert_eq!(SwitchType::Integer.coerce("3"), Value::Int(3));
/// assert_eq!(SwitchType::from(7), SwitchType::Text);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum SwitchType {
    /// Boolean variable.
    #[default]
    Boolean,
    /// Integer variable.
    Integer,
    /// Float variable.
    Float,
    /// String variable.
    Text,
}

impl SwitchType {
    /// Returns the property store code.
    #[must_use]
    pub const fn code(&self) -> i64 {
        match self {
            Self::Boolean => 0,
            Self::Integer => 1,
            Self::Float => 2,
            Self::Text => 3,
        }
    }

    /// Coerces a configured literal into a value of this type.
    #[must_use]
    pub fn coerce(&self, literal: &str) -> Value {
        match self {
            Self::Boolean => Value::Bool(parse_bool_literal(literal)),
            Self::Integer => Value::Int(leading_int(literal)),
            Self::Float => Value::Float(leading_float(literal)),
            Self::Text => Value::Text(literal.to_string()),
        }
    }
}

impl From<i64> for SwitchType {
    fn from(code: i64) -> Self {
        match code {
            0 => Self::Boolean,
            1 => Self::Integer,
            2 => Self::Float,
            _ => Self::Text,
        }
    }
}

impl From<SwitchType> for i64 {
    fn from(switch_type: SwitchType) -> Self {
        switch_type.code()
    }
}

/// Visual state of the tile switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwitchState {
    /// The variable holds the "on" literal.
    On,
    /// The variable holds anything else.
    Off,
}

impl SwitchState {
    /// Resolves the state of a variable against the configured "on" literal.
    ///
    /// Comparison is strict: the current value must have the same type as
    /// the coerced literal, so an integer `1` never matches a float `1.0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use device_tile::types::{SwitchState, SwitchType, Value};
    ///
    /// let state = SwitchState::resolve(SwitchType::Integer, "1", &Value::Int(1));
    /// assert_eq!(state, SwitchState::On);
    ///
    /// let state = SwitchState::resolve(SwitchType::Integer, "1", &Value::Float(1.0));
    /// assert_eq!(state, SwitchState::Off);
    /// ```
    #[must_use]
    pub fn resolve(switch_type: SwitchType, on: &str, current: &Value) -> Self {
        if *current == switch_type.coerce(on) {
            Self::On
        } else {
            Self::Off
        }
    }

    /// Returns the view string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
        }
    }
}

impl fmt::Display for SwitchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for t in [
            SwitchType::Boolean,
            SwitchType::Integer,
            SwitchType::Float,
            SwitchType::Text,
        ] {
            assert_eq!(SwitchType::from(t.code()), t);
        }
        assert_eq!(SwitchType::from(-1), SwitchType::Text);
    }

    #[test]
    fn coerce_per_type() {
        assert_eq!(SwitchType::Boolean.coerce("off"), Value::Bool(false));
        assert_eq!(SwitchType::Integer.coerce("12abc"), Value::Int(12));
        assert_eq!(SwitchType::Float.coerce("0.5"), Value::Float(0.5));
        assert_eq!(SwitchType::Text.coerce("ON"), Value::from("ON"));
    }

    #[test]
    fn written_on_value_reads_back_on() {
        let cases = [
            (SwitchType::Boolean, "true", "false"),
            (SwitchType::Integer, "100", "0"),
            (SwitchType::Float, "1.5", "0.0"),
            (SwitchType::Text, "open", "closed"),
        ];
        for (switch_type, on, off) in cases {
            let written_on = switch_type.coerce(on);
            let written_off = switch_type.coerce(off);
            assert_eq!(
                SwitchState::resolve(switch_type, on, &written_on),
                SwitchState::On
            );
            assert_eq!(
                SwitchState::resolve(switch_type, on, &written_off),
                SwitchState::Off
            );
        }
    }

    #[test]
    fn strict_type_comparison() {
        assert_eq!(
            SwitchState::resolve(SwitchType::Text, "1", &Value::Int(1)),
            SwitchState::Off
        );
        assert_eq!(
            SwitchState::resolve(SwitchType::Boolean, "true", &Value::Int(1)),
            SwitchState::Off
        );
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&SwitchState::On).unwrap(), r#""on""#);
        assert_eq!(SwitchState::Off.to_string(), "off");
        assert_eq!(serde_json::to_string(&SwitchType::Float).unwrap(), "2");
    }
}
