// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host color values.
//!
//! The host stores colors as a single integer `0xRRGGBB`, with `-1` meaning
//! "no color". The view expects CSS hex strings.

use std::fmt;

/// A color as stored in the host property store.
///
/// # Examples
///
/// ```
/// use device_tile::types::HostColor;
///
/// let orange = HostColor::from_rgb(0xFF, 0xA4, 0x05);
/// assert_eq!(orange.value(), 0xFF_A4_05);
/// assert_eq!(orange.formatted(), "#FFA405");
///
/// assert_eq!(HostColor::NONE.formatted(), "");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct HostColor(i64);

impl HostColor {
    /// Transparent / unset color.
    pub const NONE: Self = Self(-1);

    /// Wraps a raw host color value.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Builds a color from its channels.
    #[must_use]
    #[allow(clippy::cast_lossless)]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self(((red as i64) << 16) | ((green as i64) << 8) | blue as i64)
    }

    /// Returns the raw host value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }

    /// Returns `false` for the "no color" sentinel and other negative values.
    #[must_use]
    pub const fn is_set(&self) -> bool {
        self.0 >= 0
    }

    /// Returns the CSS form, `#RRGGBB`, or an empty string when unset.
    #[must_use]
    pub fn formatted(&self) -> String {
        if self.is_set() {
            format!("#{:06X}", self.0 & 0xFF_FF_FF)
        } else {
            String::new()
        }
    }
}

impl Default for HostColor {
    fn default() -> Self {
        Self::NONE
    }
}

impl fmt::Display for HostColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}
