// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tile configuration.
//!
//! The configuration lives in the host property store, one typed property
//! per setting. [`PROPERTIES`] declares every property with its default;
//! [`TileConfig::register_defaults`] hands that table to the store when an
//! instance is created and [`TileConfig::load`] reads a fresh snapshot on
//! every operation. Nothing is cached between calls.
//!
//! `TileConfig` also (de)serializes with the host's PascalCase property
//! names, which is the shape of an exported instance configuration:
//!
//! ```
//! use device_tile::config::TileConfig;
//!
//! let config: TileConfig = serde_json::from_str(r#"{
//!     "StatusLabel": "WASHER",
//!     "StatusVariable": 12345,
//!     "SwitchType": 1
//! }"#).unwrap();
//! assert_eq!(config.status_label, "WASHER");
//! assert!(config.status_variable.is_set());
//! // Everything not mentioned keeps its default.
//! assert_eq!(config.action_label, "AKTION");
//! ```

mod association;
mod tracked;

pub use association::StatusAssociation;
pub use tracked::{MediaProperty, RawShape, Target, TrackedProperty};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::host::PropertyStore;
use crate::payload::Field;
use crate::types::{HostColor, ObjectId, SwitchType};

/// Default value of a registered property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyDefault {
    /// Integer property.
    Integer(i64),
    /// String property.
    String(&'static str),
}

/// A configuration property declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyDef {
    /// Property name in the host store.
    pub name: &'static str,
    /// Registered default.
    pub default: PropertyDefault,
}

const fn int(name: &'static str, default: i64) -> PropertyDef {
    PropertyDef {
        name,
        default: PropertyDefault::Integer(default),
    }
}

const fn string(name: &'static str, default: &'static str) -> PropertyDef {
    PropertyDef {
        name,
        default: PropertyDefault::String(default),
    }
}

/// Default start color of the progress bar (`#FFA405`).
pub const DEFAULT_PROGRESS_START: HostColor = HostColor::new(0xFF_A4_05);

/// Default stop color of the progress bar (`#F9722B`).
pub const DEFAULT_PROGRESS_STOP: HostColor = HostColor::new(0xF9_72_2B);

/// Every property of a tile instance, in registration order.
pub const PROPERTIES: &[PropertyDef] = &[
    // Tile
    int("TileColor", -1),
    int("TileTransparency", 100),
    int("TileRatio", 40),
    // Image
    int("StatusImageOn", 1),
    int("StatusImageOff", 1),
    // Switch
    int("SwitchVariable", 1),
    int("SwitchType", 0),
    string("SwitchOn", "true"),
    string("SwitchOff", "false"),
    // Status
    string("StatusLabel", "STATUS"),
    int("StatusVariable", 1),
    int("StatusFont", 14),
    string("StatusProfile", "[]"),
    // Action
    string("ActionLabel", "AKTION"),
    int("ActionVariable", 1),
    int("ActionFont", 14),
    // Progress bar
    string("ProgressLabel", ""),
    int("ProgressVariable", 1),
    int("ProgressFont", 14),
    int("ProgressTerm", 1),
    int("ProgressStart", DEFAULT_PROGRESS_START.value()),
    int("ProgressStop", DEFAULT_PROGRESS_STOP.value()),
    // Additional info
    string("AddSymbolFirst", ""),
    string("AddPrefixFirst", ""),
    int("AddVariableFirst", 1),
    string("AddSuffixFirst", ""),
    int("AddFontFirst", 12),
    string("AddSymbolSecond", ""),
    string("AddPrefixSecond", ""),
    int("AddVariableSecond", 1),
    string("AddSuffixSecond", ""),
    int("AddFontSecond", 12),
    string("AddSymbolThird", ""),
    string("AddPrefixThird", ""),
    int("AddVariableThird", 1),
    string("AddSuffixThird", ""),
    int("AddFontThird", 12),
];

/// One of the three additional info lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfoSlot {
    /// `info1`.
    First,
    /// `info2`.
    Second,
    /// `info3`.
    Third,
}

impl InfoSlot {
    /// All slots in display order.
    pub const ALL: [Self; 3] = [Self::First, Self::Second, Self::Third];

    /// Returns the view field showing this line's text.
    #[must_use]
    pub const fn text_field(&self) -> Field {
        match self {
            Self::First => Field::Info1Text,
            Self::Second => Field::Info2Text,
            Self::Third => Field::Info3Text,
        }
    }
}

/// Borrowed view of one info line's settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfoCard<'a> {
    /// Icon name.
    pub symbol: &'a str,
    /// Text before the value.
    pub prefix: &'a str,
    /// Source variable.
    pub variable: ObjectId,
    /// Text after the value.
    pub suffix: &'a str,
    /// Font size in pixels.
    pub font: i64,
}

/// Snapshot of an instance's configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TileConfig {
    /// Tile background, unset for the theme default.
    pub tile_color: HostColor,
    /// Background opacity in percent.
    pub tile_transparency: i64,
    /// Switch column width in percent.
    pub tile_ratio: i64,

    /// Image shown while switched on.
    pub status_image_on: ObjectId,
    /// Image shown while switched off.
    pub status_image_off: ObjectId,

    /// Variable driving the switch.
    pub switch_variable: ObjectId,
    /// How `switch_on`/`switch_off` are coerced.
    pub switch_type: SwitchType,
    /// Literal written for "on".
    pub switch_on: String,
    /// Literal written for "off".
    pub switch_off: String,

    /// Heading of the status line.
    pub status_label: String,
    /// Variable driving the status line.
    pub status_variable: ObjectId,
    /// Status font size in pixels.
    pub status_font: i64,
    /// JSON-encoded list of [`StatusAssociation`]s.
    pub status_profile: String,

    /// Heading of the action line.
    pub action_label: String,
    /// Variable driving the action line.
    pub action_variable: ObjectId,
    /// Action font size in pixels.
    pub action_font: i64,

    /// Heading of the progress bar.
    pub progress_label: String,
    /// Variable driving the progress bar.
    pub progress_variable: ObjectId,
    /// Progress font size in pixels.
    pub progress_font: i64,
    /// Countdown variable, seconds or `HH:MM:SS`.
    pub progress_term: ObjectId,
    /// Gradient start color of the bar.
    pub progress_start: HostColor,
    /// Gradient end color of the bar.
    pub progress_stop: HostColor,

    /// Icon of the first info line.
    pub add_symbol_first: String,
    /// Text before the first info value.
    pub add_prefix_first: String,
    /// Variable of the first info line.
    pub add_variable_first: ObjectId,
    /// Text after the first info value.
    pub add_suffix_first: String,
    /// Font size of the first info line.
    pub add_font_first: i64,
    /// Icon of the second info line.
    pub add_symbol_second: String,
    /// Text before the second info value.
    pub add_prefix_second: String,
    /// Variable of the second info line.
    pub add_variable_second: ObjectId,
    /// Text after the second info value.
    pub add_suffix_second: String,
    /// Font size of the second info line.
    pub add_font_second: i64,
    /// Icon of the third info line.
    pub add_symbol_third: String,
    /// Text before the third info value.
    pub add_prefix_third: String,
    /// Variable of the third info line.
    pub add_variable_third: ObjectId,
    /// Text after the third info value.
    pub add_suffix_third: String,
    /// Font size of the third info line.
    pub add_font_third: i64,
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            tile_color: HostColor::NONE,
            tile_transparency: 100,
            tile_ratio: 40,
            status_image_on: ObjectId::NONE,
            status_image_off: ObjectId::NONE,
            switch_variable: ObjectId::NONE,
            switch_type: SwitchType::Boolean,
            switch_on: "true".to_string(),
            switch_off: "false".to_string(),
            status_label: "STATUS".to_string(),
            status_variable: ObjectId::NONE,
            status_font: 14,
            status_profile: "[]".to_string(),
            action_label: "AKTION".to_string(),
            action_variable: ObjectId::NONE,
            action_font: 14,
            progress_label: String::new(),
            progress_variable: ObjectId::NONE,
            progress_font: 14,
            progress_term: ObjectId::NONE,
            progress_start: DEFAULT_PROGRESS_START,
            progress_stop: DEFAULT_PROGRESS_STOP,
            add_symbol_first: String::new(),
            add_prefix_first: String::new(),
            add_variable_first: ObjectId::NONE,
            add_suffix_first: String::new(),
            add_font_first: 12,
            add_symbol_second: String::new(),
            add_prefix_second: String::new(),
            add_variable_second: ObjectId::NONE,
            add_suffix_second: String::new(),
            add_font_second: 12,
            add_symbol_third: String::new(),
            add_prefix_third: String::new(),
            add_variable_third: ObjectId::NONE,
            add_suffix_third: String::new(),
            add_font_third: 12,
        }
    }
}

impl TileConfig {
    /// Declares every property of [`PROPERTIES`] in the store.
    pub fn register_defaults<S: PropertyStore + ?Sized>(store: &S) {
        for def in PROPERTIES {
            match def.default {
                PropertyDefault::Integer(v) => store.register_integer(def.name, v),
                PropertyDefault::String(v) => store.register_string(def.name, v),
            }
        }
    }

    /// Reads a configuration snapshot from the store.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a property is missing or has the wrong
    /// type.
    pub fn load<S: PropertyStore + ?Sized>(store: &S) -> Result<Self, ConfigError> {
        let id = |name: &str| store.read_integer(name).map(ObjectId::new);
        let color = |name: &str| store.read_integer(name).map(HostColor::new);

        Ok(Self {
            tile_color: color("TileColor")?,
            tile_transparency: store.read_integer("TileTransparency")?,
            tile_ratio: store.read_integer("TileRatio")?,
            status_image_on: id("StatusImageOn")?,
            status_image_off: id("StatusImageOff")?,
            switch_variable: id("SwitchVariable")?,
            switch_type: SwitchType::from(store.read_integer("SwitchType")?),
            switch_on: store.read_string("SwitchOn")?,
            switch_off: store.read_string("SwitchOff")?,
            status_label: store.read_string("StatusLabel")?,
            status_variable: id("StatusVariable")?,
            status_font: store.read_integer("StatusFont")?,
            status_profile: store.read_string("StatusProfile")?,
            action_label: store.read_string("ActionLabel")?,
            action_variable: id("ActionVariable")?,
            action_font: store.read_integer("ActionFont")?,
            progress_label: store.read_string("ProgressLabel")?,
            progress_variable: id("ProgressVariable")?,
            progress_font: store.read_integer("ProgressFont")?,
            progress_term: id("ProgressTerm")?,
            progress_start: color("ProgressStart")?,
            progress_stop: color("ProgressStop")?,
            add_symbol_first: store.read_string("AddSymbolFirst")?,
            add_prefix_first: store.read_string("AddPrefixFirst")?,
            add_variable_first: id("AddVariableFirst")?,
            add_suffix_first: store.read_string("AddSuffixFirst")?,
            add_font_first: store.read_integer("AddFontFirst")?,
            add_symbol_second: store.read_string("AddSymbolSecond")?,
            add_prefix_second: store.read_string("AddPrefixSecond")?,
            add_variable_second: id("AddVariableSecond")?,
            add_suffix_second: store.read_string("AddSuffixSecond")?,
            add_font_second: store.read_integer("AddFontSecond")?,
            add_symbol_third: store.read_string("AddSymbolThird")?,
            add_prefix_third: store.read_string("AddPrefixThird")?,
            add_variable_third: id("AddVariableThird")?,
            add_suffix_third: store.read_string("AddSuffixThird")?,
            add_font_third: store.read_integer("AddFontThird")?,
        })
    }

    /// Returns the settings of one info line.
    #[must_use]
    pub fn info(&self, slot: InfoSlot) -> InfoCard<'_> {
        match slot {
            InfoSlot::First => InfoCard {
                symbol: &self.add_symbol_first,
                prefix: &self.add_prefix_first,
                variable: self.add_variable_first,
                suffix: &self.add_suffix_first,
                font: self.add_font_first,
            },
            InfoSlot::Second => InfoCard {
                symbol: &self.add_symbol_second,
                prefix: &self.add_prefix_second,
                variable: self.add_variable_second,
                suffix: &self.add_suffix_second,
                font: self.add_font_second,
            },
            InfoSlot::Third => InfoCard {
                symbol: &self.add_symbol_third,
                prefix: &self.add_prefix_third,
                variable: self.add_variable_third,
                suffix: &self.add_suffix_third,
                font: self.add_font_third,
            },
        }
    }

    /// Decodes the operator's status association list.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidStatusProfile`] if the stored list is
    /// not valid JSON of the expected shape.
    pub fn status_associations(&self) -> Result<Vec<StatusAssociation>, ConfigError> {
        serde_json::from_str(&self.status_profile).map_err(ConfigError::InvalidStatusProfile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::InMemoryHost;

    #[test]
    fn default_matches_property_table() {
        let json = serde_json::to_value(TileConfig::default()).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), PROPERTIES.len());

        for def in PROPERTIES {
            let actual = &object[def.name];
            match def.default {
                PropertyDefault::Integer(v) => assert_eq!(actual, &serde_json::json!(v), "{}", def.name),
                PropertyDefault::String(v) => assert_eq!(actual, &serde_json::json!(v), "{}", def.name),
            }
        }
    }

    #[test]
    fn load_after_register_yields_defaults() {
        let host = InMemoryHost::new();
        TileConfig::register_defaults(&host);
        assert_eq!(TileConfig::load(&host).unwrap(), TileConfig::default());
    }

    #[test]
    fn load_reads_current_values() {
        let host = InMemoryHost::new();
        TileConfig::register_defaults(&host);
        host.set_integer("SwitchType", 2);
        host.set_string("AddPrefixSecond", "Temp: ");
        host.set_integer("ProgressTerm", 23456);

        let config = TileConfig::load(&host).unwrap();
        assert_eq!(config.switch_type, SwitchType::Float);
        assert_eq!(config.info(InfoSlot::Second).prefix, "Temp: ");
        assert_eq!(config.progress_term, ObjectId::new(23456));
    }

    #[test]
    fn load_without_registration_fails() {
        let host = InMemoryHost::new();
        let err = TileConfig::load(&host).unwrap_err();
        assert!(matches!(err, ConfigError::MissingProperty(name) if name == "TileColor"));
    }

    #[test]
    fn info_slots_map_to_their_fields() {
        let config = TileConfig {
            add_symbol_third: "bolt".to_string(),
            add_variable_third: ObjectId::new(30003),
            add_font_third: 18,
            ..TileConfig::default()
        };
        let card = config.info(InfoSlot::Third);
        assert_eq!(card.symbol, "bolt");
        assert_eq!(card.variable, ObjectId::new(30003));
        assert_eq!(card.font, 18);
        assert_eq!(config.info(InfoSlot::First).font, 12);
        assert_eq!(InfoSlot::Second.text_field(), Field::Info2Text);
    }

    #[test]
    fn status_associations_decode() {
        let config = TileConfig {
            status_profile: r#"[
                {"Value": true, "Image": "ON", "Color": 65280, "Progress": true},
                {"Name": "Idle", "Value": 0, "Image": "OFF", "Color": -1, "Progress": false}
            ]"#
            .to_string(),
            ..TileConfig::default()
        };
        let list = config.status_associations().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].key(), "true");
        assert_eq!(list[1].color, HostColor::NONE);
    }

    #[test]
    fn status_associations_invalid_json() {
        let config = TileConfig {
            status_profile: "not json".to_string(),
            ..TileConfig::default()
        };
        assert!(matches!(
            config.status_associations(),
            Err(ConfigError::InvalidStatusProfile(_))
        ));
    }
}
