// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Properties that reference host objects.
//!
//! [`TrackedProperty`] is the explicit mapping from a variable-valued
//! property to the view field(s) it feeds and to the way its value is turned
//! into a payload. Both configuration apply and change dispatch walk this
//! table; nothing is derived from property naming conventions.

use super::{InfoSlot, TileConfig};
use crate::payload::Field;
use crate::types::ObjectId;

/// How a raw value reaches the view's secondary field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawShape {
    /// As a string, booleans as `true`/`false`.
    Text,
    /// As the typed value.
    Typed,
}

/// The payload behaviour of a tracked property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// Switch read-back, `switchstate`.
    Switch,
    /// Countdown in seconds, `progressterm`.
    Countdown,
    /// `prefix + formatted value + suffix` of an info line.
    Info(InfoSlot),
    /// Formatted text, optionally followed by the raw value.
    Text {
        /// Field receiving the formatted value.
        text: Field,
        /// Field receiving the raw value, if the target has one.
        raw: Option<(Field, RawShape)>,
    },
}

/// A property holding a variable reference the tile listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackedProperty {
    /// `SwitchVariable`.
    Switch,
    /// `StatusVariable`.
    Status,
    /// `ActionVariable`.
    Action,
    /// `ProgressVariable`.
    Progress,
    /// `ProgressTerm`.
    ProgressTerm,
    /// `AddVariableFirst`, `AddVariableSecond`, `AddVariableThird`.
    Info(InfoSlot),
}

impl TrackedProperty {
    /// All tracked properties, in registration order.
    pub const ALL: [Self; 8] = [
        Self::Switch,
        Self::Status,
        Self::Action,
        Self::Progress,
        Self::ProgressTerm,
        Self::Info(InfoSlot::First),
        Self::Info(InfoSlot::Second),
        Self::Info(InfoSlot::Third),
    ];

    /// Returns the property name in the host store.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Switch => "SwitchVariable",
            Self::Status => "StatusVariable",
            Self::Action => "ActionVariable",
            Self::Progress => "ProgressVariable",
            Self::ProgressTerm => "ProgressTerm",
            Self::Info(InfoSlot::First) => "AddVariableFirst",
            Self::Info(InfoSlot::Second) => "AddVariableSecond",
            Self::Info(InfoSlot::Third) => "AddVariableThird",
        }
    }

    /// Returns the variable this property currently references.
    #[must_use]
    pub fn reference(&self, config: &TileConfig) -> ObjectId {
        match self {
            Self::Switch => config.switch_variable,
            Self::Status => config.status_variable,
            Self::Action => config.action_variable,
            Self::Progress => config.progress_variable,
            Self::ProgressTerm => config.progress_term,
            Self::Info(slot) => config.info(*slot).variable,
        }
    }

    /// Returns the payload behaviour of this property.
    #[must_use]
    pub const fn target(&self) -> Target {
        match self {
            Self::Switch => Target::Switch,
            Self::Status => Target::Text {
                text: Field::StateText,
                raw: Some((Field::StateValue, RawShape::Text)),
            },
            Self::Action => Target::Text {
                text: Field::ActionText,
                raw: None,
            },
            Self::Progress => Target::Text {
                text: Field::ProgressText,
                raw: Some((Field::ProgressValue, RawShape::Typed)),
            },
            Self::ProgressTerm => Target::Countdown,
            Self::Info(slot) => Target::Info(*slot),
        }
    }
}

/// A property holding a media reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaProperty {
    /// `StatusImageOn`.
    ImageOn,
    /// `StatusImageOff`.
    ImageOff,
}

impl MediaProperty {
    /// All media properties, in registration order.
    pub const ALL: [Self; 2] = [Self::ImageOn, Self::ImageOff];

    /// Returns the property name in the host store.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ImageOn => "StatusImageOn",
            Self::ImageOff => "StatusImageOff",
        }
    }

    /// Returns the media this property currently references.
    #[must_use]
    pub fn reference(&self, config: &TileConfig) -> ObjectId {
        match self {
            Self::ImageOn => config.status_image_on,
            Self::ImageOff => config.status_image_off,
        }
    }
}
