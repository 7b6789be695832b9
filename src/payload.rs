// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON payloads pushed to the rendered tile.
//!
//! The view accepts two shapes through the same `handleMessage` entry point:
//!
//! - [`FullUpdate`] - every field, sent after a configuration apply and
//!   embedded into the rendered HTML
//! - [`PartialUpdate`] - a single field, sent when one source variable
//!   changes
//!
//! Every key a partial update can carry is a [`Field`], and every [`Field`]
//! is a key of the full update, so the view never sees an unknown key.
//! Both shapes go through [`encode`].

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::Result;
use crate::types::{SwitchState, Value};

/// A key of the view's data model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// `tilecolor`, the background color.
    TileColor,
    /// `tiletrans`, the background opacity.
    TileTrans,
    /// `tileratio`, the switch column width.
    TileRatio,
    /// `switchstate`, on, off or null.
    SwitchState,
    /// `statehead`, the status heading.
    StateHead,
    /// `statetext`, the formatted status.
    StateText,
    /// `statevalue`, the raw status value.
    StateValue,
    /// `statefont`, the status font size.
    StateFont,
    /// `actionhead`, the action heading.
    ActionHead,
    /// `actiontext`, the formatted action.
    ActionText,
    /// `actionfont`, the action font size.
    ActionFont,
    /// `progresshead`, the progress heading.
    ProgressHead,
    /// `progresstext`, the formatted progress.
    ProgressText,
    /// `progressmin`, the lower bar bound.
    ProgressMin,
    /// `progressmax`, the upper bar bound.
    ProgressMax,
    /// `progressvalue`, the raw progress value.
    ProgressValue,
    /// `progressfont`, the progress font size.
    ProgressFont,
    /// `progressstart`, the gradient start color.
    ProgressStart,
    /// `progressstop`, the gradient end color.
    ProgressStop,
    /// `progressterm`, the countdown in seconds.
    ProgressTerm,
    /// `info1icon`, the icon of info line 1.
    Info1Icon,
    /// `info1text`, the text of info line 1.
    Info1Text,
    /// `info1font`, the font size of info line 1.
    Info1Font,
    /// `info2icon`, the icon of info line 2.
    Info2Icon,
    /// `info2text`, the text of info line 2.
    Info2Text,
    /// `info2font`, the font size of info line 2.
    Info2Font,
    /// `info3icon`, the icon of info line 3.
    Info3Icon,
    /// `info3text`, the text of info line 3.
    Info3Text,
    /// `info3font`, the font size of info line 3.
    Info3Font,
}

impl Field {
    /// Every field, in full update order.
    pub const ALL: [Self; 29] = [
        Self::TileColor,
        Self::TileTrans,
        Self::TileRatio,
        Self::SwitchState,
        Self::StateHead,
        Self::StateText,
        Self::StateValue,
        Self::StateFont,
        Self::ActionHead,
        Self::ActionText,
        Self::ActionFont,
        Self::ProgressHead,
        Self::ProgressText,
        Self::ProgressMin,
        Self::ProgressMax,
        Self::ProgressValue,
        Self::ProgressFont,
        Self::ProgressStart,
        Self::ProgressStop,
        Self::ProgressTerm,
        Self::Info1Icon,
        Self::Info1Text,
        Self::Info1Font,
        Self::Info2Icon,
        Self::Info2Text,
        Self::Info2Font,
        Self::Info3Icon,
        Self::Info3Text,
        Self::Info3Font,
    ];

    /// Returns the JSON key.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TileColor => "tilecolor",
            Self::TileTrans => "tiletrans",
            Self::TileRatio => "tileratio",
            Self::SwitchState => "switchstate",
            Self::StateHead => "statehead",
            Self::StateText => "statetext",
            Self::StateValue => "statevalue",
            Self::StateFont => "statefont",
            Self::ActionHead => "actionhead",
            Self::ActionText => "actiontext",
            Self::ActionFont => "actionfont",
            Self::ProgressHead => "progresshead",
            Self::ProgressText => "progresstext",
            Self::ProgressMin => "progressmin",
            Self::ProgressMax => "progressmax",
            Self::ProgressValue => "progressvalue",
            Self::ProgressFont => "progressfont",
            Self::ProgressStart => "progressstart",
            Self::ProgressStop => "progressstop",
            Self::ProgressTerm => "progressterm",
            Self::Info1Icon => "info1icon",
            Self::Info1Text => "info1text",
            Self::Info1Font => "info1font",
            Self::Info2Icon => "info2icon",
            Self::Info2Text => "info2text",
            Self::Info2Font => "info2font",
            Self::Info3Icon => "info3icon",
            Self::Info3Text => "info3text",
            Self::Info3Font => "info3font",
        }
    }
}

/// Progress bar position, present only when the progress variable has a
/// value.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressBounds {
    /// Lower bound of the bar.
    pub min: f64,
    /// Upper bound of the bar.
    pub max: f64,
    /// Raw progress value.
    pub value: Value,
}

/// An info line of the full update.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InfoLine {
    /// Icon name.
    pub icon: String,
    /// `prefix + formatted value + suffix`.
    pub text: String,
    /// Font size.
    pub font: i64,
}

const INFO_FIELDS: [[Field; 3]; 3] = [
    [Field::Info1Icon, Field::Info1Text, Field::Info1Font],
    [Field::Info2Icon, Field::Info2Text, Field::Info2Font],
    [Field::Info3Icon, Field::Info3Text, Field::Info3Font],
];

/// The complete state of a tile.
///
/// `None` fields are emitted as JSON `null`, except for [`ProgressBounds`],
/// whose three keys are emitted together or not at all.
#[derive(Debug, Clone, PartialEq)]
pub struct FullUpdate {
    /// CSS background color, empty for the theme default.
    pub tile_color: String,
    /// Background opacity in percent.
    pub tile_transparency: i64,
    /// Switch column width in percent.
    pub tile_ratio: i64,
    /// `None` when the switch variable does not exist.
    pub switch_state: Option<SwitchState>,
    /// Status heading.
    pub status_head: String,
    /// Formatted status value.
    pub status_text: Option<String>,
    /// Raw status value as a string, the key into the association table.
    pub status_value: Option<String>,
    /// Status font size.
    pub status_font: i64,
    /// Action heading.
    pub action_head: String,
    /// Formatted action value.
    pub action_text: Option<String>,
    /// Action font size.
    pub action_font: i64,
    /// Progress heading.
    pub progress_head: String,
    /// Formatted progress value.
    pub progress_text: Option<String>,
    /// Bar bounds and position, omitted as a whole when unset.
    pub progress: Option<ProgressBounds>,
    /// Progress font size.
    pub progress_font: i64,
    /// Gradient start color.
    pub progress_start: String,
    /// Gradient end color.
    pub progress_stop: String,
    /// Countdown in seconds.
    pub progress_term: Option<i64>,
    /// The three info lines, in slot order.
    pub info: [InfoLine; 3],
}

impl Serialize for FullUpdate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry(Field::TileColor.as_str(), &self.tile_color)?;
        map.serialize_entry(Field::TileTrans.as_str(), &self.tile_transparency)?;
        map.serialize_entry(Field::TileRatio.as_str(), &self.tile_ratio)?;
        map.serialize_entry(Field::SwitchState.as_str(), &self.switch_state)?;
        map.serialize_entry(Field::StateHead.as_str(), &self.status_head)?;
        map.serialize_entry(Field::StateText.as_str(), &self.status_text)?;
        map.serialize_entry(Field::StateValue.as_str(), &self.status_value)?;
        map.serialize_entry(Field::StateFont.as_str(), &self.status_font)?;
        map.serialize_entry(Field::ActionHead.as_str(), &self.action_head)?;
        map.serialize_entry(Field::ActionText.as_str(), &self.action_text)?;
        map.serialize_entry(Field::ActionFont.as_str(), &self.action_font)?;
        map.serialize_entry(Field::ProgressHead.as_str(), &self.progress_head)?;
        map.serialize_entry(Field::ProgressText.as_str(), &self.progress_text)?;
        if let Some(progress) = &self.progress {
            map.serialize_entry(Field::ProgressMin.as_str(), &progress.min)?;
            map.serialize_entry(Field::ProgressMax.as_str(), &progress.max)?;
            map.serialize_entry(Field::ProgressValue.as_str(), &progress.value)?;
        }
        map.serialize_entry(Field::ProgressFont.as_str(), &self.progress_font)?;
        map.serialize_entry(Field::ProgressStart.as_str(), &self.progress_start)?;
        map.serialize_entry(Field::ProgressStop.as_str(), &self.progress_stop)?;
        map.serialize_entry(Field::ProgressTerm.as_str(), &self.progress_term)?;
        for (line, [icon, text, font]) in self.info.iter().zip(INFO_FIELDS) {
            map.serialize_entry(icon.as_str(), &line.icon)?;
            map.serialize_entry(text.as_str(), &line.text)?;
            map.serialize_entry(font.as_str(), &line.font)?;
        }
        map.end()
    }
}

/// A single-field update.
///
/// Serializes as a one-key object.
///
/// # Examples
///
/// ```
/// use device_tile::payload::{encode, Field, PartialUpdate};
/// use device_tile::types::SwitchState;
///
/// let json = encode(&PartialUpdate::Switch(SwitchState::On)).unwrap();
/// assert_eq!(json, r#"{"switchstate":"on"}"#);
///
/// let json = encode(&PartialUpdate::Text {
///     field: Field::ActionText,
///     text: "Spinning".to_string(),
/// })
/// .unwrap();
/// assert_eq!(json, r#"{"actiontext":"Spinning"}"#);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum PartialUpdate {
    /// New switch state.
    Switch(SwitchState),
    /// New countdown in seconds.
    Countdown(i64),
    /// New formatted text of a field.
    Text {
        /// Target field.
        field: Field,
        /// Formatted text.
        text: String,
    },
    /// New raw value of a field.
    Raw {
        /// Target field.
        field: Field,
        /// Raw value.
        value: Value,
    },
}

impl PartialUpdate {
    /// Returns the field this update targets.
    #[must_use]
    pub const fn field(&self) -> Field {
        match self {
            Self::Switch(_) => Field::SwitchState,
            Self::Countdown(_) => Field::ProgressTerm,
            Self::Text { field, .. } | Self::Raw { field, .. } => *field,
        }
    }
}

impl Serialize for PartialUpdate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        let key = self.field().as_str();
        match self {
            Self::Switch(state) => map.serialize_entry(key, state)?,
            Self::Countdown(seconds) => map.serialize_entry(key, seconds)?,
            Self::Text { text, .. } => map.serialize_entry(key, text)?,
            Self::Raw { value, .. } => map.serialize_entry(key, value)?,
        }
        map.end()
    }
}

/// Encodes a payload for the view.
///
/// # Errors
///
/// Returns [`Error::Encode`](crate::Error::Encode) if serialization fails.
pub fn encode<T: Serialize + ?Sized>(payload: &T) -> Result<String> {
    Ok(serde_json::to_string(payload)?)
}
