// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Metadata records read from the host registry.

use serde::{Deserialize, Serialize};

use crate::types::Value;

/// Storage type of a host variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariableType {
    /// Boolean variable.
    Boolean,
    /// Integer variable.
    Integer,
    /// Float variable.
    Float,
    /// String variable.
    String,
}

impl VariableType {
    /// Returns `true` for integer and float variables.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }
}

/// Variable metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VariableInfo {
    /// Storage type.
    pub variable_type: VariableType,
    /// Profile assigned by the module that owns the variable.
    #[serde(default)]
    pub variable_profile: String,
    /// Profile assigned by the operator, overriding the standard one.
    #[serde(default)]
    pub variable_custom_profile: String,
    /// Operator presentation block, free-form.
    #[serde(default)]
    pub variable_custom_presentation: serde_json::Map<String, serde_json::Value>,
}

impl VariableInfo {
    /// Creates metadata for a variable without profiles or presentation.
    #[must_use]
    pub fn new(variable_type: VariableType) -> Self {
        Self {
            variable_type,
            variable_profile: String::new(),
            variable_custom_profile: String::new(),
            variable_custom_presentation: serde_json::Map::new(),
        }
    }

    /// Sets the standard profile name.
    #[must_use]
    pub fn with_profile(mut self, name: impl Into<String>) -> Self {
        self.variable_profile = name.into();
        self
    }

    /// Sets the custom profile name.
    #[must_use]
    pub fn with_custom_profile(mut self, name: impl Into<String>) -> Self {
        self.variable_custom_profile = name.into();
        self
    }

    /// Sets the custom presentation block.
    #[must_use]
    pub fn with_custom_presentation(
        mut self,
        presentation: serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        self.variable_custom_presentation = presentation;
        self
    }

    /// Returns the active profile name: the custom one if set, otherwise the
    /// standard one. `None` if neither is set.
    #[must_use]
    pub fn active_profile(&self) -> Option<&str> {
        [&self.variable_custom_profile, &self.variable_profile]
            .into_iter()
            .map(String::as_str)
            .find(|name| !name.is_empty())
    }
}

/// A value-to-label association of a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Association {
    /// Raw value.
    pub value: Value,
    /// Display label.
    pub name: String,
}

/// A variable profile.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Profile {
    /// Declared lower bound.
    #[serde(default)]
    pub min_value: Option<f64>,
    /// Declared upper bound.
    #[serde(default)]
    pub max_value: Option<f64>,
    /// Value labels.
    #[serde(default)]
    pub associations: Vec<Association>,
}

impl Profile {
    /// Creates a profile with bounds and no associations.
    #[must_use]
    pub fn with_bounds(min: f64, max: f64) -> Self {
        Self {
            min_value: Some(min),
            max_value: Some(max),
            associations: Vec::new(),
        }
    }
}

/// Kind of a media object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaKind {
    /// Dashboard (IPSView) document.
    Document,
    /// Image file.
    Image,
    /// Audio file.
    Sound,
    /// Video stream.
    Stream,
    /// Chart definition.
    Chart,
}

/// Media object metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MediaInfo {
    /// Kind of media.
    pub media_type: MediaKind,
    /// Backing file name, used to derive the MIME type.
    pub media_file: String,
}

impl MediaInfo {
    /// Returns the lowercase extension of the backing file.
    #[must_use]
    pub fn extension(&self) -> Option<String> {
        self.media_file
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
    }

    /// Returns the `data:` URI prefix for supported image files.
    #[must_use]
    pub fn data_uri_prefix(&self) -> Option<&'static str> {
        if self.media_type != MediaKind::Image {
            return None;
        }
        let prefix = match self.extension()?.as_str() {
            "bmp" => "data:image/bmp;base64,",
            "jpg" | "jpeg" => "data:image/jpeg;base64,",
            "gif" => "data:image/gif;base64,",
            "png" => "data:image/png;base64,",
            "ico" => "data:image/x-icon;base64,",
            "webp" => "data:image/webp;base64,",
            _ => return None,
        };
        Some(prefix)
    }
}
