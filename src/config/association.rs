// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::{Deserialize, Serialize};

use crate::types::{HostColor, Value};

/// Operator-curated look of the tile for one status value.
///
/// Stored as a JSON list in the `StatusProfile` property. Entries created by
/// the "rebuild from profile" action also carry the profile label under
/// `Name`, which is kept for the form but ignored by the view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StatusAssociation {
    /// Label from the variable profile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Raw status value this entry applies to.
    pub value: Value,
    /// Image token shown for this status.
    #[serde(default)]
    pub image: String,
    /// Accent color, [`HostColor::NONE`] for none.
    #[serde(default)]
    pub color: HostColor,
    /// Progress bar setting, passed to the view as is.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub progress: serde_json::Value,
}

impl StatusAssociation {
    /// Image token used for freshly generated entries.
    pub const PLACEHOLDER_IMAGE: &'static str = "OFF";

    /// Creates an entry with the placeholder image and no color.
    #[must_use]
    pub fn placeholder(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: Some(name.into()),
            value,
            image: Self::PLACEHOLDER_IMAGE.to_string(),
            color: HostColor::NONE,
            progress: serde_json::Value::Null,
        }
    }

    /// Returns the lookup key the view uses: the raw value as a string,
    /// booleans as `true`/`false`.
    #[must_use]
    pub fn key(&self) -> String {
        self.value.to_raw_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_follow_raw_string() {
        let entry = StatusAssociation::placeholder("Running", Value::Int(2));
        assert_eq!(entry.key(), "2");
        let entry = StatusAssociation::placeholder("On", Value::Bool(false));
        assert_eq!(entry.key(), "false");
    }

    #[test]
    fn placeholder_serializes_form_shape() {
        let entry = StatusAssociation::placeholder("Done", Value::Int(3));
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "Name": "Done",
                "Value": 3,
                "Image": "OFF",
                "Color": -1
            })
        );
    }

    #[test]
    fn missing_optional_fields_default() {
        let entry: StatusAssociation = serde_json::from_str(r#"{"Value": "idle"}"#).unwrap();
        assert_eq!(entry.image, "");
        assert_eq!(entry.color, HostColor::NONE);
        assert!(entry.progress.is_null());
        assert_eq!(entry.name, None);
    }
}
