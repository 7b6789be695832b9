// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTML rendering of the tile.
//!
//! The document is the static template followed by three inline scripts:
//!
//! 1. the status association table (`imgs`, `cols`, `bars`)
//! 2. the on/off images as `window.assets`, only if at least one resolves
//! 3. `handleMessage(...)` applying the full update
//!
//! The template defines `handleMessage`, so it has to come first.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Map, Value as Json};

use super::TileAdapter;
use crate::config::{StatusAssociation, TileConfig};
use crate::error::Result;
use crate::host::{HostRegistry, PropertyStore};
use crate::payload::encode;
use crate::types::ObjectId;

/// The bundled tile template.
pub const DEFAULT_TEMPLATE: &str = include_str!("../../assets/tile.html");

impl<H> TileAdapter<H>
where
    H: HostRegistry + PropertyStore,
{
    /// Renders the complete HTML document of the tile.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) if the configuration
    /// or the status association list cannot be read and
    /// [`Error::Encode`](crate::Error::Encode) if a script payload cannot be
    /// encoded.
    pub fn render(&self) -> Result<String> {
        let config = self.config()?;
        tracing::debug!("Rendering tile");

        let mut html = String::with_capacity(self.template.len() + 1024);
        html.push_str(&self.template);
        html.push_str(&association_script(&config.status_associations()?)?);

        let img_on = self.image_data(config.status_image_on);
        let img_off = self.image_data(config.status_image_off);
        if !img_on.is_empty() || !img_off.is_empty() {
            html.push_str(&format!(
                "<script>window.assets = {{}};\nwindow.assets.img_on = \"{img_on}\";\nwindow.assets.img_off = \"{img_off}\";\n</script>"
            ));
        }

        html.push_str(&self.initial_script(&config)?);
        Ok(html)
    }

    /// Returns the image as a `data:` URI, or an empty string if the media
    /// is missing, not an image, or of an unsupported file type.
    fn image_data(&self, id: ObjectId) -> String {
        if !id.is_set() || !self.host.media_exists(id) {
            return String::new();
        }
        let Some(prefix) = self.host.media(id).as_ref().and_then(|m| m.data_uri_prefix()) else {
            tracing::trace!(media = %id, "Media is not a supported image");
            return String::new();
        };
        let content = self.host.media_content(id).unwrap_or_default();
        format!("{prefix}{}", STANDARD.encode(content))
    }

    fn initial_script(&self, config: &TileConfig) -> Result<String> {
        let full = encode(&self.full_update_for(config))?;
        // Passed as a string literal, the view parses it like any push.
        let literal = script_safe(&serde_json::to_string(&full)?);
        Ok(format!("<script>handleMessage({literal});</script>"))
    }
}

/// Builds the script declaring the status association lookup tables.
fn association_script(associations: &[StatusAssociation]) -> Result<String> {
    let mut images = Map::new();
    let mut colors = Map::new();
    let mut bars = Map::new();
    for entry in associations {
        let key = entry.key();
        images.insert(key.clone(), Json::String(entry.image.clone()));
        colors.insert(key.clone(), Json::String(entry.color.formatted()));
        bars.insert(key, entry.progress.clone());
    }

    Ok(format!(
        "<script type=\"text/javascript\">var imgs = {};var cols = {};var bars = {};</script>",
        script_safe(&serde_json::to_string(&images)?),
        script_safe(&serde_json::to_string(&colors)?),
        script_safe(&serde_json::to_string(&bars)?),
    ))
}

/// Escapes `</` so embedded JSON cannot close the surrounding script tag.
fn script_safe(json: &str) -> String {
    json.replace("</", "<\\/")
}
