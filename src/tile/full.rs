// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Full-state serialization.

use super::TileAdapter;
use crate::config::{InfoSlot, TileConfig};
use crate::error::Result;
use crate::host::{HostRegistry, PropertyStore};
use crate::payload::{FullUpdate, InfoLine, ProgressBounds};
use crate::range::ProgressRange;
use crate::types::countdown_seconds;

impl<H> TileAdapter<H>
where
    H: HostRegistry + PropertyStore,
{
    /// Builds the full tile state from the current configuration and the
    /// live values of every referenced variable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) if the configuration
    /// cannot be read.
    pub fn full_update(&self) -> Result<FullUpdate> {
        let config = self.config()?;
        Ok(self.full_update_for(&config))
    }

    pub(super) fn full_update_for(&self, config: &TileConfig) -> FullUpdate {
        let status_value = self
            .read_value(config.status_variable)
            .map(|value| value.to_raw_string());

        FullUpdate {
            tile_color: config.tile_color.formatted(),
            tile_transparency: config.tile_transparency,
            tile_ratio: config.tile_ratio,
            switch_state: self.read_switch_state(config),
            status_head: config.status_label.clone(),
            status_text: self.read_formatted(config.status_variable),
            status_value,
            status_font: config.status_font,
            action_head: config.action_label.clone(),
            action_text: self.read_formatted(config.action_variable),
            action_font: config.action_font,
            progress_head: config.progress_label.clone(),
            progress_text: self.read_formatted(config.progress_variable),
            progress: self.progress_bounds(config),
            progress_font: config.progress_font,
            progress_start: config.progress_start.formatted(),
            progress_stop: config.progress_stop.formatted(),
            progress_term: self
                .read_value(config.progress_term)
                .as_ref()
                .and_then(countdown_seconds),
            info: InfoSlot::ALL.map(|slot| self.info_line(config, slot)),
        }
    }

    /// Progress bar position, `None` unless the progress variable holds a
    /// value that is neither null nor empty.
    fn progress_bounds(&self, config: &TileConfig) -> Option<ProgressBounds> {
        let value = self.read_value(config.progress_variable)?;
        if value.is_absent() {
            return None;
        }
        let range = ProgressRange::resolve(&self.host, config.progress_variable);
        Some(ProgressBounds {
            min: range.min,
            max: range.max,
            value,
        })
    }

    fn info_line(&self, config: &TileConfig, slot: InfoSlot) -> InfoLine {
        let card = config.info(slot);
        InfoLine {
            icon: card.symbol.to_string(),
            text: self.info_text(config, slot),
            font: card.font,
        }
    }

    /// `prefix + formatted value + suffix` of an info line. A missing
    /// variable contributes nothing.
    pub(super) fn info_text(&self, config: &TileConfig, slot: InfoSlot) -> String {
        let card = config.info(slot);
        let formatted = self.read_formatted(card.variable).unwrap_or_default();
        format!("{}{formatted}{}", card.prefix, card.suffix)
    }
}
