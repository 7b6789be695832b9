// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The tile adapter.
//!
//! [`TileAdapter`] is one tile instance. It owns nothing but a handle to the
//! host and the static HTML template; configuration and every displayed
//! value are read from the host on each call.
//!
//! # Entry points
//!
//! | Host event                     | Method                                  |
//! |--------------------------------|-----------------------------------------|
//! | instance created               | [`TileAdapter::create`]                 |
//! | configuration applied          | [`TileAdapter::apply_changes`]          |
//! | subscribed variable updated    | [`TileAdapter::message_sink`]           |
//! | button pressed in the tile     | [`TileAdapter::request_action`]         |
//! | tile opened in a dashboard     | [`TileAdapter::render`]                 |
//!
//! # Examples
//!
//! ```
//! use device_tile::host::{InMemoryHost, InstanceStatus, VariableInfo, VariableType};
//! use device_tile::tile::TileAdapter;
//! use device_tile::types::{ObjectId, Value};
//!
//! # fn main() -> device_tile::Result<()> {
//! let host = InMemoryHost::new();
//! let switch = ObjectId::new(12345);
//! host.add_variable(switch, VariableInfo::new(VariableType::Boolean), Value::Bool(true));
//!
//! let tile = TileAdapter::create(host);
//! tile.host().set_integer("SwitchVariable", switch.value());
//! assert_eq!(tile.apply_changes()?, InstanceStatus::Active);
//!
//! let full: serde_json::Value = serde_json::from_str(&tile.host().pushed()[0])?;
//! assert_eq!(full["switchstate"], "on");
//! # Ok(())
//! # }
//! ```

mod action;
mod dispatch;
mod full;
mod render;

pub use action::TileAction;
pub use render::DEFAULT_TEMPLATE;

use std::borrow::Cow;

use crate::config::{MediaProperty, TileConfig, TrackedProperty};
use crate::error::Result;
use crate::host::{HostRegistry, InstanceStatus, MessageKind, PropertyStore};
use crate::payload::encode;
use crate::types::{ObjectId, SwitchState, Value};

/// A status tile bound to a host.
#[derive(Debug)]
pub struct TileAdapter<H> {
    host: H,
    template: Cow<'static, str>,
}

impl<H> TileAdapter<H>
where
    H: HostRegistry + PropertyStore,
{
    /// Creates the instance: declares every configuration property with its
    /// default and uses the bundled HTML template.
    pub fn create(host: H) -> Self {
        TileConfig::register_defaults(&host);
        tracing::debug!("Tile instance created");
        Self {
            host,
            template: Cow::Borrowed(DEFAULT_TEMPLATE),
        }
    }

    /// Replaces the static HTML template the tile is rendered from.
    ///
    /// The template must define the `handleMessage(json)` function.
    #[must_use]
    pub fn with_template(mut self, template: impl Into<Cow<'static, str>>) -> Self {
        self.template = template.into();
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Reads the current configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) if the property store
    /// is incomplete.
    pub fn config(&self) -> Result<TileConfig> {
        Ok(TileConfig::load(&self.host)?)
    }

    /// Applies the current configuration.
    ///
    /// Drops every reference and subscription held so far, then validates
    /// and re-registers the configured media and variables. The first
    /// missing object stops the apply and leaves the instance in
    /// [`InstanceStatus::ConfigurationError`]; references registered before
    /// it stay registered. On success a full update is pushed and the
    /// instance becomes [`InstanceStatus::Active`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be read or the full
    /// update cannot be encoded. A missing object is not an error.
    pub fn apply_changes(&self) -> Result<InstanceStatus> {
        let config = self.config()?;

        for id in self.host.reference_list() {
            self.host.unregister_reference(id);
        }
        for (sender, kind) in self.host.message_list() {
            self.host.unregister_message(sender, kind);
        }

        for media in MediaProperty::ALL {
            let id = media.reference(&config);
            if !id.is_set() {
                continue;
            }
            if !self.host.media_exists(id) {
                tracing::debug!(property = media.name(), media = %id, "Media does not exist");
                return Ok(self.degrade());
            }
            self.host.register_reference(id);
        }

        for property in TrackedProperty::ALL {
            let id = property.reference(&config);
            if !id.is_set() {
                continue;
            }
            if !self.host.variable_exists(id) {
                tracing::debug!(property = property.name(), variable = %id, "Variable does not exist");
                return Ok(self.degrade());
            }
            self.host.register_reference(id);
            self.host.register_message(id, MessageKind::VariableUpdate);
        }

        let payload = encode(&self.full_update_for(&config))?;
        self.host.update_visualization_value(&payload);

        self.host.set_status(InstanceStatus::Active);
        tracing::debug!("Configuration applied");
        Ok(InstanceStatus::Active)
    }

    fn degrade(&self) -> InstanceStatus {
        self.host.set_status(InstanceStatus::ConfigurationError);
        InstanceStatus::ConfigurationError
    }

    // =========================================================================
    // Host reads
    // =========================================================================

    /// Current value of a variable, `None` if it does not exist.
    fn read_value(&self, id: ObjectId) -> Option<Value> {
        if id.is_set() && self.host.variable_exists(id) {
            self.host.value(id)
        } else {
            None
        }
    }

    /// Formatted value of a variable, `None` if it does not exist.
    fn read_formatted(&self, id: ObjectId) -> Option<String> {
        if id.is_set() && self.host.variable_exists(id) {
            self.host.formatted_value(id)
        } else {
            None
        }
    }

    /// Switch state of a value under the configured literals.
    fn switch_state_of(config: &TileConfig, value: &Value) -> SwitchState {
        SwitchState::resolve(config.switch_type, &config.switch_on, value)
    }

    /// Reads back the switch variable, `None` if it does not exist.
    fn read_switch_state(&self, config: &TileConfig) -> Option<SwitchState> {
        self.read_value(config.switch_variable)
            .map(|value| Self::switch_state_of(config, &value))
    }
}
