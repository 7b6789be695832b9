// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! User actions sent by the rendered tile or the configuration form.

use super::TileAdapter;
use crate::config::StatusAssociation;
use crate::error::{Error, Result};
use crate::host::{HostRegistry, PropertyStore};
use crate::types::{ObjectId, Value};

/// A parsed action identifier.
///
/// # Examples
///
/// ```
/// use device_tile::tile::TileAction;
///
/// assert_eq!(TileAction::parse("SwitchState"), TileAction::SwitchState);
/// assert_eq!(TileAction::parse("ActionVariable"), TileAction::Toggle("ActionVariable"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileAction<'a> {
    /// Rebuild the editable status association list from a variable's
    /// profile.
    ChangeStatus,
    /// Switch the configured switch variable on or off.
    SwitchState,
    /// Negate the variable referenced by the named property.
    Toggle(&'a str),
}

impl<'a> TileAction<'a> {
    /// Parses an action identifier. Unknown identifiers are property names.
    #[must_use]
    pub fn parse(ident: &'a str) -> Self {
        match ident {
            "ChangeStatus" => Self::ChangeStatus,
            "SwitchState" => Self::SwitchState,
            property => Self::Toggle(property),
        }
    }
}

/// Form field receiving the rebuilt association list.
const STATUS_PROFILE_FIELD: &str = "StatusProfile";

impl<H> TileAdapter<H>
where
    H: HostRegistry + PropertyStore,
{
    /// Handles a user action.
    ///
    /// - `ChangeStatus`: `value` is a variable id; its profile associations
    ///   are published to the configuration form as placeholder entries.
    /// - `SwitchState`: `value` is truthy for on; the configured on/off
    ///   literal is written to the switch variable.
    /// - anything else names an integer property holding a variable
    ///   reference; that variable's current value is negated.
    ///
    /// A referenced variable that does not exist makes the action a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) if the configuration
    /// or the named property cannot be read, [`Error::Host`](crate::Error::Host)
    /// if the host rejects the write and [`Error::Encode`](crate::Error::Encode)
    /// if the association list cannot be encoded.
    pub fn request_action(&self, ident: &str, value: Value) -> Result<()> {
        tracing::debug!(ident, value = %value, "Request action");
        match TileAction::parse(ident) {
            TileAction::ChangeStatus => self.publish_status_profile(ObjectId::new(value.to_int())),
            TileAction::SwitchState => self.switch(value.is_truthy()),
            TileAction::Toggle(property) => self.toggle(property),
        }
    }

    fn publish_status_profile(&self, variable: ObjectId) -> Result<()> {
        let list: Vec<StatusAssociation> = self
            .host
            .variable(variable)
            .and_then(|info| info.active_profile().and_then(|name| self.host.profile(name)))
            .map(|profile| {
                profile
                    .associations
                    .into_iter()
                    .map(|a| StatusAssociation::placeholder(a.name, a.value))
                    .collect()
            })
            .unwrap_or_default();

        tracing::debug!(variable = %variable, entries = list.len(), "Publishing status associations");
        let json = serde_json::to_string(&list)?;
        self.host.update_form_field(STATUS_PROFILE_FIELD, "values", &json);
        Ok(())
    }

    fn switch(&self, on: bool) -> Result<()> {
        let config = self.config()?;
        let id = config.switch_variable;
        if !self.host.variable_exists(id) {
            tracing::debug!(variable = %id, "Switch variable does not exist");
            return Ok(());
        }
        let literal = if on { &config.switch_on } else { &config.switch_off };
        self.write(id, config.switch_type.coerce(literal))
    }

    // Negation applies to every variable type, not just booleans.
    fn toggle(&self, property: &str) -> Result<()> {
        let id = ObjectId::new(self.host.read_integer(property)?);
        let Some(current) = self.read_value(id) else {
            tracing::debug!(property, variable = %id, "Variable to toggle does not exist");
            return Ok(());
        };
        self.write(id, Value::Bool(!current.is_truthy()))
    }

    fn write(&self, id: ObjectId, value: Value) -> Result<()> {
        self.host.request_action(id, value).map_err(|err| {
            tracing::warn!(variable = %id, error = %err, "Host rejected command");
            Error::from(err)
        })
    }
}
