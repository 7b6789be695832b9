// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory host for tests and embedding.

use std::collections::{BTreeSet, HashMap, HashSet};

use chrono::Utc;
use parking_lot::Mutex;

use super::{
    HostRegistry, InstanceStatus, MediaInfo, MessageKind, Notification, Profile, PropertyStore,
    UpdateData, VariableInfo, ViewBus,
};
use crate::config::TileConfig;
use crate::error::{ConfigError, HostError};
use crate::types::{ObjectId, Value};

#[derive(Debug, Clone, PartialEq)]
enum Property {
    Integer(i64),
    String(String),
}

#[derive(Debug, Clone)]
struct Variable {
    info: VariableInfo,
    value: Value,
    formatted: Option<String>,
}

#[derive(Debug, Clone)]
struct Media {
    info: MediaInfo,
    content: Vec<u8>,
}

/// A form field update recorded by [`InMemoryHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormUpdate {
    /// Form field name.
    pub field: String,
    /// Parameter of the field.
    pub parameter: String,
    /// New parameter value.
    pub value: String,
}

#[derive(Debug)]
struct State {
    properties: HashMap<String, Property>,
    variables: HashMap<ObjectId, Variable>,
    visualizations: HashMap<ObjectId, String>,
    profiles: HashMap<String, Profile>,
    presentations: HashMap<String, serde_json::Value>,
    media: HashMap<ObjectId, Media>,
    references: BTreeSet<ObjectId>,
    messages: Vec<(ObjectId, MessageKind)>,
    read_only: HashSet<ObjectId>,
    actions: Vec<(ObjectId, Value)>,
    status: InstanceStatus,
    pushed: Vec<String>,
    form_updates: Vec<FormUpdate>,
    counter: u64,
}

/// A host whose registry lives entirely in memory.
///
/// Besides implementing [`PropertyStore`] and [`HostRegistry`], it records
/// everything the adapter sends back (commands, pushes, form updates,
/// status) so tests can assert on it, and broadcasts pushes on a
/// [`ViewBus`].
///
/// Message delivery is simulated by [`InMemoryHost::set_value`]: it returns
/// the notification the host would deliver, and only when the instance is
/// subscribed to the variable.
///
/// # Examples
///
/// ```
/// use device_tile::host::{HostRegistry, InMemoryHost, MessageKind, VariableInfo, VariableType};
/// use device_tile::types::{ObjectId, Value};
///
/// let host = InMemoryHost::new();
/// let id = ObjectId::new(12345);
/// host.add_variable(id, VariableInfo::new(VariableType::Boolean), Value::Bool(false));
///
/// // Not subscribed yet: nothing is delivered.
/// assert!(host.set_value(id, Value::Bool(true)).is_none());
///
/// host.register_message(id, MessageKind::VariableUpdate);
/// let note = host.set_value(id, Value::Bool(false)).unwrap();
/// assert!(note.data.changed);
/// ```
#[derive(Debug)]
pub struct InMemoryHost {
    state: Mutex<State>,
    view: ViewBus,
}

impl InMemoryHost {
    /// Creates an empty host.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                properties: HashMap::new(),
                variables: HashMap::new(),
                visualizations: HashMap::new(),
                profiles: HashMap::new(),
                presentations: HashMap::new(),
                media: HashMap::new(),
                references: BTreeSet::new(),
                messages: Vec::new(),
                read_only: HashSet::new(),
                actions: Vec::new(),
                status: InstanceStatus::Creating,
                pushed: Vec::new(),
                form_updates: Vec::new(),
                counter: 0,
            }),
            view: ViewBus::new(),
        }
    }

    // =========================================================================
    // Properties
    // =========================================================================

    /// Overwrites an integer property.
    pub fn set_integer(&self, name: &str, value: i64) {
        self.state
            .lock()
            .properties
            .insert(name.to_string(), Property::Integer(value));
    }

    /// Overwrites a string property.
    pub fn set_string(&self, name: &str, value: &str) {
        self.state
            .lock()
            .properties
            .insert(name.to_string(), Property::String(value.to_string()));
    }

    /// Overwrites every property with the values of a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not serialize to a flat
    /// object of integers and strings.
    pub fn set_configuration(&self, config: &TileConfig) -> Result<(), serde_json::Error> {
        let serde_json::Value::Object(values) = serde_json::to_value(config)? else {
            return Ok(());
        };
        let mut state = self.state.lock();
        for (name, value) in values {
            let property = match value {
                serde_json::Value::String(s) => Property::String(s),
                serde_json::Value::Number(n) => Property::Integer(n.as_i64().unwrap_or_default()),
                _ => continue,
            };
            state.properties.insert(name, property);
        }
        Ok(())
    }

    // =========================================================================
    // Registry contents
    // =========================================================================

    /// Adds or replaces a variable.
    pub fn add_variable(&self, id: ObjectId, info: VariableInfo, value: Value) {
        self.state.lock().variables.insert(
            id,
            Variable {
                info,
                value,
                formatted: None,
            },
        );
    }

    /// Deletes a variable.
    pub fn remove_variable(&self, id: ObjectId) {
        self.state.lock().variables.remove(&id);
    }

    /// Sets the formatted text of a variable until its value next changes.
    ///
    /// Without it, the formatted value is the raw value as a string.
    pub fn set_formatted(&self, id: ObjectId, text: &str) {
        if let Some(variable) = self.state.lock().variables.get_mut(&id) {
            variable.formatted = Some(text.to_string());
        }
    }

    /// Writes a variable value and returns the notification the host would
    /// deliver to this instance, if it is subscribed.
    ///
    /// Returns `None` for unknown variables.
    pub fn set_value(&self, id: ObjectId, value: Value) -> Option<Notification> {
        let mut state = self.state.lock();
        state.counter += 1;
        let timestamp = state.counter;
        let subscribed = state
            .messages
            .contains(&(id, MessageKind::VariableUpdate));

        let variable = state.variables.get_mut(&id)?;
        let old_value = std::mem::replace(&mut variable.value, value.clone());
        variable.formatted = None;

        subscribed.then(|| Notification {
            timestamp,
            sender: id,
            kind: MessageKind::VariableUpdate,
            data: UpdateData {
                changed: old_value != value,
                new_value: value,
                old_value,
                timestamp: Utc::now(),
            },
        })
    }

    /// Makes the variable reject writes.
    pub fn set_read_only(&self, id: ObjectId) {
        self.state.lock().read_only.insert(id);
    }

    /// Adds or replaces a profile.
    pub fn add_profile(&self, name: &str, profile: Profile) {
        self.state.lock().profiles.insert(name.to_string(), profile);
    }

    /// Adds or replaces a presentation.
    pub fn add_presentation(&self, id: &str, presentation: serde_json::Value) {
        self.state
            .lock()
            .presentations
            .insert(id.to_string(), presentation);
    }

    /// Sets the visualization metadata JSON of an object.
    pub fn set_object_visualization(&self, id: ObjectId, json: &str) {
        self.state
            .lock()
            .visualizations
            .insert(id, json.to_string());
    }

    /// Adds or replaces a media object.
    pub fn add_media(&self, id: ObjectId, info: MediaInfo, content: Vec<u8>) {
        self.state
            .lock()
            .media
            .insert(id, Media { info, content });
    }

    // =========================================================================
    // Recorded output
    // =========================================================================

    /// Returns the current instance status.
    #[must_use]
    pub fn status(&self) -> InstanceStatus {
        self.state.lock().status
    }

    /// Returns every payload pushed so far.
    #[must_use]
    pub fn pushed(&self) -> Vec<String> {
        self.state.lock().pushed.clone()
    }

    /// Returns and forgets the payloads pushed so far.
    pub fn take_pushed(&self) -> Vec<String> {
        std::mem::take(&mut self.state.lock().pushed)
    }

    /// Returns every value write requested so far.
    #[must_use]
    pub fn actions(&self) -> Vec<(ObjectId, Value)> {
        self.state.lock().actions.clone()
    }

    /// Returns every form field update so far.
    #[must_use]
    pub fn form_updates(&self) -> Vec<FormUpdate> {
        self.state.lock().form_updates.clone()
    }

    /// Returns `true` if the instance listens to updates of a variable.
    #[must_use]
    pub fn is_subscribed(&self, id: ObjectId) -> bool {
        self.state
            .lock()
            .messages
            .contains(&(id, MessageKind::VariableUpdate))
    }

    /// Returns the bus views subscribe to.
    #[must_use]
    pub fn view(&self) -> &ViewBus {
        &self.view
    }
}

impl Default for InMemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyStore for InMemoryHost {
    fn register_integer(&self, name: &str, default: i64) {
        self.state
            .lock()
            .properties
            .entry(name.to_string())
            .or_insert(Property::Integer(default));
    }

    fn register_string(&self, name: &str, default: &str) {
        self.state
            .lock()
            .properties
            .entry(name.to_string())
            .or_insert_with(|| Property::String(default.to_string()));
    }

    fn read_integer(&self, name: &str) -> Result<i64, ConfigError> {
        match self.state.lock().properties.get(name) {
            Some(Property::Integer(v)) => Ok(*v),
            Some(Property::String(_)) => Err(ConfigError::PropertyType {
                name: name.to_string(),
                expected: "integer",
            }),
            None => Err(ConfigError::MissingProperty(name.to_string())),
        }
    }

    fn read_string(&self, name: &str) -> Result<String, ConfigError> {
        match self.state.lock().properties.get(name) {
            Some(Property::String(v)) => Ok(v.clone()),
            Some(Property::Integer(_)) => Err(ConfigError::PropertyType {
                name: name.to_string(),
                expected: "string",
            }),
            None => Err(ConfigError::MissingProperty(name.to_string())),
        }
    }
}

impl HostRegistry for InMemoryHost {
    fn object_exists(&self, id: ObjectId) -> bool {
        let state = self.state.lock();
        state.variables.contains_key(&id)
            || state.media.contains_key(&id)
            || state.visualizations.contains_key(&id)
    }

    fn object_visualization(&self, id: ObjectId) -> Option<String> {
        self.state.lock().visualizations.get(&id).cloned()
    }

    fn variable_exists(&self, id: ObjectId) -> bool {
        self.state.lock().variables.contains_key(&id)
    }

    fn variable(&self, id: ObjectId) -> Option<VariableInfo> {
        self.state.lock().variables.get(&id).map(|v| v.info.clone())
    }

    fn value(&self, id: ObjectId) -> Option<Value> {
        self.state.lock().variables.get(&id).map(|v| v.value.clone())
    }

    fn formatted_value(&self, id: ObjectId) -> Option<String> {
        self.state.lock().variables.get(&id).map(|v| {
            v.formatted
                .clone()
                .unwrap_or_else(|| v.value.to_raw_string())
        })
    }

    fn profile(&self, name: &str) -> Option<Profile> {
        self.state.lock().profiles.get(name).cloned()
    }

    fn presentation(&self, id: &str) -> Option<serde_json::Value> {
        self.state.lock().presentations.get(id).cloned()
    }

    fn media_exists(&self, id: ObjectId) -> bool {
        self.state.lock().media.contains_key(&id)
    }

    fn media(&self, id: ObjectId) -> Option<MediaInfo> {
        self.state.lock().media.get(&id).map(|m| m.info.clone())
    }

    fn media_content(&self, id: ObjectId) -> Option<Vec<u8>> {
        self.state.lock().media.get(&id).map(|m| m.content.clone())
    }

    fn register_reference(&self, id: ObjectId) {
        self.state.lock().references.insert(id);
    }

    fn unregister_reference(&self, id: ObjectId) {
        self.state.lock().references.remove(&id);
    }

    fn reference_list(&self) -> Vec<ObjectId> {
        self.state.lock().references.iter().copied().collect()
    }

    fn register_message(&self, sender: ObjectId, kind: MessageKind) {
        let mut state = self.state.lock();
        if !state.messages.contains(&(sender, kind)) {
            state.messages.push((sender, kind));
        }
    }

    fn unregister_message(&self, sender: ObjectId, kind: MessageKind) {
        self.state
            .lock()
            .messages
            .retain(|entry| *entry != (sender, kind));
    }

    fn message_list(&self) -> Vec<(ObjectId, MessageKind)> {
        self.state.lock().messages.clone()
    }

    fn request_action(&self, id: ObjectId, value: Value) -> Result<(), HostError> {
        let mut state = self.state.lock();
        if state.read_only.contains(&id) {
            return Err(HostError::CommandRejected {
                id,
                reason: "variable is read only".to_string(),
            });
        }
        let variable = state
            .variables
            .get_mut(&id)
            .ok_or(HostError::ObjectNotFound(id))?;
        variable.value = value.clone();
        variable.formatted = None;
        state.actions.push((id, value));
        Ok(())
    }

    fn set_status(&self, status: InstanceStatus) {
        self.state.lock().status = status;
    }

    fn update_visualization_value(&self, payload: &str) {
        self.state.lock().pushed.push(payload.to_string());
        self.view.publish(payload);
    }

    fn update_form_field(&self, field: &str, parameter: &str, value: &str) {
        self.state.lock().form_updates.push(FormUpdate {
            field: field.to_string(),
            parameter: parameter.to_string(),
            value: value.to_string(),
        });
    }
}
