// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The seam between the tile adapter and the home-automation host.
//!
//! The host owns every object the tile shows: variables, media, profiles and
//! presentations, plus the message bus and the visualization transport. The
//! adapter reaches all of it through two traits:
//!
//! - [`PropertyStore`] - the per-instance typed configuration properties
//! - [`HostRegistry`] - object lookups, subscriptions, commands and view pushes
//!
//! [`InMemoryHost`] implements both for tests and for embedding the adapter
//! in a process that is not the host itself.
//!
//! All methods take `&self`. The host serializes calls per instance, so
//! implementations only need interior mutability, not locking discipline.

mod memory;
mod message;
mod metadata;
mod view_bus;

pub use memory::{FormUpdate, InMemoryHost};
pub use message::{MessageKind, Notification, UpdateData};
pub use metadata::{Association, MediaInfo, MediaKind, Profile, VariableInfo, VariableType};
pub use view_bus::ViewBus;

use crate::error::{ConfigError, HostError};
use crate::types::{ObjectId, Value};

/// Health of an instance as shown to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum InstanceStatus {
    /// Being created, configuration not applied yet.
    Creating,
    /// Configuration applied, all references valid.
    Active,
    /// A configured reference does not exist.
    ConfigurationError,
}

impl InstanceStatus {
    /// Returns the host status code.
    #[must_use]
    pub const fn code(&self) -> i64 {
        match self {
            Self::Creating => 101,
            Self::Active => 102,
            Self::ConfigurationError => 104,
        }
    }
}

/// Typed configuration properties of one instance.
pub trait PropertyStore {
    /// Declares an integer property. Keeps the current value if the property
    /// already exists.
    fn register_integer(&self, name: &str, default: i64);

    /// Declares a string property. Keeps the current value if the property
    /// already exists.
    fn register_string(&self, name: &str, default: &str);

    /// Reads an integer property.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingProperty`] if the property was never
    /// registered and [`ConfigError::PropertyType`] if it is not an integer.
    fn read_integer(&self, name: &str) -> Result<i64, ConfigError>;

    /// Reads a string property.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingProperty`] if the property was never
    /// registered and [`ConfigError::PropertyType`] if it is not a string.
    fn read_string(&self, name: &str) -> Result<String, ConfigError>;
}

/// Registry, messaging and transport services of the host.
pub trait HostRegistry {
    // =========================================================================
    // Objects
    // =========================================================================

    /// Returns `true` if any object with this id exists.
    fn object_exists(&self, id: ObjectId) -> bool;

    /// Returns the visualization metadata JSON of an object, if it has any.
    fn object_visualization(&self, id: ObjectId) -> Option<String>;

    /// Returns `true` if a variable with this id exists.
    fn variable_exists(&self, id: ObjectId) -> bool;

    /// Returns variable metadata.
    fn variable(&self, id: ObjectId) -> Option<VariableInfo>;

    /// Reads the current value of a variable.
    fn value(&self, id: ObjectId) -> Option<Value>;

    /// Reads the current value of a variable formatted by its profile.
    fn formatted_value(&self, id: ObjectId) -> Option<String>;

    /// Looks up a variable profile by name.
    fn profile(&self, name: &str) -> Option<Profile>;

    /// Looks up a presentation by identifier.
    ///
    /// Presentations are free-form; some hosts deliver them JSON-encoded as
    /// a string.
    fn presentation(&self, id: &str) -> Option<serde_json::Value>;

    /// Returns `true` if a media object with this id exists.
    fn media_exists(&self, id: ObjectId) -> bool;

    /// Returns media metadata.
    fn media(&self, id: ObjectId) -> Option<MediaInfo>;

    /// Returns the raw content of a media object.
    fn media_content(&self, id: ObjectId) -> Option<Vec<u8>>;

    // =========================================================================
    // References and subscriptions
    // =========================================================================

    /// Records that this instance uses an object.
    fn register_reference(&self, id: ObjectId);

    /// Drops a usage record.
    fn unregister_reference(&self, id: ObjectId);

    /// Lists the objects this instance uses.
    fn reference_list(&self) -> Vec<ObjectId>;

    /// Subscribes this instance to messages of one kind from a sender.
    fn register_message(&self, sender: ObjectId, kind: MessageKind);

    /// Cancels a subscription.
    fn unregister_message(&self, sender: ObjectId, kind: MessageKind);

    /// Lists the current subscriptions.
    fn message_list(&self) -> Vec<(ObjectId, MessageKind)>;

    // =========================================================================
    // Commands and reporting
    // =========================================================================

    /// Asks the host to write a value to a variable.
    ///
    /// # Errors
    ///
    /// Returns [`HostError`] if the variable does not exist or the owning
    /// module rejects the write.
    fn request_action(&self, id: ObjectId, value: Value) -> Result<(), HostError>;

    /// Sets the instance status.
    fn set_status(&self, status: InstanceStatus);

    /// Pushes a JSON payload to every rendered view of this instance.
    fn update_visualization_value(&self, payload: &str);

    /// Replaces a parameter of a field on the open configuration form.
    fn update_form_field(&self, field: &str, parameter: &str, value: &str);
}
