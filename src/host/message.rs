// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Change notifications delivered by the host message bus.

use chrono::{DateTime, Utc};

use crate::types::{ObjectId, Value};

/// Message kinds the adapter subscribes to.
///
/// Serialized as the numeric host message code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub enum MessageKind {
    /// A variable received a new value.
    VariableUpdate,
}

impl MessageKind {
    /// Returns the host message code.
    #[must_use]
    pub const fn code(&self) -> i64 {
        match self {
            Self::VariableUpdate => 10_603,
        }
    }

    /// Looks up a host message code.
    #[must_use]
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            10_603 => Some(Self::VariableUpdate),
            _ => None,
        }
    }
}

impl From<MessageKind> for i64 {
    fn from(kind: MessageKind) -> Self {
        kind.code()
    }
}

impl TryFrom<i64> for MessageKind {
    type Error = String;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or_else(|| format!("unknown message code {code}"))
    }
}

/// Payload of a variable update.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct UpdateData {
    /// Value after the update.
    pub new_value: Value,
    /// Whether the value differs from the previous one.
    pub changed: bool,
    /// Value before the update.
    pub old_value: Value,
    /// When the update happened.
    pub timestamp: DateTime<Utc>,
}

/// A message delivered to the adapter.
///
/// # Examples
///
/// ```
/// use chrono::Utc;
/// use device_tile::host::{MessageKind, Notification, UpdateData};
/// use device_tile::types::{ObjectId, Value};
///
/// let note = Notification {
///     timestamp: 1,
///     sender: ObjectId::new(12345),
///     kind: MessageKind::VariableUpdate,
///     data: UpdateData {
///         new_value: Value::Int(2),
///         changed: true,
///         old_value: Value::Int(1),
///         timestamp: Utc::now(),
///     },
/// };
/// assert!(note.is_change());
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Notification {
    /// Continuous host counter.
    pub timestamp: u64,
    /// Object that emitted the message.
    pub sender: ObjectId,
    /// Kind of message.
    pub kind: MessageKind,
    /// Update payload.
    pub data: UpdateData,
}

impl Notification {
    /// Returns `true` if this is a variable update that changed the value.
    #[must_use]
    pub fn is_change(&self) -> bool {
        self.kind == MessageKind::VariableUpdate && self.data.changed
    }
}
