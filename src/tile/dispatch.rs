// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Change-notification dispatch.

use super::TileAdapter;
use crate::config::{RawShape, Target, TileConfig, TrackedProperty};
use crate::error::Result;
use crate::host::{HostRegistry, MessageKind, Notification, PropertyStore, UpdateData};
use crate::payload::{Field, PartialUpdate, encode};
use crate::types::{ObjectId, Value, countdown_seconds};

impl<H> TileAdapter<H>
where
    H: HostRegistry + PropertyStore,
{
    /// Handles a message delivered by the host.
    ///
    /// Only variable updates that changed the value are acted on. Every
    /// tracked property referencing the sender produces its partial
    /// updates, each pushed as a separate message.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be read or a payload
    /// cannot be encoded.
    pub fn message_sink(&self, note: &Notification) -> Result<()> {
        if !note.is_change() {
            return Ok(());
        }
        let config = self.config()?;

        for property in TrackedProperty::ALL {
            if property.reference(&config) != note.sender {
                continue;
            }
            let updates = self.partial_updates(&config, property, &note.data.new_value);
            tracing::trace!(
                property = property.name(),
                sender = %note.sender,
                count = updates.len(),
                "Dispatching change"
            );
            for update in updates {
                self.host.update_visualization_value(&encode(&update)?);
            }
        }
        Ok(())
    }

    /// Handles a message in the host's raw form, identified by its numeric
    /// message code.
    ///
    /// Codes the adapter never subscribes to are ignored.
    ///
    /// # Errors
    ///
    /// Same as [`message_sink`](Self::message_sink).
    pub fn handle_message(
        &self,
        timestamp: u64,
        sender: ObjectId,
        code: i64,
        data: UpdateData,
    ) -> Result<()> {
        let Some(kind) = MessageKind::from_code(code) else {
            tracing::trace!(code, sender = %sender, "Ignoring unknown message code");
            return Ok(());
        };
        self.message_sink(&Notification {
            timestamp,
            sender,
            kind,
            data,
        })
    }

    /// Computes the partial updates for one property, text before raw value.
    fn partial_updates(
        &self,
        config: &TileConfig,
        property: TrackedProperty,
        new_value: &Value,
    ) -> Vec<PartialUpdate> {
        let id = property.reference(config);
        match property.target() {
            Target::Switch => vec![PartialUpdate::Switch(Self::switch_state_of(config, new_value))],
            // The countdown is read back rather than taken from the message.
            Target::Countdown => self
                .read_value(id)
                .as_ref()
                .and_then(countdown_seconds)
                .map(PartialUpdate::Countdown)
                .into_iter()
                .collect(),
            Target::Info(slot) => vec![PartialUpdate::Text {
                field: slot.text_field(),
                text: self.info_text(config, slot),
            }],
            Target::Text { text, raw } => {
                let mut updates: Vec<PartialUpdate> = self
                    .read_formatted(id)
                    .map(|formatted| PartialUpdate::Text {
                        field: text,
                        text: formatted,
                    })
                    .into_iter()
                    .collect();
                if let Some((field, shape)) = raw {
                    updates.extend(self.raw_update(id, field, shape));
                }
                updates
            }
        }
    }

    fn raw_update(&self, id: ObjectId, field: Field, shape: RawShape) -> Option<PartialUpdate> {
        let value = self.read_value(id).filter(|v| !v.is_absent())?;
        let value = match shape {
            RawShape::Text => Value::Text(value.to_raw_string()),
            RawShape::Typed => value,
        };
        Some(PartialUpdate::Raw { field, value })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::host::{InMemoryHost, VariableInfo, VariableType};

    const VAR: ObjectId = ObjectId::new(30001);

    fn note(sender: ObjectId, changed: bool, new_value: Value) -> Notification {
        Notification {
            timestamp: 1,
            sender,
            kind: MessageKind::VariableUpdate,
            data: UpdateData {
                new_value,
                changed,
                old_value: Value::Null,
                timestamp: Utc::now(),
            },
        }
    }

    fn adapter_with(property: &str, info: VariableInfo, value: Value) -> TileAdapter<InMemoryHost> {
        let tile = TileAdapter::create(InMemoryHost::new());
        tile.host().add_variable(VAR, info, value);
        tile.host().set_integer(property, VAR.value());
        tile
    }

    #[test]
    fn unchanged_value_is_ignored() {
        let tile = adapter_with("ActionVariable", VariableInfo::new(VariableType::String), Value::from("x"));
        tile.message_sink(&note(VAR, false, Value::from("x"))).unwrap();
        assert!(tile.host().pushed().is_empty());
    }

    #[test]
    fn unrelated_sender_is_ignored() {
        let tile = adapter_with("ActionVariable", VariableInfo::new(VariableType::String), Value::from("x"));
        tile.message_sink(&note(ObjectId::new(30999), true, Value::from("y"))).unwrap();
        assert!(tile.host().pushed().is_empty());
    }

    #[test]
    fn status_emits_text_then_value() {
        let tile = adapter_with("StatusVariable", VariableInfo::new(VariableType::Integer), Value::Int(2));
        tile.host().set_formatted(VAR, "Spinning");
        tile.message_sink(&note(VAR, true, Value::Int(2))).unwrap();
        assert_eq!(
            tile.host().pushed(),
            vec![r#"{"statetext":"Spinning"}"#, r#"{"statevalue":"2"}"#]
        );
    }

    #[test]
    fn progress_value_keeps_type() {
        let tile = adapter_with("ProgressVariable", VariableInfo::new(VariableType::Float), Value::Float(12.5));
        tile.message_sink(&note(VAR, true, Value::Float(12.5))).unwrap();
        assert_eq!(
            tile.host().pushed(),
            vec![r#"{"progresstext":"12.5"}"#, r#"{"progressvalue":12.5}"#]
        );
    }

    #[test]
    fn empty_progress_value_pushes_text_only() {
        let tile = adapter_with("ProgressVariable", VariableInfo::new(VariableType::String), Value::from(""));
        tile.message_sink(&note(VAR, true, Value::from(""))).unwrap();
        assert_eq!(tile.host().pushed(), vec![r#"{"progresstext":""}"#]);
        assert!(tile.full_update().unwrap().progress.is_none());
    }

    #[test]
    fn empty_status_value_pushes_text_only() {
        let tile = adapter_with("StatusVariable", VariableInfo::new(VariableType::String), Value::from(""));
        tile.message_sink(&note(VAR, true, Value::from(""))).unwrap();
        assert_eq!(tile.host().pushed(), vec![r#"{"statetext":""}"#]);
    }

    #[test]
    fn raw_message_code_is_dispatched() {
        let tile = adapter_with("ActionVariable", VariableInfo::new(VariableType::String), Value::from("Spin"));
        let data = note(VAR, true, Value::from("Spin")).data;
        tile.handle_message(3, VAR, MessageKind::VariableUpdate.code(), data).unwrap();
        assert_eq!(tile.host().pushed(), vec![r#"{"actiontext":"Spin"}"#]);
    }

    #[test]
    fn unknown_message_code_is_ignored() {
        let tile = adapter_with("ActionVariable", VariableInfo::new(VariableType::String), Value::from("Spin"));
        let data = note(VAR, true, Value::from("Spin")).data;
        tile.handle_message(3, VAR, 10_505, data).unwrap();
        assert!(tile.host().pushed().is_empty());
    }

    #[test]
    fn action_emits_text_only() {
        let tile = adapter_with("ActionVariable", VariableInfo::new(VariableType::String), Value::from("Rinse"));
        tile.message_sink(&note(VAR, true, Value::from("Rinse"))).unwrap();
        assert_eq!(tile.host().pushed(), vec![r#"{"actiontext":"Rinse"}"#]);
    }

    #[test]
    fn countdown_reads_current_value() {
        let tile = adapter_with("ProgressTerm", VariableInfo::new(VariableType::String), Value::from("00:01:30"));
        tile.message_sink(&note(VAR, true, Value::from("stale"))).unwrap();
        assert_eq!(tile.host().pushed(), vec![r#"{"progressterm":90}"#]);
    }

    #[test]
    fn info_line_text() {
        let tile = adapter_with("AddVariableThird", VariableInfo::new(VariableType::Integer), Value::Int(7));
        tile.host().set_string("AddPrefixThird", "Runs: ");
        tile.host().set_string("AddSuffixThird", "x");
        tile.message_sink(&note(VAR, true, Value::Int(7))).unwrap();
        assert_eq!(tile.host().pushed(), vec![r#"{"info3text":"Runs: 7x"}"#]);
    }

    #[test]
    fn shared_reference_fires_every_match() {
        let tile = adapter_with("SwitchVariable", VariableInfo::new(VariableType::Boolean), Value::Bool(true));
        tile.host().set_integer("ActionVariable", VAR.value());
        tile.message_sink(&note(VAR, true, Value::Bool(true))).unwrap();
        assert_eq!(
            tile.host().pushed(),
            vec![r#"{"switchstate":"on"}"#, r#"{"actiontext":"true"}"#]
        );
    }

    #[test]
    fn switch_uses_new_value() {
        let tile = adapter_with("SwitchVariable", VariableInfo::new(VariableType::Boolean), Value::Bool(true));
        tile.message_sink(&note(VAR, true, Value::Bool(false))).unwrap();
        assert_eq!(tile.host().pushed(), vec![r#"{"switchstate":"off"}"#]);
    }
}
