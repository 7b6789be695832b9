// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end tests driving a tile against the in-memory host.

use device_tile::host::{
    HostRegistry, InMemoryHost, InstanceStatus, MediaInfo, MediaKind, Profile, VariableInfo,
    VariableType,
};
use device_tile::types::{ObjectId, Value};
use device_tile::{ProgressRange, TileAdapter, TileConfig};
use serde_json::json;

const SWITCH: ObjectId = ObjectId::new(10001);
const STATUS: ObjectId = ObjectId::new(10002);
const ACTION: ObjectId = ObjectId::new(10003);
const PROGRESS: ObjectId = ObjectId::new(10004);
const TERM: ObjectId = ObjectId::new(10005);
const INFO: ObjectId = ObjectId::new(10006);
const IMAGE: ObjectId = ObjectId::new(10007);

/// A washing machine tile with every element wired up.
fn washer() -> TileAdapter<InMemoryHost> {
    let host = InMemoryHost::new();
    host.add_variable(SWITCH, VariableInfo::new(VariableType::Boolean), Value::Bool(true));
    host.add_variable(STATUS, VariableInfo::new(VariableType::Integer), Value::Int(2));
    host.set_formatted(STATUS, "Washing");
    host.add_variable(ACTION, VariableInfo::new(VariableType::String), Value::from("Rinse"));
    host.add_variable(
        PROGRESS,
        VariableInfo::new(VariableType::Integer).with_profile("Washer.Percent"),
        Value::Int(40),
    );
    host.add_profile("Washer.Percent", Profile::with_bounds(0.0, 100.0));
    host.add_variable(TERM, VariableInfo::new(VariableType::String), Value::from("01:02:03"));
    host.add_variable(INFO, VariableInfo::new(VariableType::Float), Value::Float(40.0));
    host.set_formatted(INFO, "40 °C");

    let tile = TileAdapter::create(host);
    tile.host()
        .set_configuration(&TileConfig {
            switch_variable: SWITCH,
            status_variable: STATUS,
            action_variable: ACTION,
            progress_variable: PROGRESS,
            progress_term: TERM,
            add_variable_first: INFO,
            add_prefix_first: "Temp: ".to_string(),
            ..TileConfig::default()
        })
        .unwrap();
    tile
}

fn last_push(host: &InMemoryHost) -> serde_json::Value {
    let pushed = host.pushed();
    serde_json::from_str(pushed.last().expect("nothing pushed")).unwrap()
}

// ============================================================================
// Configuration Apply
// ============================================================================

mod apply {
    use super::*;

    #[test]
    fn create_reports_creating() {
        let tile = TileAdapter::create(InMemoryHost::new());
        assert_eq!(tile.host().status(), InstanceStatus::Creating);
        assert_eq!(tile.config().unwrap(), TileConfig::default());
    }

    #[test]
    fn stored_configuration_loads_back() {
        let config = washer().config().unwrap();
        assert_eq!(config.switch_variable, SWITCH);
        assert_eq!(config.add_prefix_first, "Temp: ");
        assert_eq!(config.status_label, "STATUS");
    }

    #[test]
    fn registers_references_and_pushes_full_update() {
        let tile = washer();
        assert_eq!(tile.apply_changes().unwrap(), InstanceStatus::Active);
        assert_eq!(tile.host().status(), InstanceStatus::Active);

        let host = tile.host();
        for id in [SWITCH, STATUS, ACTION, PROGRESS, TERM, INFO] {
            assert!(host.reference_list().contains(&id), "{id}");
            assert!(host.is_subscribed(id), "{id}");
        }

        let full = last_push(host);
        assert_eq!(full["switchstate"], "on");
        assert_eq!(full["statetext"], "Washing");
        assert_eq!(full["statevalue"], "2");
        assert_eq!(full["actiontext"], "Rinse");
        assert_eq!(full["progressvalue"], 40);
        assert_eq!(full["progressterm"], 3723);
        assert_eq!(full["info1text"], "Temp: 40 °C");
    }

    #[test]
    fn missing_variable_degrades() {
        let tile = washer();
        tile.host().set_integer("ActionVariable", 19999);

        assert_eq!(
            tile.apply_changes().unwrap(),
            InstanceStatus::ConfigurationError
        );
        assert_eq!(tile.host().status(), InstanceStatus::ConfigurationError);
        assert!(tile.host().pushed().is_empty());
        // Registered before the missing one, not rolled back.
        assert!(tile.host().is_subscribed(STATUS));
        assert!(!tile.host().is_subscribed(PROGRESS));
    }

    #[test]
    fn missing_media_degrades_before_variables() {
        let tile = washer();
        tile.host().set_integer("StatusImageOn", IMAGE.value());

        assert_eq!(
            tile.apply_changes().unwrap(),
            InstanceStatus::ConfigurationError
        );
        assert!(tile.host().message_list().is_empty());
    }

    #[test]
    fn media_is_referenced_not_subscribed() {
        let tile = washer();
        tile.host().add_media(
            IMAGE,
            MediaInfo {
                media_type: MediaKind::Image,
                media_file: "on.png".to_string(),
            },
            vec![1, 2, 3],
        );
        tile.host().set_integer("StatusImageOn", IMAGE.value());

        assert_eq!(tile.apply_changes().unwrap(), InstanceStatus::Active);
        assert!(tile.host().reference_list().contains(&IMAGE));
        assert!(!tile.host().is_subscribed(IMAGE));
    }

    #[test]
    fn reapply_drops_removed_reference() {
        let tile = washer();
        tile.apply_changes().unwrap();
        tile.host().set_integer("ActionVariable", 1);
        tile.apply_changes().unwrap();
        tile.host().take_pushed();

        assert!(!tile.host().reference_list().contains(&ACTION));
        assert!(tile.host().set_value(ACTION, Value::from("Spin")).is_none());
        assert!(tile.host().pushed().is_empty());
    }

    #[test]
    fn degraded_instance_recovers_on_reapply() {
        let tile = washer();
        tile.host().set_integer("ActionVariable", 19999);
        tile.apply_changes().unwrap();
        tile.host().set_integer("ActionVariable", ACTION.value());
        assert_eq!(tile.apply_changes().unwrap(), InstanceStatus::Active);
    }
}

// ============================================================================
// Full Update
// ============================================================================

mod full_update {
    use super::*;

    #[test]
    fn progress_triple_all_or_nothing() {
        let tile = washer();
        tile.apply_changes().unwrap();
        let full = last_push(tile.host());
        let present = ["progressmin", "progressmax", "progressvalue"]
            .map(|key| full.get(key).is_some());
        assert_eq!(present, [true; 3]);

        tile.host().set_integer("ProgressVariable", 1);
        tile.apply_changes().unwrap();
        let full = last_push(tile.host());
        let present = ["progressmin", "progressmax", "progressvalue"]
            .map(|key| full.get(key).is_some());
        assert_eq!(present, [false; 3]);
        assert!(full["progresstext"].is_null());
    }

    #[test]
    fn countdown_formats() {
        let tile = washer();
        for (raw, seconds) in [
            (Value::from("01:02:03"), 3723),
            (Value::from("45"), 45),
            (Value::from("abc"), 0),
            (Value::Int(90), 90),
        ] {
            tile.host().set_value(TERM, raw);
            assert_eq!(tile.full_update().unwrap().progress_term, Some(seconds));
        }
    }

    #[test]
    fn missing_switch_is_null() {
        let tile = washer();
        tile.host().remove_variable(SWITCH);
        let json = serde_json::to_value(tile.full_update().unwrap()).unwrap();
        assert!(json["switchstate"].is_null());
    }
}

// ============================================================================
// Progress Range
// ============================================================================

mod range {
    use super::*;

    #[test]
    fn profile_beats_presentation() {
        let host = InMemoryHost::new();
        host.add_profile("P", Profile::with_bounds(0.0, 10.0));
        host.add_variable(
            PROGRESS,
            VariableInfo::new(VariableType::Float)
                .with_profile("P")
                .with_custom_presentation(
                    json!({"MIN": 0, "MAX": 1000}).as_object().unwrap().clone(),
                ),
            Value::Float(5.0),
        );
        assert_eq!(
            ProgressRange::resolve(&host, PROGRESS),
            ProgressRange::new(0.0, 10.0)
        );
    }

    #[test]
    fn defaults() {
        let host = InMemoryHost::new();
        host.add_variable(STATUS, VariableInfo::new(VariableType::String), Value::from("x"));
        host.add_variable(ACTION, VariableInfo::new(VariableType::Integer), Value::Int(1));

        for id in [STATUS, ACTION, ObjectId::new(99999)] {
            let range = ProgressRange::resolve(&host, id);
            assert_eq!(range, ProgressRange { min: 0.0, max: 100.0 });
        }
    }

    #[test]
    fn full_update_uses_resolved_range() {
        let tile = washer();
        tile.host().add_profile("Washer.Percent", Profile::with_bounds(0.0, 10.0));
        let full = serde_json::to_value(tile.full_update().unwrap()).unwrap();
        assert_eq!(full["progressmin"], 0.0);
        assert_eq!(full["progressmax"], 10.0);
    }
}

// ============================================================================
// Change Notifications
// ============================================================================

mod notifications {
    use super::*;

    fn active_washer() -> TileAdapter<InMemoryHost> {
        let tile = washer();
        tile.apply_changes().unwrap();
        tile.host().take_pushed();
        tile
    }

    #[test]
    fn unchanged_value_pushes_nothing() {
        let tile = active_washer();
        let note = tile.host().set_value(ACTION, Value::from("Rinse")).unwrap();
        assert!(!note.data.changed);
        tile.message_sink(&note).unwrap();
        assert!(tile.host().pushed().is_empty());
    }

    #[test]
    fn status_pushes_text_then_value() {
        let tile = active_washer();
        let note = tile.host().set_value(STATUS, Value::Int(3)).unwrap();
        tile.message_sink(&note).unwrap();
        assert_eq!(
            tile.host().pushed(),
            vec![r#"{"statetext":"3"}"#, r#"{"statevalue":"3"}"#]
        );
    }

    #[test]
    fn action_pushes_once() {
        let tile = active_washer();
        let note = tile.host().set_value(ACTION, Value::from("Spin")).unwrap();
        tile.message_sink(&note).unwrap();
        assert_eq!(tile.host().pushed(), vec![r#"{"actiontext":"Spin"}"#]);
    }

    #[test]
    fn countdown_pushes_seconds() {
        let tile = active_washer();
        let note = tile.host().set_value(TERM, Value::from("00:00:42")).unwrap();
        tile.message_sink(&note).unwrap();
        assert_eq!(tile.host().pushed(), vec![r#"{"progressterm":42}"#]);
    }

    #[test]
    fn raw_host_message_is_dispatched() {
        let tile = active_washer();
        let note = tile.host().set_value(ACTION, Value::from("Dry")).unwrap();
        let wire = serde_json::to_value(&note).unwrap();
        assert_eq!(wire["kind"], 10_603);

        let code = wire["kind"].as_i64().unwrap();
        tile.handle_message(note.timestamp, note.sender, code, note.data).unwrap();
        assert_eq!(tile.host().pushed(), vec![r#"{"actiontext":"Dry"}"#]);
    }

    #[test]
    fn pushes_reach_view_subscribers() {
        let tile = active_washer();
        let mut view = tile.host().view().subscribe();
        let note = tile.host().set_value(SWITCH, Value::Bool(false)).unwrap();
        tile.message_sink(&note).unwrap();
        assert_eq!(view.try_recv().unwrap(), r#"{"switchstate":"off"}"#);
    }
}

// ============================================================================
// User Actions
// ============================================================================

mod actions {
    use super::*;

    #[test]
    fn switch_round_trip_for_every_type() {
        let cases = [
            (0, VariableType::Boolean, "true", "false", Value::Bool(false)),
            (1, VariableType::Integer, "255", "0", Value::Int(0)),
            (2, VariableType::Float, "1.5", "0", Value::Float(0.0)),
            (3, VariableType::String, "ON", "OFF", Value::from("OFF")),
        ];
        for (switch_type, variable_type, on, off, initial) in cases {
            let tile = TileAdapter::create(InMemoryHost::new());
            let host = tile.host();
            host.add_variable(SWITCH, VariableInfo::new(variable_type), initial);
            host.set_integer("SwitchVariable", SWITCH.value());
            host.set_integer("SwitchType", switch_type);
            host.set_string("SwitchOn", on);
            host.set_string("SwitchOff", off);

            tile.request_action("SwitchState", Value::Bool(true)).unwrap();
            let state = tile.full_update().unwrap().switch_state;
            assert_eq!(state.map(|s| s.as_str()), Some("on"), "type {switch_type}");

            tile.request_action("SwitchState", Value::Bool(false)).unwrap();
            let state = tile.full_update().unwrap().switch_state;
            assert_eq!(state.map(|s| s.as_str()), Some("off"), "type {switch_type}");
        }
    }

    #[test]
    fn toggle_negates_switch_variable() {
        let tile = washer();
        tile.request_action("SwitchVariable", Value::Null).unwrap();
        assert_eq!(tile.host().value(SWITCH), Some(Value::Bool(false)));
    }

    #[test]
    fn change_status_lists_profile() {
        let tile = washer();
        tile.host().add_profile(
            "Washer.State",
            Profile {
                associations: vec![device_tile::host::Association {
                    value: Value::Int(2),
                    name: "Washing".to_string(),
                }],
                ..Profile::default()
            },
        );
        tile.host().add_variable(
            STATUS,
            VariableInfo::new(VariableType::Integer).with_profile("Washer.State"),
            Value::Int(2),
        );
        tile.request_action("ChangeStatus", Value::Int(STATUS.value()))
            .unwrap();

        let update = &tile.host().form_updates()[0];
        let list: serde_json::Value = serde_json::from_str(&update.value).unwrap();
        assert_eq!(
            list,
            json!([{"Name": "Washing", "Value": 2, "Image": "OFF", "Color": -1}])
        );
    }
}

// ============================================================================
// Rendering
// ============================================================================

mod render {
    use super::*;

    #[test]
    fn embeds_full_update_after_template() {
        let tile = washer().with_template("<div id=\"tile\"></div>");
        tile.host().set_string(
            "StatusProfile",
            r#"[{"Value": 2, "Image": "ON", "Color": 16711680, "Progress": true}]"#,
        );

        let html = tile.render().unwrap();
        assert!(html.starts_with("<div id=\"tile\"></div><script"));
        assert!(html.contains(r#"var imgs = {"2":"ON"};"#));
        assert!(html.contains(r##"var cols = {"2":"#FF0000"};"##));

        let start = html.find("handleMessage(").unwrap() + "handleMessage(".len();
        let end = html.rfind(");</script>").unwrap();
        let embedded: String = serde_json::from_str(&html[start..end]).unwrap();
        let full: serde_json::Value = serde_json::from_str(&embedded).unwrap();
        assert_eq!(full["actiontext"], "Rinse");
    }

    #[test]
    fn default_template_defines_handler() {
        let html = washer().render().unwrap();
        let handler = html.find("function handleMessage").unwrap();
        let call = html.find("<script>handleMessage(").unwrap();
        assert!(handler < call);
    }
}
