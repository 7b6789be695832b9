// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device Tile - a status tile adapter for home-automation dashboards.
//!
//! A tile shows one appliance at a glance: an on/off switch, a status text
//! with an operator-chosen image and color, the current action, a progress
//! bar with a countdown, and up to three extra info lines. Every element is
//! fed by a host variable; the tile itself stores nothing but references.
//!
//! # Features
//!
//! - **Full render**: one HTML document with the current state embedded
//! - **Live updates**: single-field JSON pushes when a source variable changes
//! - **Actions**: switch on/off, toggle a variable, rebuild the status table
//! - **Range resolution**: progress bounds from profiles, presentations or
//!   object visualizations
//!
//! # Quick Start
//!
//! ```
//! use device_tile::TileAdapter;
//! use device_tile::host::{InMemoryHost, VariableInfo, VariableType};
//! use device_tile::types::{ObjectId, Value};
//!
//! fn main() -> device_tile::Result<()> {
//!     let host = InMemoryHost::new();
//!     let action = ObjectId::new(12345);
//!     host.add_variable(action, VariableInfo::new(VariableType::String), Value::from("Rinse"));
//!
//!     let tile = TileAdapter::create(host);
//!     tile.host().set_integer("ActionVariable", action.value());
//!     tile.apply_changes()?;
//!
//!     // A change pushes only the affected field.
//!     tile.host().take_pushed();
//!     if let Some(note) = tile.host().set_value(action, Value::from("Spin")) {
//!         tile.message_sink(&note)?;
//!     }
//!     assert_eq!(tile.host().pushed(), vec![r#"{"actiontext":"Spin"}"#]);
//!
//!     let html = tile.render()?;
//!     assert!(html.contains("handleMessage("));
//!     Ok(())
//! }
//! ```
//!
//! # Hosts
//!
//! The adapter talks to the host only through [`host::PropertyStore`] and
//! [`host::HostRegistry`]. [`host::InMemoryHost`] implements both and
//! records every push, command and status change.

pub mod config;
pub mod error;
pub mod host;
pub mod payload;
pub mod range;
pub mod tile;
pub mod types;

pub use config::TileConfig;
pub use error::{ConfigError, Error, HostError, Result};
pub use host::{HostRegistry, InMemoryHost, InstanceStatus, PropertyStore};
pub use payload::{Field, FullUpdate, PartialUpdate};
pub use range::ProgressRange;
pub use tile::{TileAction, TileAdapter};
pub use types::{HostColor, ObjectId, SwitchState, SwitchType, Value};
