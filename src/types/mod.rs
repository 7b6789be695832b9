// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types shared by the configuration, the host seam and the payloads.
//!
//! # Types
//!
//! - [`ObjectId`] - Host object reference, unset below [`MIN_OBJECT_ID`]
//! - [`Value`] - Dynamically typed variable value
//! - [`SwitchType`] / [`SwitchState`] - Switch literal coercion and read-back
//! - [`HostColor`] - Integer `0xRRGGBB` color with a "none" sentinel
//! - [`countdown_seconds`] - `HH:MM:SS` or loose integer countdown parsing

mod color;
mod countdown;
mod object_id;
mod switch;
mod value;

pub use color::HostColor;
pub use countdown::{countdown_seconds, parse_hms};
pub use object_id::{MIN_OBJECT_ID, ObjectId};
pub use switch::{SwitchState, SwitchType};
pub use value::{Value, json_number, leading_float, leading_int, parse_bool_literal};
