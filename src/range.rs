// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Progress bar range resolution.
//!
//! How a variable's bounds are declared depends on how it was set up in the
//! host: through a profile, an operator presentation, a referenced shared
//! presentation, or the owning module's visualization metadata. The
//! resolver tries these sources in a fixed priority order and takes the
//! first one that yields a numeric pair:
//!
//! 1. Active profile (custom over standard) with both bounds declared
//! 2. Custom presentation block with numeric `MIN`/`MAX`
//! 3. Presentations referenced by the block's `PRESENTATION`, `OPTIONS` or
//!    `TEMPLATE` entries
//! 4. Object visualization: known min/max field spellings, then the extremes
//!    of its value mappings
//! 5. `0..100`
//!
//! Only integer and float variables are resolved; everything else gets the
//! default immediately.

use serde_json::{Map, Value as Json};

use crate::host::HostRegistry;
use crate::types::{ObjectId, json_number};

/// Presentation reference keys of a custom presentation block, in lookup
/// order.
const PRESENTATION_KEYS: [&str; 3] = ["PRESENTATION", "OPTIONS", "TEMPLATE"];

/// Min field spellings found in object visualizations, in priority order.
const MIN_FIELDS: [&str; 6] = [
    "MinValue",
    "MinimalerWert",
    "Minimum",
    "Min",
    "minValue",
    "min",
];

/// Max field spellings found in object visualizations, in priority order.
const MAX_FIELDS: [&str; 6] = [
    "MaxValue",
    "MaximalerWert",
    "Maximum",
    "Max",
    "maxValue",
    "max",
];

/// Bounds of the progress bar.
///
/// # Examples
///
/// ```
/// use device_tile::host::{InMemoryHost, Profile, VariableInfo, VariableType};
/// use device_tile::range::ProgressRange;
/// use device_tile::types::{ObjectId, Value};
///
/// let host = InMemoryHost::new();
/// host.add_profile("Washer.Percent", Profile::with_bounds(0.0, 10.0));
/// host.add_variable(
///     ObjectId::new(12345),
///     VariableInfo::new(VariableType::Integer).with_profile("Washer.Percent"),
///     Value::Int(4),
/// );
///
/// let range = ProgressRange::resolve(&host, ObjectId::new(12345));
/// assert_eq!(range, ProgressRange::new(0.0, 10.0));
///
/// // Unknown variables fall back to 0..100.
/// assert_eq!(ProgressRange::resolve(&host, ObjectId::new(99999)), ProgressRange::DEFAULT);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProgressRange {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

impl ProgressRange {
    /// Range used when no metadata declares one.
    pub const DEFAULT: Self = Self::new(0.0, 100.0);

    /// Creates a range.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Resolves the range of a variable from host metadata.
    pub fn resolve<H: HostRegistry + ?Sized>(host: &H, variable: ObjectId) -> Self {
        let Some(info) = host.variable(variable) else {
            return Self::DEFAULT;
        };
        if !info.variable_type.is_numeric() {
            return Self::DEFAULT;
        }

        if let Some(range) = info
            .active_profile()
            .and_then(|name| host.profile(name))
            .and_then(|profile| Some(Self::new(profile.min_value?, profile.max_value?)))
        {
            tracing::trace!(variable = %variable, ?range, "Range from profile");
            return range;
        }

        let custom = &info.variable_custom_presentation;
        if let Some(range) = bounds_pair(custom, "MIN", "MAX") {
            tracing::trace!(variable = %variable, ?range, "Range from custom presentation");
            return range;
        }
        for key in PRESENTATION_KEYS {
            let Some(reference) = custom.get(key).and_then(Json::as_str) else {
                continue;
            };
            if reference.is_empty() {
                continue;
            }
            if let Some(range) = host.presentation(reference).as_ref().and_then(presentation_bounds) {
                tracing::trace!(variable = %variable, presentation = reference, ?range, "Range from presentation");
                return range;
            }
        }

        if host.object_exists(variable) {
            if let Some(range) = host
                .object_visualization(variable)
                .as_deref()
                .and_then(visualization_bounds)
            {
                tracing::trace!(variable = %variable, ?range, "Range from object visualization");
                return range;
            }
        }

        Self::DEFAULT
    }
}

impl Default for ProgressRange {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Reads a numeric pair from two keys of a metadata object.
fn bounds_pair(data: &Map<String, Json>, min: &str, max: &str) -> Option<ProgressRange> {
    let min = data.get(min).and_then(json_number)?;
    let max = data.get(max).and_then(json_number)?;
    Some(ProgressRange::new(min, max))
}

/// Extracts bounds from a shared presentation, which may arrive JSON-encoded
/// as a string.
fn presentation_bounds(presentation: &Json) -> Option<ProgressRange> {
    let decoded;
    let presentation = match presentation {
        Json::String(s) => {
            decoded = serde_json::from_str::<Json>(s).ok()?;
            &decoded
        }
        other => other,
    };
    let data = presentation.as_object()?;
    bounds_pair(data, "MinValue", "MaxValue").or_else(|| bounds_pair(data, "MIN", "MAX"))
}

/// Extracts bounds from an object visualization JSON document.
fn visualization_bounds(visualization: &str) -> Option<ProgressRange> {
    let visualization: Json = serde_json::from_str(visualization).ok()?;
    let data = visualization.as_object()?;

    let first_number = |fields: &[&str]| {
        fields
            .iter()
            .find_map(|f| data.get(*f).and_then(json_number))
    };
    if let (Some(min), Some(max)) = (first_number(&MIN_FIELDS), first_number(&MAX_FIELDS)) {
        return Some(ProgressRange::new(min, max));
    }

    let mut values = data
        .get("ValueMappings")?
        .as_array()?
        .iter()
        .filter_map(|mapping| mapping.get("Value").and_then(json_number));
    let first = values.next()?;
    let (min, max) = values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
    Some(ProgressRange::new(min, max))
}
