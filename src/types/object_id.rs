// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Host object identifiers.

use std::fmt;

/// Lowest identifier the host hands out for user objects.
///
/// Identifiers below this value are reserved for system objects and are used
/// by the property store to mean "no object selected".
pub const MIN_OBJECT_ID: i64 = 10_000;

/// Identifier of a host object (variable, media, instance).
///
/// # Examples
///
/// ```
/// use device_tile::types::ObjectId;
///
/// assert!(!ObjectId::NONE.is_set());
/// assert!(!ObjectId::new(9_999).is_set());
/// assert!(ObjectId::new(12_345).is_set());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct ObjectId(i64);

impl ObjectId {
    /// The placeholder the property store uses for an unset reference.
    pub const NONE: Self = Self(1);

    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }

    /// Returns `true` if this identifier is a candidate user object.
    ///
    /// A set identifier still has to be validated against the host registry
    /// before use.
    #[must_use]
    pub const fn is_set(&self) -> bool {
        self.0 >= MIN_OBJECT_ID
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::NONE
    }
}

impl From<i64> for ObjectId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_is_set() {
        assert!(ObjectId::new(MIN_OBJECT_ID).is_set());
        assert!(!ObjectId::new(MIN_OBJECT_ID - 1).is_set());
        assert!(!ObjectId::new(-1).is_set());
    }

    #[test]
    fn default_is_unset() {
        assert_eq!(ObjectId::default(), ObjectId::NONE);
        assert!(!ObjectId::default().is_set());
    }

    #[test]
    fn serializes_as_plain_integer() {
        let json = serde_json::to_string(&ObjectId::new(54321)).unwrap();
        assert_eq!(json, "54321");
        let id: ObjectId = serde_json::from_str("12000").unwrap();
        assert_eq!(id.value(), 12000);
    }
}
