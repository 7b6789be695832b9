// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the tile adapter.
//!
//! A missing object reference at apply time is not an error: it moves the
//! instance into a degraded status instead. The types here cover the
//! failures that callers can actually act on: a broken property store, a
//! host that rejects a command, or a payload that cannot be encoded.

use thiserror::Error;

use crate::types::ObjectId;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// The instance configuration could not be read.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The host refused or failed an operation.
    #[error("host error: {0}")]
    Host(#[from] HostError),

    /// A payload could not be encoded as JSON.
    #[error("encode error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors related to the instance property store.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The property was never registered.
    #[error("unknown property: {0}")]
    MissingProperty(String),

    /// The property exists but holds another type.
    #[error("property {name} is not of type {expected}")]
    PropertyType {
        /// Name of the property.
        name: String,
        /// Type the caller asked for.
        expected: &'static str,
    },

    /// The stored status association list is not valid JSON.
    #[error("invalid status profile: {0}")]
    InvalidStatusProfile(#[source] serde_json::Error),
}

/// Errors reported by the host platform.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The referenced object does not exist.
    #[error("object {0} does not exist")]
    ObjectNotFound(ObjectId),

    /// The host rejected a value write.
    #[error("request for {id} rejected: {reason}")]
    CommandRejected {
        /// Target variable.
        id: ObjectId,
        /// Reason given by the host.
        reason: String,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
