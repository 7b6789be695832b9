// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Broadcast bus for payloads pushed to rendered tiles.

use tokio::sync::broadcast;

/// Default channel capacity for the view bus.
const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Fans out JSON payloads to every open view of a tile.
///
/// Each subscriber gets its own copy of each payload. A slow subscriber
/// that falls more than the capacity behind loses the oldest payloads
/// (`RecvError::Lagged`); a full update heals that.
///
/// # Examples
///
/// ```
/// use device_tile::host::ViewBus;
///
/// let bus = ViewBus::new();
/// let mut rx = bus.subscribe();
///
/// bus.publish(r#"{"switchstate":"on"}"#);
/// assert_eq!(rx.try_recv().unwrap(), r#"{"switchstate":"on"}"#);
/// ```
#[derive(Debug)]
pub struct ViewBus {
    sender: broadcast::Sender<String>,
}

impl ViewBus {
    /// Creates a new bus with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Creates a new bus with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribes a view. Only payloads published afterwards are received.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.sender.subscribe()
    }

    /// Publishes a payload to all views.
    ///
    /// Returns the number of views that received it; zero when no view is
    /// open, which is not an error.
    pub fn publish(&self, payload: &str) -> usize {
        self.sender.send(payload.to_string()).unwrap_or(0)
    }
}

impl Default for ViewBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ViewBus {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}
