// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fan-out of registry lifecycle events.

use tokio::sync::broadcast;

use super::AccessoryEvent;

/// Events buffered per subscriber. One discovery pass emits one event per
/// device, so this covers a large installation without lagging.
const LIFECYCLE_BACKLOG: usize = 64;

/// Broadcast channel carrying [`AccessoryEvent`]s out of the registry.
///
/// Subscribers only see events published after they subscribe. A subscriber
/// more than the backlog behind receives `RecvError::Lagged` and continues
/// from the oldest retained event.
#[derive(Debug)]
pub struct EventBus {
    sender: broadcast::Sender<AccessoryEvent>,
}

impl EventBus {
    /// Creates a bus with the default backlog.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(LIFECYCLE_BACKLOG);
        Self { sender }
    }

    /// Subscribes to lifecycle events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<AccessoryEvent> {
        self.sender.subscribe()
    }

    /// Publishes a lifecycle event. With no subscribers the event is dropped.
    pub fn publish(&self, event: AccessoryEvent) {
        if self.sender.send(event).is_err() {
            tracing::trace!("No accessory event subscribers");
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
