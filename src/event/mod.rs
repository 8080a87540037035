// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Accessory lifecycle notifications.
//!
//! The registry publishes an [`AccessoryEvent`] for every accessory it
//! restores, registers or rebinds. Events are delivered over a tokio
//! broadcast channel wrapped by [`EventBus`].

mod accessory_event;
mod event_bus;

pub use accessory_event::AccessoryEvent;
pub use event_bus::EventBus;
