// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Thermostat accessories exposed to the host runtime.
//!
//! Each Salus device is represented by two objects:
//!
//! - a [`PlatformAccessory`]: the persistent object the host stores and
//!   restores across restarts; its identity is fixed at creation
//! - an [`AccessoryController`]: the per-run handler set that answers
//!   characteristic reads and writes by talking to the vendor client
//!
//! The characteristic surface and its published constraints are described by
//! [`Characteristic`] and [`CharacteristicProps`].

mod characteristic;
mod controller;
mod platform_accessory;

pub use characteristic::{Characteristic, CharacteristicProps, CharacteristicValue};
pub use controller::AccessoryController;
pub use platform_accessory::{
    AccessoryContext, AccessoryInformation, AccessoryUuid, PlatformAccessory,
};
