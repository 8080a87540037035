// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Salus device snapshots and lookup.
//!
//! A [`Device`] is a read-only, point-in-time view fetched from the vendor
//! service. Nothing in this crate caches snapshots between requests; every
//! read fetches a new list and uses [`locate`] to find the device it needs.
//!
//! # Examples
//!
//! ```
//! use salus_bridge::device::{self, Device, DeviceId};
//!
//! let devices = vec![Device::new("A1", "Lounge"), Device::new("B2", "Bedroom")];
//! let bedroom = device::locate(&devices, &DeviceId::new("B2"));
//! assert_eq!(bedroom.map(|d| d.name.as_str()), Some("Bedroom"));
//! ```

mod id;
mod snapshot;
mod telemetry;

pub use id::DeviceId;
pub use snapshot::Device;
pub use telemetry::{locate, take};
