// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Locating a device inside a freshly fetched device list.

use crate::error::Error;

use super::{Device, DeviceId};

/// Returns the first device in `devices` whose id equals `id`.
///
/// The list is searched linearly; it is not assumed to be sorted.
#[must_use]
pub fn locate<'a>(devices: &'a [Device], id: &DeviceId) -> Option<&'a Device> {
    devices.iter().find(|device| device.id == *id)
}

/// Like [`locate`], but takes ownership of the matching snapshot.
///
/// # Errors
///
/// Returns `Error::DeviceNotFound` when the id is absent from the list.
pub fn take(devices: Vec<Device>, id: &DeviceId) -> Result<Device, Error> {
    devices
        .into_iter()
        .find(|device| device.id == *id)
        .ok_or_else(|| Error::DeviceNotFound(id.clone()))
}
