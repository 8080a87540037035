// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Persistent accessory objects owned by the host runtime.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::device::{Device, DeviceId};

/// Namespace for deriving accessory UUIDs from Salus device ids.
const ACCESSORY_NAMESPACE: Uuid = Uuid::from_u128(0x5a1c_5e60_7a4b_4c1e_9d3f_1b7e_2c60_0a11);

/// Stable identity of an accessory.
///
/// Derived deterministically from the device id, so the same thermostat maps
/// to the same accessory across restarts.
///
/// # Examples
///
/// ```
/// use salus_bridge::accessory::AccessoryUuid;
/// use salus_bridge::device::DeviceId;
///
/// let a = AccessoryUuid::for_device(&DeviceId::new("A1"));
/// let b = AccessoryUuid::for_device(&DeviceId::new("A1"));
/// assert_eq!(a, b);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessoryUuid(Uuid);

impl AccessoryUuid {
    /// Derives the accessory identity for a device.
    #[must_use]
    pub fn for_device(id: &DeviceId) -> Self {
        Self(Uuid::new_v5(&ACCESSORY_NAMESPACE, id.as_str().as_bytes()))
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Debug for AccessoryUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let short = &self.0.to_string()[..8];
        write!(f, "AccessoryUuid({short}...)")
    }
}

impl fmt::Display for AccessoryUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Values published on the accessory information service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessoryInformation {
    /// Manufacturer name.
    pub manufacturer: String,
    /// Model name.
    pub model: String,
    /// Serial number (the vendor device id).
    pub serial_number: String,
}

impl AccessoryInformation {
    /// Manufacturer reported for every thermostat.
    pub const MANUFACTURER: &'static str = "Salus";
    /// Model reported for every thermostat.
    pub const MODEL: &'static str = "iT-600";

    /// Builds the information values for a device.
    #[must_use]
    pub fn for_device(id: &DeviceId) -> Self {
        Self {
            manufacturer: Self::MANUFACTURER.to_string(),
            model: Self::MODEL.to_string(),
            serial_number: id.to_string(),
        }
    }
}

/// Context persisted alongside an accessory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessoryContext {
    /// The device snapshot captured when the accessory was created.
    pub device: Device,
}

/// The persistent, controller-facing object representing one thermostat.
///
/// Created once per device and handed to the host runtime, which persists it
/// and hands it back through the restore hook on the next start. Its identity
/// never changes after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformAccessory {
    uuid: AccessoryUuid,
    display_name: String,
    context: AccessoryContext,
}

impl PlatformAccessory {
    /// Creates a new accessory for a freshly discovered device.
    #[must_use]
    pub fn new(device: &Device) -> Self {
        Self {
            uuid: AccessoryUuid::for_device(&device.id),
            display_name: device.name.clone(),
            context: AccessoryContext {
                device: device.clone(),
            },
        }
    }

    /// Returns the accessory identity.
    #[must_use]
    pub fn uuid(&self) -> AccessoryUuid {
        self.uuid
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the persisted context.
    #[must_use]
    pub fn context(&self) -> &AccessoryContext {
        &self.context
    }

    /// Returns the id of the device this accessory represents.
    #[must_use]
    pub fn device_id(&self) -> &DeviceId {
        &self.context.device.id
    }
}
