// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Accessory lifecycle events.

use crate::accessory::AccessoryUuid;
use crate::device::DeviceId;

/// Events emitted by the accessory registry.
///
/// # Examples
///
/// ```
/// use salus_bridge::accessory::AccessoryUuid;
/// use salus_bridge::device::DeviceId;
/// use salus_bridge::event::AccessoryEvent;
///
/// let device_id = DeviceId::new("A1");
/// let uuid = AccessoryUuid::for_device(&device_id);
/// let event = AccessoryEvent::registered(device_id.clone(), uuid);
///
/// assert_eq!(event.device_id(), &device_id);
/// assert!(event.is_new());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessoryEvent {
    /// A persisted accessory was handed back by the host before discovery.
    Restored {
        /// The device the accessory represents.
        device_id: DeviceId,
        /// The accessory identity.
        uuid: AccessoryUuid,
    },

    /// A device was seen for the first time and a new accessory announced.
    Registered {
        /// The discovered device.
        device_id: DeviceId,
        /// The new accessory identity.
        uuid: AccessoryUuid,
    },

    /// A known device was rediscovered and its handlers rebuilt.
    Rebound {
        /// The rediscovered device.
        device_id: DeviceId,
        /// The unchanged accessory identity.
        uuid: AccessoryUuid,
    },
}

impl AccessoryEvent {
    /// Returns the device ID associated with this event.
    #[must_use]
    pub fn device_id(&self) -> &DeviceId {
        match self {
            Self::Restored { device_id, .. }
            | Self::Registered { device_id, .. }
            | Self::Rebound { device_id, .. } => device_id,
        }
    }

    /// Returns the accessory identity associated with this event.
    #[must_use]
    pub fn uuid(&self) -> AccessoryUuid {
        match self {
            Self::Restored { uuid, .. }
            | Self::Registered { uuid, .. }
            | Self::Rebound { uuid, .. } => *uuid,
        }
    }

    /// Returns `true` if a new accessory was created.
    #[must_use]
    pub fn is_new(&self) -> bool {
        matches!(self, Self::Registered { .. })
    }

    /// Creates a restored event.
    #[must_use]
    pub fn restored(device_id: DeviceId, uuid: AccessoryUuid) -> Self {
        Self::Restored { device_id, uuid }
    }

    /// Creates a registered event.
    #[must_use]
    pub fn registered(device_id: DeviceId, uuid: AccessoryUuid) -> Self {
        Self::Registered { device_id, uuid }
    }

    /// Creates a rebound event.
    #[must_use]
    pub fn rebound(device_id: DeviceId, uuid: AccessoryUuid) -> Self {
        Self::Rebound { device_id, uuid }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> (DeviceId, AccessoryUuid) {
        let id = DeviceId::new("A1");
        let uuid = AccessoryUuid::for_device(&id);
        (id, uuid)
    }

    #[test]
    fn accessors_cover_every_variant() {
        let (id, uuid) = ids();
        for event in [
            AccessoryEvent::restored(id.clone(), uuid),
            AccessoryEvent::registered(id.clone(), uuid),
            AccessoryEvent::rebound(id.clone(), uuid),
        ] {
            assert_eq!(event.device_id(), &id);
            assert_eq!(event.uuid(), uuid);
        }
    }

    #[test]
    fn only_registered_is_new() {
        let (id, uuid) = ids();
        assert!(AccessoryEvent::registered(id.clone(), uuid).is_new());
        assert!(!AccessoryEvent::rebound(id.clone(), uuid).is_new());
        assert!(!AccessoryEvent::restored(id, uuid).is_new());
    }
}
