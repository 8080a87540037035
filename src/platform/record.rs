// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Registry entry for one device.

use std::fmt;
use std::sync::Arc;

use crate::accessory::{AccessoryController, PlatformAccessory};

/// The registry's view of one device: its persistent accessory and, once
/// discovery has run, the controller bound to it.
///
/// Records are replaced wholesale on rebinding; a record is never mutated
/// after it is inserted.
pub struct AccessoryRecord<C> {
    accessory: Arc<PlatformAccessory>,
    controller: Option<Arc<AccessoryController<C>>>,
}

impl<C> AccessoryRecord<C> {
    /// A restored accessory waiting for discovery to bind it.
    pub(crate) fn restored(accessory: Arc<PlatformAccessory>) -> Self {
        Self {
            accessory,
            controller: None,
        }
    }

    /// An accessory with its controller bound.
    pub(crate) fn bound(controller: AccessoryController<C>) -> Self {
        Self {
            accessory: Arc::clone(controller.accessory()),
            controller: Some(Arc::new(controller)),
        }
    }

    /// Returns the persistent accessory.
    #[must_use]
    pub fn accessory(&self) -> &Arc<PlatformAccessory> {
        &self.accessory
    }

    /// Returns the bound controller, if discovery has run for this device.
    #[must_use]
    pub fn controller(&self) -> Option<&Arc<AccessoryController<C>>> {
        self.controller.as_ref()
    }

    /// Returns `true` if a controller is bound.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.controller.is_some()
    }
}

impl<C> Clone for AccessoryRecord<C> {
    fn clone(&self) -> Self {
        Self {
            accessory: Arc::clone(&self.accessory),
            controller: self.controller.clone(),
        }
    }
}

impl<C> fmt::Debug for AccessoryRecord<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessoryRecord")
            .field("uuid", &self.accessory.uuid())
            .field("device_id", self.accessory.device_id())
            .field("bound", &self.is_bound())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fake::FakeClient;
    use crate::device::Device;

    #[test]
    fn restored_record_is_unbound() {
        let accessory = Arc::new(PlatformAccessory::new(&Device::new("A1", "Lounge")));
        let record: AccessoryRecord<FakeClient> = AccessoryRecord::restored(accessory);
        assert!(!record.is_bound());
        assert!(record.controller().is_none());
    }

    #[test]
    fn bound_record_shares_the_controller_accessory() {
        let device = Device::new("A1", "Lounge");
        let accessory = Arc::new(PlatformAccessory::new(&device));
        let controller =
            AccessoryController::new(Arc::clone(&accessory), Arc::new(FakeClient::default()), device);

        let record = AccessoryRecord::bound(controller);
        assert!(record.is_bound());
        assert!(Arc::ptr_eq(record.accessory(), &accessory));
    }

    #[test]
    fn debug_shows_identity() {
        let accessory = Arc::new(PlatformAccessory::new(&Device::new("A1", "Lounge")));
        let record: AccessoryRecord<FakeClient> = AccessoryRecord::restored(accessory);
        let debug = format!("{record:?}");
        assert!(debug.contains("DeviceId(A1)"));
        assert!(debug.contains("bound: false"));
    }
}
