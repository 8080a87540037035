// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Platform lifecycle: configuration, restore and discovery.
//!
//! The host runtime drives the platform through two hooks:
//!
//! - [`AccessoryRegistry::configure_accessory`] for each accessory it
//!   persisted on a previous run
//! - [`AccessoryRegistry::did_finish_launching`] once startup is complete
//!
//! New accessories are announced back to the host through [`AccessoryHost`].

mod config;
mod record;
mod registry;

use std::sync::Arc;

use crate::accessory::PlatformAccessory;

pub use config::PlatformConfig;
pub use record::AccessoryRecord;
pub use registry::{AccessoryRegistry, ReconcileReport};

/// Plugin identifier used when announcing accessories.
pub const PLUGIN_NAME: &str = "homebridge-salus-it600";

/// Platform identifier used when announcing accessories.
pub const PLATFORM_NAME: &str = "Salus-iT600";

/// The host runtime that persists and exposes accessories.
pub trait AccessoryHost {
    /// Announces accessories created during one discovery pass.
    ///
    /// Called at most once per pass and never with an empty slice.
    fn register_accessories(
        &self,
        plugin: &str,
        platform: &str,
        accessories: &[Arc<PlatformAccessory>],
    );
}

impl<T: AccessoryHost + ?Sized> AccessoryHost for Arc<T> {
    fn register_accessories(
        &self,
        plugin: &str,
        platform: &str,
        accessories: &[Arc<PlatformAccessory>],
    ) {
        (**self).register_accessories(plugin, platform, accessories);
    }
}
