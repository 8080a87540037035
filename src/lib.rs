// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Salus Bridge - expose Salus iT600 thermostats as home-automation accessories.
//!
//! The bridge discovers thermostats through the Salus vendor service and
//! keeps one persistent thermostat accessory per device. Reads always fetch
//! the live device list; writes translate controller values into vendor
//! commands.
//!
//! # Supported Characteristics
//!
//! - **Heating state**: current (OFF/HEAT) and target (OFF/HEAT/AUTO)
//! - **Temperatures**: current and target, in Celsius
//! - **Display units**: fixed to Celsius
//! - **Status**: active unless the vendor reports the device offline
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use salus_bridge::accessory::{Characteristic, PlatformAccessory};
//! use salus_bridge::platform::{AccessoryHost, AccessoryRegistry, PlatformConfig};
//! use salus_bridge::DeviceId;
//!
//! struct Host;
//!
//! impl AccessoryHost for Host {
//!     fn register_accessories(
//!         &self,
//!         plugin: &str,
//!         platform: &str,
//!         accessories: &[Arc<PlatformAccessory>],
//!     ) {
//!         println!("{plugin}/{platform}: {} new", accessories.len());
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> salus_bridge::Result<()> {
//!     let config = PlatformConfig::from_json(r#"{
//!         "endpoint": "salus-gateway.local",
//!         "username": "user",
//!         "password": "secret"
//!     }"#)?;
//!
//!     let registry = AccessoryRegistry::from_config(&config, Arc::new(Host))?;
//!     registry.did_finish_launching().await?;
//!
//!     if let Some(thermostat) = registry.controller(&DeviceId::new("A1")) {
//!         let value = thermostat.get(Characteristic::CurrentTemperature).await?;
//!         println!("{} reads {value}", thermostat.device().name);
//!
//!         // HEAT
//!         thermostat.set_target_heating_cooling_state(1).await?;
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod accessory;
pub mod client;
pub mod device;
pub mod error;
pub mod event;
pub mod platform;
pub mod translate;
pub mod types;

pub use accessory::{AccessoryController, Characteristic, CharacteristicValue, PlatformAccessory};
pub use client::{SetModeRequest, SetTargetRequest, VendorClient};
#[cfg(feature = "http")]
pub use client::{HttpClient, HttpConfig};
pub use device::{Device, DeviceId};
pub use error::{Error, ParseError, ProtocolError, Result, ValueError};
pub use event::{AccessoryEvent, EventBus};
pub use platform::{AccessoryHost, AccessoryRegistry, PlatformConfig, ReconcileReport};
pub use types::{
    CurrentHeatingCoolingState, TargetHeatingCoolingState, Temperature, TemperatureDisplayUnits,
    VendorMode,
};
