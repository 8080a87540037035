// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Vendor device-control client.
//!
//! The bridge talks to the Salus service through the [`VendorClient`] trait:
//! one call to list devices and two commands. [`HttpClient`] implements it
//! over the service's HTTP API; tests substitute their own implementation.
//!
//! The client owns authentication and transport. It performs no retries;
//! a failed call is reported once to the caller.

#[cfg(test)]
pub(crate) mod fake;
#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::{HttpClient, HttpConfig};

use serde::Serialize;

use crate::device::{Device, DeviceId};
use crate::error::Error;
use crate::types::VendorMode;

/// Request to change a device's mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetModeRequest {
    /// Target device.
    pub id: DeviceId,
    /// Mode to apply.
    pub mode: VendorMode,
}

/// Request to change a device's setpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetTargetRequest {
    /// Target device.
    pub id: DeviceId,
    /// Setpoint in degrees Celsius.
    pub temperature: f64,
}

/// Trait for clients that can read and command Salus devices.
#[allow(async_fn_in_trait)]
pub trait VendorClient {
    /// Fetches the current list of devices.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload cannot be parsed.
    async fn devices(&self) -> Result<Vec<Device>, Error>;

    /// Sets the mode of one device. Resolves once the service accepts it.
    ///
    /// # Errors
    ///
    /// Returns an error if the command is rejected or cannot be sent.
    async fn set_mode(&self, request: SetModeRequest) -> Result<(), Error>;

    /// Sets the target temperature of one device. Resolves once accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if the command is rejected or cannot be sent.
    async fn set_target(&self, request: SetTargetRequest) -> Result<(), Error>;
}

impl<T: VendorClient> VendorClient for std::sync::Arc<T> {
    async fn devices(&self) -> Result<Vec<Device>, Error> {
        (**self).devices().await
    }

    async fn set_mode(&self, request: SetModeRequest) -> Result<(), Error> {
        (**self).set_mode(request).await
    }

    async fn set_target(&self, request: SetTargetRequest) -> Result<(), Error> {
        (**self).set_target(request).await
    }
}
