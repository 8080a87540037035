// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory vendor client for unit tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::device::Device;
use crate::error::{Error, ProtocolError};

use super::{SetModeRequest, SetTargetRequest, VendorClient};

/// A command recorded by [`FakeClient`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Sent {
    Mode(SetModeRequest),
    Target(SetTargetRequest),
}

#[derive(Debug, Default)]
pub(crate) struct FakeClient {
    devices: Mutex<Vec<Device>>,
    sent: Mutex<Vec<Sent>>,
    fetches: AtomicUsize,
    failing: AtomicBool,
}

impl FakeClient {
    pub fn with_devices(devices: Vec<Device>) -> Self {
        Self {
            devices: Mutex::new(devices),
            ..Self::default()
        }
    }

    pub fn replace_devices(&self, devices: Vec<Device>) {
        *self.devices.lock() = devices;
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().clone()
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    fn check_failing(&self) -> Result<(), Error> {
        if self.failing.load(Ordering::SeqCst) {
            let message = "HTTP 503 - Service Unavailable".to_string();
            return Err(ProtocolError::RequestFailed(message).into());
        }
        Ok(())
    }
}

impl VendorClient for FakeClient {
    async fn devices(&self) -> Result<Vec<Device>, Error> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.check_failing()?;
        Ok(self.devices.lock().clone())
    }

    async fn set_mode(&self, request: SetModeRequest) -> Result<(), Error> {
        self.check_failing()?;
        self.sent.lock().push(Sent::Mode(request));
        Ok(())
    }

    async fn set_target(&self, request: SetTargetRequest) -> Result<(), Error> {
        self.check_failing()?;
        self.sent.lock().push(Sent::Target(request));
        Ok(())
    }
}
