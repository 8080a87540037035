// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Translation between controller heating/cooling states and vendor modes.
//!
//! The mapping is lossy in both directions. Every function here is total:
//! inputs outside the expected vocabulary fall through to a fixed default
//! instead of producing an error.
//!
//! # Examples
//!
//! ```
//! use salus_bridge::translate;
//! use salus_bridge::types::{TargetHeatingCoolingState, VendorMode};
//!
//! assert_eq!(translate::to_vendor_mode(1), VendorMode::High);
//! assert_eq!(
//!     translate::target_state_from_telemetry(false, "AUTO_HEAT"),
//!     TargetHeatingCoolingState::Auto
//! );
//! assert!(!translate::active_status_from_mode("OFFLINE"));
//! ```

use crate::types::{CurrentHeatingCoolingState, TargetHeatingCoolingState, VendorMode};

/// Vendor mode prefix shared by every automatic schedule variant.
const AUTO_PREFIX: &str = "AUTO";

/// Vendor mode reported for devices the gateway cannot reach.
const OFFLINE_MODE: &str = "OFFLINE";

/// Maps a raw target state characteristic value to a vendor mode.
///
/// Any value that is not `HEAT` or `AUTO` (including `COOL` and values
/// outside the vocabulary) maps to [`VendorMode::Low`].
#[must_use]
pub fn to_vendor_mode(raw_target: u8) -> VendorMode {
    TargetHeatingCoolingState::from_raw(raw_target).map_or(VendorMode::Low, VendorMode::from)
}

impl From<TargetHeatingCoolingState> for VendorMode {
    fn from(target: TargetHeatingCoolingState) -> Self {
        match target {
            TargetHeatingCoolingState::Heat => Self::High,
            TargetHeatingCoolingState::Auto => Self::Auto,
            TargetHeatingCoolingState::Off | TargetHeatingCoolingState::Cool => Self::Low,
        }
    }
}

/// Derives the observed heating state from the device's heating flag.
#[must_use]
pub fn current_state_from_telemetry(heating: bool) -> CurrentHeatingCoolingState {
    if heating {
        CurrentHeatingCoolingState::Heat
    } else {
        CurrentHeatingCoolingState::Off
    }
}

/// Derives the controller-facing target state from raw telemetry.
///
/// Active heating is reported as `HEAT` even while an automatic schedule is
/// running; only an idle device on a schedule reports `AUTO`.
#[must_use]
pub fn target_state_from_telemetry(heating: bool, mode: &str) -> TargetHeatingCoolingState {
    if heating {
        TargetHeatingCoolingState::Heat
    } else if mode.starts_with(AUTO_PREFIX) {
        TargetHeatingCoolingState::Auto
    } else {
        TargetHeatingCoolingState::Off
    }
}

/// Returns `false` only for the exact `OFFLINE` mode string.
#[must_use]
pub fn active_status_from_mode(mode: &str) -> bool {
    mode != OFFLINE_MODE
}
