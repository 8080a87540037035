// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types shared by the controller and vendor sides of the bridge.

mod mode;
mod temperature;

pub use mode::{
    CurrentHeatingCoolingState, TargetHeatingCoolingState, TemperatureDisplayUnits, VendorMode,
};
pub use temperature::Temperature;
