// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Heating/cooling vocabularies on both sides of the bridge.
//!
//! The controller side speaks in numeric characteristic values
//! ([`TargetHeatingCoolingState`], [`CurrentHeatingCoolingState`],
//! [`TemperatureDisplayUnits`]); the vendor side speaks in mode strings
//! ([`VendorMode`]).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Controller-requested climate mode.
///
/// The numeric encoding follows the host characteristic. `Cool` exists in the
/// host vocabulary but is never published as a valid value for a heat-only
/// thermostat.
///
/// # Examples
///
/// ```
/// use salus_bridge::types::TargetHeatingCoolingState;
///
/// assert_eq!(TargetHeatingCoolingState::Auto.as_raw(), 3);
/// assert_eq!(
///     TargetHeatingCoolingState::from_raw(1),
///     Some(TargetHeatingCoolingState::Heat)
/// );
/// assert_eq!(TargetHeatingCoolingState::from_raw(9), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetHeatingCoolingState {
    /// Heating off.
    Off,
    /// Heat to the target temperature.
    Heat,
    /// Cool to the target temperature.
    Cool,
    /// Follow the automatic schedule.
    Auto,
}

impl TargetHeatingCoolingState {
    /// The values a heat-only thermostat advertises.
    pub const PUBLISHED: [Self; 3] = [Self::Off, Self::Heat, Self::Auto];

    /// Returns the raw characteristic value.
    #[must_use]
    pub const fn as_raw(self) -> u8 {
        match self {
            Self::Off => 0,
            Self::Heat => 1,
            Self::Cool => 2,
            Self::Auto => 3,
        }
    }

    /// Decodes a raw characteristic value.
    #[must_use]
    pub const fn from_raw(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Off),
            1 => Some(Self::Heat),
            2 => Some(Self::Cool),
            3 => Some(Self::Auto),
            _ => None,
        }
    }
}

impl fmt::Display for TargetHeatingCoolingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Off => "OFF",
            Self::Heat => "HEAT",
            Self::Cool => "COOL",
            Self::Auto => "AUTO",
        };
        f.write_str(name)
    }
}

impl TryFrom<u8> for TargetHeatingCoolingState {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_raw(value).ok_or(ValueError::InvalidTargetState(value))
    }
}

/// Observed heating state of a thermostat.
///
/// There is no automatic value: a thermostat is either calling for heat or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CurrentHeatingCoolingState {
    /// Not heating.
    Off,
    /// Actively heating.
    Heat,
}

impl CurrentHeatingCoolingState {
    /// Returns the raw characteristic value.
    #[must_use]
    pub const fn as_raw(self) -> u8 {
        match self {
            Self::Off => 0,
            Self::Heat => 1,
        }
    }
}

impl fmt::Display for CurrentHeatingCoolingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Off => "OFF",
            Self::Heat => "HEAT",
        })
    }
}

/// Settable mode of a Salus thermostat.
///
/// `OFFLINE` is reported by the vendor in the same field but is a status,
/// not a mode that can be set, so it has no variant here.
///
/// # Examples
///
/// ```
/// use salus_bridge::types::VendorMode;
///
/// assert_eq!(VendorMode::High.as_str(), "HIGH");
/// assert_eq!("auto".parse::<VendorMode>().unwrap(), VendorMode::Auto);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VendorMode {
    /// Frost protection / off.
    Low,
    /// Manual heating.
    High,
    /// Follow the programmed schedule.
    Auto,
}

impl VendorMode {
    /// Returns the vendor wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::High => "HIGH",
            Self::Auto => "AUTO",
        }
    }
}

impl fmt::Display for VendorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VendorMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "LOW" => Ok(Self::Low),
            "HIGH" => Ok(Self::High),
            "AUTO" => Ok(Self::Auto),
            _ => Err(ValueError::InvalidVendorMode(s.to_string())),
        }
    }
}

impl Serialize for VendorMode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for VendorMode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Units the controller should display temperatures in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TemperatureDisplayUnits {
    /// Degrees Celsius.
    #[default]
    Celsius,
    /// Degrees Fahrenheit.
    Fahrenheit,
}

impl TemperatureDisplayUnits {
    /// Returns the raw characteristic value.
    #[must_use]
    pub const fn as_raw(self) -> u8 {
        match self {
            Self::Celsius => 0,
            Self::Fahrenheit => 1,
        }
    }
}

impl TryFrom<u8> for TemperatureDisplayUnits {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Celsius),
            1 => Ok(Self::Fahrenheit),
            _ => Err(ValueError::InvalidDisplayUnits(value)),
        }
    }
}
