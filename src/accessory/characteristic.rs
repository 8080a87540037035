// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Characteristic surface exposed by each thermostat accessory.

use std::fmt;

use crate::types::TargetHeatingCoolingState;

/// A characteristic the host runtime can read or write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Characteristic {
    /// Accessory manufacturer (information service).
    Manufacturer,
    /// Accessory model (information service).
    Model,
    /// Accessory serial number (information service).
    SerialNumber,
    /// Observed heating state.
    CurrentHeatingCoolingState,
    /// Requested climate mode.
    TargetHeatingCoolingState,
    /// Measured temperature.
    CurrentTemperature,
    /// Setpoint temperature.
    TargetTemperature,
    /// Display units.
    TemperatureDisplayUnits,
    /// Whether the device is reachable.
    StatusActive,
}

impl Characteristic {
    /// Every characteristic on the thermostat surface.
    pub const ALL: [Self; 9] = [
        Self::Manufacturer,
        Self::Model,
        Self::SerialNumber,
        Self::CurrentHeatingCoolingState,
        Self::TargetHeatingCoolingState,
        Self::CurrentTemperature,
        Self::TargetTemperature,
        Self::TemperatureDisplayUnits,
        Self::StatusActive,
    ];

    /// Returns the characteristic name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Manufacturer => "Manufacturer",
            Self::Model => "Model",
            Self::SerialNumber => "SerialNumber",
            Self::CurrentHeatingCoolingState => "CurrentHeatingCoolingState",
            Self::TargetHeatingCoolingState => "TargetHeatingCoolingState",
            Self::CurrentTemperature => "CurrentTemperature",
            Self::TargetTemperature => "TargetTemperature",
            Self::TemperatureDisplayUnits => "TemperatureDisplayUnits",
            Self::StatusActive => "StatusActive",
        }
    }

    /// Returns `true` if the host may write this characteristic.
    #[must_use]
    pub const fn is_writable(&self) -> bool {
        matches!(
            self,
            Self::TargetHeatingCoolingState | Self::TargetTemperature | Self::TemperatureDisplayUnits
        )
    }

    /// Returns the published constraints for this characteristic.
    #[must_use]
    pub const fn props(&self) -> CharacteristicProps {
        match self {
            Self::CurrentTemperature => CharacteristicProps::CURRENT_TEMPERATURE,
            Self::TargetTemperature => CharacteristicProps::TARGET_TEMPERATURE,
            Self::TargetHeatingCoolingState => CharacteristicProps::TARGET_STATE,
            _ => CharacteristicProps::NONE,
        }
    }
}

impl fmt::Display for Characteristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value read from or written to a characteristic.
#[derive(Debug, Clone, PartialEq)]
pub enum CharacteristicValue {
    /// Boolean value.
    Bool(bool),
    /// Small integer value (enumerations).
    Int(u8),
    /// Floating point value (temperatures).
    Float(f64),
    /// Text value.
    String(String),
}

impl CharacteristicValue {
    /// Returns the value as an integer if it is one.
    #[must_use]
    pub fn as_int(&self) -> Option<u8> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as a raw enumeration value.
    ///
    /// Floats are accepted when they hold a whole number in `0..=255`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn as_raw(&self) -> Option<u8> {
        match self {
            Self::Int(v) => Some(*v),
            Self::Float(v) if v.fract() == 0.0 && (0.0..=255.0).contains(v) => Some(*v as u8),
            _ => None,
        }
    }

    /// Returns the value as a float, widening integers.
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(f64::from(*v)),
            _ => None,
        }
    }

    /// Returns the value as a boolean if it is one.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for CharacteristicValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::String(v) => f.write_str(v),
        }
    }
}

/// Published constraints of a characteristic.
///
/// These are declared once when the accessory is bound and are advisory to
/// the controller; handlers do not re-validate incoming writes against them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacteristicProps {
    /// Smallest increment the controller should offer.
    pub min_step: Option<f64>,
    /// Lowest accepted value.
    pub min_value: Option<f64>,
    /// Highest accepted value.
    pub max_value: Option<f64>,
    /// Restricted set of raw enumeration values.
    pub valid_values: Option<&'static [u8]>,
}

const PUBLISHED_TARGET_STATES: [u8; 3] = [
    TargetHeatingCoolingState::PUBLISHED[0].as_raw(),
    TargetHeatingCoolingState::PUBLISHED[1].as_raw(),
    TargetHeatingCoolingState::PUBLISHED[2].as_raw(),
];

impl CharacteristicProps {
    /// No constraints beyond the host defaults.
    pub const NONE: Self = Self {
        min_step: None,
        min_value: None,
        max_value: None,
        valid_values: None,
    };

    /// Measured temperature resolution.
    pub const CURRENT_TEMPERATURE: Self = Self {
        min_step: Some(0.1),
        ..Self::NONE
    };

    /// Setpoint range and resolution of the iT600.
    pub const TARGET_TEMPERATURE: Self = Self {
        min_step: Some(0.5),
        min_value: Some(10.0),
        max_value: Some(30.0),
        valid_values: None,
    };

    /// Heat-only thermostat: no `COOL`.
    pub const TARGET_STATE: Self = Self {
        valid_values: Some(&PUBLISHED_TARGET_STATES),
        ..Self::NONE
    };
}
