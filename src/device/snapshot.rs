// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Point-in-time device snapshot as returned by the vendor service.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ParseError;
use crate::translate;
use crate::types::{CurrentHeatingCoolingState, TargetHeatingCoolingState, Temperature};

use super::DeviceId;

/// One thermostat as reported by a single device-list fetch.
///
/// Fields from different fetches are not guaranteed to be consistent with
/// each other, so callers derive everything they need from one snapshot.
///
/// # Examples
///
/// ```
/// use salus_bridge::device::Device;
///
/// let device: Device = serde_json::from_str(r#"{
///     "id": 1001,
///     "name": "Lounge",
///     "heating": true,
///     "mode": "AUTO_HEAT",
///     "current": "21.0",
///     "target": "22.5"
/// }"#).unwrap();
///
/// assert_eq!(device.id.as_str(), "1001");
/// assert!(device.is_active());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    /// Stable device identifier.
    pub id: DeviceId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Whether the device is calling for heat right now.
    #[serde(default)]
    pub heating: bool,
    /// Vendor mode or status string (`LOW`, `HIGH`, `AUTO...`, `OFFLINE`).
    #[serde(default)]
    pub mode: String,
    /// Measured temperature as a numeric string.
    #[serde(default, deserialize_with = "reading")]
    pub current: String,
    /// Setpoint temperature as a numeric string.
    #[serde(default, deserialize_with = "reading")]
    pub target: String,
}

/// Accepts a reading sent as a string, a number or `null`.
///
/// Validation is left to [`Temperature::parse_field`] so that one bad reading
/// fails only the handler that reads it, not the whole device list.
fn reading<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    deserializer.deserialize_any(ReadingVisitor)
}

struct ReadingVisitor;

impl Visitor<'_> for ReadingVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a temperature reading as a string or number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(v.to_string())
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(v)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(v.to_string())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(v.to_string())
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(v.to_string())
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(String::new())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(String::new())
    }
}

impl Device {
    /// Creates a snapshot with the given identity and otherwise idle fields.
    #[must_use]
    pub fn new(id: impl Into<DeviceId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            heating: false,
            mode: String::new(),
            current: String::new(),
            target: String::new(),
        }
    }

    /// Parses the measured temperature.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidValue` if `current` is not numeric.
    pub fn current_temperature(&self) -> Result<Temperature, ParseError> {
        Temperature::parse_field("current", &self.current)
    }

    /// Parses the setpoint temperature.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidValue` if `target` is not numeric.
    pub fn target_temperature(&self) -> Result<Temperature, ParseError> {
        Temperature::parse_field("target", &self.target)
    }

    /// Observed heating state derived from this snapshot.
    #[must_use]
    pub fn current_state(&self) -> CurrentHeatingCoolingState {
        translate::current_state_from_telemetry(self.heating)
    }

    /// Controller-facing target state derived from this snapshot.
    #[must_use]
    pub fn target_state(&self) -> TargetHeatingCoolingState {
        translate::target_state_from_telemetry(self.heating, &self.mode)
    }

    /// Whether the gateway can currently reach the device.
    #[must_use]
    pub fn is_active(&self) -> bool {
        translate::active_status_from_mode(&self.mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lounge() -> Device {
        Device {
            id: DeviceId::new("A1"),
            name: "Lounge".to_string(),
            heating: true,
            mode: "AUTO_HEAT".to_string(),
            current: "21.0".to_string(),
            target: "22.5".to_string(),
        }
    }

    #[test]
    fn derives_states_from_one_snapshot() {
        let device = lounge();
        assert_eq!(device.current_state(), CurrentHeatingCoolingState::Heat);
        assert_eq!(device.target_state(), TargetHeatingCoolingState::Heat);
        assert!(device.is_active());
    }

    #[test]
    fn parses_temperatures() {
        let device = lounge();
        assert!((device.current_temperature().unwrap().celsius() - 21.0).abs() < f64::EPSILON);
        assert!((device.target_temperature().unwrap().celsius() - 22.5).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_temperature_is_a_parse_error() {
        let device = Device::new("A2", "Hall");
        assert!(device.current_temperature().is_err());
    }

    #[test]
    fn offline_device_is_inactive_and_off() {
        let device = Device {
            mode: "OFFLINE".to_string(),
            ..Device::new("A2", "Hall")
        };
        assert!(!device.is_active());
        assert_eq!(device.target_state(), TargetHeatingCoolingState::Off);
    }

    #[test]
    fn deserializes_with_missing_optional_fields() {
        let device: Device = serde_json::from_str(r#"{"id":"A2","mode":"OFFLINE"}"#).unwrap();
        assert_eq!(device.id, DeviceId::new("A2"));
        assert!(!device.heating);
        assert!(device.name.is_empty());
    }

    #[test]
    fn numeric_readings_are_accepted() {
        let device: Device =
            serde_json::from_str(r#"{"id":"A1","current":21.5,"target":20}"#).unwrap();
        assert!((device.current_temperature().unwrap().celsius() - 21.5).abs() < f64::EPSILON);
        assert!((device.target_temperature().unwrap().celsius() - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unusable_reading_fails_only_that_reading() {
        let devices: Vec<Device> = serde_json::from_str(
            r#"[{"id":"A1","current":null,"target":"22.5"},{"id":"A2","current":"19.0"}]"#,
        )
        .unwrap();
        assert_eq!(devices.len(), 2);
        assert!(devices[0].current_temperature().is_err());
        assert!(devices[0].target_temperature().is_ok());
        assert!(devices[1].current_temperature().is_ok());
    }

    #[test]
    fn structured_reading_is_rejected() {
        assert!(serde_json::from_str::<Device>(r#"{"id":"A1","current":[21]}"#).is_err());
    }
}
