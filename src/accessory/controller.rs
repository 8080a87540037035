// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Characteristic handlers for one thermostat accessory.

use std::sync::Arc;

use crate::client::{SetModeRequest, SetTargetRequest, VendorClient};
use crate::device::{self, Device, DeviceId};
use crate::error::{Error, Result};
use crate::translate;
use crate::types::{
    CurrentHeatingCoolingState, TargetHeatingCoolingState, TemperatureDisplayUnits, VendorMode,
};

use super::{AccessoryInformation, Characteristic, CharacteristicValue, PlatformAccessory};

/// Binds one physical device to its characteristic handlers.
///
/// A controller holds only identity: the device snapshot it was built from,
/// the persistent accessory it serves, and the vendor client. Every handler
/// that reports telemetry fetches a fresh device list; nothing is cached
/// between calls, so two concurrent reads may be answered from two different
/// fetches.
///
/// Controllers are immutable. On rediscovery the registry builds a new one
/// and swaps it in rather than updating this one.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use salus_bridge::accessory::{AccessoryController, PlatformAccessory};
/// use salus_bridge::client::HttpConfig;
/// use salus_bridge::device::Device;
///
/// # async fn example() -> salus_bridge::Result<()> {
/// let client = Arc::new(HttpConfig::new("salus-gateway.local").into_client()?);
/// let device = Device::new("1001", "Lounge");
/// let accessory = Arc::new(PlatformAccessory::new(&device));
///
/// let controller = AccessoryController::new(accessory, client, device);
/// println!("{}", controller.current_temperature().await?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct AccessoryController<C> {
    device: Device,
    accessory: Arc<PlatformAccessory>,
    client: Arc<C>,
}

impl<C> AccessoryController<C> {
    /// Creates a controller for `device`, serving `accessory`.
    #[must_use]
    pub fn new(accessory: Arc<PlatformAccessory>, client: Arc<C>, device: Device) -> Self {
        Self {
            device,
            accessory,
            client,
        }
    }

    /// Returns the id of the controlled device.
    #[must_use]
    pub fn device_id(&self) -> &DeviceId {
        &self.device.id
    }

    /// Returns the snapshot captured when this controller was built.
    #[must_use]
    pub fn device(&self) -> &Device {
        &self.device
    }

    /// Returns the accessory this controller serves.
    #[must_use]
    pub fn accessory(&self) -> &Arc<PlatformAccessory> {
        &self.accessory
    }

    /// Returns the information service values.
    #[must_use]
    pub fn information(&self) -> AccessoryInformation {
        AccessoryInformation::for_device(&self.device.id)
    }

    /// Display units are fixed: the iT600 only reports Celsius.
    #[must_use]
    pub fn temperature_display_units(&self) -> TemperatureDisplayUnits {
        tracing::debug!(
            device_id = %self.device.id,
            name = %self.device.name,
            units = ?TemperatureDisplayUnits::Celsius,
            "getTemperatureDisplayUnits"
        );
        TemperatureDisplayUnits::Celsius
    }

    /// Accepts and ignores a display unit change.
    pub fn set_temperature_display_units(&self, value: u8) {
        tracing::debug!(
            device_id = %self.device.id,
            name = %self.device.name,
            value,
            "setTemperatureDisplayUnits ignored, device is Celsius only"
        );
    }

    /// Whether the device is reachable.
    ///
    /// Answered from the snapshot captured at construction, not re-fetched.
    #[must_use]
    pub fn status_active(&self) -> bool {
        translate::active_status_from_mode(&self.device.mode)
    }
}

impl<C: VendorClient> AccessoryController<C> {
    /// Fetches the device list and picks out this controller's device.
    async fn fetch(&self) -> Result<Device> {
        let devices = self.client.devices().await?;
        device::take(devices, &self.device.id).inspect_err(|e| {
            tracing::warn!(device_id = %self.device.id, error = %e, "Device missing from fetch");
        })
    }

    /// Reads the observed heating state.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch fails or the device is missing from it.
    pub async fn current_heating_cooling_state(&self) -> Result<CurrentHeatingCoolingState> {
        let device = self.fetch().await?;
        let state = translate::current_state_from_telemetry(device.heating);

        tracing::debug!(
            device_id = %self.device.id,
            heating = device.heating,
            state = %state,
            "getCurrentHeatingCoolingState"
        );

        Ok(state)
    }

    /// Reads the controller-facing target state.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch fails or the device is missing from it.
    pub async fn target_heating_cooling_state(&self) -> Result<TargetHeatingCoolingState> {
        let device = self.fetch().await?;
        let state = translate::target_state_from_telemetry(device.heating, &device.mode);

        tracing::debug!(
            device_id = %self.device.id,
            heating = device.heating,
            mode = %device.mode,
            state = %state,
            "getTargetHeatingCoolingState"
        );

        Ok(state)
    }

    /// Sets the device mode from a raw target state value.
    ///
    /// Values outside `HEAT`/`AUTO` are sent as `LOW`.
    ///
    /// # Errors
    ///
    /// Returns an error if the vendor service rejects the command.
    pub async fn set_target_heating_cooling_state(&self, value: u8) -> Result<()> {
        let mode = translate::to_vendor_mode(value);

        tracing::info!(
            device_id = %self.device.id,
            name = %self.device.name,
            value,
            mode = %mode,
            "setTargetHeatingCoolingState"
        );

        self.send_mode(mode).await
    }

    async fn send_mode(&self, mode: VendorMode) -> Result<()> {
        self.client
            .set_mode(SetModeRequest {
                id: self.device.id.clone(),
                mode,
            })
            .await
    }

    /// Reads the measured temperature in degrees Celsius.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch fails, the device is missing from it, or
    /// the reported value is not numeric.
    pub async fn current_temperature(&self) -> Result<f64> {
        let device = self.fetch().await?;

        tracing::debug!(
            device_id = %self.device.id,
            name = %self.device.name,
            current = %device.current,
            "getCurrentTemperature"
        );

        Ok(device.current_temperature()?.celsius())
    }

    /// Reads the setpoint in degrees Celsius.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch fails, the device is missing from it, or
    /// the reported value is not numeric.
    pub async fn target_temperature(&self) -> Result<f64> {
        let device = self.fetch().await?;

        tracing::debug!(
            device_id = %self.device.id,
            name = %self.device.name,
            target = %device.target,
            "getTargetTemperature"
        );

        Ok(device.target_temperature()?.celsius())
    }

    /// Sets the setpoint in degrees Celsius.
    ///
    /// # Errors
    ///
    /// Returns an error if the vendor service rejects the command.
    pub async fn set_target_temperature(&self, temperature: f64) -> Result<()> {
        tracing::info!(
            device_id = %self.device.id,
            name = %self.device.name,
            temperature,
            "setTargetTemperature"
        );

        self.client
            .set_target(SetTargetRequest {
                id: self.device.id.clone(),
                temperature,
            })
            .await
    }

    /// Reads any characteristic on the accessory surface.
    ///
    /// # Errors
    ///
    /// Propagates errors from the underlying handler.
    pub async fn get(&self, characteristic: Characteristic) -> Result<CharacteristicValue> {
        let value = match characteristic {
            Characteristic::Manufacturer => {
                CharacteristicValue::String(AccessoryInformation::MANUFACTURER.to_string())
            }
            Characteristic::Model => {
                CharacteristicValue::String(AccessoryInformation::MODEL.to_string())
            }
            Characteristic::SerialNumber => CharacteristicValue::String(self.device.id.to_string()),
            Characteristic::CurrentHeatingCoolingState => {
                CharacteristicValue::Int(self.current_heating_cooling_state().await?.as_raw())
            }
            Characteristic::TargetHeatingCoolingState => {
                CharacteristicValue::Int(self.target_heating_cooling_state().await?.as_raw())
            }
            Characteristic::CurrentTemperature => {
                CharacteristicValue::Float(self.current_temperature().await?)
            }
            Characteristic::TargetTemperature => {
                CharacteristicValue::Float(self.target_temperature().await?)
            }
            Characteristic::TemperatureDisplayUnits => {
                CharacteristicValue::Int(self.temperature_display_units().as_raw())
            }
            Characteristic::StatusActive => CharacteristicValue::Bool(self.status_active()),
        };

        Ok(value)
    }

    /// Writes a characteristic on the accessory surface.
    ///
    /// A target state that is not a whole number is sent as `LOW`, like any
    /// other unrecognized target state.
    ///
    /// # Errors
    ///
    /// Returns `Error::ReadOnly` for characteristics that cannot be written,
    /// `Error::InvalidValue` when a temperature is not numeric, and otherwise
    /// propagates errors from the underlying handler.
    pub async fn set(
        &self,
        characteristic: Characteristic,
        value: CharacteristicValue,
    ) -> Result<()> {
        if !characteristic.is_writable() {
            return Err(Error::ReadOnly(characteristic));
        }

        match characteristic {
            Characteristic::TargetHeatingCoolingState => match value.as_raw() {
                Some(raw) => self.set_target_heating_cooling_state(raw).await,
                None => {
                    tracing::warn!(
                        device_id = %self.device.id,
                        name = %self.device.name,
                        value = %value,
                        mode = %VendorMode::Low,
                        "setTargetHeatingCoolingState with unrecognized value"
                    );
                    self.send_mode(VendorMode::Low).await
                }
            },
            Characteristic::TargetTemperature => {
                let temperature = value
                    .as_float()
                    .ok_or(Error::InvalidValue(characteristic))?;
                self.set_target_temperature(temperature).await
            }
            _ => {
                self.set_temperature_display_units(value.as_raw().unwrap_or_default());
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fake::{FakeClient, Sent};

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

    fn hall_offline() -> Device {
        Device {
            mode: "OFFLINE".to_string(),
            ..Device::new("A2", "Hall")
        }
    }

    fn controller_for(device: Device, client: &Arc<FakeClient>) -> AccessoryController<FakeClient> {
        let accessory = Arc::new(PlatformAccessory::new(&device));
        AccessoryController::new(accessory, Arc::clone(client), device)
    }

    #[tokio::test]
    async fn heating_device_on_schedule() {
        let client = Arc::new(FakeClient::with_devices(vec![hall_offline(), lounge()]));
        let controller = controller_for(lounge(), &client);

        assert_eq!(
            controller.current_heating_cooling_state().await.unwrap(),
            CurrentHeatingCoolingState::Heat
        );
        assert_eq!(
            controller.target_heating_cooling_state().await.unwrap(),
            TargetHeatingCoolingState::Heat
        );
        assert!((controller.current_temperature().await.unwrap() - 21.0).abs() < f64::EPSILON);
        assert!((controller.target_temperature().await.unwrap() - 22.5).abs() < f64::EPSILON);
        assert!(controller.status_active());
    }

    #[tokio::test]
    async fn offline_device() {
        let client = Arc::new(FakeClient::with_devices(vec![hall_offline()]));
        let controller = controller_for(hall_offline(), &client);

        assert!(!controller.status_active());
        assert_eq!(
            controller.target_heating_cooling_state().await.unwrap(),
            TargetHeatingCoolingState::Off
        );
    }

    #[tokio::test]
    async fn every_telemetry_read_fetches() {
        let client = Arc::new(FakeClient::with_devices(vec![lounge()]));
        let controller = controller_for(lounge(), &client);

        controller.current_temperature().await.unwrap();
        controller.current_temperature().await.unwrap();
        controller.target_heating_cooling_state().await.unwrap();

        assert_eq!(client.fetch_count(), 3);
    }

    #[tokio::test]
    async fn reads_reflect_latest_fetch() {
        let client = Arc::new(FakeClient::with_devices(vec![lounge()]));
        let controller = controller_for(lounge(), &client);

        client.replace_devices(vec![Device {
            heating: false,
            current: "18.5".to_string(),
            ..lounge()
        }]);

        assert_eq!(
            controller.target_heating_cooling_state().await.unwrap(),
            TargetHeatingCoolingState::Auto
        );
        assert!((controller.current_temperature().await.unwrap() - 18.5).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn status_active_uses_construction_snapshot() {
        let client = Arc::new(FakeClient::with_devices(vec![hall_offline()]));
        let controller = controller_for(lounge(), &client);

        // The fetched list says OFFLINE, but status is not re-fetched
        assert!(controller.status_active());
        assert_eq!(client.fetch_count(), 0);
    }

    #[tokio::test]
    async fn set_auto_sends_auto_mode() {
        let client = Arc::new(FakeClient::default());
        let controller = controller_for(lounge(), &client);

        controller
            .set_target_heating_cooling_state(TargetHeatingCoolingState::Auto.as_raw())
            .await
            .unwrap();

        assert_eq!(
            client.sent(),
            vec![Sent::Mode(SetModeRequest {
                id: DeviceId::new("A1"),
                mode: VendorMode::Auto,
            })]
        );
    }

    #[tokio::test]
    async fn set_unknown_state_sends_low() {
        let client = Arc::new(FakeClient::default());
        let controller = controller_for(lounge(), &client);

        controller.set_target_heating_cooling_state(2).await.unwrap();
        controller.set_target_heating_cooling_state(99).await.unwrap();

        assert_eq!(
            client.sent(),
            vec![
                Sent::Mode(SetModeRequest {
                    id: DeviceId::new("A1"),
                    mode: VendorMode::Low,
                }),
                Sent::Mode(SetModeRequest {
                    id: DeviceId::new("A1"),
                    mode: VendorMode::Low,
                }),
            ]
        );
    }

    #[tokio::test]
    async fn set_target_temperature_sends_value() {
        let client = Arc::new(FakeClient::default());
        let controller = controller_for(lounge(), &client);

        controller.set_target_temperature(19.5).await.unwrap();

        assert_eq!(
            client.sent(),
            vec![Sent::Target(SetTargetRequest {
                id: DeviceId::new("A1"),
                temperature: 19.5,
            })]
        );
    }

    #[tokio::test]
    async fn display_units_always_celsius() {
        let client = Arc::new(FakeClient::default());
        let controller = controller_for(lounge(), &client);

        controller
            .set(Characteristic::TemperatureDisplayUnits, CharacteristicValue::Int(1))
            .await
            .unwrap();

        assert_eq!(
            controller.get(Characteristic::TemperatureDisplayUnits).await.unwrap(),
            CharacteristicValue::Int(0)
        );
        assert!(client.sent().is_empty());
    }

    #[tokio::test]
    async fn missing_device_fails_the_read() {
        let client = Arc::new(FakeClient::with_devices(vec![hall_offline()]));
        let controller = controller_for(lounge(), &client);

        let err = controller.current_temperature().await.unwrap_err();
        assert!(matches!(err, Error::DeviceNotFound(id) if id.as_str() == "A1"));
    }

    #[tokio::test]
    async fn transport_failure_propagates() {
        let client = Arc::new(FakeClient::with_devices(vec![lounge()]));
        client.set_failing(true);
        let controller = controller_for(lounge(), &client);

        assert!(matches!(
            controller.current_heating_cooling_state().await,
            Err(Error::Protocol(_))
        ));
        assert!(controller.set_target_temperature(20.0).await.is_err());
    }

    #[tokio::test]
    async fn unparseable_temperature_is_a_parse_error() {
        let device = Device {
            current: "n/a".to_string(),
            ..lounge()
        };
        let client = Arc::new(FakeClient::with_devices(vec![device]));
        let controller = controller_for(lounge(), &client);

        assert!(matches!(
            controller.current_temperature().await,
            Err(Error::Parse(_))
        ));
    }

    #[tokio::test]
    async fn dispatch_reads_information() {
        let client = Arc::new(FakeClient::default());
        let controller = controller_for(lounge(), &client);

        assert_eq!(
            controller.get(Characteristic::Manufacturer).await.unwrap(),
            CharacteristicValue::String("Salus".to_string())
        );
        assert_eq!(
            controller.get(Characteristic::SerialNumber).await.unwrap(),
            CharacteristicValue::String("A1".to_string())
        );
        assert_eq!(controller.information().model, "iT-600");
    }

    #[tokio::test]
    async fn dispatch_rejects_read_only_writes() {
        let client = Arc::new(FakeClient::default());
        let controller = controller_for(lounge(), &client);

        let err = controller
            .set(Characteristic::CurrentTemperature, CharacteristicValue::Float(20.0))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ReadOnly(Characteristic::CurrentTemperature)));
    }

    #[tokio::test]
    async fn dispatch_coerces_non_integer_target_states() {
        let client = Arc::new(FakeClient::default());
        let controller = controller_for(lounge(), &client);

        for value in [
            CharacteristicValue::Float(3.0),
            CharacteristicValue::Bool(true),
            CharacteristicValue::Float(1.5),
            CharacteristicValue::String("HEAT".to_string()),
        ] {
            controller
                .set(Characteristic::TargetHeatingCoolingState, value)
                .await
                .unwrap();
        }

        let modes: Vec<_> = client
            .sent()
            .into_iter()
            .map(|sent| match sent {
                Sent::Mode(request) => request.mode,
                Sent::Target(request) => panic!("unexpected target command {request:?}"),
            })
            .collect();
        assert_eq!(
            modes,
            vec![
                VendorMode::Auto,
                VendorMode::Low,
                VendorMode::Low,
                VendorMode::Low
            ]
        );
    }

    #[tokio::test]
    async fn dispatch_rejects_non_numeric_temperature() {
        let client = Arc::new(FakeClient::default());
        let controller = controller_for(lounge(), &client);

        let err = controller
            .set(
                Characteristic::TargetTemperature,
                CharacteristicValue::Bool(true),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidValue(Characteristic::TargetTemperature)
        ));
        assert!(client.sent().is_empty());
    }

    #[tokio::test]
    async fn dispatch_checks_writability_for_every_characteristic() {
        let client = Arc::new(FakeClient::default());
        let controller = controller_for(lounge(), &client);

        for characteristic in Characteristic::ALL {
            let result = controller
                .set(characteristic, CharacteristicValue::Int(0))
                .await;
            assert_eq!(
                matches!(result, Err(Error::ReadOnly(_))),
                !characteristic.is_writable(),
                "{characteristic}"
            );
        }
    }

    #[tokio::test]
    async fn dispatch_widens_integer_temperature() {
        let client = Arc::new(FakeClient::default());
        let controller = controller_for(lounge(), &client);

        controller
            .set(Characteristic::TargetTemperature, CharacteristicValue::Int(21))
            .await
            .unwrap();

        assert_eq!(
            client.sent(),
            vec![Sent::Target(SetTargetRequest {
                id: DeviceId::new("A1"),
                temperature: 21.0,
            })]
        );
    }
}
