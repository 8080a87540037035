// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reconciliation of discovered devices with known accessories.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use tokio::sync::broadcast;

use crate::accessory::{AccessoryController, PlatformAccessory};
use crate::client::VendorClient;
use crate::device::{Device, DeviceId};
use crate::error::Result;
use crate::event::{AccessoryEvent, EventBus};

use super::record::AccessoryRecord;
use super::{AccessoryHost, PLATFORM_NAME, PLUGIN_NAME};

/// Outcome of one reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Devices seen for the first time; a new accessory was announced.
    pub registered: Vec<DeviceId>,
    /// Devices already known; their controller was rebuilt.
    pub rebound: Vec<DeviceId>,
    /// Known devices absent from this pass. They stay registered.
    pub missing: Vec<DeviceId>,
}

/// Keeps one persistent accessory per Salus device.
///
/// Each device id is in one of two states: unknown (no record) or
/// registered. First discovery creates and announces a new accessory;
/// every later discovery reuses that accessory and swaps in a freshly built
/// [`AccessoryController`]. Records are never removed: a device that vanishes
/// from a pass is reported in [`ReconcileReport::missing`] and kept.
///
/// Accessories the host restored from persistence enter through
/// [`configure_accessory`](Self::configure_accessory) before discovery and
/// are bound to a controller by the first pass that sees their device.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use salus_bridge::accessory::PlatformAccessory;
/// use salus_bridge::platform::{AccessoryHost, AccessoryRegistry, PlatformConfig};
///
/// struct Host;
///
/// impl AccessoryHost for Host {
///     fn register_accessories(
///         &self,
///         _plugin: &str,
///         _platform: &str,
///         accessories: &[Arc<PlatformAccessory>],
///     ) {
///         println!("{} new accessories", accessories.len());
///     }
/// }
///
/// # async fn example() -> salus_bridge::Result<()> {
/// let config = PlatformConfig::from_json(r#"{"endpoint":"salus-gateway.local"}"#)?;
/// let registry = AccessoryRegistry::from_config(&config, Arc::new(Host))?;
///
/// let report = registry.did_finish_launching().await?;
/// println!("registered {:?}", report.registered);
/// # Ok(())
/// # }
/// ```
pub struct AccessoryRegistry<C, H> {
    client: Arc<C>,
    host: Arc<H>,
    records: RwLock<HashMap<DeviceId, AccessoryRecord<C>>>,
    event_bus: EventBus,
    launched: AtomicBool,
}

impl<C, H> AccessoryRegistry<C, H> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new(client: Arc<C>, host: Arc<H>) -> Self {
        Self {
            client,
            host,
            records: RwLock::new(HashMap::new()),
            event_bus: EventBus::new(),
            launched: AtomicBool::new(false),
        }
    }

    /// Subscribes to accessory events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<AccessoryEvent> {
        self.event_bus.subscribe()
    }

    /// Returns the number of registered devices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Returns `true` if no device is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Returns every registered device id, sorted.
    #[must_use]
    pub fn device_ids(&self) -> Vec<DeviceId> {
        let mut ids: Vec<_> = self.records.read().keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Returns the record for a device.
    #[must_use]
    pub fn record(&self, id: &DeviceId) -> Option<AccessoryRecord<C>> {
        self.records.read().get(id).cloned()
    }

    /// Returns the persistent accessory for a device.
    #[must_use]
    pub fn accessory(&self, id: &DeviceId) -> Option<Arc<PlatformAccessory>> {
        self.records
            .read()
            .get(id)
            .map(|record| Arc::clone(record.accessory()))
    }

    /// Returns the controller currently bound to a device.
    #[must_use]
    pub fn controller(&self, id: &DeviceId) -> Option<Arc<AccessoryController<C>>> {
        self.records
            .read()
            .get(id)
            .and_then(|record| record.controller().cloned())
    }

    /// Restore hook: accepts an accessory the host persisted on a previous run.
    ///
    /// The accessory is keyed by the device id in its context. No controller
    /// is bound until discovery sees the device.
    pub fn configure_accessory(&self, accessory: PlatformAccessory) {
        let device_id = accessory.device_id().clone();
        let uuid = accessory.uuid();

        tracing::debug!(%device_id, %uuid, "Restoring cached accessory");

        self.records
            .write()
            .insert(device_id.clone(), AccessoryRecord::restored(Arc::new(accessory)));

        self.event_bus
            .publish(AccessoryEvent::restored(device_id, uuid));
    }
}

impl<C, H: AccessoryHost> AccessoryRegistry<C, H> {
    /// Maps a fetched device list onto the registry.
    ///
    /// Unknown ids get a new accessory, announced to the host in one batch at
    /// the end of the pass. Known ids keep their accessory and get a new
    /// controller built from the snapshot in `devices`.
    pub fn reconcile(&self, devices: &[Device]) -> ReconcileReport {
        let mut report = ReconcileReport::default();
        let mut events = Vec::with_capacity(devices.len());
        let mut announced = Vec::new();
        let mut seen = HashSet::with_capacity(devices.len());

        {
            let mut records = self.records.write();

            for device in devices {
                tracing::info!(device_id = %device.id, name = %device.name, "Found device");
                seen.insert(device.id.clone());

                let (accessory, is_new) = match records.get(&device.id) {
                    Some(existing) => {
                        tracing::info!(
                            device_id = %device.id,
                            name = %device.name,
                            "Configuring cached thermostat"
                        );
                        (Arc::clone(existing.accessory()), false)
                    }
                    None => (Arc::new(PlatformAccessory::new(device)), true),
                };

                let uuid = accessory.uuid();
                let controller = AccessoryController::new(
                    Arc::clone(&accessory),
                    Arc::clone(&self.client),
                    device.clone(),
                );
                records.insert(device.id.clone(), AccessoryRecord::bound(controller));

                if is_new {
                    announced.push(accessory);
                    report.registered.push(device.id.clone());
                    events.push(AccessoryEvent::registered(device.id.clone(), uuid));
                } else {
                    report.rebound.push(device.id.clone());
                    events.push(AccessoryEvent::rebound(device.id.clone(), uuid));
                }
            }

            report.missing = records
                .keys()
                .filter(|id| !seen.contains(*id))
                .cloned()
                .collect();
            report.missing.sort();
        }

        for device_id in &report.missing {
            tracing::warn!(%device_id, "Registered device missing from discovery, keeping it");
        }

        if !announced.is_empty() {
            tracing::debug!(count = announced.len(), "Registering new accessories");
            self.host
                .register_accessories(PLUGIN_NAME, PLATFORM_NAME, &announced);
        }

        for event in events {
            self.event_bus.publish(event);
        }

        report
    }
}

impl<C: VendorClient, H: AccessoryHost> AccessoryRegistry<C, H> {
    /// Lifecycle hook for "startup complete": runs discovery once.
    ///
    /// Later calls do nothing and return an empty report.
    ///
    /// # Errors
    ///
    /// Returns an error if the device list cannot be fetched. Discovery is
    /// not attempted again.
    pub async fn did_finish_launching(&self) -> Result<ReconcileReport> {
        if self.launched.swap(true, Ordering::SeqCst) {
            tracing::debug!("Discovery already ran, ignoring launch event");
            return Ok(ReconcileReport::default());
        }

        let devices = self.client.devices().await.inspect_err(|e| {
            tracing::error!(error = %e, "Device discovery failed");
        })?;

        tracing::info!(count = devices.len(), "Discovered devices");

        Ok(self.reconcile(&devices))
    }
}

#[cfg(feature = "http")]
impl<H: AccessoryHost> AccessoryRegistry<crate::client::HttpClient, H> {
    /// Creates a registry backed by the HTTP vendor client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built from `config`.
    pub fn from_config(config: &super::PlatformConfig, host: Arc<H>) -> Result<Self> {
        let client = config.http_config().into_client()?;
        tracing::debug!(
            platform = %config.platform,
            name = config.name.as_deref().unwrap_or(PLATFORM_NAME),
            "Starting Salus iT600"
        );
        Ok(Self::new(Arc::new(client), host))
    }
}

impl<C, H> std::fmt::Debug for AccessoryRegistry<C, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessoryRegistry")
            .field("records", &*self.records.read())
            .field("launched", &self.launched.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}
