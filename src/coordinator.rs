use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, error, info};

use crate::entities::state::{CodeMap, lookup};
use crate::protocol::attributes::Attribute;
use crate::protocol::client::{ClientError, ClientPointer, FunctionalDomain};
use crate::protocol::store::AttributeStore;

pub const DEFAULT_DEVICE_NAME: &str = "Aprilaire";
pub const MANUFACTURER: &str = "Aprilaire";

const MODELS: &CodeMap<&str> = &[
    (0, "8476W"),
    (1, "8810"),
    (2, "8620W"),
    (3, "8820"),
    (4, "8910W"),
    (5, "8830"),
    (6, "8920W"),
    (7, "8840"),
];

/// Metadata describing the physical thermostat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    pub mac_address: String,
    pub name: String,
    pub manufacturer: &'static str,
    pub model: Option<&'static str>,
    pub hw_version: Option<String>,
    pub sw_version: Option<String>,
}

pub fn hw_version(revision: i64) -> String {
    match u8::try_from(revision) {
        Ok(code) if code > b'A' => format!("Rev. {}", code as char),
        _ => revision.to_string(),
    }
}

/// Owns the attribute store and the client of one device session.
pub struct Coordinator {
    store: AttributeStore,
    client: ClientPointer,
    known_device_info: Mutex<Option<DeviceInfo>>,
}

impl Coordinator {
    pub fn new(store: AttributeStore, client: ClientPointer) -> Self {
        Self {
            store,
            client,
            known_device_info: Mutex::new(None),
        }
    }

    pub fn store(&self) -> &AttributeStore {
        &self.store
    }

    pub fn client(&self) -> &ClientPointer {
        &self.client
    }

    pub fn device_name(&self) -> String {
        self.store
            .get_text(Attribute::Name)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_DEVICE_NAME.to_string())
    }

    /// `None` until the thermostat reported its MAC address.
    pub fn device_info(&self) -> Option<DeviceInfo> {
        let mac_address = self
            .store
            .get_text(Attribute::MacAddress)
            .filter(|mac| !mac.is_empty())?;
        let model = self
            .store
            .get_int(Attribute::ModelNumber)
            .and_then(|code| lookup(code, MODELS));
        let hw_version = self
            .store
            .get_int(Attribute::HardwareRevision)
            .filter(|revision| *revision != 0)
            .map(hw_version);
        let sw_version = match (
            self.store.get_int(Attribute::FirmwareMajorRevision),
            self.store.get_int(Attribute::FirmwareMinorRevision),
        ) {
            (Some(major), Some(minor)) => Some(format!("{major}.{minor:02}")),
            _ => None,
        };

        Some(DeviceInfo {
            mac_address,
            name: self.device_name(),
            manufacturer: MANUFACTURER,
            model,
            hw_version,
            sw_version,
        })
    }

    /// Returns the device info when it changed since the last call.
    ///
    /// The first info seen is only recorded; later differences are what a
    /// device registry has to be told about.
    pub fn refresh_device_info(&self) -> Option<DeviceInfo> {
        let current = self.device_info()?;
        let mut known = self.known_device_info.lock();
        match known.replace(current.clone()) {
            Some(previous) if previous != current => {
                info!(
                    "Device info changed for {}: {:?} -> {:?}",
                    current.mac_address, previous, current
                );
                Some(current)
            }
            _ => None,
        }
    }

    pub async fn start_listen(&self) -> Result<(), ClientError> {
        debug!("Starting client listener");
        self.client.start_listen().await
    }

    pub fn stop_listen(&self) {
        debug!("Stopping client listener");
        self.client.stop_listen()
    }

    /// Waits for the identification, control and sensor data.
    ///
    /// Returns `false` when the thermostat did not report a MAC address,
    /// since nothing can be uniquely identified without it.
    pub async fn wait_for_ready(&self, timeout: Duration) -> Result<bool, ClientError> {
        let identification = self
            .client
            .wait_for_response(FunctionalDomain::Identification, 2, timeout)
            .await?;

        let has_mac = identification
            .as_ref()
            .and_then(|data| data.get(&Attribute::MacAddress))
            .and_then(|mac| mac.as_text())
            .is_some_and(|mac| !mac.is_empty());
        if !has_mac {
            error!("Missing MAC address, cannot create unique ID");
            return Ok(false);
        }

        futures::future::try_join3(
            self.client
                .wait_for_response(FunctionalDomain::Identification, 4, timeout),
            self.client
                .wait_for_response(FunctionalDomain::Control, 7, timeout),
            self.client
                .wait_for_response(FunctionalDomain::Sensors, 2, timeout),
        )
        .await?;

        info!("Thermostat {} is ready", self.device_name());
        Ok(true)
    }
}
