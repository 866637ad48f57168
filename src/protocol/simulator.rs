use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use derive_builder::Builder;
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::attributes;
use crate::protocol::attributes::{Attribute, AttributeMap, AttributeUpdate};
use crate::protocol::client::{
    AprilaireClientTrait, ClientError, FunctionalDomain, StatusObserver,
};

#[derive(Builder, Clone, Debug)]
#[builder(setter(into), default)]
pub struct SimulatorOptions {
    /// Delay applied to every request before it is acknowledged.
    pub latency: Duration,
    /// Attribute values the simulated thermostat starts with.
    pub initial: AttributeMap,
    /// Reject every write with [`ClientError::Rejected`].
    pub fail_writes: bool,
}

impl Default for SimulatorOptions {
    fn default() -> Self {
        Self {
            latency: Duration::from_millis(50),
            initial: default_thermostat(),
            fail_writes: false,
        }
    }
}

impl SimulatorOptions {
    pub fn builder() -> SimulatorOptionsBuilder {
        SimulatorOptionsBuilder::default()
    }
}

/// An 8810 with every accessory installed.
pub fn default_thermostat() -> AttributeMap {
    attributes! {
        MacAddress => "00:1A:2B:3C:4D:5E",
        Name => "Aprilaire",
        Location => "Hallway",
        ModelNumber => 1,
        HardwareRevision => 66,
        FirmwareMajorRevision => 1,
        FirmwareMinorRevision => 5,
        Mode => 2,
        ThermostatModes => 6,
        FanMode => 2,
        FanStatus => 0,
        HeatSetpoint => 20.0,
        CoolSetpoint => 25.5,
        Hold => 0,
        AwayAvailable => 1,
        HeatingEquipmentStatus => 1,
        CoolingEquipmentStatus => 0,
        IndoorTemperatureControllingSensorValue => 19.5,
        IndoorHumidityControllingSensorValue => 38,
        OutdoorSensor => 4.0,
        HumidificationAvailable => 2,
        HumidificationStatus => 2,
        HumidificationSetpoint => 40,
        DehumidificationAvailable => 1,
        DehumidificationStatus => 0,
        DehumidificationSetpoint => 50,
        AirCleaningAvailable => 1,
        AirCleaningMode => 2,
        AirCleaningEvent => 0,
        VentilationAvailable => 1,
        FreshAirMode => 1,
        FreshAirEvent => 0,
    }
}

fn response_group(domain: FunctionalDomain, attribute: u8) -> &'static [Attribute] {
    match (domain, attribute) {
        (FunctionalDomain::Identification, 2) => &[Attribute::MacAddress],
        (FunctionalDomain::Identification, 4) => &[
            Attribute::Name,
            Attribute::Location,
            Attribute::ModelNumber,
            Attribute::HardwareRevision,
            Attribute::FirmwareMajorRevision,
            Attribute::FirmwareMinorRevision,
        ],
        (FunctionalDomain::Control, 7) => &[
            Attribute::Mode,
            Attribute::ThermostatModes,
            Attribute::FanMode,
            Attribute::FanStatus,
            Attribute::HeatSetpoint,
            Attribute::CoolSetpoint,
            Attribute::HumidificationAvailable,
            Attribute::HumidificationSetpoint,
            Attribute::DehumidificationAvailable,
            Attribute::DehumidificationSetpoint,
            Attribute::AirCleaningAvailable,
            Attribute::AirCleaningMode,
            Attribute::AirCleaningEvent,
            Attribute::VentilationAvailable,
            Attribute::FreshAirMode,
            Attribute::FreshAirEvent,
            Attribute::AwayAvailable,
        ],
        (FunctionalDomain::Sensors, 2) => &[
            Attribute::IndoorTemperatureControllingSensorValue,
            Attribute::IndoorHumidityControllingSensorValue,
            Attribute::OutdoorSensor,
        ],
        (FunctionalDomain::Status, _) => &[
            Attribute::HeatingEquipmentStatus,
            Attribute::CoolingEquipmentStatus,
            Attribute::HumidificationStatus,
            Attribute::DehumidificationStatus,
        ],
        (FunctionalDomain::Scheduling, _) => &[Attribute::Hold],
        _ => &[],
    }
}

/// In-process thermostat that acknowledges writes and echoes the new values
/// back through the update channel, like the real device does.
pub struct SimulatedClient {
    options: SimulatorOptions,
    device: Mutex<AttributeMap>,
    observer: StatusObserver,
    listening: AtomicBool,
}

impl SimulatedClient {
    pub fn new(options: SimulatorOptions, observer: StatusObserver) -> Self {
        let device = Mutex::new(options.initial.clone());
        Self {
            options,
            device,
            observer,
            listening: AtomicBool::new(false),
        }
    }

    pub fn is_listening(&self) -> bool {
        self.listening.load(Ordering::SeqCst)
    }

    /// Changes values on the device side, as if someone used the wall unit.
    pub async fn inject(&self, changes: AttributeMap) {
        self.device.lock().extend(changes.clone());
        if self.is_listening() {
            self.observer
                .status_update(AttributeUpdate::Partial(changes))
                .await;
        }
    }

    fn group(&self, attributes: &[Attribute]) -> AttributeMap {
        let device = self.device.lock();
        attributes
            .iter()
            .filter_map(|key| device.get(key).map(|value| (*key, value.clone())))
            .collect()
    }

    async fn request(&self) -> Result<(), ClientError> {
        if !self.is_listening() {
            return Err(ClientError::NotConnected);
        }
        tokio::time::sleep(self.options.latency).await;
        Ok(())
    }

    async fn write(&self, changes: AttributeMap) -> Result<(), ClientError> {
        self.request().await?;
        if self.options.fail_writes {
            warn!("Rejecting write of {} attributes", changes.len());
            return Err(ClientError::Rejected("write refused by thermostat".into()));
        }
        debug!("Thermostat accepted {:?}", changes);
        self.device.lock().extend(changes.clone());
        self.observer
            .status_update(AttributeUpdate::Partial(changes))
            .await;
        Ok(())
    }

    async fn read(&self, domain: FunctionalDomain, attribute: u8) -> Result<(), ClientError> {
        self.request().await?;
        let values = self.group(response_group(domain, attribute));
        self.observer
            .status_update(AttributeUpdate::Partial(values))
            .await;
        Ok(())
    }
}

#[async_trait]
impl AprilaireClientTrait for SimulatedClient {
    async fn start_listen(&self) -> Result<(), ClientError> {
        info!("Simulated thermostat listening");
        self.listening.store(true, Ordering::SeqCst);
        let snapshot = {
            let mut device = self.device.lock();
            device.extend(attributes! { Connected => true, Reconnecting => false, Stopped => false });
            device.clone()
        };
        self.observer
            .status_update(AttributeUpdate::Full(snapshot))
            .await;
        Ok(())
    }

    fn stop_listen(&self) {
        info!("Simulated thermostat stopped");
        self.listening.store(false, Ordering::SeqCst);
        let changes = attributes! { Connected => false, Stopped => true };
        self.device.lock().extend(changes.clone());
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let observer = self.observer.clone();
            handle.spawn(async move {
                observer
                    .status_update(AttributeUpdate::Partial(changes))
                    .await
            });
        }
    }

    async fn wait_for_response(
        &self,
        domain: FunctionalDomain,
        attribute: u8,
        timeout: Duration,
    ) -> Result<Option<AttributeMap>, ClientError> {
        tokio::time::timeout(timeout, self.request())
            .await
            .map_err(|_| ClientError::Timeout(timeout))??;
        let values = self.group(response_group(domain, attribute));
        if values.is_empty() {
            return Ok(None);
        }
        self.observer
            .status_update(AttributeUpdate::Partial(values.clone()))
            .await;
        Ok(Some(values))
    }

    async fn set_humidification_setpoint(&self, humidity: u8) -> Result<(), ClientError> {
        self.write(attributes! { HumidificationSetpoint => humidity })
            .await
    }

    async fn set_dehumidification_setpoint(&self, humidity: u8) -> Result<(), ClientError> {
        self.write(attributes! { DehumidificationSetpoint => humidity })
            .await
    }

    async fn set_written_outdoor_temperature_value(
        &self,
        temperature: f64,
    ) -> Result<(), ClientError> {
        self.write(attributes! { OutdoorSensor => temperature }).await
    }

    async fn set_air_cleaning(&self, mode: i64, event: i64) -> Result<(), ClientError> {
        self.write(attributes! { AirCleaningMode => mode, AirCleaningEvent => event })
            .await
    }

    async fn set_fresh_air(&self, mode: i64, event: i64) -> Result<(), ClientError> {
        self.write(attributes! { FreshAirMode => mode, FreshAirEvent => event })
            .await
    }

    async fn update_setpoint(&self, cool: f64, heat: f64) -> Result<(), ClientError> {
        let mut changes = AttributeMap::new();
        if cool != 0.0 {
            changes.insert(Attribute::CoolSetpoint, cool.into());
        }
        if heat != 0.0 {
            changes.insert(Attribute::HeatSetpoint, heat.into());
        }
        self.write(changes).await
    }

    async fn update_fan_mode(&self, fan_mode: i64) -> Result<(), ClientError> {
        self.write(attributes! { FanMode => fan_mode }).await
    }

    async fn update_mode(&self, mode: i64) -> Result<(), ClientError> {
        self.write(attributes! { Mode => mode }).await
    }

    async fn set_hold(&self, hold: i64) -> Result<(), ClientError> {
        self.write(attributes! { Hold => hold }).await
    }

    async fn read_control(&self) -> Result<(), ClientError> {
        self.read(FunctionalDomain::Control, 7).await
    }

    async fn read_scheduling(&self) -> Result<(), ClientError> {
        self.read(FunctionalDomain::Scheduling, 0).await
    }
}
