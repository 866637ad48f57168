use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::entities::state::climate::{
    FAN_AUTO, FAN_CIRCULATE, FAN_MODE_MAP, FAN_ON, HVAC_MODE_MAP, HVAC_MODES_MAP, HvacAction,
    HvacMode, MODE_AUTO, MODE_COOL, PRESET_AWAY, PRESET_MODE_MAP, PRESET_NONE,
    PRESET_PERMANENT_HOLD, PRESET_TEMPORARY_HOLD, PRESET_VACATION, SupportedFeatures,
    TEMPERATURE_STEP, TEMPERATURE_UNIT,
};
use crate::entities::state::humidifier::{MAX_HUMIDITY, MIN_HUMIDITY};
use crate::entities::state::{derive, lookup, reverse_lookup};
use crate::entities::write::{EntityError, PendingWrite};
use crate::protocol::attributes::Attribute;
use crate::protocol::client::ClientPointer;
use crate::protocol::store::AttributeStore;

const FAN_MODES: [&str; 3] = [FAN_AUTO, FAN_ON, FAN_CIRCULATE];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClimateState {
    pub supported_features: SupportedFeatures,
    pub hvac_mode: Option<HvacMode>,
    pub hvac_modes: Vec<HvacMode>,
    pub hvac_action: HvacAction,
    pub current_temperature: Option<f64>,
    pub target_temperature: Option<f64>,
    pub target_temperature_low: Option<f64>,
    pub target_temperature_high: Option<f64>,
    pub target_temperature_step: f64,
    pub temperature_unit: &'static str,
    pub current_humidity: Option<f64>,
    pub target_humidity: Option<f64>,
    pub min_humidity: u8,
    pub max_humidity: u8,
    pub fan_mode: Option<&'static str>,
    pub fan_modes: Vec<&'static str>,
    pub preset_mode: &'static str,
    pub preset_modes: Vec<&'static str>,
    pub extra_state_attributes: BTreeMap<&'static str, Value>,
}

/// Temperature request; either a single target or a low/high range.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TemperatureRequest {
    pub temperature: Option<f64>,
    pub target_temp_low: Option<f64>,
    pub target_temp_high: Option<f64>,
}

/// The thermostat itself.
#[derive(Debug, Clone, Default)]
pub struct ClimateDescription;

impl ClimateDescription {
    pub fn supported_features(&self, store: &AttributeStore) -> SupportedFeatures {
        let mut features = if store.get_int(Attribute::Mode) == Some(MODE_AUTO) {
            SupportedFeatures::TARGET_TEMPERATURE_RANGE
        } else {
            SupportedFeatures::TARGET_TEMPERATURE
        };

        if store.get_int(Attribute::HumidificationAvailable) == Some(2) {
            features |= SupportedFeatures::TARGET_HUMIDITY;
        }
        if store.get_int(Attribute::DehumidificationAvailable) == Some(1) {
            features |= SupportedFeatures::TARGET_DEHUMIDITY;
        }
        if store.get_int(Attribute::AirCleaningAvailable) == Some(1) {
            features |= SupportedFeatures::AIR_CLEANING;
        }
        if store.get_int(Attribute::VentilationAvailable) == Some(1) {
            features |= SupportedFeatures::FRESH_AIR;
        }

        features | SupportedFeatures::PRESET_MODE | SupportedFeatures::FAN_MODE
    }

    /// Mode 0 means the thermostat has not reported a mode yet.
    pub fn hvac_mode(&self, store: &AttributeStore) -> Option<HvacMode> {
        derive(
            store.get_int(Attribute::Mode).filter(|mode| *mode != 0),
            HVAC_MODE_MAP,
        )
    }

    pub fn hvac_modes(&self, store: &AttributeStore) -> Vec<HvacMode> {
        derive(store.get_int(Attribute::ThermostatModes), HVAC_MODES_MAP)
            .map(<[HvacMode]>::to_vec)
            .unwrap_or_default()
    }

    pub fn hvac_action(&self, store: &AttributeStore) -> HvacAction {
        if store.get_int(Attribute::HeatingEquipmentStatus).unwrap_or(0) > 0 {
            return HvacAction::Heating;
        }
        if store.get_int(Attribute::CoolingEquipmentStatus).unwrap_or(0) > 0 {
            return HvacAction::Cooling;
        }
        HvacAction::Idle
    }

    pub fn current_temperature(&self, store: &AttributeStore) -> Option<f64> {
        store.get_float(Attribute::IndoorTemperatureControllingSensorValue)
    }

    pub fn target_temperature_high(&self, store: &AttributeStore) -> Option<f64> {
        store.get_float(Attribute::CoolSetpoint)
    }

    pub fn target_temperature_low(&self, store: &AttributeStore) -> Option<f64> {
        store.get_float(Attribute::HeatSetpoint)
    }

    pub fn target_temperature(&self, store: &AttributeStore) -> Option<f64> {
        match self.hvac_mode(store) {
            Some(HvacMode::Cool) => self.target_temperature_high(store),
            Some(HvacMode::Heat) => self.target_temperature_low(store),
            _ => None,
        }
    }

    pub fn preset_mode(&self, store: &AttributeStore) -> &'static str {
        derive(
            store.get_int(Attribute::Hold).filter(|hold| *hold != 0),
            PRESET_MODE_MAP,
        )
        .unwrap_or(PRESET_NONE)
    }

    pub fn preset_modes(&self, store: &AttributeStore) -> Vec<&'static str> {
        let mut presets = vec![PRESET_NONE, PRESET_VACATION];

        if store.get_int(Attribute::AwayAvailable) == Some(1) {
            presets.push(PRESET_AWAY);
        }

        match store.get_int(Attribute::Hold).unwrap_or(0) {
            1 => presets.push(PRESET_TEMPORARY_HOLD),
            2 => presets.push(PRESET_PERMANENT_HOLD),
            _ => {}
        }

        presets
    }

    pub fn fan_mode(&self, store: &AttributeStore) -> Option<&'static str> {
        derive(
            store.get_int(Attribute::FanMode).filter(|mode| *mode != 0),
            FAN_MODE_MAP,
        )
    }

    pub fn extra_state_attributes(&self, store: &AttributeStore) -> BTreeMap<&'static str, Value> {
        let label = |key: Attribute, map: &[(i64, &'static str)]| {
            lookup(store.get_int(key).unwrap_or(0), map).unwrap_or("off")
        };
        let setpoint = |key: Attribute| store.get_float(key).map(Value::from).unwrap_or(Value::Null);
        let fan_status = if store.get_int(Attribute::FanStatus).unwrap_or(0) == 1 {
            "on"
        } else {
            "off"
        };

        BTreeMap::from([
            ("fan_status", Value::from(fan_status)),
            (
                "humidification_setpoint",
                setpoint(Attribute::HumidificationSetpoint),
            ),
            (
                "dehumidification_setpoint",
                setpoint(Attribute::DehumidificationSetpoint),
            ),
            (
                "air_cleaning_mode",
                Value::from(label(
                    Attribute::AirCleaningMode,
                    &[(1, "constant"), (2, "automatic")],
                )),
            ),
            (
                "air_cleaning_event",
                Value::from(label(
                    Attribute::AirCleaningEvent,
                    &[(3, "3hour"), (4, "24hour")],
                )),
            ),
            (
                "fresh_air_mode",
                Value::from(label(Attribute::FreshAirMode, &[(1, "automatic")])),
            ),
            (
                "fresh_air_event",
                Value::from(label(
                    Attribute::FreshAirEvent,
                    &[(2, "3hour"), (3, "24hour")],
                )),
            ),
        ])
    }

    pub fn state(&self, store: &AttributeStore) -> ClimateState {
        ClimateState {
            supported_features: self.supported_features(store),
            hvac_mode: self.hvac_mode(store),
            hvac_modes: self.hvac_modes(store),
            hvac_action: self.hvac_action(store),
            current_temperature: self.current_temperature(store),
            target_temperature: self.target_temperature(store),
            target_temperature_low: self.target_temperature_low(store),
            target_temperature_high: self.target_temperature_high(store),
            target_temperature_step: TEMPERATURE_STEP,
            temperature_unit: TEMPERATURE_UNIT,
            current_humidity: store.get_float(Attribute::IndoorHumidityControllingSensorValue),
            target_humidity: store.get_float(Attribute::HumidificationSetpoint),
            min_humidity: MIN_HUMIDITY,
            max_humidity: MAX_HUMIDITY,
            fan_mode: self.fan_mode(store),
            fan_modes: FAN_MODES.to_vec(),
            preset_mode: self.preset_mode(store),
            preset_modes: self.preset_modes(store),
            extra_state_attributes: self.extra_state_attributes(store),
        }
    }

    /// A single temperature targets the cool setpoint in cool mode and the
    /// heat setpoint otherwise. Zero means "leave unchanged".
    pub(crate) fn set_temperature(
        &self,
        store: &AttributeStore,
        client: ClientPointer,
        request: TemperatureRequest,
    ) -> Result<PendingWrite, EntityError> {
        let mut cool = 0.0;
        let mut heat = 0.0;

        if let Some(temperature) = request.temperature.filter(|t| *t != 0.0) {
            if store.get_int(Attribute::Mode) == Some(MODE_COOL) {
                cool = temperature;
            } else {
                heat = temperature;
            }
        } else {
            if let Some(low) = request.target_temp_low.filter(|t| *t != 0.0) {
                heat = low;
            }
            if let Some(high) = request.target_temp_high.filter(|t| *t != 0.0) {
                cool = high;
            }
        }

        if cool == 0.0 && heat == 0.0 {
            debug!("No setpoint in {:?}, nothing to write", request);
            return Ok(PendingWrite::done());
        }

        PendingWrite::spawn(async move {
            client.update_setpoint(cool, heat).await?;
            client.read_control().await
        })
    }

    pub(crate) fn set_humidity(
        &self,
        client: ClientPointer,
        humidity: u8,
    ) -> Result<PendingWrite, EntityError> {
        PendingWrite::spawn(async move { client.set_humidification_setpoint(humidity).await })
    }

    pub(crate) fn set_fan_mode(
        &self,
        entity: &str,
        client: ClientPointer,
        fan_mode: &str,
    ) -> Result<PendingWrite, EntityError> {
        let code = reverse_lookup(&fan_mode, FAN_MODE_MAP).ok_or_else(|| {
            EntityError::InvalidOption {
                entity: entity.to_string(),
                option: fan_mode.to_string(),
            }
        })?;

        PendingWrite::spawn(async move {
            client.update_fan_mode(code).await?;
            client.read_control().await
        })
    }

    pub(crate) fn set_hvac_mode(
        &self,
        entity: &str,
        client: ClientPointer,
        hvac_mode: HvacMode,
    ) -> Result<PendingWrite, EntityError> {
        let code = reverse_lookup(&hvac_mode, HVAC_MODE_MAP).ok_or_else(|| {
            EntityError::InvalidOption {
                entity: entity.to_string(),
                option: hvac_mode.to_string(),
            }
        })?;

        PendingWrite::spawn(async move {
            client.update_mode(code).await?;
            client.read_control().await
        })
    }

    pub(crate) fn set_preset_mode(
        &self,
        entity: &str,
        client: ClientPointer,
        preset_mode: &str,
    ) -> Result<PendingWrite, EntityError> {
        let hold = match preset_mode {
            PRESET_AWAY => 3,
            PRESET_VACATION => 4,
            PRESET_NONE => 0,
            _ => {
                return Err(EntityError::InvalidOption {
                    entity: entity.to_string(),
                    option: preset_mode.to_string(),
                });
            }
        };

        PendingWrite::spawn(async move {
            client.set_hold(hold).await?;
            client.read_scheduling().await
        })
    }
}
