use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Attributes reported by the thermostat.
///
/// The set is closed: an update carrying a key that is not listed here fails
/// to deserialize instead of landing in the store under a misspelled name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    // identification
    MacAddress,
    Name,
    Location,
    ModelNumber,
    HardwareRevision,
    FirmwareMajorRevision,
    FirmwareMinorRevision,

    // connection
    Connected,
    Reconnecting,
    Stopped,

    // control
    Mode,
    ThermostatModes,
    FanMode,
    FanStatus,
    HeatSetpoint,
    CoolSetpoint,
    Hold,
    AwayAvailable,
    HeatingEquipmentStatus,
    CoolingEquipmentStatus,

    // sensors
    IndoorTemperatureControllingSensorValue,
    IndoorHumidityControllingSensorValue,
    OutdoorSensor,

    // humidity
    HumidificationAvailable,
    HumidificationStatus,
    HumidificationSetpoint,
    DehumidificationAvailable,
    DehumidificationStatus,
    DehumidificationSetpoint,

    // air quality
    AirCleaningAvailable,
    AirCleaningMode,
    AirCleaningEvent,
    VentilationAvailable,
    FreshAirMode,
    FreshAirEvent,
}

impl Attribute {
    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::MacAddress => "mac_address",
            Attribute::Name => "name",
            Attribute::Location => "location",
            Attribute::ModelNumber => "model_number",
            Attribute::HardwareRevision => "hardware_revision",
            Attribute::FirmwareMajorRevision => "firmware_major_revision",
            Attribute::FirmwareMinorRevision => "firmware_minor_revision",
            Attribute::Connected => "connected",
            Attribute::Reconnecting => "reconnecting",
            Attribute::Stopped => "stopped",
            Attribute::Mode => "mode",
            Attribute::ThermostatModes => "thermostat_modes",
            Attribute::FanMode => "fan_mode",
            Attribute::FanStatus => "fan_status",
            Attribute::HeatSetpoint => "heat_setpoint",
            Attribute::CoolSetpoint => "cool_setpoint",
            Attribute::Hold => "hold",
            Attribute::AwayAvailable => "away_available",
            Attribute::HeatingEquipmentStatus => "heating_equipment_status",
            Attribute::CoolingEquipmentStatus => "cooling_equipment_status",
            Attribute::IndoorTemperatureControllingSensorValue => {
                "indoor_temperature_controlling_sensor_value"
            }
            Attribute::IndoorHumidityControllingSensorValue => {
                "indoor_humidity_controlling_sensor_value"
            }
            Attribute::OutdoorSensor => "outdoor_sensor",
            Attribute::HumidificationAvailable => "humidification_available",
            Attribute::HumidificationStatus => "humidification_status",
            Attribute::HumidificationSetpoint => "humidification_setpoint",
            Attribute::DehumidificationAvailable => "dehumidification_available",
            Attribute::DehumidificationStatus => "dehumidification_status",
            Attribute::DehumidificationSetpoint => "dehumidification_setpoint",
            Attribute::AirCleaningAvailable => "air_cleaning_available",
            Attribute::AirCleaningMode => "air_cleaning_mode",
            Attribute::AirCleaningEvent => "air_cleaning_event",
            Attribute::VentilationAvailable => "ventilation_available",
            Attribute::FreshAirMode => "fresh_air_mode",
            Attribute::FreshAirEvent => "fresh_air_event",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw value of an attribute, passed through without range checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl AttributeValue {
    /// Integer view. Floats are truncated, booleans count as 0/1.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttributeValue::Integer(i) => Some(*i),
            AttributeValue::Float(f) => Some(*f as i64),
            AttributeValue::Bool(b) => Some(i64::from(*b)),
            AttributeValue::Text(_) => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            AttributeValue::Integer(i) => Some(*i as f64),
            AttributeValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Bool(b) => Some(*b),
            AttributeValue::Integer(i) => Some(*i != 0),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Integer(value)
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        AttributeValue::Integer(value as i64)
    }
}

impl From<u8> for AttributeValue {
    fn from(value: u8) -> Self {
        AttributeValue::Integer(value as i64)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Float(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

pub type AttributeMap = HashMap<Attribute, AttributeValue>;

/// Payload delivered by the device facade's update channel.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeUpdate {
    /// Keys to merge into the current snapshot.
    Partial(AttributeMap),
    /// Complete snapshot replacing the previous one.
    Full(AttributeMap),
}

/// Builds an [`AttributeMap`] from `(Attribute, value)` pairs.
#[macro_export]
macro_rules! attributes {
    ($($key:ident => $value:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut map = $crate::AttributeMap::new();
        $(map.insert($crate::Attribute::$key, $crate::AttributeValue::from($value));)*
        map
    }};
}
