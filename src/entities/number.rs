use serde::Serialize;

use crate::entities::write::{EntityError, PendingWrite};
use crate::protocol::attributes::Attribute;
use crate::protocol::client::ClientPointer;
use crate::protocol::store::AttributeStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberSetter {
    WrittenOutdoorTemperature,
}

#[derive(Debug, Clone)]
pub struct NumberDescription {
    pub value_key: Attribute,
    pub setter: NumberSetter,
    pub min_value: f64,
    pub max_value: f64,
    pub unit: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumberState {
    pub native_value: Option<f64>,
    pub min_value: f64,
    pub max_value: f64,
    pub unit: &'static str,
}

impl NumberDescription {
    /// Outdoor temperature written to the thermostat by an external sensor.
    pub fn written_outdoor_temperature() -> Self {
        Self {
            value_key: Attribute::OutdoorSensor,
            setter: NumberSetter::WrittenOutdoorTemperature,
            min_value: -40.0,
            max_value: 55.0,
            unit: "°C",
        }
    }

    pub fn native_value(&self, store: &AttributeStore) -> Option<f64> {
        store.get_float(self.value_key)
    }

    pub fn state(&self, store: &AttributeStore) -> NumberState {
        NumberState {
            native_value: self.native_value(store),
            min_value: self.min_value,
            max_value: self.max_value,
            unit: self.unit,
        }
    }

    pub(crate) fn set_native_value(
        &self,
        client: ClientPointer,
        value: f64,
    ) -> Result<PendingWrite, EntityError> {
        match self.setter {
            NumberSetter::WrittenOutdoorTemperature => PendingWrite::spawn(async move {
                client.set_written_outdoor_temperature_value(value).await
            }),
        }
    }
}
