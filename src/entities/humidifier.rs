use serde::Serialize;

use crate::entities::state::humidifier::{
    DEHUMIDIFICATION_STATUS_MAP, HUMIDIFICATION_STATUS_MAP, HumidifierAction,
    HumidifierDeviceClass, MAX_HUMIDITY, MIN_HUMIDITY,
};
use crate::entities::state::{CodeMap, derive};
use crate::entities::write::{EntityError, PendingWrite};
use crate::protocol::attributes::Attribute;
use crate::protocol::client::ClientPointer;
use crate::protocol::store::AttributeStore;

/// Setter used for a humidity target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HumiditySetter {
    Humidification,
    Dehumidification,
}

#[derive(Debug, Clone)]
pub struct HumidifierDescription {
    pub device_class: HumidifierDeviceClass,
    pub status_key: Attribute,
    pub status_map: &'static CodeMap<HumidifierAction>,
    pub setpoint_key: Attribute,
    pub setter: HumiditySetter,
    pub min_humidity: u8,
    pub max_humidity: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HumidifierState {
    pub device_class: HumidifierDeviceClass,
    /// The thermostat cannot switch the equipment off, so this is always true.
    pub is_on: bool,
    pub current_humidity: Option<f64>,
    pub target_humidity: Option<f64>,
    pub action: Option<HumidifierAction>,
    pub min_humidity: u8,
    pub max_humidity: u8,
}

impl HumidifierDescription {
    pub fn humidifier() -> Self {
        Self {
            device_class: HumidifierDeviceClass::Humidifier,
            status_key: Attribute::HumidificationStatus,
            status_map: HUMIDIFICATION_STATUS_MAP,
            setpoint_key: Attribute::HumidificationSetpoint,
            setter: HumiditySetter::Humidification,
            min_humidity: MIN_HUMIDITY,
            max_humidity: MAX_HUMIDITY,
        }
    }

    pub fn dehumidifier() -> Self {
        Self {
            device_class: HumidifierDeviceClass::Dehumidifier,
            status_key: Attribute::DehumidificationStatus,
            status_map: DEHUMIDIFICATION_STATUS_MAP,
            setpoint_key: Attribute::DehumidificationSetpoint,
            setter: HumiditySetter::Dehumidification,
            min_humidity: MIN_HUMIDITY,
            max_humidity: MAX_HUMIDITY,
        }
    }

    pub fn current_humidity(&self, store: &AttributeStore) -> Option<f64> {
        store.get_float(Attribute::IndoorHumidityControllingSensorValue)
    }

    pub fn target_humidity(&self, store: &AttributeStore) -> Option<f64> {
        store.get_float(self.setpoint_key)
    }

    pub fn action(&self, store: &AttributeStore) -> Option<HumidifierAction> {
        derive(store.get_int(self.status_key), self.status_map)
    }

    pub fn state(&self, store: &AttributeStore) -> HumidifierState {
        HumidifierState {
            device_class: self.device_class,
            is_on: true,
            current_humidity: self.current_humidity(store),
            target_humidity: self.target_humidity(store),
            action: self.action(store),
            min_humidity: self.min_humidity,
            max_humidity: self.max_humidity,
        }
    }

    pub(crate) fn set_humidity(
        &self,
        client: ClientPointer,
        humidity: u8,
    ) -> Result<PendingWrite, EntityError> {
        match self.setter {
            HumiditySetter::Humidification => PendingWrite::spawn(async move {
                client.set_humidification_setpoint(humidity).await
            }),
            HumiditySetter::Dehumidification => PendingWrite::spawn(async move {
                client.set_dehumidification_setpoint(humidity).await
            }),
        }
    }
}
