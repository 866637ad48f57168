use serde::Serialize;

use crate::entities::state::CodeMap;

pub const MIN_HUMIDITY: u8 = 10;
pub const MAX_HUMIDITY: u8 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HumidifierAction {
    Off,
    Idle,
    Humidifying,
    Drying,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HumidifierDeviceClass {
    Humidifier,
    Dehumidifier,
}

pub(crate) const HUMIDIFICATION_STATUS_MAP: &CodeMap<HumidifierAction> = &[
    (0, HumidifierAction::Idle),
    (1, HumidifierAction::Idle),
    (2, HumidifierAction::Humidifying),
    (3, HumidifierAction::Off),
];

pub(crate) const DEHUMIDIFICATION_STATUS_MAP: &CodeMap<HumidifierAction> = &[
    (0, HumidifierAction::Idle),
    (1, HumidifierAction::Idle),
    (2, HumidifierAction::Drying),
    (3, HumidifierAction::Drying),
    (4, HumidifierAction::Off),
];
