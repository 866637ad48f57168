use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entities::state::CodeMap;

pub const FAN_ON: &str = "on";
pub const FAN_AUTO: &str = "auto";
pub const FAN_CIRCULATE: &str = "Circulate";

pub const PRESET_NONE: &str = "none";
pub const PRESET_AWAY: &str = "away";
pub const PRESET_TEMPORARY_HOLD: &str = "Temporary";
pub const PRESET_PERMANENT_HOLD: &str = "Permanent";
pub const PRESET_VACATION: &str = "Vacation";

pub const TEMPERATURE_STEP: f64 = 0.5;
pub const TEMPERATURE_UNIT: &str = "°C";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HvacMode {
    Off,
    Heat,
    Cool,
    Auto,
}

impl HvacMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            HvacMode::Off => "off",
            HvacMode::Heat => "heat",
            HvacMode::Cool => "cool",
            HvacMode::Auto => "auto",
        }
    }
}

impl fmt::Display for HvacMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HvacMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "off" => Ok(HvacMode::Off),
            "heat" => Ok(HvacMode::Heat),
            "cool" => Ok(HvacMode::Cool),
            "auto" => Ok(HvacMode::Auto),
            _ => Err(format!(
                "Invalid HVAC mode '{s}'. Valid options: off, heat, cool, auto"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HvacAction {
    Heating,
    Cooling,
    Idle,
}

pub(crate) const HVAC_MODE_MAP: &CodeMap<HvacMode> = &[
    (1, HvacMode::Off),
    (2, HvacMode::Heat),
    (3, HvacMode::Cool),
    (4, HvacMode::Heat),
    (5, HvacMode::Auto),
];

pub(crate) const HVAC_MODES_MAP: &CodeMap<&[HvacMode]> = &[
    (1, &[HvacMode::Off, HvacMode::Heat]),
    (2, &[HvacMode::Off, HvacMode::Cool]),
    (3, &[HvacMode::Off, HvacMode::Heat, HvacMode::Cool]),
    (4, &[HvacMode::Off, HvacMode::Heat, HvacMode::Cool]),
    (
        5,
        &[HvacMode::Off, HvacMode::Heat, HvacMode::Cool, HvacMode::Auto],
    ),
    (
        6,
        &[HvacMode::Off, HvacMode::Heat, HvacMode::Cool, HvacMode::Auto],
    ),
];

pub(crate) const PRESET_MODE_MAP: &CodeMap<&str> = &[
    (1, PRESET_TEMPORARY_HOLD),
    (2, PRESET_PERMANENT_HOLD),
    (3, PRESET_AWAY),
    (4, PRESET_VACATION),
];

pub(crate) const FAN_MODE_MAP: &CodeMap<&str> = &[(1, FAN_ON), (2, FAN_AUTO), (3, FAN_CIRCULATE)];

/// Mode code that switches the thermostat to a heat/cool range.
pub(crate) const MODE_AUTO: i64 = 5;
/// Mode code for cooling only.
pub(crate) const MODE_COOL: i64 = 3;

/// Feature bits advertised by the climate entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SupportedFeatures(u32);

impl SupportedFeatures {
    pub const TARGET_TEMPERATURE: Self = Self(1);
    pub const TARGET_TEMPERATURE_RANGE: Self = Self(2);
    pub const TARGET_HUMIDITY: Self = Self(4);
    pub const FAN_MODE: Self = Self(8);
    pub const PRESET_MODE: Self = Self(16);
    pub const TARGET_DEHUMIDITY: Self = Self(2 << 10);
    pub const FRESH_AIR: Self = Self(2 << 11);
    pub const AIR_CLEANING: Self = Self(2 << 12);

    pub fn bits(&self) -> u32 {
        self.0
    }

    pub fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for SupportedFeatures {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for SupportedFeatures {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}
