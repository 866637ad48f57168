use crate::entities::state::CodeMap;

/// Label reported for codes missing from an option table.
pub const FALLBACK_OPTION: &str = "off";

pub(crate) const AIR_CLEANING_EVENT_MAP: &CodeMap<&str> =
    &[(0, "off"), (3, "event_clean"), (4, "allergies")];

pub(crate) const AIR_CLEANING_MODE_MAP: &CodeMap<&str> =
    &[(0, "off"), (1, "constant_clean"), (2, "automatic")];

pub(crate) const FRESH_AIR_EVENT_MAP: &CodeMap<&str> = &[(0, "off"), (2, "3hour"), (3, "24hour")];

pub(crate) const FRESH_AIR_MODE_MAP: &CodeMap<&str> = &[(0, "off"), (1, "automatic")];
