use serde::Serialize;
use tracing::debug;

use crate::entities::state::select::{
    AIR_CLEANING_EVENT_MAP, AIR_CLEANING_MODE_MAP, FALLBACK_OPTION, FRESH_AIR_EVENT_MAP,
    FRESH_AIR_MODE_MAP,
};
use crate::entities::state::{CodeMap, lookup, reverse_lookup, states};
use crate::entities::write::{EntityError, PendingWrite};
use crate::protocol::attributes::Attribute;
use crate::protocol::client::ClientPointer;
use crate::protocol::store::AttributeStore;

/// Combined setter taking the mode and the event together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairSetter {
    AirCleaning,
    FreshAir,
}

/// Which half of a mode/event pair a select controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairRole {
    Mode,
    Event,
}

#[derive(Debug, Clone)]
pub struct SelectDescription {
    pub options_map: &'static CodeMap<&'static str>,
    pub mode_key: Attribute,
    pub event_key: Attribute,
    pub role: PairRole,
    pub setter: PairSetter,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectState {
    pub current_option: &'static str,
    pub options: Vec<&'static str>,
}

impl SelectDescription {
    pub fn air_cleaning(role: PairRole) -> Self {
        Self {
            options_map: match role {
                PairRole::Mode => AIR_CLEANING_MODE_MAP,
                PairRole::Event => AIR_CLEANING_EVENT_MAP,
            },
            mode_key: Attribute::AirCleaningMode,
            event_key: Attribute::AirCleaningEvent,
            role,
            setter: PairSetter::AirCleaning,
        }
    }

    pub fn fresh_air(role: PairRole) -> Self {
        Self {
            options_map: match role {
                PairRole::Mode => FRESH_AIR_MODE_MAP,
                PairRole::Event => FRESH_AIR_EVENT_MAP,
            },
            mode_key: Attribute::FreshAirMode,
            event_key: Attribute::FreshAirEvent,
            role,
            setter: PairSetter::FreshAir,
        }
    }

    fn own_key(&self) -> Attribute {
        match self.role {
            PairRole::Mode => self.mode_key,
            PairRole::Event => self.event_key,
        }
    }

    fn paired_key(&self) -> Attribute {
        match self.role {
            PairRole::Mode => self.event_key,
            PairRole::Event => self.mode_key,
        }
    }

    pub fn options(&self) -> Vec<&'static str> {
        states(self.options_map)
    }

    /// Absent codes read as 0 and unknown codes as "off".
    pub fn current_option(&self, store: &AttributeStore) -> &'static str {
        let code = store.get_int(self.own_key()).unwrap_or(0);
        lookup(code, self.options_map).unwrap_or(FALLBACK_OPTION)
    }

    pub fn state(&self, store: &AttributeStore) -> SelectState {
        SelectState {
            current_option: self.current_option(store),
            options: self.options(),
        }
    }

    /// Writes `option` together with the paired value currently in the store.
    pub(crate) fn select_option(
        &self,
        entity: &str,
        store: &AttributeStore,
        client: ClientPointer,
        option: &str,
    ) -> Result<PendingWrite, EntityError> {
        let code =
            reverse_lookup(&option, self.options_map).ok_or_else(|| EntityError::InvalidOption {
                entity: entity.to_string(),
                option: option.to_string(),
            })?;

        let paired_key = self.paired_key();
        let paired = store.get_int(paired_key).unwrap_or_else(|| {
            debug!("{} has no value yet, writing 0 alongside {}", paired_key, option);
            0
        });

        let (mode, event) = match self.role {
            PairRole::Mode => (code, paired),
            PairRole::Event => (paired, code),
        };
        debug!("Writing {:?} mode={} event={}", self.setter, mode, event);

        match self.setter {
            PairSetter::AirCleaning => {
                PendingWrite::spawn(async move { client.set_air_cleaning(mode, event).await })
            }
            PairSetter::FreshAir => {
                PendingWrite::spawn(async move { client.set_fresh_air(mode, event).await })
            }
        }
    }
}
