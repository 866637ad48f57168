use std::sync::Arc;

use tracing::info;

use crate::coordinator::Coordinator;
use crate::entities::adapter::{Capability, CapabilityAdapter, CapabilityDescriptor};
use crate::entities::climate::ClimateDescription;
use crate::entities::humidifier::HumidifierDescription;
use crate::entities::number::NumberDescription;
use crate::entities::select::{PairRole, SelectDescription};
use crate::protocol::attributes::Attribute;
use crate::settings::Settings;

fn thermostat() -> CapabilityDescriptor {
    CapabilityDescriptor {
        key: "thermostat",
        name: "Thermostat",
        capability: Capability::Climate(ClimateDescription),
    }
}

fn humidifier() -> CapabilityDescriptor {
    CapabilityDescriptor {
        key: "humidifier",
        name: "Humidifier",
        capability: Capability::Humidifier(HumidifierDescription::humidifier()),
    }
}

fn dehumidifier() -> CapabilityDescriptor {
    CapabilityDescriptor {
        key: "dehumidifier",
        name: "Dehumidifier",
        capability: Capability::Humidifier(HumidifierDescription::dehumidifier()),
    }
}

fn air_cleaning() -> [CapabilityDescriptor; 2] {
    [
        CapabilityDescriptor {
            key: "air_cleaning_event",
            name: "Air Cleaning Event",
            capability: Capability::Select(SelectDescription::air_cleaning(PairRole::Event)),
        },
        CapabilityDescriptor {
            key: "air_cleaning_mode",
            name: "Air Cleaning Mode",
            capability: Capability::Select(SelectDescription::air_cleaning(PairRole::Mode)),
        },
    ]
}

fn fresh_air() -> [CapabilityDescriptor; 2] {
    [
        CapabilityDescriptor {
            key: "fresh_air_event",
            name: "Fresh Air Event",
            capability: Capability::Select(SelectDescription::fresh_air(PairRole::Event)),
        },
        CapabilityDescriptor {
            key: "fresh_air_mode",
            name: "Fresh Air Mode",
            capability: Capability::Select(SelectDescription::fresh_air(PairRole::Mode)),
        },
    ]
}

fn written_outdoor_temperature() -> CapabilityDescriptor {
    CapabilityDescriptor {
        key: "written_outdoor_temperature_value",
        name: "Written Outdoor Temperature",
        capability: Capability::Number(NumberDescription::written_outdoor_temperature()),
    }
}

/// Builds one adapter per capability the thermostat reports as installed.
///
/// Call after the coordinator is ready; accessories missing from the store
/// at this point are not created later.
pub fn setup_entities(coordinator: Arc<Coordinator>, settings: &Settings) -> Vec<CapabilityAdapter> {
    let Settings {
        mount_climate,
        mount_humidifiers,
        mount_selects,
        mount_numbers,
        ..
    } = settings;
    let store = coordinator.store();

    let mut descriptors = vec![];

    if mount_climate.unwrap_or_default() {
        descriptors.push(thermostat());
    }

    if mount_humidifiers.unwrap_or_default() {
        if store.get_int(Attribute::HumidificationAvailable) == Some(2) {
            descriptors.push(humidifier());
        }
        if store.get_int(Attribute::DehumidificationAvailable) == Some(1) {
            descriptors.push(dehumidifier());
        }
    }

    if mount_selects.unwrap_or_default() {
        if store.get_int(Attribute::AirCleaningAvailable) == Some(1) {
            descriptors.extend(air_cleaning());
        }
        if store.get_int(Attribute::VentilationAvailable) == Some(1) {
            descriptors.extend(fresh_air());
        }
    }

    if mount_numbers.unwrap_or_default() {
        descriptors.push(written_outdoor_temperature());
    }

    descriptors
        .into_iter()
        .map(|descriptor| {
            info!(
                "Adding {} entity: {}",
                descriptor.capability.kind(),
                descriptor.name
            );
            CapabilityAdapter::new(coordinator.clone(), descriptor)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes;
    use crate::protocol::attributes::AttributeMap;
    use crate::protocol::store::AttributeStore;
    use crate::protocol::testing::RecordingClient;

    fn coordinator(values: AttributeMap) -> Arc<Coordinator> {
        Arc::new(Coordinator::new(
            AttributeStore::with_values(values),
            Arc::new(RecordingClient::new()),
        ))
    }

    fn keys(adapters: &[CapabilityAdapter]) -> Vec<&'static str> {
        adapters.iter().map(|adapter| adapter.key()).collect()
    }

    #[test]
    fn bare_thermostat_gets_climate_and_number() {
        let adapters = setup_entities(coordinator(AttributeMap::new()), &Settings::default());
        assert_eq!(
            keys(&adapters),
            vec!["thermostat", "written_outdoor_temperature_value"]
        );
    }

    #[test]
    fn installed_accessories_add_entities() {
        let adapters = setup_entities(
            coordinator(attributes! {
                HumidificationAvailable => 2,
                DehumidificationAvailable => 1,
                AirCleaningAvailable => 1,
                VentilationAvailable => 1,
            }),
            &Settings::default(),
        );
        assert_eq!(
            keys(&adapters),
            vec![
                "thermostat",
                "humidifier",
                "dehumidifier",
                "air_cleaning_event",
                "air_cleaning_mode",
                "fresh_air_event",
                "fresh_air_mode",
                "written_outdoor_temperature_value",
            ]
        );
    }

    #[test]
    fn availability_codes_must_match_exactly() {
        let adapters = setup_entities(
            coordinator(attributes! {
                HumidificationAvailable => 1,
                DehumidificationAvailable => 2,
                AirCleaningAvailable => 0,
            }),
            &Settings::default(),
        );
        assert_eq!(
            keys(&adapters),
            vec!["thermostat", "written_outdoor_temperature_value"]
        );
    }

    #[test]
    fn settings_can_skip_groups() {
        let settings = Settings {
            mount_climate: Some(false),
            mount_selects: None,
            mount_numbers: Some(false),
            ..Settings::default()
        };
        let adapters = setup_entities(
            coordinator(attributes! {
                HumidificationAvailable => 2,
                AirCleaningAvailable => 1,
            }),
            &settings,
        );
        assert_eq!(keys(&adapters), vec!["humidifier"]);
    }
}
