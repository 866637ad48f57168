use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::coordinator::Coordinator;
use crate::entities::climate::{ClimateDescription, ClimateState, TemperatureRequest};
use crate::entities::entity;
use crate::entities::humidifier::{HumidifierDescription, HumidifierState};
use crate::entities::number::{NumberDescription, NumberState};
use crate::entities::select::{SelectDescription, SelectState};
use crate::entities::state::climate::HvacMode;
use crate::entities::write::{EntityError, PendingWrite};

/// What an adapter reads and which writes it accepts.
#[derive(Debug, Clone)]
pub enum Capability {
    Climate(ClimateDescription),
    Humidifier(HumidifierDescription),
    Number(NumberDescription),
    Select(SelectDescription),
}

impl Capability {
    pub fn kind(&self) -> &'static str {
        match self {
            Capability::Climate(_) => "climate",
            Capability::Humidifier(_) => "humidifier",
            Capability::Number(_) => "number",
            Capability::Select(_) => "select",
        }
    }
}

#[derive(Debug, Clone)]
pub struct CapabilityDescriptor {
    pub key: &'static str,
    pub name: &'static str,
    pub capability: Capability,
}

/// Write requests, carrying the native value type of each capability.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    TurnOn,
    TurnOff,
    SetHumidity(u8),
    SetValue(f64),
    SelectOption(String),
    SetTemperature(TemperatureRequest),
    SetFanMode(String),
    SetHvacMode(HvacMode),
    SetPresetMode(String),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::TurnOn => "turn_on",
            Command::TurnOff => "turn_off",
            Command::SetHumidity(_) => "set_humidity",
            Command::SetValue(_) => "set_value",
            Command::SelectOption(_) => "select_option",
            Command::SetTemperature(_) => "set_temperature",
            Command::SetFanMode(_) => "set_fan_mode",
            Command::SetHvacMode(_) => "set_hvac_mode",
            Command::SetPresetMode(_) => "set_preset_mode",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityState {
    Climate(ClimateState),
    Humidifier(HumidifierState),
    Number(NumberState),
    Select(SelectState),
}

/// One presented capability of the thermostat.
///
/// Adapters keep nothing besides their descriptor: every read goes to the
/// coordinator's store and every write goes to its client.
#[derive(Clone)]
pub struct CapabilityAdapter {
    coordinator: Arc<Coordinator>,
    descriptor: Arc<CapabilityDescriptor>,
}

impl CapabilityAdapter {
    pub fn new(coordinator: Arc<Coordinator>, descriptor: CapabilityDescriptor) -> Self {
        Self {
            coordinator,
            descriptor: Arc::new(descriptor),
        }
    }

    pub fn key(&self) -> &'static str {
        self.descriptor.key
    }

    pub fn name(&self) -> &'static str {
        self.descriptor.name
    }

    pub fn capability(&self) -> &Capability {
        &self.descriptor.capability
    }

    pub fn unique_id(&self) -> Option<String> {
        entity::unique_id(&self.coordinator, self.descriptor.name)
    }

    pub fn available(&self) -> bool {
        entity::available(&self.coordinator)
    }

    pub fn extra_state_attributes(&self) -> BTreeMap<&'static str, Value> {
        entity::extra_state_attributes(&self.coordinator)
    }

    pub fn state(&self) -> EntityState {
        let store = self.coordinator.store();
        match &self.descriptor.capability {
            Capability::Climate(climate) => EntityState::Climate(climate.state(store)),
            Capability::Humidifier(humidifier) => {
                EntityState::Humidifier(humidifier.state(store))
            }
            Capability::Number(number) => EntityState::Number(number.state(store)),
            Capability::Select(select) => EntityState::Select(select.state(store)),
        }
    }

    /// Forwards `command` to the thermostat.
    ///
    /// Label validation happens here, before the client sees anything. The
    /// returned write completes when the thermostat answers; the new value
    /// shows up in [`state`](Self::state) only once the device reports it.
    pub fn execute(&self, command: Command) -> Result<PendingWrite, EntityError> {
        let store = self.coordinator.store();
        let client = self.coordinator.client().clone();
        let entity = self.descriptor.name;

        match (&self.descriptor.capability, command) {
            (Capability::Humidifier(_), command @ (Command::TurnOn | Command::TurnOff)) => {
                debug!("{} ignores {}, it is always on", entity, command.name());
                Ok(PendingWrite::done())
            }
            (Capability::Humidifier(humidifier), Command::SetHumidity(humidity)) => {
                humidifier.set_humidity(client, humidity)
            }
            (Capability::Number(number), Command::SetValue(value)) => {
                number.set_native_value(client, value)
            }
            (Capability::Select(select), Command::SelectOption(option)) => {
                select.select_option(entity, store, client, &option)
            }
            (Capability::Climate(climate), Command::SetTemperature(request)) => {
                climate.set_temperature(store, client, request)
            }
            (Capability::Climate(climate), Command::SetHumidity(humidity)) => {
                climate.set_humidity(client, humidity)
            }
            (Capability::Climate(climate), Command::SetFanMode(fan_mode)) => {
                climate.set_fan_mode(entity, client, &fan_mode)
            }
            (Capability::Climate(climate), Command::SetHvacMode(hvac_mode)) => {
                climate.set_hvac_mode(entity, client, hvac_mode)
            }
            (Capability::Climate(climate), Command::SetPresetMode(preset_mode)) => {
                climate.set_preset_mode(entity, client, &preset_mode)
            }
            (_, command) => Err(EntityError::Unsupported {
                entity: entity.to_string(),
                command: command.name(),
            }),
        }
    }
}

impl std::fmt::Debug for CapabilityAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapabilityAdapter")
            .field("key", &self.descriptor.key)
            .field("kind", &self.descriptor.capability.kind())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use tokio::sync::Notify;

    use super::*;
    use crate::attributes;
    use crate::entities::select::PairRole;
    use crate::entities::state::climate::{HvacAction, SupportedFeatures};
    use crate::entities::state::humidifier::HumidifierAction;
    use crate::protocol::attributes::AttributeMap;
    use crate::protocol::client::ClientError;
    use crate::protocol::store::AttributeStore;
    use crate::protocol::testing::{ClientCall, RecordingClient};

    fn adapter_with(
        client: RecordingClient,
        values: AttributeMap,
        capability: Capability,
    ) -> CapabilityAdapter {
        let coordinator = Arc::new(Coordinator::new(
            AttributeStore::with_values(values),
            Arc::new(client),
        ));
        CapabilityAdapter::new(
            coordinator,
            CapabilityDescriptor {
                key: "test",
                name: "Test Entity",
                capability,
            },
        )
    }

    fn adapter(values: AttributeMap, capability: Capability) -> (CapabilityAdapter, RecordingClient) {
        let client = RecordingClient::new();
        (adapter_with(client.clone(), values, capability), client)
    }

    fn humidifier_state(adapter: &CapabilityAdapter) -> HumidifierState {
        match adapter.state() {
            EntityState::Humidifier(state) => state,
            other => panic!("Expected humidifier state, got {:?}", other),
        }
    }

    fn select_state(adapter: &CapabilityAdapter) -> SelectState {
        match adapter.state() {
            EntityState::Select(state) => state,
            other => panic!("Expected select state, got {:?}", other),
        }
    }

    fn number_state(adapter: &CapabilityAdapter) -> NumberState {
        match adapter.state() {
            EntityState::Number(state) => state,
            other => panic!("Expected number state, got {:?}", other),
        }
    }

    fn climate_state(adapter: &CapabilityAdapter) -> ClimateState {
        match adapter.state() {
            EntityState::Climate(state) => state,
            other => panic!("Expected climate state, got {:?}", other),
        }
    }

    fn store(adapter: &CapabilityAdapter) -> &AttributeStore {
        adapter.coordinator.store()
    }

    #[tokio::test]
    async fn humidifier_reports_humidifying_for_status_two() {
        let (adapter, _) = adapter(
            attributes! { HumidificationStatus => 2 },
            Capability::Humidifier(HumidifierDescription::humidifier()),
        );
        assert_eq!(
            humidifier_state(&adapter).action,
            Some(HumidifierAction::Humidifying)
        );
    }

    #[tokio::test]
    async fn empty_store_reads_as_unknown() {
        let (humidifier, _) = adapter(
            AttributeMap::new(),
            Capability::Humidifier(HumidifierDescription::humidifier()),
        );
        let state = humidifier_state(&humidifier);
        assert_eq!(state.action, None);
        assert_eq!(state.current_humidity, None);
        assert_eq!(state.target_humidity, None);
        assert!(state.is_on);

        let (number, _) = adapter(
            AttributeMap::new(),
            Capability::Number(NumberDescription::written_outdoor_temperature()),
        );
        assert_eq!(number_state(&number).native_value, None);
    }

    #[tokio::test]
    async fn unmapped_status_is_unknown_not_idle() {
        let (adapter, _) = adapter(
            attributes! { DehumidificationStatus => 7 },
            Capability::Humidifier(HumidifierDescription::dehumidifier()),
        );
        assert_eq!(humidifier_state(&adapter).action, None);

        store(&adapter).apply_update(attributes! { DehumidificationStatus => 3 });
        assert_eq!(
            humidifier_state(&adapter).action,
            Some(HumidifierAction::Drying)
        );
    }

    #[tokio::test]
    async fn humidifier_reads_through_on_every_access() {
        let (adapter, _) = adapter(
            attributes! {
                IndoorHumidityControllingSensorValue => 35,
                DehumidificationSetpoint => 45,
            },
            Capability::Humidifier(HumidifierDescription::dehumidifier()),
        );
        let state = humidifier_state(&adapter);
        assert_eq!(state.current_humidity, Some(35.0));
        assert_eq!(state.target_humidity, Some(45.0));
        assert_eq!((state.min_humidity, state.max_humidity), (10, 50));

        store(&adapter).apply_update(attributes! { IndoorHumidityControllingSensorValue => 38.6 });
        assert_eq!(humidifier_state(&adapter).current_humidity, Some(38.6));
    }

    #[test]
    fn execute_outside_runtime_returns_error() {
        let (number, client) = adapter(
            AttributeMap::new(),
            Capability::Number(NumberDescription::written_outdoor_temperature()),
        );
        assert!(matches!(
            number.execute(Command::SetValue(5.0)),
            Err(EntityError::NoRuntime)
        ));

        let (select, _) = adapter(
            AttributeMap::new(),
            Capability::Select(SelectDescription::fresh_air(PairRole::Mode)),
        );
        assert!(matches!(
            select.execute(Command::SelectOption("automatic".into())),
            Err(EntityError::NoRuntime)
        ));

        let (humidifier, _) = adapter(
            AttributeMap::new(),
            Capability::Humidifier(HumidifierDescription::humidifier()),
        );
        assert!(matches!(
            humidifier.execute(Command::SetHumidity(40)),
            Err(EntityError::NoRuntime)
        ));
        assert!(humidifier.execute(Command::TurnOn).is_ok());

        assert!(client.calls.try_read().is_ok_and(|calls| calls.is_empty()));
    }

    #[tokio::test]
    async fn humidifier_setters_follow_device_class() {
        let (humidifier, client) = adapter(
            AttributeMap::new(),
            Capability::Humidifier(HumidifierDescription::humidifier()),
        );
        humidifier
            .execute(Command::SetHumidity(40))
            .unwrap()
            .wait()
            .await
            .unwrap();

        let (dehumidifier, dehumidifier_client) = adapter(
            AttributeMap::new(),
            Capability::Humidifier(HumidifierDescription::dehumidifier()),
        );
        dehumidifier
            .execute(Command::SetHumidity(55))
            .unwrap()
            .wait()
            .await
            .unwrap();

        assert_eq!(
            client.calls().await,
            vec![ClientCall::SetHumidificationSetpoint(40)]
        );
        assert_eq!(
            dehumidifier_client.calls().await,
            vec![ClientCall::SetDehumidificationSetpoint(55)]
        );
    }

    #[tokio::test]
    async fn humidifier_toggle_is_accepted_without_a_call() {
        let (adapter, client) = adapter(
            AttributeMap::new(),
            Capability::Humidifier(HumidifierDescription::humidifier()),
        );

        for command in [Command::TurnOn, Command::TurnOff] {
            let write = adapter.execute(command).unwrap();
            assert!(write.is_finished());
            assert_eq!(write.wait().await, Ok(()));
        }
        assert!(client.calls().await.is_empty());
        assert!(humidifier_state(&adapter).is_on);
    }

    #[tokio::test]
    async fn unknown_select_code_reads_as_off() {
        let (adapter, _) = adapter(
            attributes! { AirCleaningMode => 9 },
            Capability::Select(SelectDescription::air_cleaning(PairRole::Mode)),
        );
        assert_eq!(select_state(&adapter).current_option, "off");
    }

    #[tokio::test]
    async fn select_reads_off_when_code_is_zero_or_absent() {
        let (absent, _) = adapter(
            AttributeMap::new(),
            Capability::Select(SelectDescription::fresh_air(PairRole::Event)),
        );
        assert_eq!(select_state(&absent).current_option, "off");

        let (zero, _) = adapter(
            attributes! { FreshAirEvent => 0 },
            Capability::Select(SelectDescription::fresh_air(PairRole::Event)),
        );
        assert_eq!(select_state(&zero).current_option, "off");

        store(&zero).apply_update(attributes! { FreshAirEvent => 3 });
        assert_eq!(select_state(&zero).current_option, "24hour");
    }

    #[tokio::test]
    async fn select_lists_options_in_code_order() {
        let (adapter, _) = adapter(
            AttributeMap::new(),
            Capability::Select(SelectDescription::air_cleaning(PairRole::Event)),
        );
        assert_eq!(
            select_state(&adapter).options,
            vec!["off", "event_clean", "allergies"]
        );
    }

    #[tokio::test]
    async fn select_mode_keeps_current_event() {
        let (adapter, client) = adapter(
            attributes! { AirCleaningEvent => 3 },
            Capability::Select(SelectDescription::air_cleaning(PairRole::Mode)),
        );

        adapter
            .execute(Command::SelectOption("automatic".into()))
            .unwrap()
            .wait()
            .await
            .unwrap();

        assert_eq!(
            client.calls().await,
            vec![ClientCall::SetAirCleaning { mode: 2, event: 3 }]
        );
    }

    #[tokio::test]
    async fn select_rereads_paired_value_for_every_write() {
        let (adapter, client) = adapter(
            attributes! { FreshAirMode => 1 },
            Capability::Select(SelectDescription::fresh_air(PairRole::Event)),
        );

        adapter
            .execute(Command::SelectOption("3hour".into()))
            .unwrap()
            .wait()
            .await
            .unwrap();
        store(&adapter).apply_update(attributes! { FreshAirMode => 0 });
        adapter
            .execute(Command::SelectOption("24hour".into()))
            .unwrap()
            .wait()
            .await
            .unwrap();

        assert_eq!(
            client.calls().await,
            vec![
                ClientCall::SetFreshAir { mode: 1, event: 2 },
                ClientCall::SetFreshAir { mode: 0, event: 3 },
            ]
        );
    }

    #[tokio::test]
    async fn select_writes_zero_when_pair_is_unknown() {
        let (adapter, client) = adapter(
            AttributeMap::new(),
            Capability::Select(SelectDescription::air_cleaning(PairRole::Event)),
        );
        adapter
            .execute(Command::SelectOption("allergies".into()))
            .unwrap()
            .wait()
            .await
            .unwrap();
        assert_eq!(
            client.calls().await,
            vec![ClientCall::SetAirCleaning { mode: 0, event: 4 }]
        );
    }

    #[tokio::test]
    async fn selecting_off_is_a_real_write() {
        let (adapter, client) = adapter(
            attributes! { AirCleaningMode => 2, AirCleaningEvent => 4 },
            Capability::Select(SelectDescription::air_cleaning(PairRole::Mode)),
        );
        adapter
            .execute(Command::SelectOption("off".into()))
            .unwrap()
            .wait()
            .await
            .unwrap();
        assert_eq!(
            client.calls().await,
            vec![ClientCall::SetAirCleaning { mode: 0, event: 4 }]
        );
    }

    #[tokio::test]
    async fn invalid_option_fails_before_any_call() {
        let (adapter, client) = adapter(
            attributes! { AirCleaningEvent => 3 },
            Capability::Select(SelectDescription::air_cleaning(PairRole::Mode)),
        );

        let result = adapter.execute(Command::SelectOption("turbo".into()));

        assert_eq!(
            result.unwrap_err(),
            EntityError::InvalidOption {
                entity: "Test Entity".to_string(),
                option: "turbo".to_string(),
            }
        );
        assert!(client.calls().await.is_empty());
    }

    #[tokio::test]
    async fn labels_of_the_other_role_are_rejected() {
        let (adapter, client) = adapter(
            AttributeMap::new(),
            Capability::Select(SelectDescription::air_cleaning(PairRole::Mode)),
        );
        let result = adapter.execute(Command::SelectOption("allergies".into()));
        assert!(matches!(result, Err(EntityError::InvalidOption { .. })));
        assert!(client.calls().await.is_empty());
    }

    #[tokio::test]
    async fn number_value_changes_only_after_device_report() {
        let (adapter, client) = adapter(
            attributes! { OutdoorSensor => 10 },
            Capability::Number(NumberDescription::written_outdoor_temperature()),
        );

        adapter
            .execute(Command::SetValue(12.5))
            .unwrap()
            .wait()
            .await
            .unwrap();

        assert_eq!(
            client.calls().await,
            vec![ClientCall::SetWrittenOutdoorTemperature(12.5)]
        );
        assert_eq!(number_state(&adapter).native_value, Some(10.0));

        store(&adapter).apply_update(attributes! { OutdoorSensor => 12.5 });
        assert_eq!(number_state(&adapter).native_value, Some(12.5));
    }

    #[tokio::test]
    async fn number_reports_static_bounds() {
        let (adapter, _) = adapter(
            AttributeMap::new(),
            Capability::Number(NumberDescription::written_outdoor_temperature()),
        );
        let state = number_state(&adapter);
        assert_eq!((state.min_value, state.max_value), (-40.0, 55.0));
        assert_eq!(state.unit, "°C");
    }

    #[tokio::test]
    async fn pending_write_does_not_touch_the_store() {
        let gate = Arc::new(Notify::new());
        let client = RecordingClient::gated(gate.clone());
        let adapter = adapter_with(
            client.clone(),
            attributes! { HumidificationSetpoint => 30 },
            Capability::Humidifier(HumidifierDescription::humidifier()),
        );

        let write = adapter.execute(Command::SetHumidity(45)).unwrap();
        assert!(!write.is_finished());
        assert_eq!(humidifier_state(&adapter).target_humidity, Some(30.0));

        gate.notify_one();
        write.wait().await.unwrap();
        assert_eq!(humidifier_state(&adapter).target_humidity, Some(30.0));
        assert_eq!(
            client.calls().await,
            vec![ClientCall::SetHumidificationSetpoint(45)]
        );
    }

    #[tokio::test]
    async fn client_failures_surface_unchanged() {
        let client = RecordingClient::failing();
        let adapter = adapter_with(
            client.clone(),
            AttributeMap::new(),
            Capability::Number(NumberDescription::written_outdoor_temperature()),
        );

        let result = adapter.execute(Command::SetValue(5.0)).unwrap().wait().await;

        assert_eq!(
            result,
            Err(EntityError::Client(ClientError::Rejected(
                "Fake error".to_string()
            )))
        );
        assert!(client.calls().await.is_empty());

        client.should_fail.store(false, Ordering::Relaxed);
        adapter
            .execute(Command::SetValue(5.0))
            .unwrap()
            .wait()
            .await
            .unwrap();
        assert_eq!(
            client.calls().await,
            vec![ClientCall::SetWrittenOutdoorTemperature(5.0)]
        );
    }

    #[tokio::test]
    async fn mismatched_commands_are_unsupported() {
        let (number, client) = adapter(
            AttributeMap::new(),
            Capability::Number(NumberDescription::written_outdoor_temperature()),
        );
        assert_eq!(
            number.execute(Command::TurnOn).unwrap_err(),
            EntityError::Unsupported {
                entity: "Test Entity".to_string(),
                command: "turn_on",
            }
        );

        let (climate, _) = adapter(
            AttributeMap::new(),
            Capability::Climate(ClimateDescription),
        );
        assert!(matches!(
            climate.execute(Command::TurnOff),
            Err(EntityError::Unsupported { command: "turn_off", .. })
        ));
        assert!(matches!(
            climate.execute(Command::SelectOption("off".into())),
            Err(EntityError::Unsupported { .. })
        ));
        assert!(client.calls().await.is_empty());
    }

    #[tokio::test]
    async fn identity_comes_from_the_coordinator() {
        let (adapter, _) = adapter(
            attributes! {
                MacAddress => "00:1A:2B:3C:4D:5E",
                Name => "Upstairs",
                Location => "Hallway",
                Connected => true,
            },
            Capability::Climate(ClimateDescription),
        );
        assert_eq!(
            adapter.unique_id().as_deref(),
            Some("00_1A_2B_3C_4D_5E_test_entity")
        );
        assert!(adapter.available());
        let extra = adapter.extra_state_attributes();
        assert_eq!(extra["device_name"], "Upstairs");
        assert_eq!(extra["device_location"], "Hallway");

        store(&adapter).apply_update(attributes! { Stopped => true });
        assert!(!adapter.available());
    }

    #[tokio::test]
    async fn climate_state_follows_store() {
        let (adapter, _) = adapter(
            attributes! {
                Mode => 3,
                ThermostatModes => 6,
                HeatSetpoint => 20,
                CoolSetpoint => 24.5,
                IndoorTemperatureControllingSensorValue => 22.5,
                CoolingEquipmentStatus => 1,
                FanMode => 3,
                Hold => 1,
                AwayAvailable => 1,
                HumidificationAvailable => 2,
                IndoorHumidityControllingSensorValue => 41.5,
                HumidificationSetpoint => 40,
            },
            Capability::Climate(ClimateDescription),
        );

        let state = climate_state(&adapter);
        assert_eq!(state.hvac_mode, Some(HvacMode::Cool));
        assert_eq!(state.current_humidity, Some(41.5));
        assert_eq!(state.target_humidity, Some(40.0));
        assert_eq!(state.hvac_modes.len(), 4);
        assert_eq!(state.hvac_action, HvacAction::Cooling);
        assert_eq!(state.target_temperature, Some(24.5));
        assert_eq!(state.target_temperature_low, Some(20.0));
        assert_eq!(state.current_temperature, Some(22.5));
        assert_eq!(state.fan_mode, Some("Circulate"));
        assert_eq!(state.preset_mode, "Temporary");
        assert_eq!(
            state.preset_modes,
            vec!["none", "Vacation", "away", "Temporary"]
        );
        assert!(
            state
                .supported_features
                .contains(SupportedFeatures::TARGET_TEMPERATURE | SupportedFeatures::TARGET_HUMIDITY)
        );
        assert!(
            !state
                .supported_features
                .contains(SupportedFeatures::TARGET_TEMPERATURE_RANGE)
        );
        assert_eq!(state.extra_state_attributes["fan_status"], "off");
    }

    #[tokio::test]
    async fn climate_without_data_is_unknown() {
        let (adapter, _) = adapter(
            AttributeMap::new(),
            Capability::Climate(ClimateDescription),
        );
        let state = climate_state(&adapter);
        assert_eq!(state.hvac_mode, None);
        assert!(state.hvac_modes.is_empty());
        assert_eq!(state.hvac_action, HvacAction::Idle);
        assert_eq!(state.target_temperature, None);
        assert_eq!(state.fan_mode, None);
        assert_eq!(state.preset_mode, "none");
        assert_eq!(state.extra_state_attributes["air_cleaning_mode"], "off");
    }

    #[tokio::test]
    async fn single_temperature_targets_the_active_setpoint() {
        let (adapter, client) = adapter(
            attributes! { Mode => 3 },
            Capability::Climate(ClimateDescription),
        );
        let request = TemperatureRequest {
            temperature: Some(23.0),
            ..Default::default()
        };
        adapter
            .execute(Command::SetTemperature(request))
            .unwrap()
            .wait()
            .await
            .unwrap();

        store(&adapter).apply_update(attributes! { Mode => 2 });
        adapter
            .execute(Command::SetTemperature(request))
            .unwrap()
            .wait()
            .await
            .unwrap();

        assert_eq!(
            client.calls().await,
            vec![
                ClientCall::UpdateSetpoint {
                    cool: 23.0,
                    heat: 0.0
                },
                ClientCall::ReadControl,
                ClientCall::UpdateSetpoint {
                    cool: 0.0,
                    heat: 23.0
                },
                ClientCall::ReadControl,
            ]
        );
    }

    #[tokio::test]
    async fn temperature_range_and_empty_requests() {
        let (adapter, client) = adapter(
            attributes! { Mode => 5 },
            Capability::Climate(ClimateDescription),
        );

        let empty = adapter
            .execute(Command::SetTemperature(TemperatureRequest::default()))
            .unwrap();
        assert!(empty.is_finished());

        adapter
            .execute(Command::SetTemperature(TemperatureRequest {
                temperature: None,
                target_temp_low: Some(19.5),
                target_temp_high: Some(25.0),
            }))
            .unwrap()
            .wait()
            .await
            .unwrap();

        assert_eq!(
            client.calls().await,
            vec![
                ClientCall::UpdateSetpoint {
                    cool: 25.0,
                    heat: 19.5
                },
                ClientCall::ReadControl,
            ]
        );
    }

    #[tokio::test]
    async fn climate_mode_writes_refresh_afterwards() {
        let (adapter, client) = adapter(
            AttributeMap::new(),
            Capability::Climate(ClimateDescription),
        );

        adapter
            .execute(Command::SetFanMode("auto".into()))
            .unwrap()
            .wait()
            .await
            .unwrap();
        adapter
            .execute(Command::SetHvacMode(HvacMode::Heat))
            .unwrap()
            .wait()
            .await
            .unwrap();
        adapter
            .execute(Command::SetPresetMode("Vacation".into()))
            .unwrap()
            .wait()
            .await
            .unwrap();
        adapter
            .execute(Command::SetHumidity(30))
            .unwrap()
            .wait()
            .await
            .unwrap();

        assert_eq!(
            client.calls().await,
            vec![
                ClientCall::UpdateFanMode(2),
                ClientCall::ReadControl,
                ClientCall::UpdateMode(2),
                ClientCall::ReadControl,
                ClientCall::SetHold(4),
                ClientCall::ReadScheduling,
                ClientCall::SetHumidificationSetpoint(30),
            ]
        );
    }

    #[tokio::test]
    async fn climate_rejects_unknown_labels() {
        let (adapter, client) = adapter(
            AttributeMap::new(),
            Capability::Climate(ClimateDescription),
        );

        assert!(matches!(
            adapter.execute(Command::SetFanMode("turbo".into())),
            Err(EntityError::InvalidOption { .. })
        ));
        assert!(matches!(
            adapter.execute(Command::SetPresetMode("Temporary".into())),
            Err(EntityError::InvalidOption { .. })
        ));
        assert!(client.calls().await.is_empty());
    }

    #[test]
    fn state_serializes_with_kind_tag() {
        let state = EntityState::Select(SelectState {
            current_option: "off",
            options: vec!["off", "automatic"],
        });
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["kind"], "select");
        assert_eq!(json["current_option"], "off");
    }
}
