use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use aprilaire_hub_rs::entities::{CapabilityAdapter, setup_entities};
use aprilaire_hub_rs::settings::Settings;
use aprilaire_hub_rs::{AttributeStore, Coordinator, SimulatedClient, SimulatorOptions};
use tracing::info;

use crate::Params;

pub struct Session {
    pub coordinator: Arc<Coordinator>,
    pub thermostat: Arc<SimulatedClient>,
    pub entities: Vec<CapabilityAdapter>,
}

impl Session {
    pub fn entity(&self, key: &str) -> Result<&CapabilityAdapter> {
        self.entities
            .iter()
            .find(|entity| entity.key() == key)
            .ok_or_else(|| {
                let known: Vec<_> = self.entities.iter().map(|entity| entity.key()).collect();
                anyhow!("No entity '{}', available: {}", key, known.join(", "))
            })
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.coordinator.stop_listen();
    }
}

/// Connects to a simulated thermostat and builds its entities.
pub async fn create_session(params: &Params) -> Result<Session> {
    let settings =
        Settings::load(params.settings.as_deref()).context("Failed to parse settings file")?;
    let options = SimulatorOptions::builder()
        .latency(Duration::from_millis(params.latency_ms))
        .fail_writes(params.fail_writes)
        .build()?;

    let store = AttributeStore::new();
    let thermostat = Arc::new(SimulatedClient::new(options, Arc::new(store.clone())));
    let coordinator = Arc::new(Coordinator::new(store, thermostat.clone()));

    info!("Connecting to simulated thermostat");
    coordinator.start_listen().await?;
    if !coordinator.wait_for_ready(settings.wait_timeout()).await? {
        bail!("Thermostat did not report a MAC address");
    }
    coordinator.refresh_device_info();

    let entities = setup_entities(coordinator.clone(), &settings);
    Ok(Session {
        coordinator,
        thermostat,
        entities,
    })
}

pub fn print_entity(entity: &CapabilityAdapter) -> Result<()> {
    println!(
        "{} {} ({}) available: {}",
        entity.capability().kind(),
        entity.name(),
        entity.unique_id().unwrap_or_else(|| "no unique id".to_string()),
        entity.available()
    );
    println!("{}", serde_json::to_string_pretty(&entity.state())?);
    Ok(())
}
