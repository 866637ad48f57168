use std::collections::BTreeMap;

use serde_json::Value;

use crate::coordinator::Coordinator;
use crate::protocol::attributes::Attribute;

/// Whether the session can currently serve values.
///
/// A session that is reconnecting stays available so entities do not flap
/// during short network drops.
pub fn available(coordinator: &Coordinator) -> bool {
    let store = coordinator.store();
    let has_mac = store
        .get_text(Attribute::MacAddress)
        .is_some_and(|mac| !mac.is_empty());
    let stopped = store.get_bool(Attribute::Stopped).unwrap_or(false);
    let connected = store.get_bool(Attribute::Connected).unwrap_or(false);
    let reconnecting = store.get_bool(Attribute::Reconnecting).unwrap_or(false);

    has_mac && !stopped && (connected || reconnecting)
}

/// `<mac with underscores>_<name slug>`, `None` before the MAC is known.
pub fn unique_id(coordinator: &Coordinator, name: &str) -> Option<String> {
    let mac = coordinator
        .store()
        .get_text(Attribute::MacAddress)
        .filter(|mac| !mac.is_empty())?;
    Some(format!("{}_{}", mac.replace(':', "_"), slugify(name)))
}

pub fn extra_state_attributes(coordinator: &Coordinator) -> BTreeMap<&'static str, Value> {
    let location = coordinator
        .store()
        .get_text(Attribute::Location)
        .map(Value::from)
        .unwrap_or(Value::Null);
    BTreeMap::from([
        ("device_name", Value::from(coordinator.device_name())),
        ("device_location", location),
    ])
}

fn slugify(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}
