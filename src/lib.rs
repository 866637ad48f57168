pub mod coordinator;
pub mod entities;
pub mod logging;
mod protocol;
pub mod settings;

pub use coordinator::{Coordinator, DeviceInfo};
pub use protocol::attributes::{Attribute, AttributeMap, AttributeUpdate, AttributeValue};
pub use protocol::client::*;
pub use protocol::simulator::{
    SimulatedClient, SimulatorOptions, SimulatorOptionsBuilder, default_thermostat,
};
pub use protocol::store::AttributeStore;
