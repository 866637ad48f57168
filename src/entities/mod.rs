pub mod adapter;
pub mod climate;
pub mod entity;
pub mod humidifier;
pub mod number;
pub mod platform;
pub mod select;
pub mod state;
pub mod write;

pub use adapter::{Capability, CapabilityAdapter, CapabilityDescriptor, Command, EntityState};
pub use platform::setup_entities;
pub use write::{EntityError, PendingWrite};
