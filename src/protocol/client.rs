use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::protocol::attributes::{AttributeMap, AttributeUpdate};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    #[error("Client is not connected")]
    NotConnected,
    #[error("No response within {0:?}")]
    Timeout(Duration),
    #[error("Thermostat rejected the request: {0}")]
    Rejected(String),
    #[error("Transport failure: {0}")]
    Transport(String),
}

/// Functional domains of the thermostat's attribute space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FunctionalDomain {
    Setup = 1,
    Control = 2,
    Scheduling = 3,
    Alerts = 4,
    Sensors = 5,
    Lockout = 6,
    Status = 7,
    Identification = 8,
}

/// Receiver of attribute updates pushed by the device client.
#[async_trait]
pub trait StatusUpdate: Send + Sync {
    async fn status_update(&self, update: AttributeUpdate);
}

pub type StatusObserver = Arc<dyn StatusUpdate>;

/// Operations offered by the thermostat client.
///
/// Setters complete when the thermostat acknowledged the write; the new
/// values arrive later through the [`StatusUpdate`] channel.
#[async_trait]
pub trait AprilaireClientTrait: Send + Sync {
    async fn start_listen(&self) -> Result<(), ClientError>;

    fn stop_listen(&self);

    /// Requests one attribute group and waits for the answer.
    async fn wait_for_response(
        &self,
        domain: FunctionalDomain,
        attribute: u8,
        timeout: Duration,
    ) -> Result<Option<AttributeMap>, ClientError>;

    async fn set_humidification_setpoint(&self, humidity: u8) -> Result<(), ClientError>;

    async fn set_dehumidification_setpoint(&self, humidity: u8) -> Result<(), ClientError>;

    async fn set_written_outdoor_temperature_value(
        &self,
        temperature: f64,
    ) -> Result<(), ClientError>;

    async fn set_air_cleaning(&self, mode: i64, event: i64) -> Result<(), ClientError>;

    async fn set_fresh_air(&self, mode: i64, event: i64) -> Result<(), ClientError>;

    async fn update_setpoint(&self, cool: f64, heat: f64) -> Result<(), ClientError>;

    async fn update_fan_mode(&self, fan_mode: i64) -> Result<(), ClientError>;

    async fn update_mode(&self, mode: i64) -> Result<(), ClientError>;

    async fn set_hold(&self, hold: i64) -> Result<(), ClientError>;

    async fn read_control(&self) -> Result<(), ClientError>;

    async fn read_scheduling(&self) -> Result<(), ClientError>;
}

pub type ClientPointer = Arc<dyn AprilaireClientTrait>;
