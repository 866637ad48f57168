use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Notify, RwLock};

use crate::protocol::attributes::AttributeMap;
use crate::protocol::client::{AprilaireClientTrait, ClientError, FunctionalDomain};

#[derive(Debug, Clone, PartialEq)]
pub enum ClientCall {
    SetHumidificationSetpoint(u8),
    SetDehumidificationSetpoint(u8),
    SetWrittenOutdoorTemperature(f64),
    SetAirCleaning { mode: i64, event: i64 },
    SetFreshAir { mode: i64, event: i64 },
    UpdateSetpoint { cool: f64, heat: f64 },
    UpdateFanMode(i64),
    UpdateMode(i64),
    SetHold(i64),
    ReadControl,
    ReadScheduling,
    WaitForResponse(FunctionalDomain, u8),
}

/// Client that records every call and never pushes updates on its own.
#[derive(Clone, Default)]
pub struct RecordingClient {
    pub calls: Arc<RwLock<Vec<ClientCall>>>,
    pub responses: Arc<RwLock<HashMap<(FunctionalDomain, u8), AttributeMap>>>,
    pub should_fail: Arc<AtomicBool>,
    pub listen_calls: Arc<AtomicUsize>,
    pub stop_calls: Arc<AtomicUsize>,
    /// When set, setters wait for a notification before completing.
    pub gate: Option<Arc<Notify>>,
}

#[allow(dead_code)]
impl RecordingClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            should_fail: Arc::new(AtomicBool::new(true)),
            ..Default::default()
        }
    }

    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Default::default()
        }
    }

    pub async fn respond(&self, domain: FunctionalDomain, attribute: u8, data: AttributeMap) {
        self.responses.write().await.insert((domain, attribute), data);
    }

    pub async fn calls(&self) -> Vec<ClientCall> {
        self.calls.read().await.clone()
    }

    async fn record(&self, call: ClientCall) -> Result<(), ClientError> {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        if self.should_fail.load(Ordering::Relaxed) {
            return Err(ClientError::Rejected("Fake error".to_string()));
        }
        self.calls.write().await.push(call);
        Ok(())
    }
}

#[async_trait]
impl AprilaireClientTrait for RecordingClient {
    async fn start_listen(&self) -> Result<(), ClientError> {
        self.listen_calls.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn stop_listen(&self) {
        self.stop_calls.fetch_add(1, Ordering::Relaxed);
    }

    async fn wait_for_response(
        &self,
        domain: FunctionalDomain,
        attribute: u8,
        _timeout: Duration,
    ) -> Result<Option<AttributeMap>, ClientError> {
        self.calls
            .write()
            .await
            .push(ClientCall::WaitForResponse(domain, attribute));
        Ok(self.responses.read().await.get(&(domain, attribute)).cloned())
    }

    async fn set_humidification_setpoint(&self, humidity: u8) -> Result<(), ClientError> {
        self.record(ClientCall::SetHumidificationSetpoint(humidity))
            .await
    }

    async fn set_dehumidification_setpoint(&self, humidity: u8) -> Result<(), ClientError> {
        self.record(ClientCall::SetDehumidificationSetpoint(humidity))
            .await
    }

    async fn set_written_outdoor_temperature_value(
        &self,
        temperature: f64,
    ) -> Result<(), ClientError> {
        self.record(ClientCall::SetWrittenOutdoorTemperature(temperature))
            .await
    }

    async fn set_air_cleaning(&self, mode: i64, event: i64) -> Result<(), ClientError> {
        self.record(ClientCall::SetAirCleaning { mode, event }).await
    }

    async fn set_fresh_air(&self, mode: i64, event: i64) -> Result<(), ClientError> {
        self.record(ClientCall::SetFreshAir { mode, event }).await
    }

    async fn update_setpoint(&self, cool: f64, heat: f64) -> Result<(), ClientError> {
        self.record(ClientCall::UpdateSetpoint { cool, heat }).await
    }

    async fn update_fan_mode(&self, fan_mode: i64) -> Result<(), ClientError> {
        self.record(ClientCall::UpdateFanMode(fan_mode)).await
    }

    async fn update_mode(&self, mode: i64) -> Result<(), ClientError> {
        self.record(ClientCall::UpdateMode(mode)).await
    }

    async fn set_hold(&self, hold: i64) -> Result<(), ClientError> {
        self.record(ClientCall::SetHold(hold)).await
    }

    async fn read_control(&self) -> Result<(), ClientError> {
        self.record(ClientCall::ReadControl).await
    }

    async fn read_scheduling(&self) -> Result<(), ClientError> {
        self.record(ClientCall::ReadScheduling).await
    }
}
