use std::future::Future;

use thiserror::Error;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::protocol::client::ClientError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EntityError {
    #[error("Option '{option}' is not valid for {entity}")]
    InvalidOption { entity: String, option: String },
    #[error("{entity} does not support {command}")]
    Unsupported {
        entity: String,
        command: &'static str,
    },
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("Write task did not complete: {0}")]
    Aborted(String),
    #[error("No tokio runtime to run the write on")]
    NoRuntime,
}

/// Handle on a write forwarded to the thermostat.
///
/// The write runs whether or not the handle is awaited; dropping it only
/// discards the outcome. Entity values never come from here: they change
/// once the thermostat reports the new value through the store.
#[derive(Debug)]
pub struct PendingWrite {
    task: Option<JoinHandle<Result<(), ClientError>>>,
}

impl PendingWrite {
    /// Fails with [`EntityError::NoRuntime`] outside a tokio runtime, before
    /// anything is sent.
    pub(crate) fn spawn<F>(write: F) -> Result<Self, EntityError>
    where
        F: Future<Output = Result<(), ClientError>> + Send + 'static,
    {
        let handle = Handle::try_current().map_err(|_| EntityError::NoRuntime)?;
        let task = handle.spawn(async move {
            let result = write.await;
            if let Err(e) = &result {
                debug!("Thermostat write failed: {}", e);
            }
            result
        });
        Ok(Self { task: Some(task) })
    }

    /// A write that needed no request, e.g. an accepted no-op.
    pub(crate) fn done() -> Self {
        Self { task: None }
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(|task| task.is_finished())
    }

    /// Waits for the thermostat to acknowledge or refuse the write.
    pub async fn wait(self) -> Result<(), EntityError> {
        match self.task {
            None => Ok(()),
            Some(task) => match task.await {
                Ok(result) => result.map_err(EntityError::from),
                Err(e) => Err(EntityError::Aborted(e.to_string())),
            },
        }
    }
}
