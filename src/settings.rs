use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// How long to wait for each readiness response, in seconds.
    pub wait_timeout_secs: u64,
    pub mount_climate: Option<bool>,
    pub mount_humidifiers: Option<bool>,
    pub mount_selects: Option<bool>,
    pub mount_numbers: Option<bool>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            wait_timeout_secs: 30,
            mount_climate: Some(true),
            mount_humidifiers: Some(true),
            mount_selects: Some(true),
            mount_numbers: Some(true),
        }
    }
}

impl Settings {
    /// Reads settings from a JSON file, falling back to defaults when the
    /// file cannot be read. A file that exists but does not parse is an error.
    pub fn load(path: Option<&Path>) -> serde_json::Result<Self> {
        let Some(path) = path else {
            return Ok(Settings::default());
        };
        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content),
            Err(e) => {
                warn!(
                    "Failed to read settings file {}: {}, using default settings",
                    path.display(),
                    e
                );
                Ok(Settings::default())
            }
        }
    }

    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }
}
