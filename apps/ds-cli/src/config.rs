//! CLI configuration.
//!
//! Supports loading from YAML files with environment variable overrides.
//!
//! ```yaml
//! base_url: http://192.168.1.20:55178
//! timeout_secs: 5
//! services:
//!   urn:av-openhome-org:serviceId:Playlist:
//!     control_url: /Ds/Playlist/control
//!     service_type: urn:av-openhome-org:service:Playlist:1
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use ds_core::protocol_constants::DEFAULT_SOAP_TIMEOUT_SECS;
use ds_core::ServiceTable;
use serde::Deserialize;

/// CLI configuration loaded from YAML with environment overrides.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Device root URL, e.g. `http://192.168.1.20:55178`.
    /// Override: `DS_BASE_URL`
    pub base_url: Option<String>,

    /// SOAP request timeout in seconds.
    /// Override: `DS_TIMEOUT_SECS`
    pub timeout_secs: u64,

    /// Service id to control URL and service type, as found by discovery.
    pub services: ServiceTable,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: DEFAULT_SOAP_TIMEOUT_SECS,
            services: ServiceTable::new(),
        }
    }
}

impl CliConfig {
    /// Loads configuration from a YAML file, then applies environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = if let Some(path) = path {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else {
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Applies overrides from a variable lookup (the process environment in
    /// production).
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("DS_BASE_URL").filter(|v| !v.is_empty()) {
            self.base_url = Some(url);
        }

        if let Some(val) = lookup("DS_TIMEOUT_SECS") {
            match val.parse() {
                Ok(secs) => self.timeout_secs = secs,
                Err(_) => log::warn!("Ignoring invalid DS_TIMEOUT_SECS: {}", val),
            }
        }
    }
}
