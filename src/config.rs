//! Configuration module for the relaycheck probe

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::smtp;

/// Default probe timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Main configuration structure for a connectivity probe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Target host to probe
    pub target: String,

    /// Target port
    pub port: u16,

    /// Timeout in milliseconds, applied to the connect phase and again to
    /// the handshake read
    pub timeout: u64,

    /// Identifier sent in the EHLO greeting line
    pub ehlo_identity: String,

    /// Ports that trigger the SMTP greeting exchange after connecting
    pub handshake_ports: Vec<u16>,

    /// Skip the best-effort public IP lookup
    pub skip_ip_lookup: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            target: "127.0.0.1".to_string(),
            port: 25,
            timeout: DEFAULT_TIMEOUT_MS,
            ehlo_identity: "relaycheck.local".to_string(),
            handshake_ports: smtp::SMTP_PORTS.to_vec(),
            skip_ip_lookup: false,
        }
    }
}

impl ProbeConfig {
    /// Create a new probe configuration for a target
    pub fn new(target: String, port: u16) -> Self {
        Self {
            target,
            port,
            ..Default::default()
        }
    }

    /// Set the timeout in milliseconds
    pub fn with_timeout(mut self, timeout: u64) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the EHLO identity
    pub fn with_ehlo_identity(mut self, identity: String) -> Self {
        self.ehlo_identity = identity;
        self
    }

    /// Set the ports that trigger the SMTP greeting exchange
    pub fn with_handshake_ports(mut self, ports: Vec<u16>) -> Self {
        self.handshake_ports = ports;
        self
    }

    /// Get timeout as Duration
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_millis(self.timeout)
    }

    /// Check whether the configured port warrants a greeting exchange
    pub fn is_handshake_port(&self) -> bool {
        self.handshake_ports.contains(&self.port)
    }

    /// Load configuration from TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            crate::ProbeError::ConfigError(format!("Failed to read config file: {}", e))
        })?;

        let config: ProbeConfig = toml::from_str(&content)
            .map_err(|e| crate::ProbeError::ConfigError(format!("Failed to parse TOML: {}", e)))?;

        Ok(config)
    }

    /// Load configuration from the default location, falling back to defaults
    pub fn load_default_config() -> Self {
        let home_dir = dirs::home_dir().unwrap_or_else(|| std::path::PathBuf::from("."));

        let config_path = home_dir.join(".relaycheck.toml");

        if config_path.exists() {
            if let Ok(config) = Self::from_toml_file(&config_path) {
                log::info!("Loaded config from {}", config_path.display());
                return config;
            }
        }

        Self::default()
    }

    /// Validate the configuration.
    ///
    /// The port range upper bound is enforced by the `u16` type; only the
    /// reserved port 0 needs rejecting here.
    pub fn validate(&self) -> crate::Result<()> {
        if self.target.is_empty() {
            return Err(crate::ProbeError::InvalidTarget(
                "Target host cannot be empty".to_string(),
            ));
        }

        if self.port == 0 {
            return Err(crate::ProbeError::InvalidTarget(
                "Port must be between 1 and 65535".to_string(),
            ));
        }

        if self.timeout == 0 {
            return Err(crate::ProbeError::ConfigError(
                "Timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
