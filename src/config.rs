//! Runtime settings, read from an optional YAML file. Every field has a
//! default so an empty or partial document is valid.

use crate::domain::time::TimeOfDay;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub backend: BackendConfig,
    pub otp: OtpConfig,
    pub password: PasswordConfig,
    pub facility: FacilityDefaults,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Simulated round-trip for every mock call.
    pub latency_ms: u64,
    /// Owner that newly registered facilities belong to.
    pub owner_id: u64,
}

impl BackendConfig {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            latency_ms: 0,
            owner_id: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OtpConfig {
    pub cooldown_secs: u32,
    pub code_length: usize,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            cooldown_secs: crate::countdown::DEFAULT_COOLDOWN_SECS,
            code_length: 6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordConfig {
    pub min_length: usize,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self { min_length: 8 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FacilityDefaults {
    pub default_city: String,
    pub opening_time: TimeOfDay,
    pub closing_time: TimeOfDay,
}

impl Default for FacilityDefaults {
    fn default() -> Self {
        Self {
            default_city: "Ho Chi Minh City".to_string(),
            opening_time: TimeOfDay::from_hm(6, 0).unwrap_or_default(),
            closing_time: TimeOfDay::from_hm(23, 0).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&raw)
    }

    pub fn from_yaml(raw: &str) -> Result<Self, ConfigError> {
        let config: Config = if raw.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(raw)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(4..=10).contains(&self.otp.code_length) {
            return Err(ConfigError::Invalid(format!(
                "otp.code_length must be between 4 and 10, got {}",
                self.otp.code_length
            )));
        }
        if self.password.min_length == 0 {
            return Err(ConfigError::Invalid(
                "password.min_length must be at least 1".to_string(),
            ));
        }
        if !self.facility.opening_time.is_before(&self.facility.closing_time) {
            return Err(ConfigError::Invalid(
                "facility.opening_time must be earlier than facility.closing_time".to_string(),
            ));
        }
        Ok(())
    }
}
