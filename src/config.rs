use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{LoglinkError, Result};

pub const PRODUCTION_BASE_URL: &str = "https://api.loglink.it/";
pub const LOCAL_BASE_URL: &str = "http://127.0.0.1:5010/";
pub const DEFAULT_SETTINGS_PATH: &str = "./data/loglink.json";

/// Persisted user settings. Absent fields fall back to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub token: String,
}

impl Settings {
    pub fn has_token(&self) -> bool {
        !self.token.trim().is_empty()
    }

    /// Token with everything but the last four characters hidden.
    pub fn masked_token(&self) -> String {
        mask_token(&self.token)
    }
}

pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{visible}", "*".repeat(chars.len() - 4))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RelayConfig {
    pub base_url: String,
    pub timeout_seconds: Option<u64>,
    pub connect_timeout_seconds: Option<u64>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self::production()
    }
}

impl RelayConfig {
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
    pub const DEFAULT_CONNECT_TIMEOUT_SECONDS: u64 = 10;

    pub fn production() -> Self {
        Self {
            base_url: PRODUCTION_BASE_URL.to_string(),
            timeout_seconds: None,
            connect_timeout_seconds: None,
        }
    }

    pub fn local() -> Self {
        Self {
            base_url: LOCAL_BASE_URL.to_string(),
            ..Self::production()
        }
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::production()
        }
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
            .filter(|value| *value > 0)
            .unwrap_or(Self::DEFAULT_TIMEOUT_SECONDS)
    }

    pub fn connect_timeout_seconds(&self) -> u64 {
        self.connect_timeout_seconds
            .filter(|value| *value > 0)
            .unwrap_or(Self::DEFAULT_CONNECT_TIMEOUT_SECONDS)
    }

    pub fn endpoint(&self) -> String {
        let base = self.base_url.trim().trim_end_matches('/');
        format!("{base}/get_new_messages/")
    }

    pub fn validate(&self) -> Result<()> {
        let base = self.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(LoglinkError::Config(format!(
                "relay base url must start with http:// or https://, got '{base}'"
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    pub settings: Option<Settings>,
    pub relay: Option<RelayConfig>,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| LoglinkError::Config(e.to_string()))?;
        let config: Config =
            serde_json::from_str(&content).map_err(|e| LoglinkError::Config(e.to_string()))?;
        if let Some(relay) = &config.relay {
            relay.validate()?;
        }
        Ok(config)
    }

    pub fn relay(&self) -> RelayConfig {
        self.relay.clone().unwrap_or_default()
    }
}
