use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use skygaze_common::ObserverContext;

pub static CONFIG: OnceLock<BackendConfig> = OnceLock::new();

const CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Observer latitude in degrees
    #[serde(default = "default_latitude")]
    pub latitude: f64,

    /// Observer longitude in degrees
    #[serde(default = "default_longitude")]
    pub longitude: f64,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Optional override for the bundled planet position table
    #[serde(default)]
    pub position_table_path: Option<String>,
}

fn default_latitude() -> f64 {
    40.7128
}

fn default_longitude() -> f64 {
    -74.0060
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            latitude: default_latitude(),
            longitude: default_longitude(),
            log_level: default_log_level(),
            position_table_path: None,
        }
    }
}

impl BackendConfig {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: BackendConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// The configured observer
    pub fn observer(&self) -> ObserverContext {
        ObserverContext::new(self.latitude, self.longitude)
    }
}

/// Load `config.toml` if present, falling back to defaults, and publish the
/// result into [`CONFIG`]
pub fn read_config() -> anyhow::Result<()> {
    let config = if std::path::Path::new(CONFIG_PATH).exists() {
        BackendConfig::from_file(CONFIG_PATH)?
    } else {
        BackendConfig::default()
    };

    CONFIG
        .set(config)
        .map_err(|_| anyhow::anyhow!("Configuration already initialized"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BackendConfig::default();
        assert_eq!(config.log_level, "info");
        assert!(config.position_table_path.is_none());
        assert_eq!(config.observer().timezone_offset_hours, -5);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: BackendConfig = toml::from_str("latitude = 51.5").unwrap();
        assert_eq!(config.latitude, 51.5);
        assert_eq!(config.longitude, default_longitude());
        assert_eq!(config.log_level, "info");
    }
}
