//! Configuration file parsing and structures.
//!
//! Everything is optional; an empty file yields the defaults.

use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use tracing_subscriber::filter::LevelFilter;

use crate::localize::Message;
use crate::localize::Translations;

/// Top-level configuration structure
#[derive(Debug, Default, Deserialize)]
pub struct PanelConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub api: ApiConfig,

    /// Overrides of the built-in English messages, keyed by message key
    #[serde(default)]
    pub translations: HashMap<String, Message>,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default)]
    pub level: LogLevel,

    /// Per-target levels, e.g. `hearthd_panel::panel = "debug"`
    #[serde(default)]
    pub overrides: HashMap<String, LogLevel>,
}

fn default_listen() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8565
}

/// HTTP API configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            port: default_port(),
        }
    }
}

impl PanelConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(path.as_ref().to_path_buf(), e))?;

        toml::from_str(&contents).map_err(ConfigError::Parse)
    }

    /// English messages with the configured overrides applied
    pub fn translations(&self) -> Translations {
        Translations::english().with_overrides(self.translations.clone())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::localize::HIDE_DISABLED;

    #[test]
    fn test_parse_empty_config() {
        let config: PanelConfig = toml::from_str("").unwrap();
        assert_eq!(config.logging.level, LogLevel::Info);
        assert_eq!(config.api, ApiConfig::default());
        assert_eq!(config.api.port, 8565);
        assert!(config.translations.is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            [logging]
            level = "debug"

            [logging.overrides]
            "hearthd_panel::api" = "warn"

            [api]
            listen = "0.0.0.0"
            port = 9000

            [translations]
            "ui.panel.config.devices.entities.hide_disabled" = { other = "Hide" }
        "#;

        let config: PanelConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(
            config.logging.overrides.get("hearthd_panel::api"),
            Some(&LogLevel::Warn)
        );
        assert_eq!(config.api.listen, "0.0.0.0");
        assert_eq!(config.api.port, 9000);
        assert_eq!(config.translations().localize(HIDE_DISABLED, &[]), "Hide");
    }

    #[test]
    fn test_partial_api_section_keeps_defaults() {
        let config: PanelConfig = toml::from_str("[api]\nport = 8080").unwrap();
        assert_eq!(config.api.listen, "127.0.0.1");
        assert_eq!(config.api.port, 8080);
    }

    #[test]
    fn test_invalid_log_level() {
        let err = toml::from_str::<PanelConfig>("[logging]\nlevel = \"loud\"").unwrap_err();
        assert!(err.to_string().contains("loud"));
    }

    #[test]
    fn test_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("panel.toml");
        fs::write(&path, "[logging]\nlevel = \"trace\"\n").unwrap();

        let config = PanelConfig::from_file(&path).unwrap();
        assert_eq!(config.logging.level, LogLevel::Trace);
        assert_eq!(LevelFilter::from(config.logging.level), LevelFilter::TRACE);
    }

    #[test]
    fn test_from_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = PanelConfig::from_file(temp_dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(..)));
    }
}
