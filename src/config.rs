//! Configuration management for rconsole.
//!
//! Configuration is loaded from `~/.config/rconsole/config.toml`.
//! Everything has a default, so the file is optional; CLI arguments
//! and environment variables take precedence over it.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Connection defaults.
    #[serde(default)]
    pub connection: ConnectionConfig,
    /// Output preferences.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Default connection parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Server address (default: localhost).
    #[serde(default = "default_host")]
    pub host: String,
    /// Server RCON port (default: 25575).
    #[serde(default = "default_port")]
    pub port: u16,
    /// Password (prefer the RCONSOLE_PASSWORD env var over storing it here).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            password: None,
        }
    }
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    25575
}

/// Output preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Translate markup to terminal colors when stdout is a terminal.
    #[serde(default = "default_true")]
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Get the config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join("rconsole"))
            .context("Could not determine config directory")
    }

    /// Get the config file path.
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from file, using defaults if not found.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.connection.host, "localhost");
        assert_eq!(config.connection.port, 25575);
        assert!(config.connection.password.is_none());
        assert!(config.output.color);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("localhost"));
        // The password must not be written out when unset.
        assert!(!toml.contains("password"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml = r#"
[connection]
host = "mc.example.net"
port = 25566
password = "hunter2"

[output]
color = false
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.connection.host, "mc.example.net");
        assert_eq!(config.connection.port, 25566);
        assert_eq!(config.connection.password.as_deref(), Some("hunter2"));
        assert!(!config.output.color);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config = toml::from_str("[connection]\nhost = \"play.example.net\"\n").unwrap();
        assert_eq!(config.connection.host, "play.example.net");
        assert_eq!(config.connection.port, 25575);
        assert!(config.output.color);
    }
}
