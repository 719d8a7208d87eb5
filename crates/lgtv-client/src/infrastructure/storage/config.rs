//! TOML configuration for the remote control.
//!
//! Default location:
//! - Windows:  `%APPDATA%\lgtv\config.toml`
//! - Linux:    `~/.config/lgtv/config.toml`
//! - macOS:    `~/Library/Application Support/lgtv/config.toml`
//!
//! Example:
//!
//! ```toml
//! [device]
//! host = "192.168.1.40"
//! mac = "DA:0A:0F:E1:60:CB"
//!
//! [settings]
//! network_timeout_ms = 2000
//! wol_address = "192.168.1.255"
//! ```
//!
//! Both tables are optional, and every `[settings]` field falls back to the
//! protocol default.  The keycode is never read from or written to this file.

use std::net::IpAddr;
use std::path::{Path, PathBuf};

use lgtv_core::{MacAddress, Settings, SettingsError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The file parsed but its settings are unusable.
    #[error("invalid settings in config: {0}")]
    Invalid(#[from] SettingsError),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub device: DeviceConfig,
    #[serde(default)]
    pub settings: Settings,
}

/// Which TV to control.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// IPv4 or IPv6 address of the TV.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<IpAddr>,
    /// Hardware address, needed only to power the TV on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac: Option<MacAddress>,
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Resolves the default path of the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform base
/// directory cannot be determined from the environment.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    platform_config_dir()
        .map(|dir| dir.join("config.toml"))
        .ok_or(ConfigError::NoPlatformConfigDir)
}

/// Loads and validates the config file at `path`.
///
/// # Errors
///
/// [`ConfigError::Io`] if the file cannot be read, [`ConfigError::Parse`] for
/// malformed TOML, [`ConfigError::Invalid`] if the settings fail validation.
pub fn load_config(path: &Path) -> Result<ClientConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content)
}

/// Loads the config from the default location, or the defaults if the file
/// does not exist yet.
///
/// # Errors
///
/// As [`load_config`], except that a missing file is not an error.
pub fn load_default_config() -> Result<ClientConfig, ConfigError> {
    let path = match config_file_path() {
        Ok(path) => path,
        Err(ConfigError::NoPlatformConfigDir) => return Ok(ClientConfig::default()),
        Err(e) => return Err(e),
    };
    match std::fs::read_to_string(&path) {
        Ok(content) => parse_config(&content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ClientConfig::default()),
        Err(e) => Err(ConfigError::Io { path, source: e }),
    }
}

fn parse_config(content: &str) -> Result<ClientConfig, ConfigError> {
    let cfg: ClientConfig = toml::from_str(content)?;
    cfg.settings.validate()?;
    Ok(cfg)
}

/// Resolves the platform config directory for this application.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("lgtv"))
    }

    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("lgtv"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("lgtv")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_yields_defaults() {
        // Arrange / Act
        let cfg = parse_config("").expect("parse");

        // Assert
        assert_eq!(cfg, ClientConfig::default());
        assert_eq!(cfg.settings.network_port, 9761);
    }

    #[test]
    fn test_device_and_partial_settings_are_read() {
        // Arrange
        let text = r#"
            [device]
            host = "192.168.1.40"
            mac = "da:0a:0f:e1:60:cb"

            [settings]
            network_timeout_ms = 2000
            wol_address = "192.168.1.255"
        "#;

        // Act
        let cfg = parse_config(text).expect("parse");

        // Assert
        assert_eq!(cfg.device.host, Some("192.168.1.40".parse().unwrap()));
        assert_eq!(cfg.device.mac.unwrap().to_string(), "DA:0A:0F:E1:60:CB");
        assert_eq!(cfg.settings.network_timeout_ms, 2000);
        assert_eq!(cfg.settings.wol_address, "192.168.1.255".parse::<IpAddr>().unwrap());
        assert_eq!(cfg.settings.message_block_size, 16);
    }

    #[test]
    fn test_malformed_mac_is_parse_error() {
        let text = "[device]\nmac = \"not-a-mac\"\n";
        assert!(matches!(parse_config(text), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_zero_timeout_is_invalid() {
        let text = "[settings]\nnetwork_timeout_ms = 0\n";
        assert!(matches!(
            parse_config(text),
            Err(ConfigError::Invalid(SettingsError::NotPositive("network_timeout_ms")))
        ));
    }

    #[test]
    fn test_keycode_key_is_not_part_of_schema() {
        // Unknown keys are ignored; a keycode in the file is simply not read.
        let cfg = parse_config("[device]\nkeycode = \"M9N0AZ62\"\n").expect("parse");
        assert_eq!(cfg.device, DeviceConfig::default());
    }

    #[test]
    fn test_load_config_reports_missing_file_path() {
        // Arrange
        let path = std::env::temp_dir().join("lgtv-missing-config-4f1c.toml");

        // Act
        let err = load_config(&path).unwrap_err();

        // Assert
        match err {
            ConfigError::Io { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_config_reads_file_from_disk() {
        // Arrange
        let path = std::env::temp_dir().join(format!("lgtv-config-{}.toml", std::process::id()));
        std::fs::write(&path, "[device]\nhost = \"::1\"\n").unwrap();

        // Act
        let cfg = load_config(&path);
        std::fs::remove_file(&path).ok();

        // Assert
        assert_eq!(cfg.unwrap().device.host, Some("::1".parse().unwrap()));
    }

    #[test]
    fn test_client_config_round_trips_through_toml() {
        // Arrange
        let cfg = ClientConfig {
            device: DeviceConfig {
                host: Some("10.0.0.7".parse().unwrap()),
                mac: Some("DA:0A:0F:E1:60:CB".parse().unwrap()),
            },
            settings: Settings {
                network_port: 9000,
                ..Settings::default()
            },
        };

        // Act
        let text = toml::to_string_pretty(&cfg).expect("serialize");
        let restored = parse_config(&text).expect("parse");

        // Assert
        assert_eq!(cfg, restored);
    }
}
