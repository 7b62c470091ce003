//! Player configuration for wavescrub
//!
//! Configuration is stored as YAML in the user's config directory.
//! Default location: ~/.config/wavescrub/config.yaml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use wavescrub_widgets::{EffectiveType, NetworkSignal};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Transcription server settings
    pub server: ServerConfig,
    /// Display settings (scrubber height)
    pub display: DisplayConfig,
    /// Network-quality signal for envelope resolution selection
    pub network: NetworkConfig,
}

/// Server configuration section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL of the transcription server serving envelope data
    pub base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
        }
    }
}

/// Display configuration section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Scrubber canvas height in pixels
    pub waveform_height: f32,
    /// Device pixel ratio for resolution selection. Set to 2.0+ on
    /// HiDPI displays to request finer envelopes.
    pub device_pixel_ratio: f64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            waveform_height: 64.0,
            device_pixel_ratio: 1.0,
        }
    }
}

/// Network configuration section
///
/// Desktop Rust has no equivalent of the browser's navigator.connection,
/// so the connection-quality signal is configuration-sourced. Defaults
/// describe a healthy broadband link.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Effective connection type: "slow-2g", "2g", "3g", or "4g"
    pub effective_type: String,
    /// Estimated downlink in Mbps
    pub downlink_mbps: f64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            effective_type: "4g".to_string(),
            downlink_mbps: 10.0,
        }
    }
}

impl NetworkConfig {
    /// Resolve into the signal consumed by resolution selection
    ///
    /// Unknown effective-type strings fall back to 4g; the downlink
    /// estimate still applies on its own.
    pub fn signal(&self) -> NetworkSignal {
        let effective_type = match self.effective_type.as_str() {
            "slow-2g" => EffectiveType::Slow2g,
            "2g" => EffectiveType::TwoG,
            "3g" => EffectiveType::ThreeG,
            "4g" => EffectiveType::FourG,
            other => {
                log::warn!("Unknown effective_type '{}', assuming 4g", other);
                EffectiveType::FourG
            }
        };

        NetworkSignal {
            effective_type,
            downlink_mbps: self.downlink_mbps,
        }
    }
}

/// Get the default config file path
///
/// Returns: ~/.config/wavescrub/config.yaml
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
        .join("wavescrub")
        .join("config.yaml")
}

/// Load configuration from a YAML file
///
/// If the file doesn't exist, returns default config.
/// If the file exists but is invalid, logs a warning and returns default config.
pub fn load_config(path: &Path) -> PlayerConfig {
    log::info!("load_config: Loading from {:?}", path);

    if !path.exists() {
        log::info!("load_config: Config file doesn't exist, using defaults");
        return PlayerConfig::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match serde_yaml::from_str::<PlayerConfig>(&contents) {
            Ok(config) => {
                log::info!(
                    "load_config: Loaded config - server: {}, network: {} @ {:.1} Mbps",
                    config.server.base_url,
                    config.network.effective_type,
                    config.network.downlink_mbps
                );
                config
            }
            Err(e) => {
                log::warn!("load_config: Failed to parse config: {}, using defaults", e);
                PlayerConfig::default()
            }
        },
        Err(e) => {
            log::warn!(
                "load_config: Failed to read config file: {}, using defaults",
                e
            );
            PlayerConfig::default()
        }
    }
}

/// Save configuration to a YAML file
///
/// Creates parent directories if they don't exist.
pub fn save_config(config: &PlayerConfig, path: &Path) -> Result<()> {
    log::info!("save_config: Saving to {:?}", path);

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
    }

    let yaml = serde_yaml::to_string(config).context("Failed to serialize config to YAML")?;

    std::fs::write(path, yaml)
        .with_context(|| format!("Failed to write config file: {:?}", path))?;

    log::info!("save_config: Config saved successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PlayerConfig::default();
        assert_eq!(config.server.base_url, "http://localhost:8080");
        assert_eq!(config.display.waveform_height, 64.0);
        assert_eq!(config.network.effective_type, "4g");
    }

    #[test]
    fn test_network_signal_resolution() {
        let network = NetworkConfig {
            effective_type: "2g".to_string(),
            downlink_mbps: 0.5,
        };
        let signal = network.signal();
        assert_eq!(signal.effective_type, EffectiveType::TwoG);
        assert!(signal.is_low_bandwidth());

        // Unknown types fall back to 4g but keep the downlink estimate
        let network = NetworkConfig {
            effective_type: "5g".to_string(),
            downlink_mbps: 1.0,
        };
        let signal = network.signal();
        assert_eq!(signal.effective_type, EffectiveType::FourG);
        assert!(signal.is_low_bandwidth());
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = PlayerConfig {
            server: ServerConfig {
                base_url: "https://transcribe.example.com".to_string(),
            },
            display: DisplayConfig {
                waveform_height: 96.0,
                device_pixel_ratio: 2.0,
            },
            network: NetworkConfig {
                effective_type: "3g".to_string(),
                downlink_mbps: 2.5,
            },
        };

        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: PlayerConfig = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(parsed.server.base_url, "https://transcribe.example.com");
        assert_eq!(parsed.display.waveform_height, 96.0);
        assert_eq!(parsed.network.effective_type, "3g");
        assert_eq!(parsed.network.downlink_mbps, 2.5);
    }
}
