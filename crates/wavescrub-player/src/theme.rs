//! Theme configuration for wavescrub-player
//!
//! Provides configurable colors for the scrubber's three tokens.
//! Configuration is stored as YAML in the user's config directory.
//! Default location: ~/.config/wavescrub/theme.yaml
//!
//! The theme lives in app state (no global) and is resolved into
//! `ThemeTokens` once per view pass, so a reload takes effect on the
//! next render without any widget-side caching.

use iced::Color;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use wavescrub_widgets::ThemeTokens;

/// Root theme configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Token colors as hex strings (e.g. "#1A1A1F")
    pub tokens: TokenColors,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            tokens: TokenColors::default(),
        }
    }
}

/// Token color configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenColors {
    /// Surface color behind the waveform (default: near-black)
    pub background: String,
    /// Unplayed bar color (default: grey)
    pub secondary_text: String,
    /// Played bar / playhead color (default: blue)
    pub primary: String,
}

impl Default for TokenColors {
    fn default() -> Self {
        Self {
            background: "#1A1A1F".to_string(),
            secondary_text: "#737380".to_string(),
            primary: "#3399F2".to_string(),
        }
    }
}

impl ThemeConfig {
    /// Resolve the configured hex strings into scrubber tokens
    pub fn resolve(&self) -> ThemeTokens {
        ThemeTokens {
            background: parse_hex_color(&self.tokens.background),
            secondary_text: parse_hex_color(&self.tokens.secondary_text),
            primary: parse_hex_color(&self.tokens.primary),
        }
    }
}

/// Parse a hex color string to an iced Color
///
/// Supports formats: "#RRGGBB" or "RRGGBB"
/// Returns white on parse failure
fn parse_hex_color(hex: &str) -> Color {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        log::warn!("Invalid hex color '{}', using white", hex);
        return Color::WHITE;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
    let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
    let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

    Color::from_rgb8(r, g, b)
}

/// Get the default theme file path
///
/// Returns: ~/.config/wavescrub/theme.yaml
pub fn default_theme_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
        .join("wavescrub")
        .join("theme.yaml")
}

/// Load theme configuration from a YAML file
///
/// If the file doesn't exist, returns default config.
/// If the file exists but is invalid, logs a warning and returns default config.
pub fn load_theme(path: &Path) -> ThemeConfig {
    log::info!("load_theme: Loading from {:?}", path);

    if !path.exists() {
        log::info!("load_theme: Theme file doesn't exist, using defaults");
        return ThemeConfig::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match serde_yaml::from_str::<ThemeConfig>(&contents) {
            Ok(config) => {
                log::info!(
                    "load_theme: Loaded theme - background: {}, secondary: {}, primary: {}",
                    config.tokens.background,
                    config.tokens.secondary_text,
                    config.tokens.primary
                );
                config
            }
            Err(e) => {
                log::warn!("load_theme: Failed to parse theme: {}, using defaults", e);
                ThemeConfig::default()
            }
        },
        Err(e) => {
            log::warn!("load_theme: Failed to read theme file: {}, using defaults", e);
            ThemeConfig::default()
        }
    }
}
