//! Shared theme tokens for wavescrub UI components
//!
//! The scrubber resolves its palette from three named tokens. Tokens are
//! passed into the canvas program by value on every view pass, so a theme
//! change at runtime is picked up on the next render without any caching
//! inside the widget.

use iced::Color;

/// Named color tokens consumed by the waveform scrubber
///
/// The host application resolves these from its active theme once per
/// view pass (e.g. from theme.yaml in wavescrub-player).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeTokens {
    /// Surface color behind the waveform bars
    pub background: Color,
    /// Color of bars right of the playback position (unplayed)
    pub secondary_text: Color,
    /// Color of bars left of the playback position (played) and the playhead
    pub primary: Color,
}

impl Default for ThemeTokens {
    fn default() -> Self {
        Self {
            background: Color::from_rgb(0.10, 0.10, 0.12),
            secondary_text: Color::from_rgb(0.45, 0.45, 0.50),
            primary: Color::from_rgb(0.20, 0.60, 0.95),
        }
    }
}

/// Scrubber display configuration
pub struct ScrubberConfig {
    /// Canvas height in pixels
    pub height: f32,
    /// Fraction of the canvas height the tallest bar may occupy
    pub bar_height_scale: f32,
    /// Minimum bar height so near-silent samples remain visible
    pub min_bar_height: f32,
    /// Playhead line width in pixels
    pub playhead_width: f32,
}

impl Default for ScrubberConfig {
    fn default() -> Self {
        Self {
            height: 64.0,
            bar_height_scale: 0.8,
            min_bar_height: 2.0,
            playhead_width: 2.0,
        }
    }
}
