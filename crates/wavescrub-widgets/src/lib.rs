//! Shared UI widgets for the wavescrub audio review application
//!
//! This crate provides the waveform scrubber widget: an iced canvas that
//! renders a media file's amplitude envelope as a bar chart with a
//! playback-progress split and translates pointer/keyboard input into
//! seek requests.
//!
//! ## Architecture (iced 0.14 patterns)
//!
//! Following idiomatic iced patterns:
//!
//! - **State structs**: Pure data (`ScrubberState`, `Envelope`)
//! - **View functions**: Take state + callbacks, return `Element<Message>`
//! - **Canvas Programs**: Handle custom rendering and event-to-callback translation
//!
//! The envelope itself is fetched by the host application (it is an HTTP
//! resource of the transcription server); the widget only consumes the
//! resulting `EnvelopePayload` and decides how to display it.

pub mod subscription;
pub mod theme;
pub mod waveform;

// Re-export commonly used items
pub use theme::{ScrubberConfig, ThemeTokens};

pub use waveform::{
    format_time, select_resolution_tier, EffectiveType, Envelope, EnvelopePayload,
    EnvelopeStatus, NetworkSignal, ResolutionTier, ScrubberState, SeekStep, ViewportProbe,
    DURATION_RECONCILE_THRESHOLD_SECS,
};

// Scrubber view function (idiomatic iced 0.14 pattern)
pub use waveform::waveform_scrubber;

// Canvas interaction type for advanced usage (custom Program state)
pub use waveform::ScrubberInteraction;

pub use subscription::mpsc_subscription;
