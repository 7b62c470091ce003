//! Waveform scrubber components and utilities
//!
//! This module provides the amplitude-envelope scrubber used to review
//! transcription audio: a bar-chart rendering of a precomputed loudness
//! envelope with click/drag/keyboard seeking.
//!
//! ## Architecture (iced 0.14 patterns)
//!
//! Following idiomatic iced patterns, this module separates concerns:
//!
//! - **State structs** (`ScrubberState`, `Envelope`): Pure data
//! - **View function** (`waveform_scrubber`): Takes state + callback,
//!   returns `Element<Message>`
//! - **Canvas Program** (`ScrubberCanvas`): Custom rendering and
//!   event-to-callback translation
//!
//! ## Usage
//!
//! ```ignore
//! // In your application's view function:
//! let scrubber = waveform_scrubber(
//!     &self.scrubber,
//!     self.theme_tokens(),
//!     64.0,
//!     Message::Seek,
//! );
//! ```

mod canvas;
mod envelope;
mod resolution;
mod state;
mod view;

pub use canvas::ScrubberInteraction;
pub use envelope::{Envelope, EnvelopePayload, EnvelopeStatus};
pub use resolution::{
    select_resolution_tier, EffectiveType, NetworkSignal, ResolutionTier, ViewportProbe,
};
pub use state::{format_time, ScrubberState, SeekStep, DURATION_RECONCILE_THRESHOLD_SECS};
pub use view::waveform_scrubber;
