//! Scrubber state for the iced canvas-based waveform widget
//!
//! Pure data, separate from rendering logic. Following iced 0.14
//! patterns, state lives at the application level while the view function
//! consumes a reference to generate the UI element.

use super::envelope::{Envelope, EnvelopePayload, EnvelopeStatus};

/// Server duration overrides the caller's hint when they disagree by more
/// than this many seconds. The envelope was computed against the actual
/// decoded audio, so it is authoritative for alignment.
pub const DURATION_RECONCILE_THRESHOLD_SECS: f64 = 0.1;

/// Discrete keyboard seek requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekStep {
    /// Arrow left: back 1% of duration
    StepBack,
    /// Arrow right: forward 1% of duration
    StepForward,
    /// Home: jump to 0
    Start,
    /// End: jump to duration
    End,
}

/// Waveform scrubber state for one bound media file
///
/// Owns the amplitude envelope and the seek math; the current playback
/// position is owned by the external player and fed back in every tick.
#[derive(Debug, Clone, Default)]
pub struct ScrubberState {
    /// Identifier of the bound media file
    pub file_id: Option<String>,
    /// Envelope lifecycle (idle/loading/ready/unavailable/failed)
    pub status: EnvelopeStatus,
    /// Effective duration in seconds (caller hint until the server
    /// corrects it at fetch completion)
    duration: f64,
    /// Current playback position in seconds, clamped for rendering
    position: f64,
}

impl ScrubberState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind to a media file with a caller-controlled duration hint
    ///
    /// Discards any prior envelope. The actual load is issued by the host
    /// once the surface has been measured at least once, so the
    /// resolution tier is never chosen from zero-width geometry.
    pub fn bind(&mut self, file_id: impl Into<String>, duration_hint: f64) {
        self.file_id = Some(file_id.into());
        self.status = EnvelopeStatus::Idle;
        self.duration = duration_hint.max(0.0);
        self.position = 0.0;
    }

    /// Mark a fetch as in flight
    pub fn begin_load(&mut self) {
        self.status = EnvelopeStatus::Loading;
    }

    /// Apply a successful fetch response
    ///
    /// Replaces the stored envelope in full. An empty-but-valid payload
    /// means the server has no data for this file: that is
    /// `Unavailable`, not an error, and gets no retry affordance.
    pub fn apply_envelope(&mut self, payload: EnvelopePayload) {
        if let Some(server_duration) = payload.duration {
            if (server_duration - self.duration).abs() > DURATION_RECONCILE_THRESHOLD_SECS {
                log::info!(
                    "Envelope duration {:.2}s overrides caller hint {:.2}s",
                    server_duration,
                    self.duration
                );
                self.duration = server_duration.max(0.0);
            }
        }

        if payload.waveform.is_empty() {
            self.status = EnvelopeStatus::Unavailable;
        } else {
            self.status = EnvelopeStatus::Ready(Envelope::new(payload.waveform));
        }
    }

    /// Record a failed fetch; cleared only by an explicit user retry
    pub fn fail_load(&mut self, message: impl Into<String>) {
        self.status = EnvelopeStatus::Failed(message.into());
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Current playback position, clamped to [0, duration]
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Feed back the external player's position (clamped, not rejected)
    pub fn set_position(&mut self, seconds: f64) {
        self.position = seconds.clamp(0.0, self.duration);
    }

    /// Playback progress as a ratio in [0, 1]; 0 when duration is unset
    pub fn progress_ratio(&self) -> f64 {
        if self.duration > 0.0 {
            (self.position / self.duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Map a horizontal pixel coordinate to a seek time
    ///
    /// `pointer_x` is relative to the container's left edge; coordinates
    /// beyond the bounds clamp to 0 or duration. Returns `None` when
    /// there is nothing to seek in (duration or width not positive).
    pub fn seek_time(&self, pointer_x: f32, container_width: f32) -> Option<f64> {
        if self.duration <= 0.0 || container_width <= 0.0 {
            return None;
        }
        let ratio = f64::from((pointer_x / container_width).clamp(0.0, 1.0));
        Some(ratio * self.duration)
    }

    /// Compute the target time for a discrete keyboard seek
    pub fn stepped_seek(&self, step: SeekStep) -> Option<f64> {
        if self.duration <= 0.0 {
            return None;
        }
        let step_size = self.duration * 0.01;
        let target = match step {
            SeekStep::StepBack => self.position - step_size,
            SeekStep::StepForward => self.position + step_size,
            SeekStep::Start => 0.0,
            SeekStep::End => self.duration,
        };
        Some(target.clamp(0.0, self.duration))
    }

    // Accessibility surface: the scrubber is announced as a slider.

    /// Slider value (seconds)
    pub fn scrub_value(&self) -> f64 {
        self.position
    }

    /// Slider maximum (seconds); minimum is always 0
    pub fn scrub_max(&self) -> f64 {
        self.duration
    }

    /// Human-readable position label for assistive announcement
    pub fn scrub_label(&self) -> String {
        format!(
            "{} / {}",
            format_time(self.position),
            format_time(self.duration)
        )
    }
}

/// Format seconds as `M:SS` with zero-padded seconds
pub fn format_time(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    format!("{}:{:02}", total / 60, total % 60)
}
