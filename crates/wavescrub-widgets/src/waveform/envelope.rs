//! Amplitude envelope data for the scrubber
//!
//! The envelope is precomputed server-side against the decoded audio and
//! served as a numeric array (0-255 per sample). It is replaced wholesale
//! on every successful fetch; there is no incremental merge.

use serde::Deserialize;

/// Wire shape of the envelope endpoint response
///
/// `duration` is optional but authoritative when present: it was computed
/// against the actual decoded audio, unlike the caller's estimate.
#[derive(Debug, Clone, Deserialize)]
pub struct EnvelopePayload {
    /// Amplitude samples, 0-255, ordered left-to-right across the file
    pub waveform: Vec<u8>,
    /// Server-reported duration in seconds
    #[serde(default)]
    pub duration: Option<f64>,
}

/// A fetched amplitude envelope
///
/// Sample count is fixed at fetch time; samples map linearly onto elapsed
/// time from 0 to the file's duration.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    samples: Vec<u8>,
}

impl Envelope {
    pub fn new(samples: Vec<u8>) -> Self {
        Self { samples }
    }

    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Amplitude at `index` normalized to [0.0, 1.0]
    pub fn normalized(&self, index: usize) -> f32 {
        self.samples
            .get(index)
            .map(|&v| f32::from(v) / 255.0)
            .unwrap_or(0.0)
    }
}

/// Lifecycle of the envelope owned by one scrubber instance
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EnvelopeStatus {
    /// Bound to a file but no load issued yet (geometry not measured)
    #[default]
    Idle,
    /// A fetch is in flight
    Loading,
    /// Envelope available for rendering
    Ready(Envelope),
    /// Server has no envelope for this file (empty-but-valid payload).
    /// Distinct from `Failed`: retrying would not help, so no retry
    /// affordance is offered.
    Unavailable,
    /// Fetch failed (network, non-2xx, malformed payload). Recoverable
    /// via explicit user retry.
    Failed(String),
}

impl EnvelopeStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, EnvelopeStatus::Loading)
    }

    pub fn envelope(&self) -> Option<&Envelope> {
        match self {
            EnvelopeStatus::Ready(envelope) => Some(envelope),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_range() {
        let envelope = Envelope::new(vec![0, 128, 255]);
        assert_eq!(envelope.normalized(0), 0.0);
        assert!((envelope.normalized(1) - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(envelope.normalized(2), 1.0);
        // Out of bounds reads as silence, never panics
        assert_eq!(envelope.normalized(3), 0.0);
    }

    #[test]
    fn test_payload_deserialization() {
        let payload: EnvelopePayload =
            serde_json::from_str(r#"{"waveform": [0, 128, 255], "duration": 120.5}"#).unwrap();
        assert_eq!(payload.waveform, vec![0, 128, 255]);
        assert_eq!(payload.duration, Some(120.5));

        // duration is optional
        let payload: EnvelopePayload = serde_json::from_str(r#"{"waveform": []}"#).unwrap();
        assert!(payload.waveform.is_empty());
        assert_eq!(payload.duration, None);
    }

    #[test]
    fn test_malformed_payload_rejected() {
        // Missing waveform field
        assert!(serde_json::from_str::<EnvelopePayload>(r#"{"duration": 10.0}"#).is_err());
        // Non-array waveform
        assert!(serde_json::from_str::<EnvelopePayload>(r#"{"waveform": "abc"}"#).is_err());
    }
}
