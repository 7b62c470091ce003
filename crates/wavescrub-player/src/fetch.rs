//! Background envelope loader for wavescrub-player
//!
//! Moves the envelope HTTP fetch off the UI thread. The loader thread
//! receives requests over an mpsc channel, performs a blocking GET
//! against the transcription server, and reports the parsed payload (or
//! an error string) back over a result channel that the UI consumes as
//! an iced subscription.
//!
//! Re-entrancy is the caller's concern: the app holds an [`InFlight`]
//! latch and silently drops load requests while one is pending.

use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use thiserror::Error;
use wavescrub_widgets::EnvelopePayload;

/// Errors that can occur fetching an envelope
#[derive(Debug, Error)]
pub enum FetchError {
    /// Server answered with a non-2xx status
    #[error("Server returned HTTP {0}")]
    Status(u16),

    /// Network-level failure (DNS, refused, timeout)
    #[error("Request failed: {0}")]
    Transport(String),

    /// Body was not the expected JSON shape (missing or non-array
    /// `waveform` field). Treated identically to a network failure.
    #[error("Malformed envelope payload: {0}")]
    MalformedPayload(String),
}

/// Request to fetch an envelope in the background
#[derive(Debug)]
pub struct EnvelopeRequest {
    /// Identifier of the media file on the transcription server
    pub file_id: String,
    /// Desired sample count (chosen by resolution-tier selection)
    pub samples: u32,
}

/// Result of a background envelope fetch
///
/// Carries the file id so the UI can drop completions for a file that is
/// no longer bound (e.g. the user opened another file mid-fetch).
#[derive(Debug, Clone)]
pub struct EnvelopeResult {
    pub file_id: String,
    pub result: Result<EnvelopePayload, String>,
}

/// Latch preventing duplicate concurrent fetches for one scrubber
///
/// Re-entrant load calls while a fetch is pending are silently dropped,
/// not queued.
#[derive(Debug, Default)]
pub struct InFlight {
    pending: bool,
}

impl InFlight {
    /// Try to claim the latch. Returns false (and does nothing) if a
    /// fetch is already pending.
    pub fn begin(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    /// Release the latch when a fetch completes (success or failure)
    pub fn complete(&mut self) {
        self.pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

/// Handle to the background loader thread
pub struct EnvelopeLoader {
    tx: Sender<EnvelopeRequest>,
    rx: Arc<Mutex<Receiver<EnvelopeResult>>>,
    _handle: JoinHandle<()>,
}

impl EnvelopeLoader {
    /// Spawn the background loader thread
    ///
    /// `base_url` is the transcription server root, e.g.
    /// `http://localhost:8080`.
    pub fn spawn(base_url: String) -> Self {
        let (request_tx, request_rx) = std::sync::mpsc::channel::<EnvelopeRequest>();
        let (result_tx, result_rx) = std::sync::mpsc::channel::<EnvelopeResult>();

        let handle = thread::Builder::new()
            .name("envelope-loader".to_string())
            .spawn(move || {
                loader_thread(request_rx, result_tx, base_url);
            })
            .expect("Failed to spawn envelope loader thread");

        log::info!("EnvelopeLoader spawned");

        Self {
            tx: request_tx,
            rx: Arc::new(Mutex::new(result_rx)),
            _handle: handle,
        }
    }

    /// Request an envelope fetch (non-blocking)
    pub fn load(&self, file_id: String, samples: u32) -> Result<(), String> {
        self.tx
            .send(EnvelopeRequest { file_id, samples })
            .map_err(|e| format!("Loader thread disconnected: {}", e))
    }

    /// Receiver handle for bridging into an iced subscription
    pub fn result_receiver(&self) -> Arc<Mutex<Receiver<EnvelopeResult>>> {
        self.rx.clone()
    }
}

/// The background loader thread function
fn loader_thread(
    rx: Receiver<EnvelopeRequest>,
    tx: Sender<EnvelopeResult>,
    base_url: String,
) {
    log::info!("Envelope loader thread started");

    while let Ok(request) = rx.recv() {
        let started = std::time::Instant::now();
        let result = fetch_envelope(&base_url, &request.file_id, request.samples);

        match &result {
            Ok(payload) => log::info!(
                "Fetched envelope for '{}': {} samples in {:?}",
                request.file_id,
                payload.waveform.len(),
                started.elapsed()
            ),
            Err(e) => log::error!("Envelope fetch failed for '{}': {}", request.file_id, e),
        }

        let _ = tx.send(EnvelopeResult {
            file_id: request.file_id,
            result: result.map_err(|e| e.to_string()),
        });
    }

    log::info!("Envelope loader thread shutting down");
}

/// Fetch and parse one envelope from the transcription server
///
/// GET {base_url}/api/files/{file_id}/waveform?samples={n}
fn fetch_envelope(base_url: &str, file_id: &str, samples: u32) -> Result<EnvelopePayload, FetchError> {
    let url = format!(
        "{}/api/files/{}/waveform?samples={}",
        base_url.trim_end_matches('/'),
        file_id,
        samples
    );

    log::debug!("GET {}", url);

    let response = ureq::get(&url).call().map_err(|e| match e {
        ureq::Error::Status(code, _) => FetchError::Status(code),
        ureq::Error::Transport(t) => FetchError::Transport(t.to_string()),
    })?;

    let body = response
        .into_string()
        .map_err(|e| FetchError::Transport(e.to_string()))?;

    serde_json::from_str::<EnvelopePayload>(&body)
        .map_err(|e| FetchError::MalformedPayload(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_flight_latch_drops_reentrant_loads() {
        let mut latch = InFlight::default();
        assert!(latch.begin());
        // Second call while pending is a no-op
        assert!(!latch.begin());
        assert!(latch.is_pending());

        latch.complete();
        assert!(!latch.is_pending());
        // A fresh load after completion claims the latch again
        assert!(latch.begin());
    }

    #[test]
    fn test_fetch_error_display() {
        assert_eq!(FetchError::Status(503).to_string(), "Server returned HTTP 503");
        assert!(FetchError::MalformedPayload("missing field `waveform`".into())
            .to_string()
            .contains("waveform"));
    }

    #[test]
    fn test_malformed_body_maps_to_fetch_error() {
        let err = serde_json::from_str::<EnvelopePayload>(r#"{"waveform": 7}"#)
            .map_err(|e| FetchError::MalformedPayload(e.to_string()))
            .unwrap_err();
        assert!(matches!(err, FetchError::MalformedPayload(_)));
    }
}
