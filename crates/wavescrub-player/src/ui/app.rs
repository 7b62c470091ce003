//! Main application state and update/view logic for wavescrub-player

use std::time::Instant;

use iced::widget::{button, column, container, row, text, text_input};
use iced::{time, window, Element, Length, Subscription, Task, Theme};

use wavescrub_widgets::{
    mpsc_subscription, select_resolution_tier, waveform_scrubber, EnvelopeStatus, ScrubberState,
    ViewportProbe,
};

use crate::config::PlayerConfig;
use crate::fetch::{EnvelopeLoader, EnvelopeResult, InFlight};
use crate::theme::ThemeConfig;
use crate::ui::message::Message;

/// Horizontal padding around the scrubber container
const LAYOUT_PADDING: f32 = 16.0;

/// Wavescrub application state
///
/// Acts as the scrubber's external player: it owns the playback clock and
/// feeds the current position back into the widget on every tick, while
/// the widget only emits seek requests.
pub struct WavescrubApp {
    config: PlayerConfig,
    theme_config: ThemeConfig,
    scrubber: ScrubberState,
    loader: EnvelopeLoader,
    in_flight: InFlight,

    /// Playback clock in seconds (the source of truth for currentTime)
    clock_seconds: f64,
    playing: bool,
    last_tick: Option<Instant>,

    /// Last measured window width; 0 until the first resize event, which
    /// keeps the envelope load deferred until real geometry exists
    window_width: f32,

    file_id_input: String,
    status: String,
}

impl WavescrubApp {
    pub fn new(config: PlayerConfig, theme_config: ThemeConfig) -> Self {
        let loader = EnvelopeLoader::spawn(config.server.base_url.clone());

        Self {
            config,
            theme_config,
            scrubber: ScrubberState::new(),
            loader,
            in_flight: InFlight::default(),
            clock_seconds: 0.0,
            playing: false,
            last_tick: None,
            window_width: 0.0,
            file_id_input: String::new(),
            status: "Enter a file id to load its waveform".to_string(),
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => {
                self.advance_clock();
                self.maybe_start_load();
            }
            Message::EnvelopeLoaded(result) => {
                self.handle_envelope_loaded(result);
            }
            Message::Seek(seconds) => {
                // The widget emitted a seek request; the clock is ours to move
                self.clock_seconds = seconds.clamp(0.0, self.scrubber.duration());
                self.scrubber.set_position(self.clock_seconds);
            }
            Message::Retry => {
                if matches!(self.scrubber.status, EnvelopeStatus::Failed(_)) {
                    self.scrubber.status = EnvelopeStatus::Idle;
                    self.maybe_start_load();
                }
            }
            Message::TogglePlayback => {
                self.playing = !self.playing;
                self.last_tick = None;
            }
            Message::WindowResized(size) => {
                self.window_width = size.width;
                // A deferred load may now have valid geometry
                self.maybe_start_load();
            }
            Message::FileIdInput(value) => {
                self.file_id_input = value;
            }
            Message::OpenFile => {
                let file_id = self.file_id_input.trim().to_string();
                if file_id.is_empty() {
                    return Task::none();
                }
                log::info!("Binding file '{}'", file_id);
                // No duration hint available here; the server's value is
                // authoritative once the envelope arrives
                self.scrubber.bind(file_id.clone(), 0.0);
                self.clock_seconds = 0.0;
                self.playing = false;
                self.status = format!("Loading waveform for {}", file_id);
                self.maybe_start_load();
            }
        }

        Task::none()
    }

    /// Advance the playback clock while playing and feed the position back
    fn advance_clock(&mut self) {
        let now = Instant::now();
        if self.playing {
            if let Some(last) = self.last_tick {
                self.clock_seconds += now.duration_since(last).as_secs_f64();
                let duration = self.scrubber.duration();
                if duration > 0.0 && self.clock_seconds >= duration {
                    self.clock_seconds = duration;
                    self.playing = false;
                }
            }
        }
        self.last_tick = Some(now);
        self.scrubber.set_position(self.clock_seconds);
    }

    /// Issue the envelope fetch once a file is bound and geometry exists
    ///
    /// No-ops when: nothing is bound, the state is not Idle, the surface
    /// has not been measured yet (zero width would skew the resolution
    /// tier), or a fetch is already in flight (re-entrant calls are
    /// silently dropped).
    fn maybe_start_load(&mut self) {
        let Some(file_id) = self.scrubber.file_id.clone() else {
            return;
        };
        if self.scrubber.status != EnvelopeStatus::Idle {
            return;
        }
        if self.window_width <= 0.0 {
            log::debug!("Envelope load deferred: geometry not measured yet");
            return;
        }
        if !self.in_flight.begin() {
            return;
        }

        let probe = ViewportProbe {
            container_width: (self.window_width - 2.0 * LAYOUT_PADDING).max(0.0),
            viewport_width: self.window_width,
            device_pixel_ratio: self.config.display.device_pixel_ratio,
            network: self.config.network.signal(),
        };
        let tier = select_resolution_tier(&probe);

        log::info!(
            "Requesting envelope for '{}' at {} samples ({}px container)",
            file_id,
            tier.samples(),
            probe.container_width
        );

        self.scrubber.begin_load();
        if let Err(e) = self.loader.load(file_id, tier.samples()) {
            self.in_flight.complete();
            self.scrubber.fail_load(e);
        }
    }

    fn handle_envelope_loaded(&mut self, result: EnvelopeResult) {
        self.in_flight.complete();

        // Stale completion: the user bound another file mid-fetch
        if self.scrubber.file_id.as_deref() != Some(result.file_id.as_str()) {
            log::debug!(
                "Dropping envelope result for unbound file '{}'",
                result.file_id
            );
            return;
        }

        match result.result {
            Ok(payload) => {
                self.scrubber.apply_envelope(payload);
                self.status = match &self.scrubber.status {
                    EnvelopeStatus::Unavailable => {
                        format!("No waveform available for {}", result.file_id)
                    }
                    _ => format!(
                        "Loaded {} ({})",
                        result.file_id,
                        wavescrub_widgets::format_time(self.scrubber.duration())
                    ),
                };
            }
            Err(e) => {
                self.scrubber.fail_load(e.clone());
                self.status = format!("Error loading waveform: {}", e);
            }
        }
    }

    /// Subscribe to the tick clock, loader results, and window geometry
    pub fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            // ~30fps drives the playback clock and deferred-load checks
            time::every(std::time::Duration::from_millis(33)).map(|_| Message::Tick),
            mpsc_subscription(self.loader.result_receiver()).map(Message::EnvelopeLoaded),
            window::resize_events().map(|(_id, size)| Message::WindowResized(size)),
        ])
    }

    /// Build the view
    pub fn view(&self) -> Element<'_, Message> {
        let header = row![
            text_input("file id", &self.file_id_input)
                .on_input(Message::FileIdInput)
                .on_submit(Message::OpenFile)
                .width(Length::Fixed(260.0)),
            button("Open").on_press(Message::OpenFile),
            button(if self.playing { "Pause" } else { "Play" })
                .on_press(Message::TogglePlayback),
            // Slider surface label: M:SS position / M:SS duration
            text(self.scrubber.scrub_label()).size(14),
        ]
        .spacing(8);

        // Tokens are resolved from the active theme on every view pass;
        // the widget never caches them
        let scrubber = waveform_scrubber(
            &self.scrubber,
            self.theme_config.resolve(),
            self.config.display.waveform_height,
            Message::Seek,
        );

        let overlay: Element<'_, Message> = match &self.scrubber.status {
            EnvelopeStatus::Failed(message) => row![
                text(format!("Couldn't load waveform: {}", message)).size(14),
                button("Retry").on_press(Message::Retry),
            ]
            .spacing(8)
            .into(),
            // Unavailable is informational only: retrying would not help
            EnvelopeStatus::Unavailable => {
                text("Waveform unavailable for this file").size(14).into()
            }
            _ => row![].into(),
        };

        let footer = text(&self.status).size(12);

        container(
            column![header, scrubber, overlay, footer]
                .spacing(12)
                .width(Length::Fill),
        )
        .padding(LAYOUT_PADDING)
        .width(Length::Fill)
        .into()
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::Size;
    use wavescrub_widgets::EnvelopePayload;

    fn test_app() -> WavescrubApp {
        WavescrubApp::new(PlayerConfig::default(), ThemeConfig::default())
    }

    fn loaded_result(file_id: &str, waveform: Vec<u8>, duration: Option<f64>) -> EnvelopeResult {
        EnvelopeResult {
            file_id: file_id.to_string(),
            result: Ok(EnvelopePayload { waveform, duration }),
        }
    }

    #[test]
    fn test_load_deferred_until_geometry_measured() {
        let mut app = test_app();
        app.file_id_input = "rec-1".to_string();
        let _ = app.update(Message::OpenFile);

        // No geometry yet: nothing in flight, still Idle
        assert!(!app.in_flight.is_pending());
        assert_eq!(app.scrubber.status, EnvelopeStatus::Idle);

        // First measurement triggers the load
        let _ = app.update(Message::WindowResized(Size::new(1200.0, 800.0)));
        assert!(app.in_flight.is_pending());
        assert!(app.scrubber.status.is_loading());
    }

    #[test]
    fn test_reentrant_load_is_noop() {
        let mut app = test_app();
        app.file_id_input = "rec-1".to_string();
        let _ = app.update(Message::OpenFile);
        let _ = app.update(Message::WindowResized(Size::new(1200.0, 800.0)));
        assert!(app.in_flight.is_pending());

        // Ticks and further resizes while pending do not issue new fetches
        let _ = app.update(Message::Tick);
        let _ = app.update(Message::WindowResized(Size::new(1400.0, 800.0)));
        assert!(app.in_flight.is_pending());
        assert!(app.scrubber.status.is_loading());
    }

    #[test]
    fn test_stale_result_dropped() {
        let mut app = test_app();
        app.file_id_input = "rec-1".to_string();
        let _ = app.update(Message::OpenFile);
        let _ = app.update(Message::WindowResized(Size::new(1200.0, 800.0)));

        // User binds a different file before the first fetch completes
        app.file_id_input = "rec-2".to_string();
        let _ = app.update(Message::OpenFile);

        let _ = app.update(Message::EnvelopeLoaded(loaded_result(
            "rec-1",
            vec![1, 2, 3],
            Some(30.0),
        )));

        // rec-1's envelope must not be applied to rec-2
        assert!(app.scrubber.status.envelope().is_none());
    }

    #[test]
    fn test_seek_moves_the_clock() {
        let mut app = test_app();
        app.file_id_input = "rec-1".to_string();
        let _ = app.update(Message::OpenFile);
        let _ = app.update(Message::WindowResized(Size::new(1200.0, 800.0)));
        let _ = app.update(Message::EnvelopeLoaded(loaded_result(
            "rec-1",
            vec![0, 128, 255],
            Some(120.0),
        )));

        let _ = app.update(Message::Seek(60.0));
        assert_eq!(app.clock_seconds, 60.0);
        assert_eq!(app.scrubber.position(), 60.0);

        // Seeks clamp into the media's range
        let _ = app.update(Message::Seek(500.0));
        assert_eq!(app.clock_seconds, 120.0);
    }

    #[test]
    fn test_retry_only_from_failed() {
        let mut app = test_app();
        app.file_id_input = "rec-1".to_string();
        let _ = app.update(Message::OpenFile);
        let _ = app.update(Message::WindowResized(Size::new(1200.0, 800.0)));

        // Unavailable offers no retry: the message is ignored
        let _ = app.update(Message::EnvelopeLoaded(loaded_result("rec-1", vec![], Some(30.0))));
        assert_eq!(app.scrubber.status, EnvelopeStatus::Unavailable);
        let _ = app.update(Message::Retry);
        assert_eq!(app.scrubber.status, EnvelopeStatus::Unavailable);

        // Failed retries go back through Loading
        app.scrubber.fail_load("boom");
        let _ = app.update(Message::Retry);
        assert!(app.scrubber.status.is_loading());
    }
}
