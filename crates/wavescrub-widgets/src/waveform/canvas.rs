//! Canvas Program implementation for the waveform scrubber
//!
//! Implements the iced canvas `Program` trait for custom bar-chart
//! drawing and translates pointer/keyboard events into seek callbacks,
//! following idiomatic iced 0.14 patterns.

use super::envelope::{Envelope, EnvelopeStatus};
use super::state::{ScrubberState, SeekStep};
use crate::theme::{ScrubberConfig, ThemeTokens};
use iced::keyboard::{self, key::Named, Key};
use iced::widget::canvas::{self, Event, Frame, Geometry, Path, Program, Stroke};
use iced::{mouse, Point, Rectangle, Size, Theme};

/// Canvas state for tracking scrubber mouse interaction
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrubberInteraction {
    /// Whether the left button is held (drag-to-scrub). While set, cursor
    /// moves are tracked globally so scrubbing survives leaving the
    /// widget's bounds during a fast drag.
    pub is_dragging: bool,
}

/// Canvas program for the waveform scrubber
///
/// Takes a callback closure `on_seek` that's called with the requested
/// playback time in seconds on click, drag, and keyboard seeking. The
/// widget never mutates playback itself; the external player feeds the
/// resulting position back through `ScrubberState::set_position`.
pub struct ScrubberCanvas<'a, Message, F>
where
    F: Fn(f64) -> Message,
{
    pub state: &'a ScrubberState,
    /// Palette resolved by the host for this render pass; never cached
    /// across passes so theme switches take effect immediately.
    pub tokens: ThemeTokens,
    pub on_seek: F,
}

impl<'a, Message, F> ScrubberCanvas<'a, Message, F>
where
    F: Fn(f64) -> Message,
{
    fn seek_action(&self, pointer_x: f32, width: f32) -> Option<canvas::Action<Message>> {
        self.state
            .seek_time(pointer_x, width)
            .map(|time| canvas::Action::publish((self.on_seek)(time)))
    }
}

impl<'a, Message, F> Program<Message> for ScrubberCanvas<'a, Message, F>
where
    Message: Clone,
    F: Fn(f64) -> Message,
{
    type State = ScrubberInteraction;

    fn update(
        &self,
        interaction: &mut Self::State,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        match event {
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                if let Some(position) = cursor.position_in(bounds) {
                    interaction.is_dragging = true;
                    return self.seek_action(position.x, bounds.width);
                }
            }
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                // Release anywhere ends the drag, inside the bounds or not
                interaction.is_dragging = false;
            }
            Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                if interaction.is_dragging {
                    // Track the global cursor, not position_in: the seek
                    // math clamps x back into [0, width]
                    if let Some(position) = cursor.position() {
                        return self.seek_action(position.x - bounds.x, bounds.width);
                    }
                }
            }
            Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) => {
                if let Some(step) = seek_step_for_key(key) {
                    if let Some(time) = self.state.stepped_seek(step) {
                        return Some(canvas::Action::publish((self.on_seek)(time)));
                    }
                }
            }
            _ => {}
        }

        None
    }

    fn mouse_interaction(
        &self,
        _interaction: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if cursor.is_over(bounds) {
            mouse::Interaction::Pointer
        } else {
            mouse::Interaction::default()
        }
    }

    fn draw(
        &self,
        _interaction: &Self::State,
        renderer: &iced::Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());

        // Background
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), self.tokens.background);

        let width = bounds.width;
        let height = bounds.height;
        let center_y = height / 2.0;

        match &self.state.status {
            EnvelopeStatus::Idle | EnvelopeStatus::Loading => {
                // Loading indicator: a centered strip where the waveform will be
                let mut loading_color = self.tokens.secondary_text;
                loading_color.a = 0.5;
                frame.fill_rectangle(
                    Point::new(width * 0.3, center_y - 2.0),
                    Size::new(width * 0.4, 4.0),
                    loading_color,
                );
            }
            EnvelopeStatus::Unavailable | EnvelopeStatus::Failed(_) => {
                // Dashed midline placeholder; the host view overlays the
                // message (and, for failures only, a retry control)
                let mut missing_color = self.tokens.secondary_text;
                missing_color.a = 0.4;
                for x in (0..(width.max(0.0) as usize)).step_by(20) {
                    frame.fill_rectangle(
                        Point::new(x as f32, center_y - 1.0),
                        Size::new(10.0, 2.0),
                        missing_color,
                    );
                }
            }
            EnvelopeStatus::Ready(envelope) => {
                let config = ScrubberConfig::default();
                let progress_x = self.state.progress_ratio() as f32 * width;
                draw_bars(
                    &mut frame,
                    envelope,
                    progress_x,
                    width,
                    height,
                    &config,
                    &self.tokens,
                );

                // Playhead
                if (0.0..=width).contains(&progress_x) {
                    frame.stroke(
                        &Path::line(
                            Point::new(progress_x, 0.0),
                            Point::new(progress_x, height),
                        ),
                        Stroke::default()
                            .with_color(self.tokens.primary)
                            .with_width(config.playhead_width),
                    );
                }
            }
        }

        vec![frame.into_geometry()]
    }
}

/// Map a key press to a discrete seek request
///
/// Left/right arrows step by 1% of duration, Home/End jump to the edges.
/// Any other key is ignored.
fn seek_step_for_key(key: &Key) -> Option<SeekStep> {
    match key {
        Key::Named(Named::ArrowLeft) => Some(SeekStep::StepBack),
        Key::Named(Named::ArrowRight) => Some(SeekStep::StepForward),
        Key::Named(Named::Home) => Some(SeekStep::Start),
        Key::Named(Named::End) => Some(SeekStep::End),
        _ => None,
    }
}

/// Draw the amplitude bars with the playback-progress split
fn draw_bars(
    frame: &mut Frame,
    envelope: &Envelope,
    progress_x: f32,
    width: f32,
    height: f32,
    config: &ScrubberConfig,
    tokens: &ThemeTokens,
) {
    let sample_count = envelope.len();
    if sample_count == 0 || width <= 0.0 {
        return;
    }

    let bar_width = exact_bar_width(width, sample_count);

    for i in 0..sample_count {
        let x = i as f32 * bar_width;
        let bar_height = bar_height_px(envelope.normalized(i), height, config);
        let y = (height - bar_height) / 2.0;

        let color = if bar_is_played(i, bar_width, progress_x) {
            tokens.primary
        } else {
            tokens.secondary_text
        };

        frame.fill_rectangle(Point::new(x, y), Size::new(bar_width, bar_height), color);
    }
}

/// Per-bar width so the bars collectively span the full canvas
///
/// Exact division, not floored: any rounding would leave a gap at the
/// right edge.
fn exact_bar_width(canvas_width: f32, sample_count: usize) -> f32 {
    canvas_width / sample_count as f32
}

/// Bar height for a normalized amplitude, scaled to 80% of the canvas
/// with a 2px floor so near-silent samples remain visible
fn bar_height_px(normalized: f32, canvas_height: f32, config: &ScrubberConfig) -> f32 {
    (normalized.clamp(0.0, 1.0) * canvas_height * config.bar_height_scale)
        .max(config.min_bar_height)
}

/// A bar takes the progress color when its horizontal center lies left of
/// the playhead, producing the left-to-right fill effect
fn bar_is_played(index: usize, bar_width: f32, progress_x: f32) -> bool {
    (index as f32 + 0.5) * bar_width < progress_x
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bars_span_full_width() {
        // Sum of per-bar widths before rounding equals the canvas width
        // exactly, for awkward counts too
        for &(width, count) in &[(800.0_f32, 500_usize), (1000.0, 333), (977.5, 2000)] {
            let bar = exact_bar_width(width, count);
            let spanned = bar * count as f32;
            assert!(
                (spanned - width).abs() < 1e-3,
                "{} bars over {}px spanned {}px",
                count,
                width,
                spanned
            );
        }
    }

    #[test]
    fn test_bar_height_scaling() {
        let config = ScrubberConfig::default();
        // Full amplitude fills 80% of the canvas
        assert_eq!(bar_height_px(1.0, 100.0, &config), 80.0);
        // Silence still renders the 2px floor
        assert_eq!(bar_height_px(0.0, 100.0, &config), 2.0);
        // Out-of-range input clamps rather than overflowing the canvas
        assert_eq!(bar_height_px(2.0, 100.0, &config), 80.0);
    }

    #[test]
    fn test_progress_split_at_bar_center() {
        let bar_width = 2.0;
        // Bar 10 spans [20, 22), center 21
        assert!(bar_is_played(10, bar_width, 21.5));
        assert!(!bar_is_played(10, bar_width, 21.0));
        assert!(!bar_is_played(10, bar_width, 20.0));
    }

    #[test]
    fn test_progress_split_is_monotonic() {
        // Once a bar is unplayed, every later bar is unplayed too
        let bar_width = 1.6;
        let progress_x = 123.4;
        let mut seen_unplayed = false;
        for i in 0..500 {
            let played = bar_is_played(i, bar_width, progress_x);
            if seen_unplayed {
                assert!(!played, "played bar {} after the split", i);
            }
            if !played {
                seen_unplayed = true;
            }
        }
    }

    #[test]
    fn test_seek_step_key_mapping() {
        assert_eq!(
            seek_step_for_key(&Key::Named(Named::ArrowLeft)),
            Some(SeekStep::StepBack)
        );
        assert_eq!(
            seek_step_for_key(&Key::Named(Named::ArrowRight)),
            Some(SeekStep::StepForward)
        );
        assert_eq!(seek_step_for_key(&Key::Named(Named::Home)), Some(SeekStep::Start));
        assert_eq!(seek_step_for_key(&Key::Named(Named::End)), Some(SeekStep::End));
        assert_eq!(seek_step_for_key(&Key::Named(Named::Space)), None);
        assert_eq!(seek_step_for_key(&Key::Character("a".into())), None);
    }
}
