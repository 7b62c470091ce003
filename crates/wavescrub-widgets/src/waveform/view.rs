//! Scrubber view function
//!
//! Creates the scrubber UI element using the proper iced 0.14 pattern:
//! a plain function that takes a state reference and a callback closure,
//! returning an Element.

use super::canvas::ScrubberCanvas;
use super::state::ScrubberState;
use crate::theme::{ScrubberConfig, ThemeTokens};
use iced::widget::Canvas;
use iced::{Element, Length};

/// Create a waveform scrubber element with click/drag/keyboard seeking
///
/// # Arguments
///
/// * `state` - Scrubber state (envelope, duration, playback position)
/// * `tokens` - Palette for this render pass, resolved from the active
///   theme by the caller; re-resolved every pass so theme switches apply
///   on the next render
/// * `height` - Canvas height in pixels
/// * `on_seek` - Callback called with the requested playback time in
///   seconds on click, drag, or keyboard seek
///
/// # Example
///
/// ```ignore
/// let scrubber = waveform_scrubber(
///     &self.scrubber,
///     self.theme.tokens(),
///     64.0,
///     |time| Message::Seek(time),
/// );
/// ```
pub fn waveform_scrubber<'a, Message>(
    state: &'a ScrubberState,
    tokens: ThemeTokens,
    height: f32,
    on_seek: impl Fn(f64) -> Message + 'a,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    let height = if height > 0.0 {
        height
    } else {
        ScrubberConfig::default().height
    };

    Canvas::new(ScrubberCanvas {
        state,
        tokens,
        on_seek,
    })
    .width(Length::Fill)
    .height(Length::Fixed(height))
    .into()
}
