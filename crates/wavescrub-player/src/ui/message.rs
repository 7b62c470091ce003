//! Application messages for wavescrub-player
//!
//! All message types that can be dispatched in the wavescrub application.

use crate::fetch::EnvelopeResult;
use iced::Size;

/// Messages that can be sent to the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Tick for periodic UI updates (playback clock, deferred load check)
    Tick,
    /// Background envelope fetch completed
    EnvelopeLoaded(EnvelopeResult),
    /// Scrubber requested a new playback position (seconds)
    Seek(f64),
    /// User asked to retry a failed envelope fetch
    Retry,
    /// Toggle the playback clock
    TogglePlayback,
    /// Window was resized (geometry for resolution selection)
    WindowResized(Size),
    /// File id input field changed
    FileIdInput(String),
    /// Bind the entered file id and schedule an envelope load
    OpenFile,
}
