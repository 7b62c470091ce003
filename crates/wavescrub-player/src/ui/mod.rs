//! UI layer for wavescrub-player

pub mod app;
pub mod message;

pub use app::WavescrubApp;
pub use message::Message;
