//! Wavescrub Player - waveform review for transcription audio
//!
//! This is the main entry point for the GUI application. It:
//! 1. Loads player and theme configuration from the user's config dir
//! 2. Launches the iced GUI application
//! 3. Spawns the background envelope loader thread (inside the app)
//!
//! The transcription server address and the network-quality signal used
//! for envelope resolution selection live in config.yaml.

mod config;
mod fetch;
mod theme;
mod ui;

use iced::{Size, Task};

use ui::{Message, WavescrubApp};

fn main() -> iced::Result {
    // Initialize logger - set RUST_LOG=debug for verbose output
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    log::info!("wavescrub-player starting up");

    let config_path = config::default_config_path();
    if !config_path.exists() {
        // Seed a default config so users have a file to edit
        if let Err(e) = config::save_config(&config::PlayerConfig::default(), &config_path) {
            log::warn!("Could not write default config: {:#}", e);
        }
    }
    let player_config = config::load_config(&config_path);
    let theme_config = theme::load_theme(&theme::default_theme_path());

    log::info!("Envelope server: {}", player_config.server.base_url);

    // Run the iced application using the functional API
    iced::application(
        move || {
            // Boot function: iced requires Fn, so capture only clonables
            let app = WavescrubApp::new(player_config.clone(), theme_config.clone());
            (app, Task::none() as Task<Message>)
        },
        update,
        view,
    )
    .subscription(subscription)
    .theme(theme_fn)
    .title("Wavescrub")
    .window_size(Size::new(1200.0, 300.0))
    .run()
}

/// Update function for iced
fn update(app: &mut WavescrubApp, message: Message) -> Task<Message> {
    app.update(message)
}

/// View function for iced
fn view(app: &WavescrubApp) -> iced::Element<'_, Message> {
    app.view()
}

/// Subscription function for iced
fn subscription(app: &WavescrubApp) -> iced::Subscription<Message> {
    app.subscription()
}

/// Theme function for iced
fn theme_fn(app: &WavescrubApp) -> iced::Theme {
    app.theme()
}
