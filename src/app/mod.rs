mod messages;
mod state;
mod update;
mod view;

pub use messages::Message;
pub use state::App;

use crate::cache::Session;
use crate::config::{AppConfig, ThemeMode};
use iced::{Size, Theme, window};

/// Helper to launch the app with the provided config and cached session.
pub fn run_app(config: AppConfig, session: Option<Session>) -> iced::Result {
    let window_settings = window::Settings {
        size: Size::new(config.window_width, config.window_height),
        ..window::Settings::default()
    };

    iced::application("Snakebar", App::update, App::view)
        .window(window_settings)
        .subscription(App::subscription)
        .theme(|app: &App| match app.theme_mode() {
            ThemeMode::Night => Theme::Dark,
            ThemeMode::Day => Theme::Light,
        })
        .run_with(move || App::bootstrap(config, session))
}
