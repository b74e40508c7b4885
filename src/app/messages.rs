use iced::keyboard::{Key, Modifiers};
use std::time::Instant;

/// Messages emitted by the UI and the runtime.
#[derive(Debug, Clone)]
pub enum Message {
    JumpToSection(usize),
    ScrollToTop,
    ResetMarkers,
    ToggleTheme,
    SafeQuit,
    WindowResized {
        width: f32,
        height: f32,
    },
    KeyPressed {
        key: Key,
        modifiers: Modifiers,
    },
    Scrolled {
        offset_y: f32,
        viewport_width: f32,
        viewport_height: f32,
        content_height: f32,
    },
    Tick(Instant),
    PollSystemSignals,
}
