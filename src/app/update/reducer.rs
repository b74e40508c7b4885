use super::super::messages::Message;
use super::super::state::App;
use super::Effect;
use std::time::Instant;
use tracing::info;

impl App {
    pub(super) fn reduce(&mut self, message: Message) -> Vec<Effect> {
        let mut effects = Vec::new();

        match message {
            Message::JumpToSection(section) => {
                self.handle_jump_to_section(section, &mut effects);
            }
            Message::ScrollToTop => effects.push(Effect::ScrollTo(0.0)),
            Message::ResetMarkers => self.handle_reset_markers(),
            Message::ToggleTheme => self.handle_toggle_theme(),
            Message::SafeQuit => effects.push(Effect::Quit),
            Message::WindowResized { width, height } => {
                self.handle_window_resized(width, height);
            }
            Message::KeyPressed { key, modifiers } => {
                if let Some(shortcut) = self.shortcut_message_for_key(key, modifiers) {
                    effects.extend(self.reduce(shortcut));
                }
            }
            Message::Scrolled {
                offset_y,
                viewport_width,
                viewport_height,
                content_height,
            } => self.handle_scrolled(
                offset_y,
                viewport_width,
                viewport_height,
                content_height,
                Instant::now(),
                &mut effects,
            ),
            Message::Tick(now) => self.handle_tick(now, &mut effects),
            Message::PollSystemSignals => {
                if crate::take_sigint_requested() {
                    info!("Interrupt received; shutting down safely");
                    effects.push(Effect::Quit);
                }
            }
        }

        effects
    }

    fn handle_toggle_theme(&mut self) {
        self.config.theme = match self.config.theme {
            crate::config::ThemeMode::Day => crate::config::ThemeMode::Night,
            crate::config::ThemeMode::Night => crate::config::ThemeMode::Day,
        };
        info!(theme = %self.config.theme, "Toggled theme");
    }
}
