use super::super::messages::Message;
use super::super::state::App;
use crate::content::SECTION_COUNT;
use iced::keyboard::{Key, Modifiers, key};

impl App {
    pub(super) fn shortcut_message_for_key(
        &self,
        key: Key,
        modifiers: Modifiers,
    ) -> Option<Message> {
        if modifiers.control() || modifiers.alt() || modifiers.logo() {
            return None;
        }

        match key.as_ref() {
            Key::Named(key::Named::Home) => Some(Message::ScrollToTop),
            Key::Character(ch) => {
                let pressed = ch.to_ascii_lowercase();
                match pressed.as_str() {
                    "r" => Some(Message::ResetMarkers),
                    "t" => Some(Message::ToggleTheme),
                    "q" => Some(Message::SafeQuit),
                    digit => digit
                        .parse::<usize>()
                        .ok()
                        .filter(|&n| n >= 1 && n <= SECTION_COUNT)
                        .map(|n| Message::JumpToSection(n - 1)),
                }
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use iced::keyboard::key::Named;

    fn app() -> App {
        App::bootstrap(AppConfig::default(), None).0
    }

    fn pressed(app: &App, ch: &str) -> Option<Message> {
        app.shortcut_message_for_key(Key::Character(ch.into()), Modifiers::empty())
    }

    #[test]
    fn plain_keys_map_to_messages() {
        let app = app();
        assert!(matches!(pressed(&app, "r"), Some(Message::ResetMarkers)));
        assert!(matches!(pressed(&app, "T"), Some(Message::ToggleTheme)));
        assert!(matches!(pressed(&app, "q"), Some(Message::SafeQuit)));
        assert!(matches!(
            pressed(&app, "3"),
            Some(Message::JumpToSection(2))
        ));
        assert!(pressed(&app, "9").is_none());
        assert!(pressed(&app, "x").is_none());
    }

    #[test]
    fn modifier_chords_are_left_alone() {
        let app = app();
        let message =
            app.shortcut_message_for_key(Key::Character("q".into()), Modifiers::CTRL);
        assert!(message.is_none());
    }

    #[test]
    fn home_scrolls_to_top() {
        let app = app();
        let message =
            app.shortcut_message_for_key(Key::Named(Named::Home), Modifiers::empty());
        assert!(matches!(message, Some(Message::ScrollToTop)));
    }
}
