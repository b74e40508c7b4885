use super::super::messages::Message;
use super::super::state::{App, PAGE_SCROLL_ID};
use super::Effect;
use crate::cache::{Session, save_session};
use iced::widget::scrollable::{self, AbsoluteOffset};
use iced::{Event, Task, event, keyboard, window};
use tracing::info;

impl App {
    pub(super) fn run_effect(&mut self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::SaveSession => {
                self.persist_session();
                Task::none()
            }
            Effect::ScrollTo(y) => {
                scrollable::scroll_to(PAGE_SCROLL_ID.clone(), AbsoluteOffset { x: 0.0, y })
            }
            Effect::Quit => {
                self.persist_session();
                info!("Exiting");
                iced::exit()
            }
        }
    }

    pub(super) fn persist_session(&self) {
        save_session(&Session {
            active_section: self.scheduler.active(),
            scroll_y: self.scroll_y,
        });
    }
}

pub(super) fn runtime_event_to_message(
    event: Event,
    status: event::Status,
    _window_id: window::Id,
) -> Option<Message> {
    if status == event::Status::Captured {
        return None;
    }
    match event {
        Event::Window(window::Event::Resized(size)) => Some(Message::WindowResized {
            width: size.width,
            height: size.height,
        }),
        Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
            Some(Message::KeyPressed { key, modifiers })
        }
        _ => None,
    }
}
