use super::messages::Message;
use super::state::{App, SIGNAL_POLL_INTERVAL, TICK_INTERVAL};
use iced::{Subscription, Task, event, time};

mod reducer;
mod runtime;
mod scroll;
mod shortcuts;
mod snake;

/// Describes work that must be performed outside the pure reducer.
pub(super) enum Effect {
    SaveSession,
    ScrollTo(f32),
    Quit,
}

impl App {
    pub fn subscription(app: &App) -> Subscription<Message> {
        let mut subscriptions: Vec<Subscription<Message>> =
            vec![event::listen_with(runtime::runtime_event_to_message)];

        if app.needs_animation_ticks() {
            subscriptions.push(time::every(TICK_INTERVAL).map(Message::Tick));
        }
        subscriptions.push(time::every(SIGNAL_POLL_INTERVAL).map(|_| Message::PollSystemSignals));

        Subscription::batch(subscriptions)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        let effects = self.reduce(message);
        if effects.is_empty() {
            Task::none()
        } else {
            Task::batch(effects.into_iter().map(|effect| self.run_effect(effect)))
        }
    }

    fn needs_animation_ticks(&self) -> bool {
        self.scheduler.is_animating()
            || !self.scheduler.queue().is_empty()
            || self.idle_deadline.is_some()
    }
}
