mod constants;

use crate::cache::Session;
use crate::config::{AppConfig, ThemeMode};
use crate::layout::PageLayout;
use crate::markers::MarkerSet;
use crate::scheduler::Scheduler;
use crate::visibility::{IntersectionSampler, Watcher};
use iced::Task;
use iced::widget::scrollable::{self, AbsoluteOffset};
use std::time::Instant;

use super::messages::Message;

pub(crate) use constants::*;

/// Core application state composed of the snake subsystem plus UI flags.
pub struct App {
    pub(super) config: AppConfig,
    pub(super) layout: PageLayout,
    pub(super) markers: MarkerSet,
    pub(super) sampler: IntersectionSampler,
    pub(super) watcher: Watcher,
    pub(super) scheduler: Scheduler,
    pub(super) scroll_y: f32,
    pub(super) idle_deadline: Option<Instant>,
    pub(super) header_compact: bool,
    pub(super) show_scroll_top: bool,
}

impl App {
    /// Build the initial state and the startup task. The viewport starts as
    /// an estimate from the configured window size; exact bounds arrive with
    /// the first scroll report.
    pub fn bootstrap(config: AppConfig, session: Option<Session>) -> (App, Task<Message>) {
        let mut layout = PageLayout::from_config(&config);
        layout.set_viewport(
            config.window_width,
            (config.window_height - HEADER_HEIGHT_PX).max(1.0),
        );

        let active = session.map(|s| s.active_section).unwrap_or(0);
        let scroll_y = session.map(|s| s.scroll_y).unwrap_or(0.0);

        let mut markers = MarkerSet::new();
        let order = markers.current_order();
        markers.place(active, &order, &layout);

        let mut sampler = IntersectionSampler::new(config.margin_fraction);
        sampler.prime(&layout, scroll_y);

        let scheduler = Scheduler::new(active, config.step_duration());
        let watcher = Watcher::new(config.watcher_params());

        let task = if scroll_y > 0.0 {
            scrollable::scroll_to(PAGE_SCROLL_ID.clone(), AbsoluteOffset { x: 0.0, y: scroll_y })
        } else {
            Task::none()
        };

        let app = App {
            header_compact: scroll_y > config.compact_header_after,
            show_scroll_top: scroll_y > config.scroll_top_after,
            config,
            layout,
            markers,
            sampler,
            watcher,
            scheduler,
            scroll_y,
            idle_deadline: None,
        };
        (app, task)
    }

    pub fn theme_mode(&self) -> ThemeMode {
        self.config.theme
    }
}
