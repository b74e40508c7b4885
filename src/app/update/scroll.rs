use super::super::state::{App, HEADER_HEIGHT_PX};
use super::Effect;
use crate::content::SECTION_COUNT;
use crate::visibility::Intent;
use std::time::Instant;
use tracing::{debug, info};

impl App {
    /// Fold one scroll report into the watcher pipeline: refresh geometry,
    /// track direction and idle, and let a threshold-crossing batch resolve
    /// into at most one transition intent.
    pub(super) fn handle_scrolled(
        &mut self,
        offset_y: f32,
        viewport_width: f32,
        viewport_height: f32,
        content_height: f32,
        now: Instant,
        effects: &mut Vec<Effect>,
    ) {
        let scroll_y = Self::sanitize_scroll(offset_y);
        self.layout.set_viewport(viewport_width, viewport_height);
        if content_height.is_finite()
            && (content_height - self.layout.content_height()).abs() > 1.0
        {
            debug!(
                reported = content_height,
                derived = self.layout.content_height(),
                "Reported content height drifts from the derived layout"
            );
        }

        self.scroll_y = scroll_y;
        self.header_compact = scroll_y > self.config.compact_header_after;
        self.show_scroll_top = scroll_y > self.config.scroll_top_after;
        self.watcher.note_scroll(scroll_y, now);
        self.idle_deadline = Some(now + self.config.scroll_idle());
        effects.push(Effect::SaveSession);

        if let Some(batch) = self.sampler.sample(&self.layout, scroll_y) {
            if let Some(intent) = self.watcher.decide(&batch, self.scheduler.active(), now) {
                self.commit_intent(intent, now);
            }
        }
    }

    /// Hand an intent to the scheduler; a committed request supersedes any
    /// in-progress dwell.
    pub(super) fn commit_intent(&mut self, intent: Intent, now: Instant) {
        info!(section = intent.target, trigger = ?intent.trigger, "Transition intent");
        if self
            .scheduler
            .request(intent.target, &mut self.markers, &self.layout, now)
        {
            self.watcher.clear_pending();
        }
    }

    pub(super) fn handle_jump_to_section(&mut self, section: usize, effects: &mut Vec<Effect>) {
        if section >= SECTION_COUNT {
            return;
        }
        let offset = self.layout.jump_target(section);
        info!(section, offset, "Jumping to section");
        effects.push(Effect::ScrollTo(offset));
    }

    pub(super) fn handle_window_resized(&mut self, width: f32, height: f32) {
        // Estimate of the scrollable area; exact bounds arrive with the next
        // scroll report. Marker drift from the recentering is absorbed by the
        // ground-truth order read at the next transition.
        self.layout
            .set_viewport(width, (height - HEADER_HEIGHT_PX).max(1.0));
        debug!(width, height, "Window resized; marker row recentered");
    }

    fn sanitize_scroll(offset_y: f32) -> f32 {
        if offset_y.is_finite() {
            offset_y.max(0.0)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::super::state::App;
    use crate::config::AppConfig;
    use std::time::{Duration, Instant};

    const VIEWPORT_W: f32 = 1280.0;
    const VIEWPORT_H: f32 = 836.0;
    const FULL_MOVE: Duration = Duration::from_millis(800);

    fn build_test_app() -> App {
        App::bootstrap(AppConfig::default(), None).0
    }

    fn scroll(app: &mut App, y: f32, now: Instant) {
        let mut effects = Vec::new();
        let content_height = app.layout.content_height();
        app.handle_scrolled(y, VIEWPORT_W, VIEWPORT_H, content_height, now, &mut effects);
    }

    fn tick(app: &mut App, now: Instant) {
        let mut effects = Vec::new();
        app.handle_tick(now, &mut effects);
    }

    #[test]
    fn hard_scroll_drives_the_snake_to_the_far_section() {
        let mut app = build_test_app();
        let now = Instant::now();

        // Establish a downward direction, then land deep inside section 2.
        scroll(&mut app, 100.0, now);
        assert!(app.scheduler.is_settled());
        let landed = now + Duration::from_millis(50);
        scroll(&mut app, 1500.0, landed);

        // The skip-ahead fired, but the path is still gapless: the first
        // animated step targets section 1.
        assert!(app.scheduler.is_animating());
        assert_eq!(app.scheduler.in_flight(), Some(1));
        assert_eq!(app.scheduler.active(), 0);

        let mut clock = landed;
        for _ in 0..2 {
            clock += FULL_MOVE;
            tick(&mut app, clock);
        }
        assert_eq!(app.scheduler.active(), 2);
        assert!(app.scheduler.is_settled());

        let row = app.layout.row_top(2).unwrap();
        assert!(app.markers.markers().iter().all(|m| m.top == row));
    }

    #[test]
    fn idle_correction_snaps_to_the_nearest_section() {
        let mut app = build_test_app();
        let now = Instant::now();

        // Stop straddling sections 0 and 1: neither is visible enough for a
        // watcher intent, but section 1 is nearer the viewport center.
        scroll(&mut app, 370.0, now);
        assert!(app.scheduler.is_settled());
        assert_eq!(app.scheduler.active(), 0);

        // Before the idle window elapses nothing happens.
        tick(&mut app, now + Duration::from_millis(100));
        assert!(app.scheduler.is_settled());

        tick(&mut app, now + Duration::from_millis(150));
        assert!(app.scheduler.is_animating());
        assert_eq!(app.scheduler.in_flight(), Some(1));

        tick(&mut app, now + Duration::from_millis(150) + FULL_MOVE);
        assert_eq!(app.scheduler.active(), 1);
    }

    #[test]
    fn reset_snaps_markers_back_to_the_active_row() {
        let mut app = build_test_app();
        let now = Instant::now();

        scroll(&mut app, 100.0, now);
        scroll(&mut app, 1500.0, now + Duration::from_millis(50));
        assert!(app.scheduler.is_animating());

        app.handle_reset_markers();
        assert!(app.scheduler.is_settled());
        assert_eq!(app.scheduler.active(), 0);
        let row = app.layout.row_top(0).unwrap();
        assert!(app.markers.markers().iter().all(|m| m.top == row));
    }
}
