use super::super::state::App;
use super::Effect;
use crate::visibility::{Intent, IntentTrigger};
use std::time::Instant;
use tracing::debug;

impl App {
    /// Animation clock: drive the running snake step and, once scrolling has
    /// gone idle with nothing in flight, self-heal any drift between the
    /// viewport and the active section.
    pub(super) fn handle_tick(&mut self, now: Instant, effects: &mut Vec<Effect>) {
        if self
            .scheduler
            .advance(now, &mut self.markers, &self.layout)
            .is_some()
        {
            effects.push(Effect::SaveSession);
        }

        if let Some(deadline) = self.idle_deadline {
            if now >= deadline {
                self.idle_deadline = None;
                self.maybe_correct_section(now);
            }
        }
    }

    /// Scroll went idle without a clean watcher match: snap the logical
    /// state to whichever section is nearest the viewport center.
    fn maybe_correct_section(&mut self, now: Instant) {
        if !self.scheduler.is_settled() {
            return;
        }
        let nearest = self
            .layout
            .nearest_section(self.scroll_y, self.scheduler.active());
        if nearest != self.scheduler.active() {
            debug!(nearest, "Correcting active section after scroll idle");
            self.commit_intent(
                Intent {
                    target: nearest,
                    trigger: IntentTrigger::Fallback,
                },
                now,
            );
        }
    }

    /// Operator escape hatch: drop all animation bookkeeping and snap the
    /// markers to the active section's row.
    pub(super) fn handle_reset_markers(&mut self) {
        self.watcher.clear_pending();
        self.idle_deadline = None;
        self.scheduler.reset(&mut self.markers, &self.layout);
    }
}
