//! Transition scheduling.
//!
//! The scheduler is the only owner of the active section index and the only
//! thing that starts snake animations. It serializes intents into a gapless
//! queue of single-step transitions, keeps at most one step animating, and
//! always reconciles toward the latest request: a new target rebuilds the
//! queue from the effective position (the in-flight step if one exists),
//! discarding anything stale.

use crate::choreography::SnakePlan;
use crate::layout::PageLayout;
use crate::markers::MarkerSet;
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

#[derive(Debug)]
enum Fsm {
    Idle,
    Animating {
        step: usize,
        plan: SnakePlan,
        started_at: Instant,
    },
}

#[derive(Debug)]
pub struct Scheduler {
    active: usize,
    queue: VecDeque<usize>,
    in_flight: Option<usize>,
    step_duration: Duration,
    fsm: Fsm,
}

impl Scheduler {
    pub fn new(active: usize, step_duration: Duration) -> Self {
        Scheduler {
            active,
            queue: VecDeque::new(),
            in_flight: None,
            step_duration,
            fsm: Fsm::Idle,
        }
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn in_flight(&self) -> Option<usize> {
        self.in_flight
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.fsm, Fsm::Animating { .. })
    }

    /// Idle with nothing queued; the state the correction loop requires.
    pub fn is_settled(&self) -> bool {
        !self.is_animating() && self.queue.is_empty()
    }

    pub fn queue(&self) -> &VecDeque<usize> {
        &self.queue
    }

    /// The gapless single-step path between two sections.
    fn path(from: usize, to: usize) -> VecDeque<usize> {
        let mut steps = VecDeque::new();
        if to > from {
            steps.extend(from + 1..=to);
        } else {
            steps.extend((to..from).rev());
        }
        steps
    }

    /// Handle an intent for `target`. Returns true when the request was
    /// committed (queue rebuilt and processing started if idle); the caller
    /// is expected to clear the watcher's pending dwell on commitment.
    /// Requesting the effective position is a no-op.
    pub fn request(
        &mut self,
        target: usize,
        markers: &mut MarkerSet,
        layout: &PageLayout,
        now: Instant,
    ) -> bool {
        let effective = self.in_flight.unwrap_or(self.active);
        if target == effective {
            return false;
        }
        self.queue = Self::path(effective, target);
        debug!(to = target, from = effective, queued = self.queue.len(), "Rebuilt transition queue");
        self.pump(markers, layout, now);
        true
    }

    /// Start the next queued step unless a step is already animating.
    fn pump(&mut self, markers: &mut MarkerSet, layout: &PageLayout, now: Instant) {
        if self.is_animating() {
            return;
        }
        let Some(step) = self.queue.pop_front() else {
            return;
        };
        match SnakePlan::build(self.active, step, layout, markers, self.step_duration) {
            Ok(plan) => {
                info!(from = self.active, to = step, "Starting snake step");
                self.in_flight = Some(step);
                self.fsm = Fsm::Animating {
                    step,
                    plan,
                    started_at: now,
                };
            }
            Err(err) => {
                warn!(from = self.active, to = step, %err, "Snake step failed; snapping back");
                self.abort(markers, layout);
            }
        }
    }

    /// Drop all bookkeeping and park the markers on the active section's row
    /// in their ground-truth order.
    fn abort(&mut self, markers: &mut MarkerSet, layout: &PageLayout) {
        self.queue.clear();
        self.in_flight = None;
        self.fsm = Fsm::Idle;
        let order = markers.current_order();
        markers.place(self.active, &order, layout);
    }

    /// Manual escape hatch: identical to the failure path.
    pub fn reset(&mut self, markers: &mut MarkerSet, layout: &PageLayout) {
        info!(active = self.active, "Resetting snake state");
        self.abort(markers, layout);
    }

    /// Drive the running animation. Applies sampled positions to the marker
    /// set; on step completion commits the new active section, starts the
    /// next queued step, and returns the completed section.
    pub fn advance(
        &mut self,
        now: Instant,
        markers: &mut MarkerSet,
        layout: &PageLayout,
    ) -> Option<usize> {
        let Fsm::Animating {
            plan, started_at, ..
        } = &self.fsm
        else {
            return None;
        };

        let elapsed = now.duration_since(*started_at);
        if !plan.is_complete(elapsed) {
            let positions = plan.sample(elapsed);
            for (marker, &(left, top)) in positions.iter().enumerate() {
                markers.set_position(marker, left, top);
            }
            return None;
        }

        let Fsm::Animating { step, plan, .. } = std::mem::replace(&mut self.fsm, Fsm::Idle) else {
            return None;
        };
        let finals = plan.sample(plan.total_duration());
        for (marker, &(left, top)) in finals.iter().enumerate() {
            markers.set_position(marker, left, top);
        }
        // Redundant placement absorbs any sampling drift.
        markers.place(plan.to_section(), plan.final_order(), layout);
        self.active = step;
        self.in_flight = None;
        info!(active = self.active, "Snake step complete");
        self.pump(markers, layout, now);
        Some(step)
    }
}
