//! Snake choreography.
//!
//! A transition between two highlight rows is planned up front as one
//! explicit timeline per marker: a list of `(start, duration, axis, from,
//! to)` phases evaluated against a single clock. The schedule is the relay
//! that reads as a snake rounding a corner:
//!
//! - the head drops to the new row, then slides to its final slot;
//! - each interior follower first slides into the slot its leader started
//!   from (the captured position, not the live one), then drops, then slides
//!   to its final slot;
//! - the tail waits for the head's full move, slides into the head's old
//!   slot, and drops straight down onto its final slot.
//!
//! Every phase shares one step duration, exactly one axis moves per marker
//! at a time, and a follower only ever targets a slot its leader has
//! already begun vacating, so markers never collide mid-flight. The target
//! order is always the current order reversed.

use crate::layout::PageLayout;
use crate::markers::{MARKER_COUNT, MarkerOrder, MarkerSet};
use anyhow::{Result, bail};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy)]
struct Phase {
    start: Duration,
    duration: Duration,
    axis: Axis,
    from: f32,
    to: f32,
}

impl Phase {
    fn end(&self) -> Duration {
        self.start + self.duration
    }
}

#[derive(Debug, Clone)]
struct MarkerTimeline {
    marker: usize,
    start: (f32, f32),
    // Chronological, non-overlapping.
    phases: Vec<Phase>,
}

/// A fully planned transition from one highlight row to another.
#[derive(Debug, Clone)]
pub struct SnakePlan {
    timelines: Vec<MarkerTimeline>,
    total: Duration,
    final_order: MarkerOrder,
    to_section: usize,
}

impl SnakePlan {
    /// Plan the move from `from` to `to`. Captures the ground-truth marker
    /// order and positions at call time; fails structurally (moving nothing)
    /// when either row cannot be resolved.
    pub fn build(
        from: usize,
        to: usize,
        layout: &PageLayout,
        markers: &MarkerSet,
        step: Duration,
    ) -> Result<SnakePlan> {
        if layout.row_top(from).is_none() {
            bail!("cannot animate from unresolved section {from}");
        }
        let Some(to_top) = layout.row_top(to) else {
            bail!("cannot animate to unresolved section {to}");
        };

        let order = markers.current_order();
        let mut final_order = order;
        final_order.reverse();

        let head_start_left = markers.position(order[0]).0;
        let mut timelines = Vec::with_capacity(MARKER_COUNT);
        let mut total = Duration::ZERO;

        for (rank, &marker) in order.iter().enumerate() {
            let (cur_left, cur_top) = markers.position(marker);
            let final_rank = MARKER_COUNT - 1 - rank;
            let final_left = layout.slot_left(final_rank);

            let phases = if rank == 0 {
                vec![
                    Phase {
                        start: Duration::ZERO,
                        duration: step,
                        axis: Axis::Vertical,
                        from: cur_top,
                        to: to_top,
                    },
                    Phase {
                        start: step,
                        duration: step,
                        axis: Axis::Horizontal,
                        from: cur_left,
                        to: final_left,
                    },
                ]
            } else if rank == MARKER_COUNT - 1 {
                // Follows straight after the head's full move; its final slot
                // is the one the head vacated, so two phases suffice.
                vec![
                    Phase {
                        start: step * 2,
                        duration: step,
                        axis: Axis::Horizontal,
                        from: cur_left,
                        to: head_start_left,
                    },
                    Phase {
                        start: step * 3,
                        duration: step,
                        axis: Axis::Vertical,
                        from: cur_top,
                        to: to_top,
                    },
                ]
            } else {
                let leader_start_left = markers.position(order[rank - 1]).0;
                let offset = step * rank as u32;
                vec![
                    Phase {
                        start: offset,
                        duration: step,
                        axis: Axis::Horizontal,
                        from: cur_left,
                        to: leader_start_left,
                    },
                    Phase {
                        start: offset + step,
                        duration: step,
                        axis: Axis::Vertical,
                        from: cur_top,
                        to: to_top,
                    },
                    Phase {
                        start: offset + step * 2,
                        duration: step,
                        axis: Axis::Horizontal,
                        from: leader_start_left,
                        to: final_left,
                    },
                ]
            };

            if let Some(last) = phases.last() {
                total = total.max(last.end());
            }
            timelines.push(MarkerTimeline {
                marker,
                start: (cur_left, cur_top),
                phases,
            });
        }

        Ok(SnakePlan {
            timelines,
            total,
            final_order,
            to_section: to,
        })
    }

    /// Marker positions at `elapsed`, indexed by marker. Linear within each
    /// phase, held at the phase target once it ends.
    pub fn sample(&self, elapsed: Duration) -> [(f32, f32); MARKER_COUNT] {
        let mut positions = [(0.0, 0.0); MARKER_COUNT];
        for timeline in &self.timelines {
            let mut pos = timeline.start;
            for phase in &timeline.phases {
                let value = if elapsed >= phase.end() {
                    phase.to
                } else if elapsed > phase.start {
                    let t = (elapsed - phase.start).as_secs_f32() / phase.duration.as_secs_f32();
                    phase.from + (phase.to - phase.from) * t
                } else {
                    continue;
                };
                match phase.axis {
                    Axis::Horizontal => pos.0 = value,
                    Axis::Vertical => pos.1 = value,
                }
            }
            positions[timeline.marker] = pos;
        }
        positions
    }

    pub fn is_complete(&self, elapsed: Duration) -> bool {
        elapsed >= self.total
    }

    pub fn total_duration(&self) -> Duration {
        self.total
    }

    pub fn final_order(&self) -> &MarkerOrder {
        &self.final_order
    }

    pub fn to_section(&self) -> usize {
        self.to_section
    }
}
