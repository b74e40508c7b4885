//! The marker trio.
//!
//! Markers are anonymous visual tokens; the only identity they carry is an
//! index, and the only order that matters is the one their rendered left
//! coordinates imply. That order is always derived from the coordinates
//! (never remembered), so forced layout changes self-correct at the next
//! read.

use crate::layout::PageLayout;
use tracing::debug;

/// Number of markers in the trio. Fixed for the lifetime of the process.
pub const MARKER_COUNT: usize = 3;

/// Left-to-right visual order: `order[rank]` is the marker index at `rank`.
pub type MarkerOrder = [usize; MARKER_COUNT];

#[derive(Debug, Clone, Copy)]
pub struct Marker {
    pub left: f32,
    pub top: f32,
    pub opacity: f32,
}

/// Owns the markers and their placement. Created hidden; `place` makes the
/// trio visible the first time geometry is available.
#[derive(Debug, Clone)]
pub struct MarkerSet {
    markers: [Marker; MARKER_COUNT],
}

impl MarkerSet {
    pub fn new() -> Self {
        MarkerSet {
            markers: [Marker {
                left: 0.0,
                top: 0.0,
                opacity: 0.0,
            }; MARKER_COUNT],
        }
    }

    pub fn markers(&self) -> &[Marker; MARKER_COUNT] {
        &self.markers
    }

    pub fn position(&self, marker: usize) -> (f32, f32) {
        (self.markers[marker].left, self.markers[marker].top)
    }

    pub fn set_position(&mut self, marker: usize, left: f32, top: f32) {
        self.markers[marker].left = left;
        self.markers[marker].top = top;
    }

    /// Ground truth order: marker indices sorted by current left coordinate.
    /// Ties resolve by index so the result is always a valid permutation.
    pub fn current_order(&self) -> MarkerOrder {
        let mut order: MarkerOrder = [0; MARKER_COUNT];
        for (rank, slot) in order.iter_mut().enumerate() {
            *slot = rank;
        }
        order.sort_by(|&a, &b| {
            self.markers[a]
                .left
                .partial_cmp(&self.markers[b].left)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.cmp(&b))
        });
        order
    }

    /// Park the trio on a section's highlight row in the given order and make
    /// it visible. Idempotent; called redundantly as a drift-correcting
    /// fallback. Skips silently when the row cannot be resolved yet.
    pub fn place(&mut self, section: usize, order: &MarkerOrder, layout: &PageLayout) {
        let Some(row_top) = layout.row_top(section) else {
            debug!(section, "Skipping marker placement for unresolved row");
            return;
        };
        for (rank, &marker) in order.iter().enumerate() {
            self.markers[marker].left = layout.slot_left(rank);
            self.markers[marker].top = row_top;
            self.markers[marker].opacity = 1.0;
        }
    }
}

impl Default for MarkerSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::layout::PageLayout;

    fn measured_layout() -> PageLayout {
        let mut layout = PageLayout::from_config(&AppConfig::default());
        layout.set_viewport(1280.0, 800.0);
        layout
    }

    #[test]
    fn markers_start_hidden() {
        let set = MarkerSet::new();
        assert!(set.markers().iter().all(|m| m.opacity == 0.0));
    }

    #[test]
    fn order_is_derived_from_left_coordinates() {
        let mut set = MarkerSet::new();
        set.set_position(0, 300.0, 0.0);
        set.set_position(1, 100.0, 0.0);
        set.set_position(2, 200.0, 0.0);
        assert_eq!(set.current_order(), [1, 2, 0]);
    }

    #[test]
    fn order_survives_external_drift() {
        let mut set = MarkerSet::new();
        let layout = measured_layout();
        set.place(0, &[0, 1, 2], &layout);
        // Simulate a resize shoving one marker out of line.
        set.set_position(0, set.position(2).0 + 50.0, set.position(0).1);
        assert_eq!(set.current_order(), [1, 2, 0]);
    }

    #[test]
    fn place_assigns_slots_and_reveals() {
        let mut set = MarkerSet::new();
        let layout = measured_layout();
        set.place(1, &[2, 0, 1], &layout);

        let row_top = layout.row_top(1).unwrap();
        assert_eq!(set.position(2), (layout.slot_left(0), row_top));
        assert_eq!(set.position(0), (layout.slot_left(1), row_top));
        assert_eq!(set.position(1), (layout.slot_left(2), row_top));
        assert!(set.markers().iter().all(|m| m.opacity == 1.0));
        assert_eq!(set.current_order(), [2, 0, 1]);

        // Idempotent: placing again changes nothing.
        let before = *set.markers();
        set.place(1, &[2, 0, 1], &layout);
        for (a, b) in before.iter().zip(set.markers().iter()) {
            assert_eq!((a.left, a.top, a.opacity), (b.left, b.top, b.opacity));
        }
    }

    #[test]
    fn place_is_a_noop_without_geometry() {
        let mut set = MarkerSet::new();
        let layout = PageLayout::from_config(&AppConfig::default());
        set.place(0, &[0, 1, 2], &layout);
        assert!(set.markers().iter().all(|m| m.opacity == 0.0));
    }
}
