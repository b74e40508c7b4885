//! Page geometry.
//!
//! Converts the fixed section column plus the live viewport into the offsets
//! the rest of the crate works in: section tops, highlight-row anchors, the
//! centered marker row, and per-section visibility ratios. Everything is
//! computed on demand from the current dimensions; nothing here caches
//! derived values across calls.

use crate::config::AppConfig;
use crate::content::SECTION_COUNT;
use crate::markers::MARKER_COUNT;

/// Live geometry of the page.
///
/// `row_top` and friends return `None` until the viewport has been measured
/// at least once; callers treat an unresolved section as a skip, not an
/// error, except the choreographer which refuses to plan against one.
#[derive(Debug, Clone)]
pub struct PageLayout {
    section_height: f32,
    // Keep in sync with the section column in `app/view.rs`.
    row_offset: f32,
    header_allowance: f32,
    marker_size: f32,
    marker_gap: f32,
    viewport_width: f32,
    viewport_height: f32,
    measured: bool,
}

impl PageLayout {
    pub fn from_config(config: &AppConfig) -> Self {
        PageLayout {
            section_height: config.section_height,
            row_offset: config.row_offset,
            header_allowance: config.header_allowance,
            marker_size: config.marker_size,
            marker_gap: config.marker_gap,
            viewport_width: 0.0,
            viewport_height: 0.0,
            measured: false,
        }
    }

    /// Record the scrollable viewport dimensions. Called on every scroll
    /// report and on window resizes; the first call makes the layout usable.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
            self.viewport_width = width;
            self.viewport_height = height;
            self.measured = true;
        }
    }

    pub fn marker_size(&self) -> f32 {
        self.marker_size
    }

    pub fn content_height(&self) -> f32 {
        SECTION_COUNT as f32 * self.section_height
    }

    pub fn section_top(&self, section: usize) -> f32 {
        section as f32 * self.section_height
    }

    /// Top offset of a section's highlight row, in content coordinates.
    /// `None` when the section cannot be resolved (out of range, or the
    /// layout has not been measured yet).
    pub fn row_top(&self, section: usize) -> Option<f32> {
        if !self.measured || section >= SECTION_COUNT {
            return None;
        }
        Some(self.section_top(section) + self.row_offset)
    }

    /// Left edge of the marker row, centering the full trio horizontally.
    pub fn marker_row_start(&self) -> f32 {
        let total = MARKER_COUNT as f32 * (self.marker_size + self.marker_gap) - self.marker_gap;
        (self.viewport_width - total) / 2.0
    }

    /// Left edge of the marker slot at `rank` (0 = leftmost).
    pub fn slot_left(&self, rank: usize) -> f32 {
        self.marker_row_start() + rank as f32 * (self.marker_size + self.marker_gap)
    }

    /// Visibility ratio of a section within the margin-shrunk viewport:
    /// intersection height over section height, in [0, 1]. Zero before the
    /// layout is measured.
    pub fn visibility_ratio(&self, section: usize, scroll_y: f32, margin_fraction: f32) -> f32 {
        if !self.measured || section >= SECTION_COUNT {
            return 0.0;
        }
        let margin = self.viewport_height * margin_fraction;
        let view_top = scroll_y + margin;
        let view_bottom = scroll_y + self.viewport_height - margin;
        let top = self.section_top(section);
        let bottom = top + self.section_height;
        let overlap = view_bottom.min(bottom) - view_top.max(top);
        (overlap / self.section_height).clamp(0.0, 1.0)
    }

    /// Section whose vertical midpoint sits closest to the viewport's
    /// midpoint. Falls back to `fallback` when unmeasured.
    pub fn nearest_section(&self, scroll_y: f32, fallback: usize) -> usize {
        if !self.measured {
            return fallback;
        }
        let viewport_mid = scroll_y + self.viewport_height / 2.0;
        let mut best = fallback;
        let mut best_distance = f32::INFINITY;
        for section in 0..SECTION_COUNT {
            let mid = self.section_top(section) + self.section_height / 2.0;
            let distance = (mid - viewport_mid).abs();
            if distance < best_distance {
                best_distance = distance;
                best = section;
            }
        }
        best
    }

    /// Scroll offset that puts a section's top just under the fixed header.
    pub fn jump_target(&self, section: usize) -> f32 {
        let max_scroll = (self.content_height() - self.viewport_height).max(0.0);
        (self.section_top(section) - self.header_allowance).clamp(0.0, max_scroll)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn measured_layout() -> PageLayout {
        let mut layout = PageLayout::from_config(&AppConfig::default());
        layout.set_viewport(1280.0, 800.0);
        layout
    }

    #[test]
    fn rows_resolve_only_after_measurement() {
        let layout = PageLayout::from_config(&AppConfig::default());
        assert_eq!(layout.row_top(0), None);

        let layout = measured_layout();
        assert!(layout.row_top(0).is_some());
        assert_eq!(layout.row_top(SECTION_COUNT), None);
    }

    #[test]
    fn marker_row_is_centered() {
        let layout = measured_layout();
        let total =
            MARKER_COUNT as f32 * (layout.marker_size + layout.marker_gap) - layout.marker_gap;
        let start = layout.marker_row_start();
        assert!((start - (1280.0 - total) / 2.0).abs() < f32::EPSILON);
        assert!(layout.slot_left(1) > layout.slot_left(0));
    }

    #[test]
    fn full_overlap_yields_saturated_ratio() {
        let mut layout = PageLayout::from_config(&AppConfig::default());
        // Viewport far taller than a section: the whole section fits inside
        // the shrunk viewport when scrolled to its top.
        layout.set_viewport(1280.0, layout.section_height * 3.0);
        let ratio = layout.visibility_ratio(1, layout.section_top(1) - layout.section_height, 0.1);
        assert!((ratio - 1.0).abs() < 1e-6);
    }

    #[test]
    fn offscreen_section_has_zero_ratio() {
        let layout = measured_layout();
        assert_eq!(layout.visibility_ratio(3, 0.0, 0.1), 0.0);
    }

    #[test]
    fn nearest_section_follows_viewport_midpoint() {
        let layout = measured_layout();
        assert_eq!(layout.nearest_section(0.0, 3), 0);

        let deep = layout.section_top(2) + layout.section_height / 2.0
            - layout.viewport_height / 2.0;
        assert_eq!(layout.nearest_section(deep, 0), 2);
    }

    #[test]
    fn jump_target_respects_header_and_scroll_range() {
        let layout = measured_layout();
        assert_eq!(layout.jump_target(0), 0.0);
        let target = layout.jump_target(2);
        assert!((target - (layout.section_top(2) - layout.header_allowance)).abs() < f32::EPSILON);
        let max_scroll = layout.content_height() - layout.viewport_height;
        assert!(layout.jump_target(3) <= max_scroll);
    }
}
