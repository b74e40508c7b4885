//! Viewport watching: visibility sampling and transition intent.
//!
//! Two halves. `IntersectionSampler` turns raw scroll geometry into
//! per-section visibility ratios, reporting a batch only when some section
//! crosses one of the configured thresholds inside the margin-shrunk
//! viewport. `Watcher` folds those batches together with scroll direction
//! into at most one typed [`Intent`] per batch, using a short direction
//! trust window and an enter/exit dwell so boundary bounce and fast
//! scroll-through do not thrash the scheduler.

use crate::content::SECTION_COUNT;
use crate::layout::PageLayout;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Ratios at which the sampler reports a fresh batch.
pub const SAMPLE_THRESHOLDS: [f32; 3] = [0.25, 0.5, 0.8];

#[derive(Debug, Clone, Copy)]
pub struct SectionVisibility {
    pub section: usize,
    pub ratio: f32,
    pub intersecting: bool,
}

/// Emits a visibility batch whenever any section's ratio crosses a sample
/// threshold (or its intersecting state flips). The first sample after
/// construction always emits, mirroring an observer's initial callback.
#[derive(Debug)]
pub struct IntersectionSampler {
    margin_fraction: f32,
    last_ratios: [f32; SECTION_COUNT],
    primed: bool,
}

impl IntersectionSampler {
    pub fn new(margin_fraction: f32) -> Self {
        IntersectionSampler {
            margin_fraction,
            last_ratios: [0.0; SECTION_COUNT],
            primed: false,
        }
    }

    fn band(ratio: f32) -> usize {
        SAMPLE_THRESHOLDS.iter().filter(|&&t| ratio >= t).count()
    }

    fn ratios(&self, layout: &PageLayout, scroll_y: f32) -> [f32; SECTION_COUNT] {
        let mut ratios = [0.0; SECTION_COUNT];
        for (section, slot) in ratios.iter_mut().enumerate() {
            *slot = layout.visibility_ratio(section, scroll_y, self.margin_fraction);
        }
        ratios
    }

    /// Record current ratios without emitting; used at startup so the first
    /// real scroll does not read as a wall of threshold crossings.
    pub fn prime(&mut self, layout: &PageLayout, scroll_y: f32) {
        self.last_ratios = self.ratios(layout, scroll_y);
        self.primed = true;
    }

    pub fn sample(
        &mut self,
        layout: &PageLayout,
        scroll_y: f32,
    ) -> Option<[SectionVisibility; SECTION_COUNT]> {
        let ratios = self.ratios(layout, scroll_y);
        let crossed = !self.primed
            || ratios.iter().zip(self.last_ratios.iter()).any(|(&new, &old)| {
                Self::band(new) != Self::band(old) || (new > 0.0) != (old > 0.0)
            });
        self.last_ratios = ratios;
        self.primed = true;

        if !crossed {
            return None;
        }
        let mut batch = [SectionVisibility {
            section: 0,
            ratio: 0.0,
            intersecting: false,
        }; SECTION_COUNT];
        for (section, slot) in batch.iter_mut().enumerate() {
            *slot = SectionVisibility {
                section,
                ratio: ratios[section],
                intersecting: ratios[section] > 0.0,
            };
        }
        trace!(?ratios, "Visibility thresholds crossed");
        Some(batch)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentTrigger {
    Neighbor,
    SkipAhead,
    Fallback,
}

/// A request to transition to a section, and the rule that produced it.
#[derive(Debug, Clone, Copy)]
pub struct Intent {
    pub target: usize,
    pub trigger: IntentTrigger,
}

#[derive(Debug, Clone, Copy)]
pub struct WatcherParams {
    pub min_scroll_delta: f32,
    pub direction_trust: Duration,
    pub enter_threshold: f32,
    pub exit_threshold: f32,
    pub ratio_gap: f32,
    pub dwell: Duration,
    pub skip_ahead_ratio: f32,
    pub fallback_ratio: f32,
}

impl Default for WatcherParams {
    fn default() -> Self {
        WatcherParams {
            min_scroll_delta: 2.0,
            direction_trust: Duration::from_millis(260),
            enter_threshold: 0.58,
            exit_threshold: 0.38,
            ratio_gap: 0.1,
            dwell: Duration::from_millis(120),
            skip_ahead_ratio: 0.7,
            fallback_ratio: 0.5,
        }
    }
}

/// Scroll-direction state plus neighbor-dwell hysteresis.
#[derive(Debug)]
pub struct Watcher {
    params: WatcherParams,
    last_scroll_y: Option<f32>,
    direction: Option<ScrollDirection>,
    direction_trusted_until: Option<Instant>,
    pending_neighbor: Option<(usize, Instant)>,
}

impl Watcher {
    pub fn new(params: WatcherParams) -> Self {
        Watcher {
            params,
            last_scroll_y: None,
            direction: None,
            direction_trusted_until: None,
            pending_neighbor: None,
        }
    }

    /// Fold a scroll sample into the direction state. Direction only updates
    /// (and the trust window only refreshes) once the offset has moved more
    /// than the minimum delta from the last accepted sample.
    pub fn note_scroll(&mut self, scroll_y: f32, now: Instant) {
        match self.last_scroll_y {
            None => self.last_scroll_y = Some(scroll_y),
            Some(last) => {
                if (scroll_y - last).abs() > self.params.min_scroll_delta {
                    self.direction = Some(if scroll_y > last {
                        ScrollDirection::Down
                    } else {
                        ScrollDirection::Up
                    });
                    self.direction_trusted_until = Some(now + self.params.direction_trust);
                    self.last_scroll_y = Some(scroll_y);
                }
            }
        }
    }

    pub fn trusted_direction(&self, now: Instant) -> Option<ScrollDirection> {
        match self.direction_trusted_until {
            Some(until) if now < until => self.direction,
            _ => None,
        }
    }

    /// Drop any in-progress dwell; a committed transition supersedes it.
    pub fn clear_pending(&mut self) {
        self.pending_neighbor = None;
    }

    /// Resolve a visibility batch into at most one intent.
    pub fn decide(
        &mut self,
        batch: &[SectionVisibility],
        active: usize,
        now: Instant,
    ) -> Option<Intent> {
        let lookup = |section: usize| {
            batch
                .iter()
                .find(|v| v.section == section)
                .map(|v| (v.ratio, v.intersecting))
                .unwrap_or((0.0, false))
        };

        if let Some(direction) = self.trusted_direction(now) {
            let neighbor = match direction {
                ScrollDirection::Down => active.checked_add(1).filter(|&n| n < SECTION_COUNT),
                ScrollDirection::Up => active.checked_sub(1),
            };

            if let Some(neighbor) = neighbor {
                let (neighbor_ratio, neighbor_intersecting) = lookup(neighbor);
                let (active_ratio, _) = lookup(active);
                let qualifies = neighbor_intersecting
                    && neighbor_ratio >= self.params.enter_threshold
                    && active_ratio <= self.params.exit_threshold
                    && (neighbor_ratio - active_ratio) >= self.params.ratio_gap;

                if qualifies {
                    match self.pending_neighbor {
                        Some((pending, since)) if pending == neighbor => {
                            if now.duration_since(since) >= self.params.dwell {
                                self.pending_neighbor = None;
                                debug!(neighbor, "Neighbor dwell satisfied");
                                return Some(Intent {
                                    target: neighbor,
                                    trigger: IntentTrigger::Neighbor,
                                });
                            }
                        }
                        _ => self.pending_neighbor = Some((neighbor, now)),
                    }
                    // Qualifying but still dwelling; hold off and let the
                    // next batch re-check.
                    return None;
                }
                self.pending_neighbor = None;
            }

            // Fast scroll-through: the strongest visible section strictly
            // further in the trusted direction, if decisively visible.
            let mut best: Option<(usize, f32)> = None;
            for v in batch.iter().filter(|v| v.intersecting) {
                let beyond = match direction {
                    ScrollDirection::Down => v.section > active,
                    ScrollDirection::Up => v.section < active,
                };
                if beyond && best.map(|(_, r)| v.ratio > r).unwrap_or(true) {
                    best = Some((v.section, v.ratio));
                }
            }
            if let Some((section, ratio)) = best {
                if ratio >= self.params.skip_ahead_ratio {
                    self.pending_neighbor = None;
                    debug!(section, ratio, "Skipping ahead with the scroll");
                    return Some(Intent {
                        target: section,
                        trigger: IntentTrigger::SkipAhead,
                    });
                }
            }
            return None;
        }

        // Direction unknown: take the single most visible section, if any.
        let best = batch
            .iter()
            .filter(|v| v.intersecting)
            .max_by(|a, b| a.ratio.partial_cmp(&b.ratio).unwrap_or(std::cmp::Ordering::Equal));
        match best {
            Some(v) if v.ratio >= self.params.fallback_ratio && v.section != active => {
                Some(Intent {
                    target: v.section,
                    trigger: IntentTrigger::Fallback,
                })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::layout::PageLayout;

    fn batch(ratios: [f32; SECTION_COUNT]) -> [SectionVisibility; SECTION_COUNT] {
        let mut out = [SectionVisibility {
            section: 0,
            ratio: 0.0,
            intersecting: false,
        }; SECTION_COUNT];
        for (section, slot) in out.iter_mut().enumerate() {
            *slot = SectionVisibility {
                section,
                ratio: ratios[section],
                intersecting: ratios[section] > 0.0,
            };
        }
        out
    }

    fn watcher_with_trusted_down(now: Instant) -> Watcher {
        let mut watcher = Watcher::new(WatcherParams::default());
        watcher.note_scroll(0.0, now);
        watcher.note_scroll(50.0, now);
        watcher
    }

    #[test]
    fn sampler_emits_initially_and_on_crossings_only() {
        let mut layout = PageLayout::from_config(&AppConfig::default());
        layout.set_viewport(1280.0, 800.0);
        let mut sampler = IntersectionSampler::new(0.1);

        assert!(sampler.sample(&layout, 0.0).is_some());
        // A couple of pixels of jitter stays inside the same band.
        assert!(sampler.sample(&layout, 2.0).is_none());
        // Scrolling a section height is guaranteed to cross thresholds.
        assert!(sampler.sample(&layout, layout.content_height() / 4.0).is_some());
    }

    #[test]
    fn priming_suppresses_the_initial_batch() {
        let mut layout = PageLayout::from_config(&AppConfig::default());
        layout.set_viewport(1280.0, 800.0);
        let mut sampler = IntersectionSampler::new(0.1);
        sampler.prime(&layout, 0.0);
        assert!(sampler.sample(&layout, 0.0).is_none());
    }

    #[test]
    fn direction_needs_a_real_delta_and_expires() {
        let now = Instant::now();
        let mut watcher = Watcher::new(WatcherParams::default());
        watcher.note_scroll(100.0, now);
        watcher.note_scroll(101.0, now);
        assert_eq!(watcher.trusted_direction(now), None);

        watcher.note_scroll(90.0, now);
        assert_eq!(watcher.trusted_direction(now), Some(ScrollDirection::Up));
        assert_eq!(
            watcher.trusted_direction(now + Duration::from_millis(300)),
            None
        );
    }

    #[test]
    fn neighbor_intent_waits_for_the_dwell() {
        let now = Instant::now();
        let mut watcher = watcher_with_trusted_down(now);
        let visible = batch([0.30, 0.62, 0.0, 0.0]);

        assert!(watcher.decide(&visible, 0, now).is_none());
        assert!(
            watcher
                .decide(&visible, 0, now + Duration::from_millis(119))
                .is_none()
        );

        let fired = watcher
            .decide(&visible, 0, now + Duration::from_millis(121))
            .expect("dwell satisfied");
        assert_eq!(fired.target, 1);
        assert_eq!(fired.trigger, IntentTrigger::Neighbor);
    }

    #[test]
    fn broken_dwell_starts_over() {
        let now = Instant::now();
        let mut watcher = watcher_with_trusted_down(now);
        let qualifying = batch([0.30, 0.62, 0.0, 0.0]);
        let not_qualifying = batch([0.62, 0.30, 0.0, 0.0]);

        assert!(watcher.decide(&qualifying, 0, now).is_none());
        assert!(
            watcher
                .decide(&not_qualifying, 0, now + Duration::from_millis(60))
                .is_none()
        );
        // The dwell restarted; the original deadline no longer applies.
        assert!(
            watcher
                .decide(&qualifying, 0, now + Duration::from_millis(130))
                .is_none()
        );
    }

    #[test]
    fn cleared_pending_supersedes_the_dwell() {
        let now = Instant::now();
        let mut watcher = watcher_with_trusted_down(now);
        let visible = batch([0.30, 0.62, 0.0, 0.0]);

        assert!(watcher.decide(&visible, 0, now).is_none());
        watcher.clear_pending();
        assert!(
            watcher
                .decide(&visible, 0, now + Duration::from_millis(121))
                .is_none()
        );
    }

    #[test]
    fn fast_scroll_skips_ahead_past_a_weak_neighbor() {
        let now = Instant::now();
        let mut watcher = watcher_with_trusted_down(now);

        let strong_far = batch([0.05, 0.10, 0.75, 0.0]);
        let fired = watcher.decide(&strong_far, 0, now).expect("skip ahead");
        assert_eq!(fired.target, 2);
        assert_eq!(fired.trigger, IntentTrigger::SkipAhead);

        let weak_far = batch([0.05, 0.10, 0.69, 0.0]);
        assert!(watcher.decide(&weak_far, 0, now).is_none());
    }

    #[test]
    fn skip_ahead_ignores_sections_behind_the_scroll() {
        let now = Instant::now();
        let mut watcher = watcher_with_trusted_down(now);
        // Strong visibility behind the direction of travel is not a target.
        let behind = batch([0.9, 0.1, 0.0, 0.0]);
        assert!(watcher.decide(&behind, 1, now).is_none());
    }

    #[test]
    fn untrusted_direction_falls_back_to_most_visible() {
        let now = Instant::now();
        let mut watcher = Watcher::new(WatcherParams::default());

        let visible = batch([0.2, 0.55, 0.1, 0.0]);
        let fired = watcher.decide(&visible, 0, now).expect("fallback");
        assert_eq!(fired.target, 1);
        assert_eq!(fired.trigger, IntentTrigger::Fallback);

        // Below the fallback ratio, or already active: no intent.
        assert!(watcher.decide(&batch([0.2, 0.45, 0.1, 0.0]), 0, now).is_none());
        assert!(watcher.decide(&visible, 1, now).is_none());
    }
}
