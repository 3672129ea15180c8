//! Section visibility tracking.
//!
//! Sections are observed with their row extent on the page. Each frame the
//! view delivers the current viewport; any observed section whose visible
//! fraction reaches the threshold is revealed and stops being observed.
//! Revealed flags never go back to false for the lifetime of the view.

use std::collections::HashMap;
use std::time::Instant;

/// Default fraction of a section that must be on screen to reveal it.
pub const DEFAULT_THRESHOLD: f64 = 0.1;

/// A vertical run of page rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Extent {
    pub top: u16,
    pub height: u16,
}

impl Extent {
    pub fn new(top: u16, height: u16) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> u16 {
        self.top.saturating_add(self.height)
    }

    pub fn intersects(&self, other: &Extent) -> bool {
        self.top < other.bottom() && other.top < self.bottom()
    }
}

/// The page rows currently on screen.
pub type Viewport = Extent;

/// Fraction of `extent` that lies inside `viewport`.
pub fn intersection_ratio(extent: &Extent, viewport: &Viewport) -> f64 {
    if extent.height == 0 {
        return 0.0;
    }
    let top = extent.top.max(viewport.top);
    let bottom = extent.bottom().min(viewport.bottom());
    let visible = bottom.saturating_sub(top);
    f64::from(visible) / f64::from(extent.height)
}

/// Monotonic "has ever been visible" flags, keyed by section id. A section
/// revealed without a start time is shown with no transition.
#[derive(Debug, Clone, Default)]
pub struct VisibilitySet {
    revealed: HashMap<String, Option<Instant>>,
}

impl VisibilitySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a section visible. Returns true only on the first call.
    pub fn reveal(&mut self, id: &str, at: Option<Instant>) -> bool {
        if self.revealed.contains_key(id) {
            return false;
        }
        self.revealed.insert(id.to_string(), at);
        true
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.revealed.contains_key(id)
    }

    /// When the section's reveal transition started.
    pub fn revealed_at(&self, id: &str) -> Option<Instant> {
        self.revealed.get(id).copied().flatten()
    }
}

/// Intersection observer for one view's sections.
#[derive(Debug, Clone)]
pub struct VisibilityTracker {
    threshold: f64,
    observed: HashMap<String, Extent>,
    set: VisibilitySet,
}

impl VisibilityTracker {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            observed: HashMap::new(),
            set: VisibilitySet::new(),
        }
    }

    #[cfg(test)]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Start (or keep) watching a section. Re-observing is idempotent: an
    /// already revealed section stays revealed and is not watched again,
    /// and a pending one only has its extent updated.
    pub fn observe(&mut self, id: &str, extent: Extent) {
        if self.set.is_visible(id) {
            return;
        }
        self.observed.insert(id.to_string(), extent);
    }

    /// Reveal a section without an intersection, e.g. the hero at mount.
    /// It starts in its final appearance.
    pub fn force_reveal(&mut self, id: &str) -> bool {
        self.observed.remove(id);
        self.set.reveal(id, None)
    }

    /// Deliver the current viewport. Returns the sections revealed by this
    /// call, in page order.
    pub fn notify(&mut self, viewport: Viewport, now: Instant) -> Vec<String> {
        let mut crossed: Vec<(u16, String)> = self
            .observed
            .iter()
            .filter(|(_, extent)| self.crosses(extent, &viewport))
            .map(|(id, extent)| (extent.top, id.clone()))
            .collect();
        crossed.sort();

        crossed
            .into_iter()
            .filter_map(|(_, id)| {
                self.observed.remove(&id);
                self.set.reveal(&id, Some(now)).then_some(id)
            })
            .collect()
    }

    /// A section taller than the viewport counts once it fills the screen,
    /// even if its ratio stays under the threshold.
    fn crosses(&self, extent: &Extent, viewport: &Viewport) -> bool {
        let ratio = intersection_ratio(extent, viewport);
        let fills = viewport.height > 0
            && extent.top <= viewport.top
            && extent.bottom() >= viewport.bottom();
        ratio > 0.0 && (ratio >= self.threshold || fills)
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.set.is_visible(id)
    }

    pub fn revealed_at(&self, id: &str) -> Option<Instant> {
        self.set.revealed_at(id)
    }

    /// Sections still waiting for their first intersection.
    #[cfg(test)]
    pub fn observed_count(&self) -> usize {
        self.observed.len()
    }

    /// Stop observing everything. Revealed flags are kept.
    pub fn disconnect(&mut self) {
        self.observed.clear();
    }
}

impl Default for VisibilityTracker {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersection_ratio() {
        let section = Extent::new(10, 20);
        assert_eq!(intersection_ratio(&section, &Extent::new(0, 10)), 0.0);
        assert_eq!(intersection_ratio(&section, &Extent::new(0, 12)), 0.1);
        assert_eq!(intersection_ratio(&section, &Extent::new(20, 40)), 0.5);
        assert_eq!(intersection_ratio(&section, &Extent::new(0, 100)), 1.0);
        assert_eq!(intersection_ratio(&Extent::new(5, 0), &Extent::new(0, 100)), 0.0);
    }

    #[test]
    fn test_not_visible_before_intersection() {
        let now = Instant::now();
        let mut tracker = VisibilityTracker::new(0.15);
        assert!(!tracker.is_visible("cost"));

        for _ in 0..3 {
            tracker.observe("cost", Extent::new(100, 20));
        }
        assert!(!tracker.is_visible("cost"));
        assert!(tracker.notify(Extent::new(0, 40), now).is_empty());
        assert!(!tracker.is_visible("cost"));
        assert_eq!(tracker.observed_count(), 1);
    }

    #[test]
    fn test_threshold_must_be_reached() {
        let now = Instant::now();
        let mut tracker = VisibilityTracker::new(0.15);
        tracker.observe("cost", Extent::new(100, 20));

        // 2 of 20 rows = 10%
        assert!(tracker.notify(Extent::new(62, 40), now).is_empty());
        // 3 of 20 rows = 15%
        assert_eq!(tracker.notify(Extent::new(63, 40), now), vec!["cost".to_string()]);
        assert!(tracker.is_visible("cost"));
        assert_eq!(tracker.observed_count(), 0);
    }

    #[test]
    fn test_tall_section_counts_when_it_fills_the_screen() {
        let now = Instant::now();
        let mut tracker = VisibilityTracker::new(0.5);
        tracker.observe("chart", Extent::new(10, 100));
        // 5 of 100 rows, but nothing else is on screen
        assert_eq!(tracker.notify(Extent::new(20, 5), now), vec!["chart".to_string()]);
    }

    #[test]
    fn test_zero_threshold_needs_some_overlap() {
        let now = Instant::now();
        let mut tracker = VisibilityTracker::new(0.0);
        tracker.observe("a", Extent::new(40, 10));
        assert!(tracker.notify(Extent::new(0, 40), now).is_empty());
        assert_eq!(tracker.notify(Extent::new(1, 40), now).len(), 1);
    }

    #[test]
    fn test_reveal_is_monotonic() {
        let t0 = Instant::now();
        let mut tracker = VisibilityTracker::default();
        tracker.observe("race", Extent::new(0, 10));
        assert_eq!(tracker.notify(Extent::new(0, 30), t0).len(), 1);

        // scrolled away, re-observed after a re-layout, disconnected
        assert!(tracker.notify(Extent::new(200, 30), t0).is_empty());
        tracker.observe("race", Extent::new(5, 12));
        assert!(tracker.notify(Extent::new(200, 30), t0).is_empty());
        tracker.disconnect();

        assert!(tracker.is_visible("race"));
        assert_eq!(tracker.revealed_at("race"), Some(t0));
        assert_eq!(tracker.observed_count(), 0);
    }

    #[test]
    fn test_newly_revealed_in_page_order() {
        let now = Instant::now();
        let mut tracker = VisibilityTracker::default();
        tracker.observe("third", Extent::new(30, 10));
        tracker.observe("first", Extent::new(0, 10));
        tracker.observe("second", Extent::new(12, 10));
        assert_eq!(
            tracker.notify(Extent::new(0, 50), now),
            vec!["first".to_string(), "second".to_string(), "third".to_string()]
        );
    }

    #[test]
    fn test_force_reveal_once() {
        let mut tracker = VisibilityTracker::default();
        tracker.observe("hero", Extent::new(0, 8));
        assert!(tracker.force_reveal("hero"));
        assert!(!tracker.force_reveal("hero"));
        assert_eq!(tracker.observed_count(), 0);
        assert!(tracker.is_visible("hero"));
        assert_eq!(tracker.revealed_at("hero"), None);
    }

    #[test]
    fn test_threshold_is_clamped() {
        assert_eq!(VisibilityTracker::new(3.0).threshold(), 1.0);
        assert_eq!(VisibilityTracker::new(-1.0).threshold(), 0.0);
    }
}
