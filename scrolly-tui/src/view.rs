//! One mounted dashboard.
//!
//! A view owns everything scoped to a dashboard instance: the visibility
//! tracker, count-up animations, the delayed strike flag, highlight and
//! scenario selections, chart cursors and the scroll position. Dropping the
//! view drops every frame handle it holds, which cancels all of its pending
//! callbacks.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::content::{Block, Chart, Dashboard, Emphasis, TooltipKind, Values};
use crate::count_up::{self, CountUp};
use crate::frames::{FrameHandle, FrameLoop};
use crate::highlight::{HighlightSelection, SeriesToggles, StrokeStyle};
use crate::layout::{content_width, PageLayout};
use crate::reveal::{self, Appearance, Reveal};
use crate::theme::colors;
use crate::tooltip::{self, TooltipEntry};
use crate::visibility::{self, VisibilityTracker, Viewport};

/// Section revealed on mount without waiting for an intersection.
pub const HERO_SECTION: &str = "hero";
/// Default delay before the "then" column is struck through.
pub const DEFAULT_STRIKE_DELAY: Duration = Duration::from_millis(400);

/// Animation and visibility parameters for a view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewSettings {
    pub threshold: f64,
    pub reveal: Reveal,
    pub count_up: Duration,
    pub strike_delay: Duration,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            threshold: visibility::DEFAULT_THRESHOLD,
            reveal: Reveal::new(reveal::DEFAULT_DURATION, reveal::DEFAULT_OFFSET),
            count_up: count_up::DEFAULT_DURATION,
            strike_delay: DEFAULT_STRIKE_DELAY,
        }
    }
}

/// Tooltip contents at a chart's cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub header: String,
    pub entries: Vec<TooltipEntry>,
}

#[derive(Debug)]
pub struct DashboardView {
    dashboard: Dashboard,
    layout: PageLayout,
    settings: ViewSettings,
    reduced_motion: bool,
    tracker: VisibilityTracker,
    /// Count-ups keyed by the section that triggers them.
    count_ups: HashMap<&'static str, CountUp>,
    strike: Rc<Cell<bool>>,
    strike_timer: Option<FrameHandle>,
    highlight: HighlightSelection,
    toggles: SeriesToggles,
    scenario: HighlightSelection,
    cursors: HashMap<&'static str, usize>,
    scroll: u16,
    viewport_height: u16,
}

impl DashboardView {
    /// Mount a dashboard into a `width` x `viewport_height` area. The hero
    /// section is revealed immediately, already in its final appearance.
    pub fn mount(
        dashboard: Dashboard,
        settings: ViewSettings,
        reduced_motion: bool,
        width: u16,
        viewport_height: u16,
        now: Instant,
        frames: &mut FrameLoop,
    ) -> Self {
        let layout = PageLayout::compute(&dashboard, content_width(width));
        let duration = if reduced_motion {
            Duration::ZERO
        } else {
            settings.count_up
        };

        let mut count_ups = HashMap::new();
        for section in &dashboard.sections {
            let Some(stat) = section.stat() else {
                continue;
            };
            match dashboard.stat_target(stat) {
                Ok(target) => {
                    count_ups.insert(section.id, CountUp::new(target, duration));
                }
                Err(e) => {
                    tracing::warn!(section = section.id, error = %e, "count-up target unavailable");
                }
            }
        }

        let toggles = dashboard
            .toggle_chart()
            .map(|c| SeriesToggles::all_shown(&c.series_ids()))
            .unwrap_or_default();
        let scenario = HighlightSelection::new(dashboard.scenarios.as_ref().and_then(|g| g.default));

        for chart in &dashboard.charts {
            if let Err(e) = &chart.data {
                tracing::warn!(chart = chart.id, error = %e, "chart data rejected");
            }
        }

        let mut view = Self {
            highlight: HighlightSelection::new(dashboard.highlight),
            toggles,
            scenario,
            layout,
            settings,
            reduced_motion,
            tracker: VisibilityTracker::new(settings.threshold),
            count_ups,
            strike: Rc::new(Cell::new(false)),
            strike_timer: None,
            cursors: HashMap::new(),
            scroll: 0,
            viewport_height,
            dashboard,
        };

        tracing::info!(dashboard = view.dashboard.id.name(), reduced_motion, "mounted");
        if view.tracker.force_reveal(HERO_SECTION) {
            view.on_revealed(HERO_SECTION, now, frames);
        }
        view.update(now, frames);
        view
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    #[cfg(test)]
    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.scroll, self.viewport_height)
    }

    /// Observe every section at its current extent and deliver the
    /// viewport. Returns the ids revealed by this call.
    pub fn update(&mut self, now: Instant, frames: &mut FrameLoop) -> Vec<String> {
        for section in &self.layout.sections {
            self.tracker.observe(section.id, section.extent);
        }
        let revealed = self.tracker.notify(self.viewport(), now);
        for id in &revealed {
            self.on_revealed(id, now, frames);
        }
        revealed
    }

    fn on_revealed(&mut self, id: &str, now: Instant, frames: &mut FrameLoop) {
        tracing::debug!(section = id, "revealed");
        if let Some(count_up) = self.count_ups.get_mut(id) {
            count_up.set_active(true, now, frames);
        }
        let strikes = self
            .dashboard
            .section(id)
            .is_some_and(|s| s.has_strike());
        if strikes && self.strike_timer.is_none() && !self.strike.get() {
            self.arm_strike(now, frames);
        }
    }

    /// Schedule the strike-through from `now`, replacing any pending timer.
    fn arm_strike(&mut self, now: Instant, frames: &mut FrameLoop) {
        let delay = if self.reduced_motion {
            Duration::ZERO
        } else {
            self.settings.strike_delay
        };
        let strike = Rc::downgrade(&self.strike);
        self.strike_timer = Some(frames.timeout(now, delay, move || {
            if let Some(strike) = strike.upgrade() {
                strike.set(true);
            }
        }));
    }

    /// Apply a new motion preference. Reveals switch immediately; count-ups
    /// still in flight restart with the new duration and a pending strike
    /// is rescheduled with the new delay.
    pub fn set_reduced_motion(&mut self, reduced: bool, now: Instant, frames: &mut FrameLoop) {
        if reduced == self.reduced_motion {
            return;
        }
        self.reduced_motion = reduced;
        let duration = if reduced {
            Duration::ZERO
        } else {
            self.settings.count_up
        };
        for count_up in self.count_ups.values_mut() {
            count_up.set_duration(duration, now, frames);
        }
        let waiting = self.strike_timer.as_ref().is_some_and(FrameHandle::is_pending);
        if waiting && !self.strike.get() {
            self.arm_strike(now, frames);
        }
        tracing::info!(reduced, "motion preference changed");
    }

    /// Re-layout for a new terminal size. Reveal flags are kept.
    pub fn resize(&mut self, width: u16, viewport_height: u16) {
        let width = content_width(width);
        if width != self.layout.width {
            self.layout = PageLayout::compute(&self.dashboard, width);
        }
        self.viewport_height = viewport_height;
        self.scroll = self.scroll.min(self.layout.max_scroll(viewport_height));
    }

    // === Scrolling ===

    pub fn scroll_by(&mut self, delta: i32) {
        let max = i32::from(self.layout.max_scroll(self.viewport_height));
        let next = (i32::from(self.scroll) + delta).clamp(0, max);
        self.scroll = u16::try_from(next).unwrap_or(0);
    }

    pub fn page_down(&mut self) {
        self.scroll_by(i32::from(self.viewport_height.saturating_sub(2).max(1)));
    }

    pub fn page_up(&mut self) {
        self.scroll_by(-i32::from(self.viewport_height.saturating_sub(2).max(1)));
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll = self.layout.max_scroll(self.viewport_height);
    }

    // === Presentation state ===

    #[cfg(test)]
    pub fn is_revealed(&self, section: &str) -> bool {
        self.tracker.is_visible(section)
    }

    /// Current appearance of a section.
    pub fn appearance(&self, section: &str, now: Instant) -> Appearance {
        let style = reveal::reveal_style(
            self.tracker.is_visible(section),
            self.reduced_motion,
            &self.settings.reveal,
        );
        let elapsed = self
            .tracker
            .revealed_at(section)
            .map(|at| now.saturating_duration_since(at));
        style.appearance(elapsed)
    }

    pub fn count_up(&self, section: &str) -> Option<&CountUp> {
        self.count_ups.get(section)
    }

    /// Whether the "then" column is struck through.
    pub fn is_struck(&self) -> bool {
        self.strike.get()
    }

    pub fn highlight(&self) -> &HighlightSelection {
        &self.highlight
    }

    pub fn scenario(&self) -> &HighlightSelection {
        &self.scenario
    }

    pub fn is_series_shown(&self, chart: &Chart, id: &str) -> bool {
        chart.emphasis != Emphasis::Toggles || self.toggles.is_shown(id)
    }

    pub fn stroke_for(&self, chart: &Chart, id: &str) -> StrokeStyle {
        match chart.emphasis {
            Emphasis::Highlight => self.highlight.stroke_for(id),
            Emphasis::Scenario => self.scenario.stroke_for(id),
            Emphasis::Toggles | Emphasis::Markers => StrokeStyle::NORMAL,
        }
    }

    /// Cursor period index of a chart; starts at the latest period.
    pub fn cursor(&self, chart: &Chart) -> usize {
        let last = chart
            .data
            .as_ref()
            .map(|d| d.periods().len().saturating_sub(1))
            .unwrap_or(0);
        self.cursors.get(chart.id).copied().unwrap_or(last).min(last)
    }

    /// Tooltip at the cursor, or `None` for a chart without data.
    pub fn tooltip(&self, chart: &Chart) -> Option<Tooltip> {
        let data = chart.data.as_ref().ok()?;
        let index = self.cursor(chart);
        let period = data.periods().get(index)?;

        match chart.tooltip {
            TooltipKind::Series => {
                let entries = chart
                    .series
                    .iter()
                    .filter(|s| self.is_series_shown(chart, s.id))
                    .filter_map(|s| {
                        let value = data.plotted(s.id, index)?;
                        let detail = match chart.values {
                            Values::Indexed => data
                                .series(s.id)
                                .and_then(|raw| raw.value_at(index))
                                .map(tooltip::thousands),
                            Values::Raw => None,
                        };
                        Some(TooltipEntry {
                            label: s.short.to_string(),
                            value: s.unit.format(value),
                            detail,
                            color: s.color,
                            stroke: self.stroke_for(chart, s.id),
                        })
                    })
                    .collect();
                Some(Tooltip {
                    header: tooltip::period_label(period, chart.estimated),
                    entries: tooltip::visible_entries(entries),
                })
            }
            TooltipKind::Curve => {
                let difficulty = *data.x.get(index)?;
                let series = chart.series.first()?;
                let satisfaction = data.plotted(series.id, index)?;
                let entry = |label: &str, value: &str| TooltipEntry {
                    label: label.to_string(),
                    value: value.to_string(),
                    detail: None,
                    color: colors::INK,
                    stroke: StrokeStyle::NORMAL,
                };
                Some(Tooltip {
                    header: format!("Difficulty {}", period),
                    entries: vec![
                        entry("Difficulty", tooltip::difficulty_label(difficulty)),
                        entry("Satisfaction", tooltip::satisfaction_label(satisfaction)),
                    ],
                })
            }
        }
    }

    // === Interaction ===

    /// The first interactive block on screen.
    pub fn focused(&self) -> Option<&Block> {
        let (section, block) = self.layout.focused(&self.dashboard, &self.viewport())?;
        self.dashboard.sections.get(section)?.blocks.get(block)
    }

    fn focused_chart(&self) -> Option<&Chart> {
        match self.focused()? {
            Block::Chart(id) => self.dashboard.chart(id),
            _ => None,
        }
    }

    /// Which selection the focused block drives.
    fn focused_target(&self) -> Option<Target> {
        match self.focused()? {
            Block::Scenarios => Some(Target::Scenario),
            Block::Chart(id) => match self.dashboard.chart(id)?.emphasis {
                Emphasis::Highlight => Some(Target::Highlight(self.dashboard.chart(id)?.series_ids())),
                Emphasis::Toggles => Some(Target::Toggles(self.dashboard.chart(id)?.series_ids())),
                Emphasis::Scenario | Emphasis::Markers => Some(Target::Scenario),
            },
            _ => None,
        }
    }

    fn scenario_ids(&self) -> Vec<&'static str> {
        self.dashboard
            .scenarios
            .as_ref()
            .map(|g| g.ids())
            .unwrap_or_default()
    }

    /// Select (or toggle) the `index`-th series or scenario of the focused
    /// block. Returns a description of what changed.
    pub fn select(&mut self, index: usize) -> Option<String> {
        match self.focused_target()? {
            Target::Highlight(ids) => {
                let id = *ids.get(index)?;
                self.highlight.select(id);
                Some(format!("Highlighted {}", id))
            }
            Target::Toggles(ids) => {
                let id = *ids.get(index)?;
                let shown = self.toggles.toggle(id)?;
                Some(format!("{} {}", id, if shown { "shown" } else { "hidden" }))
            }
            Target::Scenario => {
                let id = *self.scenario_ids().get(index)?;
                self.scenario.select(id);
                Some(format!("Scenario {}", id))
            }
        }
    }

    /// Move the focused selection to the next or previous entry.
    pub fn cycle(&mut self, forward: bool) -> Option<String> {
        match self.focused_target()? {
            Target::Highlight(ids) => {
                self.highlight.cycle(&ids, forward);
                self.highlight.selected().map(|id| format!("Highlighted {}", id))
            }
            Target::Scenario => {
                let ids = self.scenario_ids();
                self.scenario.cycle(&ids, forward);
                self.scenario.selected().map(|id| format!("Scenario {}", id))
            }
            Target::Toggles(_) => None,
        }
    }

    /// Clear the focused selection where clearing is allowed.
    pub fn clear(&mut self) -> Option<String> {
        match self.focused_target()? {
            Target::Highlight(_) if self.highlight.selected().is_some() => {
                self.highlight.clear();
                Some("Highlight cleared".to_string())
            }
            Target::Scenario => {
                let clearable = self.dashboard.scenarios.as_ref().is_some_and(|g| g.clearable);
                if clearable && self.scenario.selected().is_some() {
                    self.scenario.clear();
                    Some("Scenario cleared".to_string())
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Step the focused chart's cursor by `delta` periods.
    pub fn move_cursor(&mut self, delta: i32) {
        let Some(chart) = self.focused_chart() else {
            return;
        };
        let Ok(data) = chart.data.as_ref() else {
            return;
        };
        let last = i32::try_from(data.periods().len().saturating_sub(1)).unwrap_or(0);
        let current = i32::try_from(self.cursor(chart)).unwrap_or(last);
        let next = usize::try_from((current + delta).clamp(0, last)).unwrap_or(0);
        let id = chart.id;
        self.cursors.insert(id, next);
    }
}

impl Drop for DashboardView {
    fn drop(&mut self) {
        self.tracker.disconnect();
        tracing::info!(dashboard = self.dashboard.id.name(), "unmounted");
    }
}

enum Target {
    Highlight(Vec<&'static str>),
    Toggles(Vec<&'static str>),
    Scenario,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{self, DashboardId};
    use crate::count_up::count_up_value;

    fn mount(id: DashboardId, reduced: bool, now: Instant, frames: &mut FrameLoop) -> DashboardView {
        DashboardView::mount(content::load(id), ViewSettings::default(), reduced, 80, 24, now, frames)
    }

    fn scroll_to(view: &mut DashboardView, section: &str) {
        let top = view.layout().section(section).unwrap().extent.top;
        view.scroll_by(i32::from(top) - i32::from(view.scroll()));
    }

    #[test]
    fn test_hero_is_revealed_on_mount() {
        let now = Instant::now();
        let mut frames = FrameLoop::new();
        let view = mount(DashboardId::Degrees, false, now, &mut frames);
        assert!(view.is_revealed(HERO_SECTION));
        assert_eq!(view.appearance(HERO_SECTION, now), Appearance::SHOWN);
        assert!(!view.is_revealed("end"));
    }

    #[test]
    fn test_scrolled_sections_ease_in() {
        let now = Instant::now();
        let mut frames = FrameLoop::new();
        let mut view = mount(DashboardId::Friction, false, now, &mut frames);
        scroll_to(&mut view, "pain");
        view.update(now, &mut frames);

        assert_eq!(view.appearance("pain", now), Appearance::hidden(reveal::DEFAULT_OFFSET));
        assert_eq!(
            view.appearance("pain", now + Duration::from_secs(1)),
            Appearance::SHOWN
        );
    }

    #[test]
    fn test_scrolling_reveals_in_order_and_never_hides() {
        let now = Instant::now();
        let mut frames = FrameLoop::new();
        let mut view = mount(DashboardId::Friction, false, now, &mut frames);

        scroll_to(&mut view, "pain");
        let revealed = view.update(now, &mut frames);
        assert!(revealed.contains(&"pain".to_string()));
        assert!(view.is_revealed("pain"));

        view.scroll_to_top();
        assert!(view.update(now, &mut frames).is_empty());
        assert!(view.is_revealed("pain"));
    }

    #[test]
    fn test_count_up_runs_when_section_is_revealed() {
        let start = Instant::now();
        let mut frames = FrameLoop::new();
        let mut view = mount(DashboardId::Friction, false, start, &mut frames);
        assert_eq!(view.count_up("oneclick").unwrap().value(), 0);

        scroll_to(&mut view, "oneclick");
        view.update(start, &mut frames);
        assert!(view.count_up("oneclick").unwrap().is_active());

        frames.run(start + Duration::from_millis(600));
        let expected = count_up_value(43.0, count_up::DEFAULT_DURATION, Duration::from_millis(600));
        assert_eq!(view.count_up("oneclick").unwrap().value(), expected);

        frames.run(start + Duration::from_secs(2));
        assert_eq!(view.count_up("oneclick").unwrap().value(), 43);
        assert!(view.count_up("oneclick").unwrap().is_settled());
    }

    #[test]
    fn test_degrees_count_up_targets_derived_change() {
        let now = Instant::now();
        let mut frames = FrameLoop::new();
        let view = mount(DashboardId::Degrees, true, now, &mut frames);
        assert_eq!(view.count_up("race").unwrap().target(), 134.3);
    }

    #[test]
    fn test_strike_is_delayed() {
        let start = Instant::now();
        let mut frames = FrameLoop::new();
        let view = mount(DashboardId::Loneliness, false, start, &mut frames);
        assert!(!view.is_struck());

        frames.run(start + Duration::from_millis(100));
        assert!(!view.is_struck());
        frames.run(start + DEFAULT_STRIKE_DELAY);
        assert!(view.is_struck());
    }

    #[test]
    fn test_pending_strike_follows_reduced_motion() {
        let start = Instant::now();
        let mut frames = FrameLoop::new();
        let mut view = mount(DashboardId::Loneliness, false, start, &mut frames);
        frames.run(start + Duration::from_millis(100));
        assert!(!view.is_struck());

        view.set_reduced_motion(true, start + Duration::from_millis(100), &mut frames);
        frames.run(start + Duration::from_millis(133));
        assert!(view.is_struck());
    }

    #[test]
    fn test_pending_strike_waits_again_when_motion_returns() {
        let start = Instant::now();
        let mut frames = FrameLoop::new();
        let mut view = mount(DashboardId::Loneliness, true, start, &mut frames);
        view.set_reduced_motion(false, start, &mut frames);

        frames.run(start + Duration::from_millis(100));
        assert!(!view.is_struck());
        frames.run(start + DEFAULT_STRIKE_DELAY);
        assert!(view.is_struck());
    }

    #[test]
    fn test_reduced_motion_shows_everything_at_once() {
        let start = Instant::now();
        let mut frames = FrameLoop::new();
        let mut view = mount(DashboardId::Loneliness, true, start, &mut frames);

        assert_eq!(view.appearance("close", start), Appearance::SHOWN);
        frames.run(start);
        assert!(view.is_struck());

        scroll_to(&mut view, "cost");
        view.update(start, &mut frames);
        assert_eq!(view.count_up("cost").unwrap().value(), 61);
    }

    #[test]
    fn test_preference_change_restarts_unsettled_count_ups() {
        let start = Instant::now();
        let mut frames = FrameLoop::new();
        let mut view = mount(DashboardId::Loneliness, false, start, &mut frames);
        scroll_to(&mut view, "cost");
        view.update(start, &mut frames);
        frames.run(start + Duration::from_millis(100));
        assert!(view.count_up("cost").unwrap().value() < 61);

        view.set_reduced_motion(true, start + Duration::from_millis(100), &mut frames);
        assert_eq!(view.count_up("cost").unwrap().value(), 61);
        assert_eq!(view.appearance("redirect", start), Appearance::SHOWN);
    }

    #[test]
    fn test_teardown_cancels_pending_callbacks() {
        let start = Instant::now();
        let mut frames = FrameLoop::new();
        let mut view = mount(DashboardId::Friction, false, start, &mut frames);
        scroll_to(&mut view, "oneclick");
        view.update(start, &mut frames);
        assert!(frames.pending() > 0);

        drop(view);
        assert_eq!(frames.pending(), 0);
        assert_eq!(frames.run(start + Duration::from_millis(50)), 0);
    }

    #[test]
    fn test_highlight_defaults_and_selection() {
        let now = Instant::now();
        let mut frames = FrameLoop::new();
        let mut view = mount(DashboardId::Degrees, false, now, &mut frames);
        assert_eq!(view.highlight().selected(), Some("cs"));

        let chart_top = view.layout().section("race").unwrap().blocks[1].top;
        view.scroll_by(i32::from(chart_top));
        assert!(matches!(view.focused(), Some(Block::Chart("race"))));

        assert_eq!(view.select(4).as_deref(), Some("Highlighted eng_lit"));
        let chart = view.dashboard().chart("race").unwrap().clone();
        assert_eq!(view.stroke_for(&chart, "eng_lit"), StrokeStyle::EMPHASIZED);
        assert_eq!(view.stroke_for(&chart, "cs"), StrokeStyle::DIMMED);

        view.clear();
        assert_eq!(view.stroke_for(&chart, "cs"), StrokeStyle::NORMAL);
    }

    #[test]
    fn test_dimmed_series_are_left_out_of_tooltip() {
        let now = Instant::now();
        let mut frames = FrameLoop::new();
        let view = mount(DashboardId::Degrees, false, now, &mut frames);
        let chart = view.dashboard().chart("race").unwrap();

        let tooltip = view.tooltip(chart).unwrap();
        assert_eq!(tooltip.header, "2024 (est)");
        assert_eq!(tooltip.entries.len(), 1);
        assert_eq!(tooltip.entries[0].line(), "CS 234.3 (119.4k)");
    }

    #[test]
    fn test_degrees_scenario_cannot_be_cleared() {
        let now = Instant::now();
        let mut frames = FrameLoop::new();
        let mut view = mount(DashboardId::Degrees, false, now, &mut frames);
        let top = view.layout().section("fut").unwrap().blocks[0].top;
        view.scroll_by(i32::from(top));

        assert_eq!(view.scenario().selected(), Some("moderate"));
        assert!(view.clear().is_none());
        view.cycle(true);
        assert_eq!(view.scenario().selected(), Some("aggressive"));
    }

    #[test]
    fn test_friction_scenario_can_be_cleared() {
        let now = Instant::now();
        let mut frames = FrameLoop::new();
        let mut view = mount(DashboardId::Friction, false, now, &mut frames);
        let top = view.layout().section("accomplish").unwrap().blocks[0].top;
        view.scroll_by(i32::from(top));

        assert_eq!(view.scenario().selected(), None);
        assert_eq!(view.select(1).as_deref(), Some("Scenario check2025"));
        assert_eq!(view.clear().as_deref(), Some("Scenario cleared"));
        assert_eq!(view.scenario().selected(), None);
    }

    #[test]
    fn test_toggles_hide_series_and_cursor_moves() {
        let now = Instant::now();
        let mut frames = FrameLoop::new();
        let mut view = mount(DashboardId::Loneliness, false, now, &mut frames);
        let top = view.layout().section("diverging").unwrap().blocks[0].top;
        view.scroll_by(i32::from(top));

        assert_eq!(view.select(1).as_deref(), Some("friendTime hidden"));
        let chart = view.dashboard().chart("diverging").unwrap().clone();
        assert!(!view.is_series_shown(&chart, "friendTime"));

        view.move_cursor(-100);
        let tooltip = view.tooltip(&chart).unwrap();
        assert_eq!(tooltip.header, "2005");
        let lines: Vec<String> = tooltip.entries.iter().map(TooltipEntry::line).collect();
        assert_eq!(lines, vec!["Smartphones: 10%", "Loneliness: 20%"]);
    }
}
