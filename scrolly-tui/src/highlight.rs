//! Series emphasis: one exclusive highlight per view, plus a per-series
//! visibility map for toggle charts.

/// Line emphasis handed to the chart renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub width: f32,
    pub opacity: f32,
}

impl StrokeStyle {
    pub const EMPHASIZED: StrokeStyle = StrokeStyle {
        width: 3.0,
        opacity: 1.0,
    };
    pub const DIMMED: StrokeStyle = StrokeStyle {
        width: 1.5,
        opacity: 0.15,
    };
    pub const NORMAL: StrokeStyle = StrokeStyle {
        width: 2.5,
        opacity: 1.0,
    };

    /// Heavy enough to draw bold.
    pub fn is_heavy(&self) -> bool {
        self.width >= 3.0
    }
}

/// The single selected series (or scenario) of a view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightSelection {
    selected: Option<String>,
}

impl HighlightSelection {
    pub fn new(initial: Option<&str>) -> Self {
        Self {
            selected: initial.map(str::to_string),
        }
    }

    /// Last write wins.
    pub fn select(&mut self, id: &str) {
        self.selected = Some(id.to_string());
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_deref() == Some(id)
    }

    /// Stroke for `id`: the selection is emphasized and everything else
    /// dimmed. With nothing selected every series draws normally.
    pub fn stroke_for(&self, id: &str) -> StrokeStyle {
        match self.selected.as_deref() {
            None => StrokeStyle::NORMAL,
            Some(selected) if selected == id => StrokeStyle::EMPHASIZED,
            Some(_) => StrokeStyle::DIMMED,
        }
    }

    /// Move the selection through `ids`, wrapping. Starts at the first (or
    /// last, going backwards) id when nothing is selected.
    pub fn cycle(&mut self, ids: &[&str], forward: bool) {
        if ids.is_empty() {
            return;
        }
        let len = ids.len();
        let next = match self.selected.as_deref().and_then(|s| ids.iter().position(|id| *id == s)) {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None if forward => 0,
            None => len - 1,
        };
        self.select(ids[next]);
    }
}

/// Which series of a multi-line chart are drawn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeriesToggles {
    shown: Vec<(String, bool)>,
}

impl SeriesToggles {
    /// Every id starts shown.
    pub fn all_shown(ids: &[&str]) -> Self {
        Self {
            shown: ids.iter().map(|id| (id.to_string(), true)).collect(),
        }
    }

    /// Flip one series. Returns the new state, or `None` for an unknown id.
    pub fn toggle(&mut self, id: &str) -> Option<bool> {
        let entry = self.shown.iter_mut().find(|(key, _)| key == id)?;
        entry.1 = !entry.1;
        Some(entry.1)
    }

    /// Unknown ids are treated as shown.
    pub fn is_shown(&self, id: &str) -> bool {
        self.shown
            .iter()
            .find(|(key, _)| key == id)
            .map_or(true, |(_, shown)| *shown)
    }

    #[cfg(test)]
    pub fn shown_count(&self) -> usize {
        self.shown.iter().filter(|(_, shown)| *shown).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_is_exclusive() {
        let mut selection = HighlightSelection::default();
        selection.select("a");
        selection.select("b");

        assert_eq!(selection.stroke_for("b"), StrokeStyle::EMPHASIZED);
        assert_eq!(selection.stroke_for("a"), StrokeStyle::DIMMED);
        let emphasized = ["a", "b", "c"]
            .iter()
            .filter(|id| selection.stroke_for(id) == StrokeStyle::EMPHASIZED)
            .count();
        assert_eq!(emphasized, 1);
    }

    #[test]
    fn test_clear_restores_normal_strokes() {
        let mut selection = HighlightSelection::new(Some("cs"));
        assert!(selection.is_selected("cs"));
        selection.clear();
        assert_eq!(selection.selected(), None);
        assert_eq!(selection.stroke_for("cs"), StrokeStyle::NORMAL);
        assert_eq!(selection.stroke_for("edu"), StrokeStyle::NORMAL);
    }

    #[test]
    fn test_cycle_wraps_both_ways() {
        let ids = ["a", "b", "c"];
        let mut selection = HighlightSelection::default();
        selection.cycle(&ids, true);
        assert_eq!(selection.selected(), Some("a"));
        selection.cycle(&ids, false);
        assert_eq!(selection.selected(), Some("c"));
        selection.cycle(&ids, true);
        assert_eq!(selection.selected(), Some("a"));

        let mut empty = HighlightSelection::default();
        empty.cycle(&[], true);
        assert_eq!(empty.selected(), None);
    }

    #[test]
    fn test_toggles() {
        let mut toggles = SeriesToggles::all_shown(&["smartphones", "friendTime", "loneliness"]);
        assert_eq!(toggles.shown_count(), 3);
        assert_eq!(toggles.toggle("friendTime"), Some(false));
        assert!(!toggles.is_shown("friendTime"));
        assert_eq!(toggles.shown_count(), 2);
        assert_eq!(toggles.toggle("friendTime"), Some(true));
        assert_eq!(toggles.toggle("unknown"), None);
        assert!(toggles.is_shown("unknown"));
    }

    #[test]
    fn test_dimmed_strokes_are_not_heavy() {
        assert!(StrokeStyle::EMPHASIZED.is_heavy());
        assert!(!StrokeStyle::DIMMED.is_heavy());
        assert!(!StrokeStyle::NORMAL.is_heavy());
    }
}
