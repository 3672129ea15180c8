//! Dashboard content.
//!
//! Each topic is a thin configuration: copy, datasets, series palette and the
//! interactive pieces its charts need. All rendering and animation behavior
//! lives elsewhere and is shared.

pub mod degrees;
pub mod friction;
pub mod loneliness;

use ratatui::style::Color;

use crate::dataset::{rank_by_change, DataSeries, Derived, SeriesSet};
use crate::error::{DataResult, DataShapeError};
use crate::tooltip::Unit;

/// The three dashboards, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum DashboardId {
    /// What We Study vs. What AI Disrupts
    #[default]
    Degrees,
    /// The Friction Paradox
    Friction,
    /// The Loneliest Network
    Loneliness,
}

impl DashboardId {
    pub const ALL: [DashboardId; 3] = [
        DashboardId::Degrees,
        DashboardId::Friction,
        DashboardId::Loneliness,
    ];

    pub fn next(&self) -> Self {
        match self {
            DashboardId::Degrees => DashboardId::Friction,
            DashboardId::Friction => DashboardId::Loneliness,
            DashboardId::Loneliness => DashboardId::Degrees,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            DashboardId::Degrees => DashboardId::Loneliness,
            DashboardId::Friction => DashboardId::Degrees,
            DashboardId::Loneliness => DashboardId::Friction,
        }
    }

    /// Tab label
    pub fn name(&self) -> &'static str {
        match self {
            DashboardId::Degrees => "AI Displacement",
            DashboardId::Friction => "Friction Paradox",
            DashboardId::Loneliness => "Loneliest Network",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            DashboardId::Degrees => 0,
            DashboardId::Friction => 1,
            DashboardId::Loneliness => 2,
        }
    }
}

/// Build a dashboard. Dataset validation happens here, once per mount.
pub fn load(id: DashboardId) -> Dashboard {
    match id {
        DashboardId::Degrees => degrees::dashboard(),
        DashboardId::Friction => friction::dashboard(),
        DashboardId::Loneliness => loneliness::dashboard(),
    }
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub id: DashboardId,
    pub title: &'static str,
    pub byline: &'static str,
    pub sections: Vec<Section>,
    pub charts: Vec<Chart>,
    /// Series highlighted on mount.
    pub highlight: Option<&'static str>,
    pub scenarios: Option<ScenarioGroup>,
}

impl Dashboard {
    pub fn chart(&self, id: &str) -> Option<&Chart> {
        self.charts.iter().find(|c| c.id == id)
    }

    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// The chart with a per-series visibility map.
    pub fn toggle_chart(&self) -> Option<&Chart> {
        self.charts.iter().find(|c| c.emphasis == Emphasis::Toggles)
    }

    /// Resolve a count-up target against the loaded datasets.
    pub fn stat_target(&self, stat: &Stat) -> DataResult<f64> {
        match stat.target {
            StatTarget::Fixed(value) => Ok(value),
            StatTarget::PercentChange { chart, series } => {
                let data = self
                    .chart(chart)
                    .ok_or(DataShapeError::NoSeries)?
                    .data
                    .as_ref()
                    .map_err(Clone::clone)?;
                data.percent_change(series)
                    .ok_or_else(|| DataShapeError::Empty {
                        series: series.to_string(),
                    })
            }
        }
    }
}

/// A scroll section: copy plus blocks, revealed as a unit.
#[derive(Debug, Clone)]
pub struct Section {
    pub id: &'static str,
    pub kicker: Option<&'static str>,
    pub heading: Option<&'static str>,
    pub body: &'static str,
    pub blocks: Vec<Block>,
    pub dark: bool,
}

impl Section {
    pub fn stat(&self) -> Option<&Stat> {
        self.blocks.iter().find_map(|b| match b {
            Block::Stat(stat) => Some(stat),
            _ => None,
        })
    }

    pub fn has_strike(&self) -> bool {
        self.blocks
            .iter()
            .any(|b| matches!(b, Block::Pairs { strike: true, .. }))
    }
}

#[derive(Debug, Clone)]
pub enum Block {
    /// Before/after table, optionally striking the "then" column.
    Pairs {
        pairs: &'static [TaskPair],
        strike: bool,
    },
    /// Count-up figure.
    Stat(Stat),
    Cards(Vec<StatCard>),
    Chart(&'static str),
    /// Story and change of the highlighted series.
    Story(&'static str),
    /// Series of a chart ordered by percent change.
    Ranking(&'static str),
    /// AI exposure against enrollment change, the change derived from a chart.
    Exposure {
        chart: &'static str,
        rows: &'static [Exposure],
    },
    Scenarios,
    Quote(&'static str),
    Note(&'static str),
}

impl Block {
    /// Blocks that take selection keys.
    pub fn is_interactive(&self) -> bool {
        matches!(self, Block::Chart(_) | Block::Scenarios)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaskPair {
    pub task: &'static str,
    pub then: &'static str,
    pub now: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StatTarget {
    Fixed(f64),
    PercentChange {
        chart: &'static str,
        series: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stat {
    pub target: StatTarget,
    pub suffix: &'static str,
    pub caption: &'static str,
    pub source: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatCard {
    pub value: &'static str,
    pub label: &'static str,
    pub source: &'static str,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Exposure {
    pub series: &'static str,
    pub exposure: f64,
}

/// Presentation of one series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStyle {
    pub id: &'static str,
    pub short: &'static str,
    pub color: Color,
    pub unit: Unit,
    pub story: Option<&'static str>,
}

/// How a chart decides stroke emphasis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    /// The view's highlight selection.
    Highlight,
    /// Per-series visibility toggles; shown lines draw normally.
    Toggles,
    /// Series ids are scenario ids; the active scenario is emphasized.
    Scenario,
    /// Scenario options are drawn as vertical markers over a fixed curve.
    Markers,
}

/// Whether plotted values are the raw series or indexed to the first period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Values {
    Raw,
    Indexed,
}

/// Tooltip flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipKind {
    /// One line per series value.
    Series,
    /// Qualitative difficulty/satisfaction labels.
    Curve,
}

#[derive(Debug, Clone)]
pub struct Chart {
    pub id: &'static str,
    pub title: &'static str,
    pub y_label: &'static str,
    pub y_bounds: [f64; 2],
    pub values: Values,
    pub emphasis: Emphasis,
    pub tooltip: TooltipKind,
    pub series: Vec<SeriesStyle>,
    pub data: DataResult<ChartData>,
    pub reference_x: Option<(f64, &'static str)>,
    pub reference_y: Option<f64>,
    /// Vertical bounds drawn as a shaded zone (e.g. the flow zone).
    pub zone: Option<(f64, f64)>,
    pub estimated: &'static [&'static str],
    pub note: &'static str,
}

impl Chart {
    pub fn style(&self, id: &str) -> Option<&SeriesStyle> {
        self.series.iter().find(|s| s.id == id)
    }

    pub fn series_ids(&self) -> Vec<&'static str> {
        self.series.iter().map(|s| s.id).collect()
    }
}

/// Validated chart data with its derived fields.
#[derive(Debug, Clone)]
pub struct ChartData {
    pub set: SeriesSet,
    pub x: Vec<f64>,
    pub derived: Option<Vec<Derived>>,
}

impl ChartData {
    /// Validate the set, compute x coordinates, and derive indexed values
    /// when the chart plots them.
    pub fn load(set: DataResult<SeriesSet>, values: Values) -> DataResult<Self> {
        let set = set?;
        let x = set.x_values()?;
        let derived = match values {
            Values::Indexed => Some(set.derive()?),
            Values::Raw => None,
        };
        Ok(Self { set, x, derived })
    }

    /// Plotted (x, y) pairs for one series.
    pub fn points(&self, id: &str) -> Option<Vec<(f64, f64)>> {
        let ys: Vec<f64> = match &self.derived {
            Some(derived) => derived
                .iter()
                .find(|d| d.id == id)?
                .indexed
                .iter()
                .map(|p| p.value)
                .collect(),
            None => self.series(id)?.points.iter().map(|p| p.value).collect(),
        };
        Some(self.x.iter().copied().zip(ys).collect())
    }

    /// Plotted value at a period index.
    pub fn plotted(&self, id: &str, index: usize) -> Option<f64> {
        match &self.derived {
            Some(derived) => derived
                .iter()
                .find(|d| d.id == id)?
                .indexed
                .get(index)
                .map(|p| p.value),
            None => self.series(id)?.value_at(index),
        }
    }

    pub fn series(&self, id: &str) -> Option<&DataSeries> {
        self.set.get(id)
    }

    pub fn percent_change(&self, id: &str) -> Option<f64> {
        self.derived
            .as_ref()?
            .iter()
            .find(|d| d.id == id)
            .map(|d| d.percent_change)
    }

    pub fn ranked(&self) -> Vec<&Derived> {
        self.derived.as_deref().map(rank_by_change).unwrap_or_default()
    }

    pub fn periods(&self) -> &[String] {
        self.set.periods()
    }
}

/// A selectable scenario.
#[derive(Debug, Clone)]
pub struct ScenarioOption {
    pub id: &'static str,
    pub label: &'static str,
    pub color: Color,
    pub headline: &'static str,
    pub description: &'static str,
    /// Headline figure and its caption.
    pub figure: Option<(f64, &'static str)>,
    pub details: Vec<(&'static str, &'static str)>,
    /// x position when drawn as a chart marker.
    pub marker_x: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct ScenarioGroup {
    pub options: Vec<ScenarioOption>,
    pub default: Option<&'static str>,
    /// Whether the selection may be cleared to none.
    pub clearable: bool,
}

impl ScenarioGroup {
    pub fn option(&self, id: &str) -> Option<&ScenarioOption> {
        self.options.iter().find(|o| o.id == id)
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.options.iter().map(|o| o.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_cycle() {
        for id in DashboardId::ALL {
            assert_eq!(id.next().previous(), id);
        }
        assert_eq!(DashboardId::Loneliness.next(), DashboardId::Degrees);
        assert_eq!(DashboardId::Friction.index(), 1);
    }

    #[test]
    fn test_every_dashboard_loads_its_charts() {
        for id in DashboardId::ALL {
            let dashboard = load(id);
            assert_eq!(dashboard.id, id);
            assert_eq!(dashboard.sections[0].id, "hero");
            for chart in &dashboard.charts {
                assert!(chart.data.is_ok(), "{} failed: {:?}", chart.id, chart.data);
            }
        }
    }

    #[test]
    fn test_section_ids_are_unique() {
        for id in DashboardId::ALL {
            let dashboard = load(id);
            let mut ids: Vec<&str> = dashboard.sections.iter().map(|s| s.id).collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), dashboard.sections.len());
        }
    }

    #[test]
    fn test_block_references_resolve() {
        for id in DashboardId::ALL {
            let dashboard = load(id);
            for section in &dashboard.sections {
                for block in &section.blocks {
                    match block {
                        Block::Chart(chart) | Block::Ranking(chart) | Block::Story(chart) => {
                            assert!(dashboard.chart(chart).is_some(), "missing chart {}", chart)
                        }
                        Block::Exposure { chart, .. } => assert!(dashboard.chart(chart).is_some()),
                        Block::Scenarios => assert!(dashboard.scenarios.is_some()),
                        Block::Stat(stat) => assert!(dashboard.stat_target(stat).is_ok()),
                        _ => {}
                    }
                }
            }
        }
    }

    #[test]
    fn test_chart_data_rejects_zero_baseline_when_indexed() {
        let set = SeriesSet::from_columns(&["2024", "2025"], &[("bls", "BLS", &[0.0, -0.5])]);
        assert!(ChartData::load(set.clone(), Values::Raw).is_ok());
        assert!(matches!(
            ChartData::load(set, Values::Indexed),
            Err(DataShapeError::ZeroBaseline { .. })
        ));
    }

    #[test]
    fn test_chart_data_points() {
        let set = SeriesSet::from_columns(&["2012", "2013"], &[("a", "A", &[200.0, 300.0])]);
        let indexed = ChartData::load(set.clone(), Values::Indexed).unwrap();
        assert_eq!(indexed.points("a"), Some(vec![(2012.0, 100.0), (2013.0, 150.0)]));
        assert_eq!(indexed.percent_change("a"), Some(50.0));

        let raw = ChartData::load(set, Values::Raw).unwrap();
        assert_eq!(raw.plotted("a", 1), Some(300.0));
        assert_eq!(raw.percent_change("a"), None);
        assert!(raw.ranked().is_empty());
    }
}
