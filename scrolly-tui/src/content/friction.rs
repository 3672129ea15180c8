//! The Friction Paradox.
//!
//! What convenience removed along with the effort: the pause before a
//! purchase, the human at the counter, and the sense of earned completion.

use super::{
    Block, Chart, ChartData, Dashboard, DashboardId, Emphasis, ScenarioGroup, ScenarioOption,
    Section, SeriesStyle, Stat, StatCard, StatTarget, TaskPair, TooltipKind, Values,
};
use crate::dataset::SeriesSet;
use crate::theme::colors;
use crate::tooltip::Unit;

pub const CURVE_CHART: &str = "accomplishment";
/// Difficulty range drawn as the flow zone.
pub const FLOW_ZONE: (f64, f64) = (35.0, 65.0);

static TASK_PAIRS: [TaskPair; 5] = [
    TaskPair {
        task: "Deposit a check",
        then: "Drive to bank, fill out slip, wait in line",
        now: "Open app, take photo, done in 12 seconds",
    },
    TaskPair {
        task: "Buy a concert ticket",
        then: "Call venue, wait on hold, read card number aloud",
        now: "Tap notification, Apple Pay, confirmation in 3 seconds",
    },
    TaskPair {
        task: "Pay a bill",
        then: "Write check, address envelope, buy stamp, mail it",
        now: "Auto-pay deducts on the 1st, you never see it leave",
    },
    TaskPair {
        task: "Get directions",
        then: "Unfold map, plan route, ask a stranger",
        now: "\"Hey Siri, navigate to...\"",
    },
    TaskPair {
        task: "Buy a product",
        then: "Drive to store, browse, compare, carry to register",
        now: "One click. Arrives tomorrow.",
    },
];

/// Sense of accomplishment as a function of difficulty: a bell centred on
/// moderate effort.
pub fn accomplishment(difficulty: f64) -> f64 {
    let x = difficulty / 100.0;
    ((-(x - 0.5).powi(2) / 0.08).exp() * 100.0).round()
}

fn curve_chart() -> Chart {
    let periods: Vec<String> = (0..=50).map(|i| (i * 2).to_string()).collect();
    let period_refs: Vec<&str> = periods.iter().map(String::as_str).collect();
    let values: Vec<f64> = (0..=50u32).map(|i| accomplishment(f64::from(i * 2))).collect();
    let set = SeriesSet::from_columns(
        &period_refs,
        &[("satisfaction", "Sense of accomplishment", values.as_slice())],
    );

    Chart {
        id: CURVE_CHART,
        title: "Sense of accomplishment by task difficulty",
        y_label: "Satisfaction",
        y_bounds: [0.0, 100.0],
        values: Values::Raw,
        emphasis: Emphasis::Markers,
        tooltip: TooltipKind::Curve,
        series: vec![SeriesStyle {
            id: "satisfaction",
            short: "Accomplishment",
            color: colors::INK,
            unit: Unit::Index,
            story: None,
        }],
        data: ChartData::load(set, Values::Raw),
        reference_x: None,
        reference_y: None,
        zone: Some(FLOW_ZONE),
        estimated: &[],
        note: "Conceptual illustration of flow state theory (Csikszentmihalyi, 1990) and Yerkes-Dodson research. Curve shape is illustrative, not derived from a specific dataset.",
    }
}

fn scenarios() -> ScenarioGroup {
    ScenarioGroup {
        options: vec![
            ScenarioOption {
                id: "check1995",
                label: "Deposit a check (1995)",
                color: colors::COOL,
                headline: "Moderate effort. Tangible completion.",
                description: "Drive to bank, fill out slip, wait, interact with teller. Moderate effort. Tangible completion.",
                figure: None,
                details: vec![],
                marker_x: Some(45.0),
            },
            ScenarioOption {
                id: "check2025",
                label: "Deposit a check (2025)",
                color: colors::ACCENT,
                headline: "Zero effort. No felt sense of accomplishment.",
                description: "Open app, take photo, done in 12 seconds. Zero effort. No felt sense of accomplishment.",
                figure: None,
                details: vec![],
                marker_x: Some(8.0),
            },
            ScenarioOption {
                id: "flow",
                label: "The Flow Zone",
                color: colors::GROWTH,
                headline: "Challenge matched to skill.",
                description: "Challenge matched to skill. Where humans report the greatest engagement and satisfaction.",
                figure: None,
                details: vec![],
                marker_x: Some(50.0),
            },
        ],
        default: None,
        clearable: true,
    }
}

pub fn dashboard() -> Dashboard {
    Dashboard {
        id: DashboardId::Friction,
        title: "The Friction Paradox",
        byline: "Alison · Feb 2026",
        sections: vec![
            Section {
                id: "hero",
                kicker: Some("Convenience & Its Costs"),
                heading: None,
                body: "We optimized away the effort. Every frictionless improvement below is real: faster, cheaper, more convenient. But optimization has side effects. When you remove the friction from a process, you also remove the pause, the human interaction, the sense of earned completion. This investigation looks at what the research says we lost.",
                blocks: vec![Block::Pairs {
                    pairs: &TASK_PAIRS,
                    strike: true,
                }],
                dark: false,
            },
            Section {
                id: "oneclick",
                kicker: Some("Part I: The Price Tag"),
                heading: Some("The One-Click Effect"),
                body: "One-click checkout was designed to reduce abandoned carts. It also reduced the pause between wanting and having. The Cornell effect was concentrated in moderate and occasional buyers, the people who previously had time to reconsider.",
                blocks: vec![
                    Block::Stat(Stat {
                        target: StatTarget::Fixed(43.0),
                        suffix: "%",
                        caption: "increase in purchase frequency after adopting one-click checkout",
                        source: "Dou et al., Management Science, 2023 · 977 customers tracked over 2.5 years",
                    }),
                    Block::Cards(vec![
                        StatCard {
                            value: "36%",
                            label: "more items purchased",
                            source: "Dou et al., 2023",
                            color: colors::ACCENT,
                        },
                        StatCard {
                            value: "$151/mo",
                            label: "average impulse spending per consumer",
                            source: "Slickdeals survey, 2022",
                            color: colors::CAUTION,
                        },
                        StatCard {
                            value: "Buyers want friction tools",
                            label: "Surveyed impulse buyers said they actively want spending limits and checkout delays",
                            source: "Moser et al., CHI 2019",
                            color: colors::COOL,
                        },
                    ]),
                ],
                dark: false,
            },
            Section {
                id: "pain",
                kicker: Some("Part II: The Mechanism"),
                heading: Some("The Pain We Turned Off"),
                body: "Paying used to hurt a little, and that hurt was information. Brain imaging shows that prices register in regions tied to pain, and that this signal predicts whether we buy better than what we say we will do. Cards, stored credentials and auto-pay each move the payment further from the moment of choice.",
                blocks: vec![
                    Block::Quote("\"Excessive prices activated the anterior insula and deactivated mesial prefrontal cortex prior to purchase decisions. Brain activity predicted purchases better than self-report.\" Knutson et al., Neuron, 2007"),
                    Block::Quote("\"Paying activates the anterior insula, a brain region associated with emotional and affective pain processing.\" Prelec & Loewenstein, Marketing Science, 1998"),
                ],
                dark: true,
            },
            Section {
                id: "counter",
                kicker: Some("Part III: The Isolation"),
                heading: Some("The Disappearing Counter"),
                body: "We prefer digital for transactions. We need human for trust.",
                blocks: vec![
                    Block::Cards(vec![
                        StatCard {
                            value: "9%",
                            label: "of consumers prefer bank branches for routine banking",
                            source: "ABA / Morning Consult, 2024",
                            color: colors::COOL,
                        },
                        StatCard {
                            value: "67%",
                            label: "like seeing bank branches in their neighborhood",
                            source: "ABA / Morning Consult, 2024",
                            color: colors::GROWTH,
                        },
                        StatCard {
                            value: "54%",
                            label: "prefer mobile app banking (doubled from 26% in 2017)",
                            source: "ABA / Morning Consult, 2024",
                            color: colors::ACCENT,
                        },
                    ]),
                    Block::Quote("Face-to-face contact was the most important predictor of mental health during lockdowns. Videoconferencing offered negligible benefit."),
                ],
                dark: false,
            },
            Section {
                id: "accomplish",
                kicker: Some("Part IV: The Accomplishment Trap"),
                heading: Some("Intermediate difficulty produces the greatest sense of accomplishment"),
                body: "Satisfaction peaks when a task asks something of us but not too much. Too hard and we disengage; too easy and there is nothing to feel good about. Pick a task to see where it falls on the curve.",
                blocks: vec![Block::Chart(CURVE_CHART), Block::Scenarios],
                dark: false,
            },
            Section {
                id: "close",
                kicker: None,
                heading: Some("Some friction was load-bearing"),
                body: "The evidence points in two directions at once. Digital convenience genuinely improved access and efficiency. But the friction it replaced was doing psychological and social work we hadn't accounted for. The design challenge is not to re-introduce inefficiency. It's to preserve friction's benefits without requiring the cost that friction originally imposed.",
                blocks: vec![],
                dark: false,
            },
        ],
        charts: vec![curve_chart()],
        highlight: None,
        scenarios: Some(scenarios()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curve_peaks_in_flow_zone() {
        assert_eq!(accomplishment(50.0), 100.0);
        assert!(accomplishment(8.0) < 20.0);
        assert!(accomplishment(0.0) < accomplishment(45.0));
        assert_eq!(accomplishment(30.0), accomplishment(70.0));
    }

    #[test]
    fn test_curve_samples_every_two_points() {
        let dashboard = dashboard();
        let data = dashboard.chart(CURVE_CHART).unwrap().data.as_ref().unwrap();
        assert_eq!(data.periods().len(), 51);
        assert_eq!(data.x.first(), Some(&0.0));
        assert_eq!(data.x.last(), Some(&100.0));
        assert_eq!(data.plotted("satisfaction", 25), Some(100.0));
    }

    #[test]
    fn test_scenarios_start_cleared_with_markers() {
        let dashboard = dashboard();
        let scenarios = dashboard.scenarios.as_ref().unwrap();
        assert_eq!(scenarios.default, None);
        assert!(scenarios.clearable);
        assert!(scenarios.options.iter().all(|o| o.marker_x.is_some()));
        let flow = scenarios.option("flow").and_then(|o| o.marker_x).unwrap();
        assert!(flow >= FLOW_ZONE.0 && flow <= FLOW_ZONE.1);
    }

    #[test]
    fn test_hero_strikes_then_column() {
        let dashboard = dashboard();
        assert!(dashboard.section("hero").unwrap().has_strike());
        assert!(!dashboard.section("oneclick").unwrap().has_strike());
    }
}
