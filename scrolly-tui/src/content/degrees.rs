//! What We Study vs. What AI Disrupts.
//!
//! Bachelor's degrees by field, indexed to 2012, set against AI task exposure
//! and three competing labor forecasts.

use ratatui::style::Color;

use super::{
    Block, Chart, ChartData, Dashboard, DashboardId, Emphasis, Exposure, ScenarioGroup,
    ScenarioOption, Section, SeriesStyle, Stat, StatTarget, TooltipKind, Values,
};
use crate::dataset::SeriesSet;
use crate::theme::colors;
use crate::tooltip::Unit;

pub const RACE_CHART: &str = "race";
pub const DIVERGENCE_CHART: &str = "divergence";
/// Series highlighted on mount.
pub const DEFAULT_HIGHLIGHT: &str = "cs";

const EDU: Color = Color::Rgb(0x7B, 0x6F, 0xA0);
const SOCIAL: Color = Color::Rgb(0xA0, 0x93, 0x7B);

const YEARS: [&str; 13] = [
    "2012", "2013", "2014", "2015", "2016", "2017", "2018", "2019", "2020", "2021", "2022",
    "2023", "2024",
];

const CS: [f64; 13] = [
    50961.0, 52760.0, 55810.0, 59581.0, 64405.0, 71420.0, 79598.0, 88413.0, 97047.0, 100791.0,
    108503.0, 112720.0, 119400.0,
];
const HEALTH: [f64; 13] = [
    180437.0, 191571.0, 199773.0, 210684.0, 220450.0, 229654.0, 238521.0, 245300.0, 253160.0,
    258820.0, 263765.0, 258200.0, 254100.0,
];
const BUSINESS: [f64; 13] = [
    366815.0, 360823.0, 358079.0, 363799.0, 371619.0, 381012.0, 386420.0, 390600.0, 387851.0,
    379100.0, 375400.0, 369200.0, 365800.0,
];
const ENGINEERING: [f64; 13] = [
    91272.0, 95474.0, 99295.0, 106717.0, 113218.0, 116853.0, 121635.0, 125580.0, 128340.0,
    125560.0, 123000.0, 124500.0, 126200.0,
];
const ENGLISH: [f64; 13] = [
    52401.0, 49993.0, 47392.0, 44696.0, 42830.0, 40860.0, 38831.0, 37104.0, 35671.0, 34349.0,
    33429.0, 32100.0, 31200.0,
];
const EDUCATION: [f64; 13] = [
    105785.0, 99940.0, 96620.0, 92208.0, 87604.0, 85118.0, 83838.0, 84150.0, 85680.0, 87700.0,
    89550.0, 91200.0, 93100.0,
];
const SOCIAL_SCIENCES: [f64; 13] = [
    178543.0, 177072.0, 173096.0, 167228.0, 162879.0, 159410.0, 157460.0, 155850.0, 155600.0,
    153200.0, 151100.0, 148500.0, 146200.0,
];

const FORECAST_YEARS: [&str; 7] = ["2024", "2025", "2026", "2027", "2028", "2029", "2030"];
const FORECAST_BLS: [f64; 7] = [0.0, -0.5, -0.8, -1.0, -1.2, -1.3, -1.4];
const FORECAST_MODERATE: [f64; 7] = [0.0, -3.0, -7.0, -11.0, -14.0, -15.0, -12.0];
const FORECAST_AGGRESSIVE: [f64; 7] = [0.0, -8.0, -18.0, -30.0, -38.0, -32.0, -20.0];

/// Share of each field's typical career tasks where AI is competitive,
/// ordered by exposure.
static EXPOSURE: [Exposure; 7] = [
    Exposure { series: "cs", exposure: 78.0 },
    Exposure { series: "biz", exposure: 62.0 },
    Exposure { series: "eng_lit", exposure: 52.0 },
    Exposure { series: "social", exposure: 45.0 },
    Exposure { series: "eng", exposure: 41.0 },
    Exposure { series: "health", exposure: 28.0 },
    Exposure { series: "edu", exposure: 22.0 },
];

fn field(
    id: &'static str,
    short: &'static str,
    color: Color,
    story: &'static str,
) -> SeriesStyle {
    SeriesStyle {
        id,
        short,
        color,
        unit: Unit::Index,
        story: Some(story),
    }
}

fn race_chart() -> Chart {
    let set = SeriesSet::from_columns(
        &YEARS,
        &[
            ("cs", "Computer Science", &CS),
            ("health", "Health Professions", &HEALTH),
            ("biz", "Business", &BUSINESS),
            ("eng", "Engineering", &ENGINEERING),
            ("eng_lit", "English & Literature", &ENGLISH),
            ("edu", "Education", &EDUCATION),
            ("social", "Social Sciences", &SOCIAL_SCIENCES),
        ],
    );

    Chart {
        id: RACE_CHART,
        title: "Bachelor's degrees by field, indexed (2012 = 100)",
        y_label: "Index",
        y_bounds: [40.0, 250.0],
        values: Values::Indexed,
        emphasis: Emphasis::Highlight,
        tooltip: TooltipKind::Series,
        series: vec![
            field(
                "cs",
                "CS",
                colors::ACCENT,
                "The runaway winner. CS degrees more than doubled in 12 years, accelerating even after ChatGPT launched. The field most likely to be transformed by AI is also the one students are flooding into.",
            ),
            field(
                "health",
                "Health",
                colors::GROWTH,
                "A decade of steady growth hit a wall. Health professions peaked in 2022 and reversed, shedding nearly 10,000 degrees in two years. The pandemic surge is over; the question is where the floor is.",
            ),
            field(
                "biz",
                "Biz",
                colors::CAUTION,
                "Still the largest field by volume, but quietly bleeding out. Business peaked in 2019 and has declined every year since, as students sense that the generalist MBA path faces pressure from both AI and specialization.",
            ),
            field(
                "eng",
                "Eng",
                colors::COOL,
                "The steady hand. Engineering grew 38% over the decade but has plateaued since 2020, holding roughly flat while the fields around it shifted dramatically. Physical-world skills may be its shield.",
            ),
            field(
                "eng_lit",
                "English",
                colors::DECLINE,
                "The long decline. English has lost 40% of its graduates since 2012, a freefall that predates AI but has found no bottom. Writing is now one of generative AI's strongest demonstrated capabilities.",
            ),
            field(
                "edu",
                "Edu",
                EDU,
                "The comeback story. Education bottomed out in 2018 after losing 21% of its graduates, then reversed. The recovery is driven by teacher shortages and improved salaries, not AI demand. Low AI exposure may keep it safe.",
            ),
            field(
                "social",
                "Social Sci",
                SOCIAL,
                "A slow, steady erosion. Social sciences have lost 18% of their graduates with no sign of stabilization. The decline is broad-based across subfields, suggesting a structural shift in what students value.",
            ),
        ],
        data: ChartData::load(set, Values::Indexed),
        reference_x: Some((2022.0, "ChatGPT")),
        reference_y: Some(100.0),
        zone: None,
        estimated: &["2024"],
        note: "Sources: NCES Digest Table 322.10 · National Student Clearinghouse · IPEDS Fall 2024 (provisional) · CRA Taulbee Survey",
    }
}

fn divergence_chart() -> Chart {
    let set = SeriesSet::from_columns(
        &FORECAST_YEARS,
        &[
            ("conservative", "BLS / Status Quo", &FORECAST_BLS),
            ("moderate", "Goldman / McKinsey / WEF", &FORECAST_MODERATE),
            ("aggressive", "Frontier AI Labs", &FORECAST_AGGRESSIVE),
        ],
    );
    let line = |id, short, color| SeriesStyle {
        id,
        short,
        color,
        unit: Unit::PercentagePoints,
        story: None,
    };

    Chart {
        id: DIVERGENCE_CHART,
        title: "Projected change in AI-exposed employment",
        y_label: "% change",
        y_bounds: [-45.0, 5.0],
        values: Values::Raw,
        emphasis: Emphasis::Scenario,
        tooltip: TooltipKind::Series,
        series: vec![
            line("conservative", "BLS", colors::COOL),
            line("moderate", "Moderate", colors::CAUTION),
            line("aggressive", "AI Labs", colors::ACCENT),
        ],
        data: ChartData::load(set, Values::Raw),
        reference_x: None,
        reference_y: Some(0.0),
        zone: None,
        estimated: &[],
        note: "Illustrative. BLS from published projections. Moderate synthesized from Goldman/McKinsey/WEF. Aggressive from AI lab leadership timelines.",
    }
}

fn scenarios() -> ScenarioGroup {
    ScenarioGroup {
        options: vec![
            ScenarioOption {
                id: "conservative",
                label: "BLS / Status Quo",
                color: colors::COOL,
                headline: "Most AI-exposed jobs still grow",
                description: "Historical extrapolation. Explicitly assumes AI proceeds 'in line with historical experience.'",
                figure: Some((5.0, "of tasks automated by 2030")),
                details: vec![
                    ("Data Scientists", "+36.2%"),
                    ("Software Developers", "+17.9%"),
                    ("Financial Managers", "+16.5%"),
                    ("Market Research", "+13.4%"),
                    ("Accountants", "+5.8%"),
                    ("Lawyers", "+5.2%"),
                    ("Credit Analysts", "-3.9%"),
                    ("Insurance Appraisers", "-9.2%"),
                ],
                marker_x: None,
            },
            ScenarioOption {
                id: "moderate",
                label: "Goldman / McKinsey / WEF",
                color: colors::CAUTION,
                headline: "Major restructuring, net positive",
                description: "Task-level automation analysis. Accounts for generative AI but assumes gradual enterprise adoption.",
                figure: Some((30.0, "of tasks automated by 2030")),
                details: vec![
                    ("300M", "Jobs affected globally (Goldman Sachs)"),
                    ("30%", "US work hours automatable (McKinsey)"),
                    ("40%", "Workers needing reskilling (WEF 2025)"),
                    ("+3pp", "Tech unemployment, ages 20-30 (Goldman 2025)"),
                    ("+7%", "Projected US GDP gain (Goldman Sachs)"),
                    ("1%", "Companies with mature AI (McKinsey 2025)"),
                ],
                marker_x: None,
            },
            ScenarioOption {
                id: "aggressive",
                label: "Frontier AI Labs",
                color: colors::ACCENT,
                headline: "AI surpasses humans at most cognitive tasks",
                description: "Capability-first analysis. Projects from observed scaling laws and benchmark performance, not historical labor patterns.",
                figure: Some((60.0, "of tasks automated by 2030")),
                details: vec![
                    ("Code generation", "Near-human · 2025"),
                    ("Legal research", "Superhuman in speed · 2025"),
                    ("Data analysis", "Near-human · 2025"),
                    ("Scientific reasoning", "Approaching human · 2025"),
                    ("Creative writing", "Competitive · 2025"),
                    ("Medical diagnosis", "Approaching specialist · 2026"),
                    ("Strategic planning", "Emerging · 2026"),
                    ("Physical labor", "Limited · 2028"),
                ],
                marker_x: None,
            },
        ],
        default: Some("moderate"),
        clearable: false,
    }
}

pub fn dashboard() -> Dashboard {
    Dashboard {
        id: DashboardId::Degrees,
        title: "What We Study vs. What AI Disrupts",
        byline: "Alison · 2025",
        sections: vec![
            Section {
                id: "hero",
                kicker: Some("Degrees & Displacement"),
                heading: None,
                body: "In 2024, roughly 119,000 students earned computer science degrees, more than double the number from a decade ago. They graduated into an economy where Goldman Sachs says 300 million jobs face AI disruption, the Bureau of Labor Statistics says everything is fine, and the people building the AI say it will outperform most humans within years. Somebody is catastrophically wrong. Here is what the data can tell us about who.",
                blocks: vec![],
                dark: false,
            },
            Section {
                id: "race",
                kicker: Some("Part I: The Shift"),
                heading: Some("Computer science doubled. English lost 40%. And then AI arrived."),
                body: "This chart indexes every field to 100 in 2012, so you can compare momentum regardless of how many total graduates each field produces. The vertical rule marks November 2022, when ChatGPT launched. What happened next varies wildly by discipline.",
                blocks: vec![
                    Block::Stat(Stat {
                        target: StatTarget::PercentChange {
                            chart: RACE_CHART,
                            series: "cs",
                        },
                        suffix: "%",
                        caption: "growth in computer science degrees, 2012 to 2024",
                        source: "NCES Digest Table 322.10 · IPEDS",
                    }),
                    Block::Chart(RACE_CHART),
                    Block::Story(RACE_CHART),
                    Block::Ranking(RACE_CHART),
                ],
                dark: false,
            },
            Section {
                id: "bridge",
                kicker: Some("The Collision"),
                heading: Some("The field that grew the most is also the most exposed"),
                body: "Each row maps a degree field to the share of its typical career path involving tasks where AI is now competitive. Sorted by exposure, descending.",
                blocks: vec![
                    Block::Exposure {
                        chart: RACE_CHART,
                        rows: &EXPOSURE,
                    },
                    Block::Quote("78% AI exposure. +134% enrollment growth. Students are flooding into the discipline most likely to be transformed by the technology it creates."),
                ],
                dark: false,
            },
            Section {
                id: "fut",
                kicker: Some("Part II: The Forecasts"),
                heading: Some("Three institutions, three timelines, zero agreement"),
                body: "Each forecast starts from a different question. Economists extrapolate from how past technologies changed work. Consultancies score tasks for automation potential. The labs building the models project from what the models can already do. Pick one to see what it predicts.",
                blocks: vec![Block::Scenarios],
                dark: false,
            },
            Section {
                id: "chart",
                kicker: None,
                heading: Some("The disagreement, on one axis"),
                body: "All three forecasts start from today. By 2030 they are separated by more than thirty points of employment in AI-exposed occupations.",
                blocks: vec![Block::Chart(DIVERGENCE_CHART)],
                dark: false,
            },
            Section {
                id: "end",
                kicker: Some("Part III: The Takeaway"),
                heading: Some("The most rational response might also be the most vulnerable one"),
                body: "Students are hedging the only way they know how: toward the field that looks most like the future. But 119,000 new computer science graduates enter a discipline with 78% task exposure, while forecasts for that exposure range from -1.4% to -38%. The degree that matters may be less about the field than about the capacity to learn faster than the tools improve.",
                blocks: vec![Block::Note(
                    "Degree counts: NCES Digest Table 322.10, National Student Clearinghouse, IPEDS Fall 2024 (provisional), CRA Taulbee Survey. 2024 figures are estimates.",
                )],
                dark: false,
            },
        ],
        charts: vec![race_chart(), divergence_chart()],
        highlight: Some(DEFAULT_HIGHLIGHT),
        scenarios: Some(scenarios()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cs_more_than_doubles() {
        let dashboard = dashboard();
        let data = dashboard.chart(RACE_CHART).unwrap().data.as_ref().unwrap();
        assert_eq!(data.percent_change("cs"), Some(134.3));
        assert_eq!(data.percent_change("eng_lit"), Some(-40.5));
        assert_eq!(data.plotted("cs", 0), Some(100.0));
    }

    #[test]
    fn test_ranking_leads_with_cs_and_ends_with_english() {
        let dashboard = dashboard();
        let data = dashboard.chart(RACE_CHART).unwrap().data.as_ref().unwrap();
        let ranked: Vec<&str> = data.ranked().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ranked.first(), Some(&"cs"));
        assert_eq!(ranked.last(), Some(&"eng_lit"));
    }

    #[test]
    fn test_count_up_target_comes_from_dataset() {
        let dashboard = dashboard();
        let stat = dashboard.section("race").and_then(Section::stat).unwrap();
        assert_eq!(dashboard.stat_target(stat), Ok(134.3));
    }

    #[test]
    fn test_exposure_rows_are_sorted() {
        assert!(EXPOSURE.windows(2).all(|w| w[0].exposure >= w[1].exposure));
        let dashboard = dashboard();
        let chart = dashboard.chart(RACE_CHART).unwrap();
        assert!(EXPOSURE.iter().all(|row| chart.style(row.series).is_some()));
    }

    #[test]
    fn test_forecast_series_match_scenarios() {
        let dashboard = dashboard();
        let scenarios = dashboard.scenarios.as_ref().unwrap();
        assert_eq!(scenarios.default, Some("moderate"));
        assert!(!scenarios.clearable);
        assert_eq!(
            dashboard.chart(DIVERGENCE_CHART).unwrap().series_ids(),
            scenarios.ids()
        );
    }
}
