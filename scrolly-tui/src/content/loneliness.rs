//! The Loneliest Network.

use ratatui::style::Color;

use super::{
    Block, Chart, ChartData, Dashboard, DashboardId, Emphasis, Section, SeriesStyle, Stat,
    StatCard, StatTarget, TaskPair, TooltipKind, Values,
};
use crate::dataset::SeriesSet;
use crate::theme::colors;
use crate::tooltip::Unit;

pub const DIVERGING_CHART: &str = "diverging";

const LONELINESS: Color = Color::Rgb(0x8B, 0x5E, 0x9B);

static INTERACTION_PAIRS: [TaskPair; 6] = [
    TaskPair {
        task: "Buy groceries",
        then: "Chat with cashier",
        now: "Self-checkout (66% prefer it)",
    },
    TaskPair {
        task: "Deposit a check",
        then: "Visit the bank teller",
        now: "Photo in an app",
    },
    TaskPair {
        task: "Get directions",
        then: "Ask a stranger",
        now: "GPS on your phone",
    },
    TaskPair {
        task: "Order food",
        then: "Call and talk to someone",
        now: "Tap an app, no words spoken",
    },
    TaskPair {
        task: "Resolve a billing issue",
        then: "Phone call with a person",
        now: "Chatbot → chatbot → chatbot",
    },
    TaskPair {
        task: "Meet a partner",
        then: "Through friends, church, neighborhood",
        now: "Swipe right on an app",
    },
];

const YEARS: [&str; 20] = [
    "2005", "2006", "2007", "2008", "2009", "2010", "2011", "2012", "2013", "2014", "2015",
    "2016", "2017", "2018", "2019", "2020", "2021", "2022", "2023", "2024",
];
const SMARTPHONES: [f64; 20] = [
    10.0, 13.0, 16.0, 20.0, 24.0, 28.0, 35.0, 44.0, 56.0, 64.0, 72.0, 77.0, 80.0, 83.0, 85.0,
    87.0, 88.0, 89.0, 90.0, 90.0,
];
const FRIEND_TIME: [f64; 20] = [
    6.5, 6.3, 6.2, 6.0, 5.8, 5.6, 5.5, 5.3, 5.1, 5.0, 4.7, 4.5, 4.3, 4.2, 4.0, 3.5, 3.3, 3.0, 3.1,
    3.0,
];
const LONELINESS_PREVALENCE: [f64; 20] = [
    20.0, 20.0, 21.0, 21.0, 22.0, 22.0, 23.0, 23.0, 24.0, 25.0, 25.0, 26.0, 27.0, 28.0, 30.0,
    31.0, 32.0, 32.0, 33.0, 33.0,
];

fn diverging_chart() -> Chart {
    let set = SeriesSet::from_columns(
        &YEARS,
        &[
            ("smartphones", "Smartphone Ownership", &SMARTPHONES),
            ("friendTime", "In-Person Friend Time", &FRIEND_TIME),
            ("loneliness", "Loneliness Prevalence", &LONELINESS_PREVALENCE),
        ],
    );

    Chart {
        id: DIVERGING_CHART,
        title: "Connection tools vs. connection",
        y_label: "% / hours",
        y_bounds: [0.0, 100.0],
        values: Values::Raw,
        emphasis: Emphasis::Toggles,
        tooltip: TooltipKind::Series,
        series: vec![
            SeriesStyle {
                id: "smartphones",
                short: "Smartphones",
                color: colors::COOL,
                unit: Unit::Percent,
                story: None,
            },
            SeriesStyle {
                id: "friendTime",
                short: "Friend time",
                color: colors::GROWTH,
                unit: Unit::Hours,
                story: None,
            },
            SeriesStyle {
                id: "loneliness",
                short: "Loneliness",
                color: LONELINESS,
                unit: Unit::Percent,
                story: None,
            },
        ],
        data: ChartData::load(set, Values::Raw),
        reference_x: Some((2014.0, "Smartphone majority")),
        reference_y: None,
        zone: None,
        estimated: &[],
        note: "Smartphone data: Pew Research Center · Friend time: ATUS, BLS (hours per week) · Loneliness: Cigna / Harvard / APA surveys. Friend time is plotted in hours on the same axis, so its decline looks flatter than it is.",
    }
}

pub fn dashboard() -> Dashboard {
    Dashboard {
        id: DashboardId::Loneliness,
        title: "The Loneliest Network",
        byline: "Alison · Feb 2026",
        sections: vec![
            Section {
                id: "hero",
                kicker: Some("Connection & Its Discontents"),
                heading: None,
                body: "We've never had more ways to connect. We've never been more alone.",
                blocks: vec![Block::Pairs {
                    pairs: &INTERACTION_PAIRS,
                    strike: true,
                }],
                dark: false,
            },
            Section {
                id: "third-place",
                kicker: Some("Part I: The Infrastructure"),
                heading: Some("The Vanishing Third Place"),
                body: "Bowling alleys, churches, diners, barbershops: the places between home and work where people met without planning to. They have been closing for decades, and the time we spent in them went with them.",
                blocks: vec![
                    Block::Stat(Stat {
                        target: StatTarget::Fixed(37.0),
                        suffix: "%",
                        caption: "drop in time spent with friends, 2014 to 2019, before the pandemic",
                        source: "American Time Use Survey, Bureau of Labor Statistics",
                    }),
                    Block::Cards(vec![
                        StatCard {
                            value: "68%",
                            label: "decline in bowling centers from peak (~12,000 → ~3,800)",
                            source: "IBISWorld",
                            color: colors::ACCENT,
                        },
                        StatCard {
                            value: "Below 50%",
                            label: "US church membership, first time in 80 years",
                            source: "Gallup, 2021",
                            color: colors::CAUTION,
                        },
                        StatCard {
                            value: "55% → 27%",
                            label: "men with 6+ close friends, 1990 vs today",
                            source: "Survey Center on American Life",
                            color: colors::COOL,
                        },
                    ]),
                ],
                dark: true,
            },
            Section {
                id: "diverging",
                kicker: Some("Part II: The Paradox"),
                heading: Some("The Diverging Lines"),
                body: "Connection tools went up. Actual connection went down. These three trend lines tell the story of a paradox that defined the last two decades.",
                blocks: vec![Block::Chart(DIVERGING_CHART)],
                dark: false,
            },
            Section {
                id: "cost",
                kicker: Some("Part III: The Cost"),
                heading: Some("The Loneliest Generation"),
                body: "The generation that grew up online reports the most loneliness of any age group, and the gap with older adults is widening.",
                blocks: vec![
                    Block::Stat(Stat {
                        target: StatTarget::Fixed(61.0),
                        suffix: "%",
                        caption: "of young adults (18 to 25) report serious loneliness",
                        source: "Harvard Making Caring Common, 2021",
                    }),
                    Block::Cards(vec![
                        StatCard {
                            value: "1 in 3",
                            label: "US adults feel lonely at least weekly",
                            source: "APA, 2024",
                            color: LONELINESS,
                        },
                        StatCard {
                            value: "1 billion+",
                            label: "people worldwide report loneliness (24% of global population)",
                            source: "Meta-Gallup, 2023",
                            color: colors::COOL,
                        },
                        StatCard {
                            value: "25% vs 16%",
                            label: "fully remote vs on-site workers who feel lonely",
                            source: "Gallup, 2024",
                            color: colors::CAUTION,
                        },
                    ]),
                ],
                dark: false,
            },
            Section {
                id: "redirect",
                kicker: Some("Part IV: The Redirect"),
                heading: Some("Where Did Connection Go?"),
                body: "It did not disappear. It moved onto screens, into one-sided relationships and message threads, where it takes less effort and seems to give less back.",
                blocks: vec![
                    Block::Cards(vec![
                        StatCard {
                            value: "Parasocial Relationships",
                            label: "51% of Americans have likely been in a parasocial relationship. Academic publications on the topic between 2016 and 2020 exceeded the prior 60 years combined.",
                            source: "Thriveworks",
                            color: LONELINESS,
                        },
                        StatCard {
                            value: "Meeting Partners",
                            label: "Meeting through family, church, and neighborhood have all been in steady decline since 1940.",
                            source: "Stanford \"How Couples Meet\" study",
                            color: colors::COOL,
                        },
                        StatCard {
                            value: "Texting vs. Talking",
                            label: "90% of Gen Z check texts within 5 minutes, yet Gen Z reports the highest loneliness of any generation.",
                            source: "SimpleTexting / Cigna U.S. Loneliness Index",
                            color: colors::ACCENT,
                        },
                    ]),
                    Block::Quote("The friction of in-person interaction, the awkwardness and the effort of showing up, wasn't a bug. It was the mechanism through which connection actually formed."),
                ],
                dark: true,
            },
            Section {
                id: "close",
                kicker: None,
                heading: Some("The design challenge"),
                body: "Some connections require friction. The effort of showing up, the discomfort of small talk, the inconvenience of being somewhere at a specific time: these weren't obstacles to connection. They were connection. The best-designed systems of the next decade won't just connect people faster. They'll create reasons for people to be in the same room.",
                blocks: vec![Block::Quote(
                    "We optimized for connection and got networks. The next challenge is optimizing for presence.",
                )],
                dark: false,
            },
        ],
        charts: vec![diverging_chart()],
        highlight: None,
        scenarios: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_share_the_period_axis() {
        let dashboard = dashboard();
        let data = dashboard.chart(DIVERGING_CHART).unwrap().data.as_ref().unwrap();
        assert_eq!(data.periods().len(), 20);
        assert_eq!(data.x.first(), Some(&2005.0));
        assert_eq!(data.plotted("friendTime", 19), Some(3.0));
        assert!(data.derived.is_none());
    }

    #[test]
    fn test_count_up_targets() {
        let dashboard = dashboard();
        let third_place = dashboard.section("third-place").and_then(Section::stat).unwrap();
        let cost = dashboard.section("cost").and_then(Section::stat).unwrap();
        assert_eq!(dashboard.stat_target(third_place), Ok(37.0));
        assert_eq!(dashboard.stat_target(cost), Ok(61.0));
        assert!(dashboard.section("third-place").unwrap().dark);
    }

    #[test]
    fn test_toggle_chart_has_no_scenarios() {
        let dashboard = dashboard();
        assert!(dashboard.scenarios.is_none());
        assert_eq!(
            dashboard.toggle_chart().map(|c| c.id),
            Some(DIVERGING_CHART)
        );
    }
}
