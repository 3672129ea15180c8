//! Tooltip text for the chart cursor.

use ratatui::style::Color;

use crate::highlight::StrokeStyle;

/// Series at or below this opacity are left out of tooltips.
pub const TOOLTIP_MIN_OPACITY: f32 = 0.3;

/// How a series value is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Percent,
    Hours,
    Index,
    PercentagePoints,
}

impl Unit {
    pub fn format(&self, value: f64) -> String {
        match self {
            Unit::Percent => format!("{}%", trim(value)),
            Unit::Hours => format!("{} hrs", trim(value)),
            Unit::Index => trim(value),
            Unit::PercentagePoints => format!("{}%", signed(value)),
        }
    }
}

/// `119400.0` -> `"119.4k"`.
pub fn thousands(value: f64) -> String {
    format!("{:.1}k", value / 1000.0)
}

/// `-10.0` -> `"-10.0%"`, `134.3` -> `"+134.3%"`.
pub fn percent_change(value: f64) -> String {
    format!("{}{:.1}%", if value > 0.0 { "+" } else { "" }, value)
}

fn signed(value: f64) -> String {
    if value > 0.0 {
        format!("+{}", trim(value))
    } else {
        trim(value)
    }
}

/// Drop a trailing `.0`.
fn trim(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

/// Period header, marking estimated periods.
pub fn period_label(period: &str, estimated: &[&str]) -> String {
    if estimated.contains(&period) {
        format!("{} (est)", period)
    } else {
        period.to_string()
    }
}

/// One line of a tooltip.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipEntry {
    pub label: String,
    pub value: String,
    pub detail: Option<String>,
    pub color: Color,
    pub stroke: StrokeStyle,
}

impl TooltipEntry {
    pub fn line(&self) -> String {
        match &self.detail {
            Some(detail) => format!("{} {} ({})", self.label, self.value, detail),
            None => format!("{}: {}", self.label, self.value),
        }
    }
}

/// Entries for series that are drawn prominently enough to be read.
pub fn visible_entries(entries: Vec<TooltipEntry>) -> Vec<TooltipEntry> {
    entries
        .into_iter()
        .filter(|e| e.stroke.opacity > TOOLTIP_MIN_OPACITY)
        .collect()
}

/// Qualitative difficulty for the accomplishment curve.
pub fn difficulty_label(difficulty: f64) -> &'static str {
    if difficulty <= 10.0 {
        "Very Low"
    } else if difficulty <= 30.0 {
        "Low"
    } else if difficulty <= 60.0 {
        "Moderate"
    } else if difficulty <= 80.0 {
        "High"
    } else {
        "Very High"
    }
}

/// Qualitative satisfaction for the accomplishment curve.
pub fn satisfaction_label(satisfaction: f64) -> &'static str {
    if satisfaction > 80.0 {
        "High"
    } else if satisfaction > 40.0 {
        "Moderate"
    } else {
        "Low"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(label: &str, stroke: StrokeStyle) -> TooltipEntry {
        TooltipEntry {
            label: label.to_string(),
            value: "100".to_string(),
            detail: None,
            color: Color::Rgb(0, 0, 0),
            stroke,
        }
    }

    #[test]
    fn test_units() {
        assert_eq!(Unit::Percent.format(90.0), "90%");
        assert_eq!(Unit::Hours.format(6.5), "6.5 hrs");
        assert_eq!(Unit::Index.format(234.3), "234.3");
        assert_eq!(thousands(119400.0), "119.4k");
        assert_eq!(Unit::PercentagePoints.format(-0.5), "-0.5%");
        assert_eq!(Unit::PercentagePoints.format(3.0), "+3%");
    }

    #[test]
    fn test_percent_change() {
        assert_eq!(percent_change(134.3), "+134.3%");
        assert_eq!(percent_change(-10.0), "-10.0%");
        assert_eq!(percent_change(0.0), "0.0%");
    }

    #[test]
    fn test_period_label_marks_estimates() {
        assert_eq!(period_label("2024", &["2024"]), "2024 (est)");
        assert_eq!(period_label("2023", &["2024"]), "2023");
    }

    #[test]
    fn test_dimmed_series_are_hidden() {
        let entries = vec![
            entry("CS", StrokeStyle::EMPHASIZED),
            entry("Biz", StrokeStyle::DIMMED),
            entry("Edu", StrokeStyle::NORMAL),
        ];
        let labels: Vec<String> = visible_entries(entries).into_iter().map(|e| e.label).collect();
        assert_eq!(labels, vec!["CS", "Edu"]);
    }

    #[test]
    fn test_entry_line() {
        let mut e = entry("CS", StrokeStyle::EMPHASIZED);
        assert_eq!(e.line(), "CS: 100");
        e.detail = Some("119.4k".to_string());
        assert_eq!(e.line(), "CS 100 (119.4k)");
    }

    #[test]
    fn test_curve_labels() {
        assert_eq!(difficulty_label(8.0), "Very Low");
        assert_eq!(difficulty_label(30.0), "Low");
        assert_eq!(difficulty_label(50.0), "Moderate");
        assert_eq!(difficulty_label(80.0), "High");
        assert_eq!(difficulty_label(90.0), "Very High");
        assert_eq!(satisfaction_label(100.0), "High");
        assert_eq!(satisfaction_label(60.0), "Moderate");
        assert_eq!(satisfaction_label(40.0), "Low");
    }
}
