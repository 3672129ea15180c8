//! Page layout: every section and block gets an absolute row range on a
//! single tall page, computed once per width.

use crate::content::{Block, Dashboard, Section, TooltipKind};
use crate::visibility::{Extent, Viewport};

/// Widest the reading column gets.
pub const MAX_CONTENT_WIDTH: u16 = 96;
/// Left/right page margin.
pub const MARGIN: u16 = 2;
/// Rows of the plot area of a chart, borders included.
pub const CHART_HEIGHT: u16 = 16;

/// Greedy word wrap. Words longer than `width` are split.
pub fn wrap_text(text: &str, width: u16) -> Vec<String> {
    let width = usize::from(width.max(1));
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if line_len > 0 {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        let needed = if line_len == 0 { word.len() } else { line_len + 1 + word.len() };
        if needed > width && line_len > 0 {
            lines.push(std::mem::take(&mut line));
            line_len = 0;
        }
        if line_len > 0 {
            line.push(' ');
            line_len += 1;
        }
        line_len += word.len();
        line.extend(word);
    }
    if line_len > 0 || lines.is_empty() {
        lines.push(line);
    }
    lines
}

fn rows(lines: usize) -> u16 {
    u16::try_from(lines).unwrap_or(u16::MAX)
}

fn wrapped_rows(text: &str, width: u16) -> u16 {
    rows(wrap_text(text, width).len())
}

/// Width of the reading column for a terminal `width`.
pub fn content_width(width: u16) -> u16 {
    width.saturating_sub(MARGIN * 2).clamp(1, MAX_CONTENT_WIDTH)
}

/// Rows a block needs at `width`.
pub fn block_height(dashboard: &Dashboard, block: &Block, width: u16) -> u16 {
    match block {
        Block::Pairs { pairs, .. } => rows(pairs.len()) + 1,
        Block::Stat(stat) => {
            1 + wrapped_rows(stat.caption, width) + wrapped_rows(stat.source, width)
        }
        Block::Cards(cards) => {
            let columns = card_columns(cards.len(), width);
            let card_width = width / columns.max(1);
            let tallest = cards
                .iter()
                .map(|c| {
                    wrapped_rows(c.value, card_width.saturating_sub(2))
                        + wrapped_rows(c.label, card_width.saturating_sub(2))
                        + wrapped_rows(c.source, card_width.saturating_sub(2))
                })
                .max()
                .unwrap_or(0);
            let card_rows = rows(cards.len().div_ceil(usize::from(columns.max(1))));
            card_rows * (tallest + 2)
        }
        Block::Chart(id) => match dashboard.chart(id) {
            Some(chart) => {
                let tooltip = match chart.tooltip {
                    TooltipKind::Series => rows(chart.series.len()) + 1,
                    TooltipKind::Curve => 3,
                };
                1 + CHART_HEIGHT + 1 + tooltip + wrapped_rows(chart.note, width)
            }
            None => CHART_HEIGHT,
        },
        Block::Story(id) => {
            let longest = dashboard
                .chart(id)
                .map(|c| {
                    c.series
                        .iter()
                        .filter_map(|s| s.story)
                        .map(|story| wrapped_rows(story, width.saturating_sub(2)))
                        .max()
                        .unwrap_or(1)
                })
                .unwrap_or(1);
            2 + longest
        }
        Block::Ranking(id) => {
            1 + dashboard.chart(id).map_or(0, |c| rows(c.series.len()))
        }
        Block::Exposure { rows: exposure, .. } => 1 + rows(exposure.len()),
        Block::Scenarios => match &dashboard.scenarios {
            Some(group) => {
                let tallest = group
                    .options
                    .iter()
                    .map(|o| {
                        wrapped_rows(o.headline, width)
                            + wrapped_rows(o.description, width)
                            + u16::from(o.figure.is_some())
                            + rows(o.details.len())
                    })
                    .max()
                    .unwrap_or(0);
                2 + tallest
            }
            None => 0,
        },
        Block::Quote(text) => wrapped_rows(text, width.saturating_sub(2)),
        Block::Note(text) => wrapped_rows(text, width),
    }
}

/// Cards per row: side by side when there is room.
pub fn card_columns(count: usize, width: u16) -> u16 {
    let count = rows(count).max(1);
    if width >= 72 {
        count.min(3)
    } else if width >= 48 {
        count.min(2)
    } else {
        1
    }
}

/// Rows of one section, relative text plus absolute block positions.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionLayout {
    pub id: &'static str,
    pub extent: Extent,
    pub kicker_row: Option<u16>,
    pub heading_row: u16,
    pub heading: Vec<String>,
    pub byline_row: Option<u16>,
    pub body_row: u16,
    pub body: Vec<String>,
    pub blocks: Vec<Extent>,
}

/// Heading shown for a section. The opening section carries the title.
pub fn section_heading<'a>(dashboard: &'a Dashboard, index: usize, section: &'a Section) -> Option<&'a str> {
    section
        .heading
        .or(if index == 0 { Some(dashboard.title) } else { None })
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub width: u16,
    pub height: u16,
    pub sections: Vec<SectionLayout>,
}

impl PageLayout {
    /// Lay out `dashboard` for a reading column `width` wide.
    pub fn compute(dashboard: &Dashboard, width: u16) -> Self {
        let width = width.max(1);
        let mut row: u16 = 0;
        let mut sections = Vec::with_capacity(dashboard.sections.len());

        for (index, section) in dashboard.sections.iter().enumerate() {
            let top = row;
            row += 1;

            let kicker_row = section.kicker.map(|_| {
                row += 1;
                row - 1
            });

            let heading = section_heading(dashboard, index, section)
                .map(|h| wrap_text(h, width))
                .unwrap_or_default();
            let heading_row = row;
            row += rows(heading.len());

            let byline_row = (index == 0).then(|| {
                row += 1;
                row - 1
            });

            row += 1;
            let body = wrap_text(section.body, width);
            let body_row = row;
            row += rows(body.len()) + 1;

            let blocks = section
                .blocks
                .iter()
                .map(|block| {
                    let height = block_height(dashboard, block, width);
                    let extent = Extent::new(row, height);
                    row = row.saturating_add(height + 1);
                    extent
                })
                .collect();

            row = row.saturating_add(1);
            sections.push(SectionLayout {
                id: section.id,
                extent: Extent::new(top, row - top),
                kicker_row,
                heading_row,
                heading,
                byline_row,
                body_row,
                body,
                blocks,
            });
        }

        Self {
            width,
            height: row,
            sections,
        }
    }

    #[cfg(test)]
    pub fn section(&self, id: &str) -> Option<&SectionLayout> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Largest scroll offset that still fills `viewport_height` rows.
    pub fn max_scroll(&self, viewport_height: u16) -> u16 {
        self.height.saturating_sub(viewport_height)
    }

    /// The first interactive block intersecting the viewport, as
    /// `(section, block)` indices.
    pub fn focused(&self, dashboard: &Dashboard, viewport: &Viewport) -> Option<(usize, usize)> {
        self.sections
            .iter()
            .zip(&dashboard.sections)
            .enumerate()
            .find_map(|(s, (layout, section))| {
                section
                    .blocks
                    .iter()
                    .zip(&layout.blocks)
                    .position(|(block, extent)| block.is_interactive() && extent.intersects(viewport))
                    .map(|b| (s, b))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{self, DashboardId};

    #[test]
    fn test_wrap_text() {
        assert_eq!(wrap_text("the quick brown fox", 9), vec!["the quick", "brown fox"]);
        assert_eq!(wrap_text("", 10), vec![""]);
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap_text("a  b", 10), vec!["a b"]);
    }

    #[test]
    fn test_content_width_is_bounded() {
        assert_eq!(content_width(80), 76);
        assert_eq!(content_width(300), MAX_CONTENT_WIDTH);
        assert_eq!(content_width(2), 1);
    }

    #[test]
    fn test_sections_tile_the_page() {
        for id in DashboardId::ALL {
            let dashboard = content::load(id);
            let layout = PageLayout::compute(&dashboard, 76);
            assert_eq!(layout.sections.len(), dashboard.sections.len());
            let mut next = 0;
            for section in &layout.sections {
                assert_eq!(section.extent.top, next);
                for block in &section.blocks {
                    assert!(block.top >= section.body_row);
                    assert!(block.bottom() <= section.extent.bottom());
                }
                next = section.extent.bottom();
            }
            assert_eq!(layout.height, next);
        }
    }

    #[test]
    fn test_narrow_columns_make_taller_pages() {
        let dashboard = content::load(DashboardId::Degrees);
        let wide = PageLayout::compute(&dashboard, 96);
        let narrow = PageLayout::compute(&dashboard, 40);
        assert!(narrow.height > wide.height);
    }

    #[test]
    fn test_focus_follows_viewport() {
        let dashboard = content::load(DashboardId::Degrees);
        let layout = PageLayout::compute(&dashboard, 76);
        assert_eq!(layout.focused(&dashboard, &Viewport::new(0, 3)), None);

        let race = layout.section("race").unwrap();
        let chart = race.blocks[1];
        let focused = layout.focused(&dashboard, &Viewport::new(chart.top, 5));
        assert_eq!(focused, Some((1, 1)));
    }

    #[test]
    fn test_max_scroll() {
        let dashboard = content::load(DashboardId::Loneliness);
        let layout = PageLayout::compute(&dashboard, 76);
        assert_eq!(layout.max_scroll(layout.height + 10), 0);
        assert_eq!(layout.max_scroll(10), layout.height - 10);
    }
}
