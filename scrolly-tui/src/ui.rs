//! UI rendering module.
//!
//! The dashboard page is drawn into an off-screen buffer as tall as the
//! whole page, then the rows under the viewport are copied to the frame.
//! Reveal transitions are applied at that copy: each section's cells are
//! faded towards its background and shifted down by its offset.

use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Axis, Block, Borders, Chart as LineChart, Clear, Dataset, GraphType, List, ListItem,
        Paragraph, Tabs, Widget,
    },
    Frame,
};

use crate::app::{App, LogLevel, LOG_HEIGHT, STATUS_HEIGHT, TAB_BAR_HEIGHT};
use crate::content::{
    self, Block as ContentBlock, Chart, DashboardId, Emphasis, Section, Stat, StatCard, TaskPair,
};
use crate::layout::{card_columns, wrap_text, SectionLayout, CHART_HEIGHT};
use crate::theme::{colors, fade, styles};
use crate::tooltip::{self, Unit};
use crate::view::DashboardView;
use crate::visibility::Viewport;

/// Foreground and background colors of one section.
#[derive(Debug, Clone, Copy)]
struct Palette {
    bg: Color,
    card: Color,
    text: Color,
    muted: Color,
    hint: Color,
}

impl Palette {
    fn for_section(dark: bool) -> Self {
        if dark {
            Self {
                bg: colors::SURFACE_DARK,
                card: colors::SURFACE_DARK,
                text: colors::INK_INVERSE,
                muted: colors::INK_LIGHT,
                hint: colors::INK_MUTED,
            }
        } else {
            Self {
                bg: colors::BG,
                card: colors::SURFACE,
                text: colors::INK,
                muted: colors::INK_MUTED,
                hint: colors::INK_LIGHT,
            }
        }
    }

    fn text(&self) -> Style {
        Style::default().fg(self.text).bg(self.bg)
    }

    fn muted(&self) -> Style {
        Style::default().fg(self.muted).bg(self.bg)
    }

    fn hint(&self) -> Style {
        Style::default().fg(self.hint).bg(self.bg)
    }
}

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &App, now: Instant) {
    let area = frame.area();

    // Fill background with theme color
    let bg_block = Block::default().style(Style::default().bg(colors::BG));
    frame.render_widget(bg_block, area);

    // Create main layout
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TAB_BAR_HEIGHT), // Tabs
            Constraint::Min(0),                 // Page
            Constraint::Length(STATUS_HEIGHT),  // Status bar
            Constraint::Length(LOG_HEIGHT),     // Log area
        ])
        .split(area);

    render_tabs(frame, app, chunks[0]);
    match app.view() {
        Some(view) => render_page(frame, view, chunks[1], now),
        None => render_empty_state(frame, chunks[1], "Loading..."),
    }
    render_status(frame, app, chunks[2]);
    render_logs(frame, app, chunks[3]);

    if app.show_help {
        render_help_overlay(frame, area);
    }
}

/// Render the tab bar
fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = DashboardId::ALL
        .iter()
        .map(|id| {
            let style = if *id == app.active {
                styles::tab_active()
            } else {
                styles::tab_inactive()
            };
            Line::from(Span::styled(format!(" {} ", id.name()), style))
        })
        .collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .title(" Data Stories ")
                .title_style(styles::heading())
                .borders(Borders::ALL)
                .border_style(styles::border())
                .style(Style::default().bg(colors::SURFACE_ALT)),
        )
        .select(app.active.index())
        .style(styles::text())
        .highlight_style(styles::tab_active())
        .divider(Span::styled(" | ", styles::border()));

    frame.render_widget(tabs, area);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let status = Paragraph::new(format!(" {}", app.status_text()))
        .style(Style::default().fg(colors::INK_MUTED).bg(colors::SURFACE_ALT));
    frame.render_widget(status, area);
}

/// Render the log area
fn render_logs(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .logs
        .iter()
        .rev()
        .take(area.height.saturating_sub(2) as usize)
        .map(|entry| {
            let (prefix, style) = match entry.level {
                LogLevel::Info => ("i", styles::info()),
                LogLevel::Success => ("+", styles::success()),
                LogLevel::Warning => ("!", styles::warning()),
                LogLevel::Error => ("x", styles::error()),
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("[{}] ", prefix), style),
                Span::styled(
                    format!("{} ", entry.timestamp.format("%H:%M:%S")),
                    styles::text_hint(),
                ),
                Span::styled(entry.message.as_str(), styles::text_muted()),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" Log ")
            .title_style(styles::text_hint())
            .borders(Borders::ALL)
            .border_style(styles::border())
            .style(Style::default().bg(colors::SURFACE_ALT)),
    );

    frame.render_widget(list, area);
}

/// Render empty state message
fn render_empty_state(frame: &mut Frame, area: Rect, message: &str) {
    let paragraph = Paragraph::new(message)
        .style(styles::text_hint())
        .alignment(Alignment::Center);

    let centered = Rect {
        y: area.y + area.height / 2,
        height: 1,
        ..area
    };
    frame.render_widget(paragraph, centered);
}

// === Page ===

fn render_page(frame: &mut Frame, view: &DashboardView, area: Rect, now: Instant) {
    let layout = view.layout();
    let viewport = Viewport::new(view.scroll(), area.height);
    let dashboard = view.dashboard();
    let focused = layout.focused(dashboard, &viewport);

    let mut page = Buffer::empty(Rect::new(0, 0, layout.width, layout.height));
    let mut appearances = Vec::with_capacity(dashboard.sections.len());

    for (index, (section, placed)) in dashboard.sections.iter().zip(&layout.sections).enumerate() {
        let palette = Palette::for_section(section.dark);
        let appearance = view.appearance(section.id, now);
        appearances.push((placed, palette, appearance.offset));

        // sections shifted into view still need drawing
        let reach = Viewport::new(
            viewport.top.saturating_sub(appearance.offset),
            viewport.height.saturating_add(appearance.offset),
        );
        if !placed.extent.intersects(&reach) {
            continue;
        }

        let rect = Rect::new(0, placed.extent.top, layout.width, placed.extent.height);
        page.set_style(rect, Style::default().bg(palette.bg));
        let focus = focused.and_then(|(s, b)| (s == index).then_some(b));
        render_section(&mut page, view, index, section, placed, palette, focus);
        if appearance.opacity < 1.0 {
            fade_rect(&mut page, rect, palette.bg, appearance.opacity);
        }
    }

    let x0 = area.x + area.width.saturating_sub(layout.width) / 2;
    let buf = frame.buffer_mut();
    for y in 0..area.height {
        let row = viewport.top.saturating_add(y);
        let screen_y = area.y + y;
        let Some((placed, palette, offset)) = appearances
            .iter()
            .find(|(placed, _, _)| placed.extent.top <= row && row < placed.extent.bottom())
        else {
            buf.set_style(
                Rect::new(area.x, screen_y, area.width, 1),
                Style::default().bg(colors::BG),
            );
            continue;
        };

        buf.set_style(
            Rect::new(area.x, screen_y, area.width, 1),
            Style::default().bg(palette.bg),
        );
        let Some(source) = row.checked_sub(*offset) else {
            continue;
        };
        if source < placed.extent.top {
            continue;
        }
        for x in 0..layout.width.min(area.width) {
            if let (Some(src), Some(dst)) = (page.cell((x, source)), buf.cell_mut((x0 + x, screen_y))) {
                *dst = src.clone();
            }
        }
    }
}

/// Blend every cell in `rect` towards `bg`.
fn fade_rect(buf: &mut Buffer, rect: Rect, bg: Color, opacity: f32) {
    for y in rect.top()..rect.bottom() {
        for x in rect.left()..rect.right() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                let fg = fade(cell.fg, bg, opacity);
                cell.set_fg(fg);
                if cell.bg != bg {
                    let faded = fade(cell.bg, bg, opacity);
                    cell.set_bg(faded);
                }
            }
        }
    }
}

fn render_section(
    buf: &mut Buffer,
    view: &DashboardView,
    index: usize,
    section: &Section,
    placed: &SectionLayout,
    palette: Palette,
    focus: Option<usize>,
) {
    let width = buf.area.width;

    if let (Some(kicker), Some(row)) = (section.kicker, placed.kicker_row) {
        buf.set_stringn(
            0,
            row,
            kicker.to_uppercase(),
            usize::from(width),
            styles::kicker().bg(palette.bg),
        );
    }

    let heading_style = if index == 0 {
        styles::title()
    } else {
        styles::heading()
    };
    for (i, line) in placed.heading.iter().enumerate() {
        buf.set_stringn(
            0,
            placed.heading_row + i as u16,
            line,
            usize::from(width),
            heading_style.fg(palette.text).bg(palette.bg),
        );
    }

    if let Some(row) = placed.byline_row {
        buf.set_stringn(0, row, view.dashboard().byline, usize::from(width), palette.hint());
    }

    for (i, line) in placed.body.iter().enumerate() {
        buf.set_stringn(0, placed.body_row + i as u16, line, usize::from(width), palette.muted());
    }

    for (b, (block, extent)) in section.blocks.iter().zip(&placed.blocks).enumerate() {
        let area = Rect::new(0, extent.top, width, extent.height);
        let focused = focus == Some(b);
        match block {
            ContentBlock::Pairs { pairs, .. } => {
                render_pairs(buf, area, pairs, view.is_struck(), palette)
            }
            ContentBlock::Stat(stat) => render_stat(buf, area, view, section.id, stat, palette),
            ContentBlock::Cards(cards) => render_cards(buf, area, cards, palette),
            ContentBlock::Chart(id) => match view.dashboard().chart(id) {
                Some(chart) => render_chart(buf, area, view, chart, palette, focused),
                None => render_placeholder(buf, area, "Chart unavailable", None),
            },
            ContentBlock::Story(id) => render_story(buf, area, view, id, palette),
            ContentBlock::Ranking(id) => render_ranking(buf, area, view, id, palette),
            ContentBlock::Exposure { chart, rows } => {
                render_exposure(buf, area, view, chart, rows, palette)
            }
            ContentBlock::Scenarios => render_scenarios(buf, area, view, palette, focused),
            ContentBlock::Quote(text) => render_quote(buf, area, text, palette),
            ContentBlock::Note(text) => render_wrapped(buf, area, text, palette.hint()),
        }
    }
}

fn render_wrapped(buf: &mut Buffer, area: Rect, text: &str, style: Style) {
    for (i, line) in wrap_text(text, area.width).iter().enumerate() {
        let y = area.y + i as u16;
        if y >= area.bottom() {
            break;
        }
        buf.set_stringn(area.x, y, line, usize::from(area.width), style);
    }
}

fn render_placeholder(buf: &mut Buffer, area: Rect, message: &str, detail: Option<String>) {
    let mut lines = vec![Line::from(""), Line::from(message.to_string())];
    lines.extend(detail.map(Line::from));
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::bordered().border_style(styles::border()))
        .style(styles::placeholder());
    paragraph.render(area, buf);
}

// === Blocks ===

fn render_pairs(buf: &mut Buffer, area: Rect, pairs: &[TaskPair], struck: bool, palette: Palette) {
    let task_width = area.width * 2 / 5;
    let then_width = (area.width - task_width) / 2;
    let now_width = area.width - task_width - then_width;
    let then_x = area.x + task_width;
    let now_x = then_x + then_width;

    let header = Style::default()
        .fg(palette.hint)
        .bg(palette.bg)
        .add_modifier(Modifier::BOLD);
    buf.set_stringn(area.x, area.y, "TASK", usize::from(task_width), header);
    buf.set_stringn(then_x, area.y, "THEN", usize::from(then_width), header);
    buf.set_stringn(now_x, area.y, "NOW", usize::from(now_width), header);

    let then_style = if struck {
        styles::struck().bg(palette.bg)
    } else {
        palette.muted()
    };
    for (i, pair) in pairs.iter().enumerate() {
        let y = area.y + 1 + i as u16;
        if y >= area.bottom() {
            break;
        }
        let gap = |w: u16| usize::from(w.saturating_sub(1));
        buf.set_stringn(area.x, y, pair.task, gap(task_width), palette.text());
        buf.set_stringn(then_x, y, pair.then, gap(then_width), then_style);
        buf.set_stringn(now_x, y, pair.now, usize::from(now_width), styles::now_column().bg(palette.bg));
    }
}

fn render_stat(
    buf: &mut Buffer,
    area: Rect,
    view: &DashboardView,
    section: &str,
    stat: &Stat,
    palette: Palette,
) {
    let figure = match view.count_up(section) {
        Some(count_up) => format!("{}{}", count_up.value(), stat.suffix),
        None => "n/a".to_string(),
    };
    buf.set_stringn(area.x, area.y, figure, usize::from(area.width), styles::figure().bg(palette.bg));

    let caption = wrap_text(stat.caption, area.width);
    let caption_rows = caption.len() as u16;
    for (i, line) in caption.iter().enumerate() {
        buf.set_stringn(area.x, area.y + 1 + i as u16, line, usize::from(area.width), palette.text());
    }
    let source = Rect {
        y: area.y + 1 + caption_rows,
        height: area.height.saturating_sub(1 + caption_rows),
        ..area
    };
    render_wrapped(buf, source, stat.source, palette.hint());
}

fn render_cards(buf: &mut Buffer, area: Rect, cards: &[StatCard], palette: Palette) {
    let columns = card_columns(cards.len(), area.width).max(1);
    let card_width = area.width / columns;
    let inner_width = card_width.saturating_sub(2);
    let tallest = cards
        .iter()
        .map(|c| {
            wrap_text(c.value, inner_width).len()
                + wrap_text(c.label, inner_width).len()
                + wrap_text(c.source, inner_width).len()
        })
        .max()
        .unwrap_or(0) as u16;
    let card_height = tallest + 2;

    for (i, card) in cards.iter().enumerate() {
        let column = i as u16 % columns;
        let row = i as u16 / columns;
        let rect = Rect::new(
            area.x + column * card_width,
            area.y + row * card_height,
            card_width,
            card_height,
        )
        .intersection(area);

        let mut lines: Vec<Line> = Vec::new();
        let value_style = Style::default().fg(card.color).add_modifier(Modifier::BOLD);
        lines.extend(wrap_text(card.value, inner_width).into_iter().map(|l| Line::styled(l, value_style)));
        lines.extend(
            wrap_text(card.label, inner_width)
                .into_iter()
                .map(|l| Line::styled(l, Style::default().fg(palette.text))),
        );
        lines.extend(
            wrap_text(card.source, inner_width)
                .into_iter()
                .map(|l| Line::styled(l, Style::default().fg(palette.hint))),
        );

        Paragraph::new(lines)
            .block(
                Block::bordered()
                    .border_style(Style::default().fg(if palette.bg == colors::SURFACE_DARK {
                        colors::INK_MUTED
                    } else {
                        colors::BORDER
                    }))
                    .style(Style::default().bg(palette.card)),
            )
            .render(rect, buf);
    }
}

/// One line of the rendered chart: its points and how to draw them.
struct Trace {
    name: String,
    points: Vec<(f64, f64)>,
    style: Style,
    weight: f32,
}

fn vertical(x: f64, bounds: [f64; 2]) -> Vec<(f64, f64)> {
    vec![(x, bounds[0]), (x, bounds[1])]
}

fn render_chart(
    buf: &mut Buffer,
    area: Rect,
    view: &DashboardView,
    chart: &Chart,
    palette: Palette,
    focused: bool,
) {
    buf.set_stringn(
        area.x,
        area.y,
        chart.title,
        usize::from(area.width),
        styles::heading().fg(palette.text).bg(palette.bg),
    );
    if focused {
        let hint = "1-9 select  n/p cycle  0 clear  <-/-> period";
        let width = hint.len() as u16;
        if area.width > width + chart.title.len() as u16 + 2 {
            buf.set_stringn(area.right() - width, area.y, hint, usize::from(width), palette.hint());
        }
    }

    let plot = Rect::new(area.x, area.y + 1, area.width, CHART_HEIGHT.min(area.height.saturating_sub(1)));
    let data = match &chart.data {
        Ok(data) => data,
        Err(e) => {
            render_placeholder(buf, plot, "Chart unavailable", Some(e.to_string()));
            return;
        }
    };

    let cursor = view.cursor(chart);
    let x_min = data.x.first().copied().unwrap_or(0.0);
    let x_max = data.x.last().copied().unwrap_or(1.0);
    let guide = Style::default().fg(colors::BORDER);

    let mut traces: Vec<Trace> = Vec::new();
    if let Some((low, high)) = chart.zone {
        let style = Style::default().fg(fade(colors::GROWTH, palette.bg, 0.5));
        traces.push(Trace { name: String::new(), points: vertical(low, chart.y_bounds), style, weight: 0.0 });
        traces.push(Trace { name: String::new(), points: vertical(high, chart.y_bounds), style, weight: 0.0 });
    }
    if let Some(y) = chart.reference_y {
        traces.push(Trace { name: String::new(), points: vec![(x_min, y), (x_max, y)], style: guide, weight: 0.0 });
    }
    if let Some((x, _)) = chart.reference_x {
        let style = Style::default().fg(palette.hint);
        traces.push(Trace { name: String::new(), points: vertical(x, chart.y_bounds), style, weight: 0.0 });
    }
    if let Some(x) = data.x.get(cursor) {
        let style = Style::default().fg(fade(palette.muted, palette.bg, 0.6));
        traces.push(Trace { name: String::new(), points: vertical(*x, chart.y_bounds), style, weight: 0.1 });
    }
    if chart.emphasis == Emphasis::Markers {
        if let Some(group) = &view.dashboard().scenarios {
            for option in &group.options {
                let Some(x) = option.marker_x else {
                    continue;
                };
                let stroke = view.scenario().stroke_for(option.id);
                traces.push(Trace {
                    name: option.label.to_string(),
                    points: vertical(x, chart.y_bounds),
                    style: Style::default().fg(fade(option.color, palette.bg, stroke.opacity)),
                    weight: stroke.width,
                });
            }
        }
    }

    for series in &chart.series {
        if !view.is_series_shown(chart, series.id) {
            continue;
        }
        let Some(points) = data.points(series.id) else {
            continue;
        };
        let stroke = view.stroke_for(chart, series.id);
        let mut style = Style::default().fg(fade(series.color, palette.bg, stroke.opacity));
        if stroke.is_heavy() {
            style = style.add_modifier(Modifier::BOLD);
        }
        traces.push(Trace {
            name: series.short.to_string(),
            points,
            style,
            weight: stroke.width * stroke.opacity,
        });
    }

    // heavier lines are drawn last so they sit on top
    traces.sort_by(|a, b| a.weight.total_cmp(&b.weight));
    let datasets: Vec<Dataset> = traces
        .iter()
        .map(|t| {
            Dataset::default()
                .name(t.name.as_str())
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(t.style)
                .data(&t.points)
        })
        .collect();

    let periods = data.periods();
    let mut x_labels: Vec<Span> = Vec::new();
    if let Some(first) = periods.first() {
        x_labels.push(Span::styled(first.as_str(), palette.hint()));
    }
    if periods.len() > 2 {
        x_labels.push(Span::styled(periods[periods.len() / 2].as_str(), palette.hint()));
    }
    if periods.len() > 1 {
        if let Some(last) = periods.last() {
            x_labels.push(Span::styled(last.as_str(), palette.hint()));
        }
    }
    let [y_low, y_high] = chart.y_bounds;
    let y_labels = vec![
        Span::styled(Unit::Index.format(y_low), palette.hint()),
        Span::styled(Unit::Index.format((y_low + y_high) / 2.0), palette.hint()),
        Span::styled(Unit::Index.format(y_high), palette.hint()),
    ];

    let mut block = Block::bordered()
        .border_style(if focused {
            styles::border_focused()
        } else {
            styles::border()
        })
        .style(Style::default().bg(palette.card));
    if let Some((_, label)) = chart.reference_x {
        block = block.title(Line::styled(format!(" | {} ", label), palette.hint()).right_aligned());
    }

    LineChart::new(datasets)
        .block(block)
        .style(Style::default().bg(palette.card))
        .legend_position(None)
        .x_axis(Axis::default().bounds([x_min, x_max]).labels(x_labels).style(guide))
        .y_axis(
            Axis::default()
                .title(Span::styled(chart.y_label, palette.hint()))
                .bounds(chart.y_bounds)
                .labels(y_labels)
                .style(guide),
        )
        .render(plot, buf);

    let mut y = plot.bottom();
    if y < area.bottom() {
        render_chart_keys(buf, Rect::new(area.x, y, area.width, 1), view, chart, palette);
    }
    y += 1;

    if let Some(tip) = view.tooltip(chart) {
        if y < area.bottom() {
            buf.set_stringn(area.x, y, &tip.header, usize::from(area.width), palette.text().add_modifier(Modifier::BOLD));
        }
        for (i, entry) in tip.entries.iter().enumerate() {
            let row = y + 1 + i as u16;
            if row >= area.bottom() {
                break;
            }
            let line = Line::from(vec![
                Span::styled("  ■ ", Style::default().fg(entry.color).bg(palette.bg)),
                Span::styled(entry.line(), palette.text()),
            ]);
            buf.set_line(area.x, row, &line, area.width);
        }
    }
    y += match chart.tooltip {
        content::TooltipKind::Series => chart.series.len() as u16 + 1,
        content::TooltipKind::Curve => 3,
    };

    let note = Rect {
        y,
        height: area.bottom().saturating_sub(y),
        ..area
    };
    render_wrapped(buf, note, chart.note, palette.hint());
}

/// Numbered keys under a chart: the series, or the scenario markers.
fn render_chart_keys(buf: &mut Buffer, area: Rect, view: &DashboardView, chart: &Chart, palette: Palette) {
    let mut spans: Vec<Span> = Vec::new();
    match (chart.emphasis, &view.dashboard().scenarios) {
        (Emphasis::Markers, Some(group)) => {
            for (i, option) in group.options.iter().enumerate() {
                let style = if view.scenario().is_selected(option.id) {
                    styles::button_active(option.color)
                } else {
                    styles::button()
                };
                spans.push(Span::styled(format!("{} {}  ", i + 1, option.label), style.bg(palette.bg)));
            }
        }
        _ => {
            for (i, series) in chart.series.iter().enumerate() {
                let stroke = view.stroke_for(chart, series.id);
                let mut style = Style::default()
                    .fg(fade(series.color, palette.bg, stroke.opacity.max(0.4)))
                    .bg(palette.bg);
                if stroke.is_heavy() {
                    style = style.add_modifier(Modifier::BOLD);
                }
                if !view.is_series_shown(chart, series.id) {
                    style = style.fg(palette.hint).add_modifier(Modifier::CROSSED_OUT);
                }
                spans.push(Span::styled(format!("{} {}  ", i + 1, series.short), style));
            }
        }
    }
    buf.set_line(area.x, area.y, &Line::from(spans), area.width);
}

fn render_story(buf: &mut Buffer, area: Rect, view: &DashboardView, chart_id: &str, palette: Palette) {
    let Some(chart) = view.dashboard().chart(chart_id) else {
        return;
    };
    let selected = view.highlight().selected().and_then(|id| chart.style(id));

    let (title, color, text) = match selected {
        Some(series) => {
            let change = chart
                .data
                .as_ref()
                .ok()
                .and_then(|d| d.percent_change(series.id))
                .map(tooltip::percent_change)
                .unwrap_or_default();
            (
                format!(" {} {} ", series.short, change),
                series.color,
                series.story.unwrap_or(""),
            )
        }
        None => (
            " Pick a field ".to_string(),
            palette.hint,
            "Select a series with 1-9 while the chart is in view to read its story.",
        ),
    };

    let lines: Vec<Line> = wrap_text(text, area.width.saturating_sub(2))
        .into_iter()
        .map(|l| Line::styled(l, Style::default().fg(palette.text)))
        .collect();
    Paragraph::new(lines)
        .block(
            Block::bordered()
                .border_style(Style::default().fg(color))
                .title(Span::styled(title, Style::default().fg(color).add_modifier(Modifier::BOLD)))
                .style(Style::default().bg(palette.card)),
        )
        .render(area, buf);
}

/// Width of a proportional bar for `value` out of `max`.
fn bar(value: f64, max: f64, width: u16) -> String {
    if max <= 0.0 {
        return String::new();
    }
    let cells = ((value.abs() / max) * f64::from(width)).round() as usize;
    "█".repeat(cells.min(usize::from(width)))
}

fn change_style(change: f64, palette: Palette) -> Style {
    let color = if change >= 0.0 {
        colors::GROWTH
    } else {
        colors::DECLINE
    };
    Style::default().fg(color).bg(palette.bg)
}

fn render_ranking(buf: &mut Buffer, area: Rect, view: &DashboardView, chart_id: &str, palette: Palette) {
    let Some(chart) = view.dashboard().chart(chart_id) else {
        return;
    };
    let Ok(data) = &chart.data else {
        render_placeholder(buf, area, "Ranking unavailable", None);
        return;
    };
    let periods = data.periods();
    let header = match (periods.first(), periods.last()) {
        (Some(first), Some(last)) => format!("CHANGE, {} TO {}", first, last),
        _ => "CHANGE".to_string(),
    };
    buf.set_stringn(area.x, area.y, header, usize::from(area.width), palette.hint().add_modifier(Modifier::BOLD));

    let ranked = data.ranked();
    let max = ranked.iter().map(|d| d.percent_change.abs()).fold(0.0, f64::max);
    let label_width: u16 = 28;
    let value_width: u16 = 9;
    let bar_width = area.width.saturating_sub(label_width + value_width + 4).min(30);

    for (i, derived) in ranked.iter().enumerate() {
        let y = area.y + 1 + i as u16;
        if y >= area.bottom() {
            break;
        }
        let label = data.series(&derived.id).map_or(derived.id.as_str(), |s| s.label.as_str());
        let mut label_style = palette.text();
        if view.highlight().is_selected(&derived.id) {
            label_style = label_style.add_modifier(Modifier::BOLD);
        }
        let line = Line::from(vec![
            Span::styled(format!("{:>2}. ", i + 1), palette.hint()),
            Span::styled(format!("{:<w$}", label, w = usize::from(label_width)), label_style),
            Span::styled(
                format!("{:>w$} ", tooltip::percent_change(derived.percent_change), w = usize::from(value_width)),
                change_style(derived.percent_change, palette),
            ),
            Span::styled(bar(derived.percent_change, max, bar_width), change_style(derived.percent_change, palette)),
        ]);
        buf.set_line(area.x, y, &line, area.width);
    }
}

fn render_exposure(
    buf: &mut Buffer,
    area: Rect,
    view: &DashboardView,
    chart_id: &str,
    rows: &[content::Exposure],
    palette: Palette,
) {
    let header = format!("{:<28}{:>12}  {:>12}", "FIELD", "AI EXPOSURE", "ENROLLMENT");
    buf.set_stringn(area.x, area.y, header, usize::from(area.width), palette.hint().add_modifier(Modifier::BOLD));

    let Some(chart) = view.dashboard().chart(chart_id) else {
        return;
    };
    let data = chart.data.as_ref().ok();
    for (i, row) in rows.iter().enumerate() {
        let y = area.y + 1 + i as u16;
        if y >= area.bottom() {
            break;
        }
        let label = data
            .and_then(|d| d.series(row.series))
            .map_or(row.series, |s| s.label.as_str());
        let change = data.and_then(|d| d.percent_change(row.series));
        let exposure_style = if row.exposure >= 50.0 {
            Style::default().fg(colors::ACCENT).bg(palette.bg)
        } else {
            palette.muted()
        };
        let line = Line::from(vec![
            Span::styled(format!("{:<28}", label), palette.text()),
            Span::styled(format!("{:>11}%", row.exposure), exposure_style),
            Span::raw("  "),
            match change {
                Some(change) => Span::styled(
                    format!("{:>12}", tooltip::percent_change(change)),
                    change_style(change, palette),
                ),
                None => Span::styled(format!("{:>12}", "n/a"), palette.hint()),
            },
        ]);
        buf.set_line(area.x, y, &line, area.width);
    }
}

fn render_scenarios(buf: &mut Buffer, area: Rect, view: &DashboardView, palette: Palette, focused: bool) {
    let Some(group) = &view.dashboard().scenarios else {
        return;
    };

    let mut buttons: Vec<Span> = Vec::new();
    if focused {
        buttons.push(Span::styled("> ", styles::kicker().bg(palette.bg)));
    }
    for (i, option) in group.options.iter().enumerate() {
        let style = if view.scenario().is_selected(option.id) {
            styles::button_active(option.color).add_modifier(Modifier::REVERSED)
        } else {
            styles::button().bg(palette.bg)
        };
        buttons.push(Span::styled(format!(" {} {} ", i + 1, option.label), style));
        buttons.push(Span::styled(" ", palette.text()));
    }
    buf.set_line(area.x, area.y, &Line::from(buttons), area.width);

    let body = Rect {
        y: area.y + 2,
        height: area.height.saturating_sub(2),
        ..area
    };
    let Some(option) = view.scenario().selected().and_then(|id| group.option(id)) else {
        render_wrapped(buf, body, "Choose a scenario with its number key.", palette.hint());
        return;
    };

    let mut lines: Vec<Line> = Vec::new();
    let headline = Style::default().fg(option.color).bg(palette.bg).add_modifier(Modifier::BOLD);
    lines.extend(wrap_text(option.headline, area.width).into_iter().map(|l| Line::styled(l, headline)));
    lines.extend(wrap_text(option.description, area.width).into_iter().map(|l| Line::styled(l, palette.muted())));
    if let Some((value, caption)) = option.figure {
        lines.push(Line::from(vec![
            Span::styled(Unit::Percent.format(value), styles::figure().fg(option.color).bg(palette.bg)),
            Span::styled(format!(" {}", caption), palette.text()),
        ]));
    }
    for (value, label) in &option.details {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<24}", value), palette.text().add_modifier(Modifier::BOLD)),
            Span::styled(*label, palette.muted()),
        ]));
    }
    for (i, line) in lines.iter().enumerate() {
        let y = body.y + i as u16;
        if y >= body.bottom() {
            break;
        }
        buf.set_line(body.x, y, line, body.width);
    }
}

fn render_quote(buf: &mut Buffer, area: Rect, text: &str, palette: Palette) {
    let style = palette.muted().add_modifier(Modifier::ITALIC);
    for (i, line) in wrap_text(text, area.width.saturating_sub(2)).iter().enumerate() {
        let y = area.y + i as u16;
        if y >= area.bottom() {
            break;
        }
        buf.set_stringn(area.x, y, "┃ ", 2, Style::default().fg(colors::ACCENT).bg(palette.bg));
        buf.set_stringn(area.x + 2, y, line, usize::from(area.width.saturating_sub(2)), style);
    }
}

// === Overlays ===

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(56, 24, area);

    frame.render_widget(Clear, popup_area);

    let section = |title: &'static str| {
        Line::from(Span::styled(title, styles::kicker()))
    };
    let key = |keys: &'static str, action: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<18}", keys), Style::default().fg(colors::COOL)),
            Span::styled(action, styles::text()),
        ])
    };

    let help_text = vec![
        Line::from(Span::styled("Keyboard Shortcuts", styles::heading())),
        Line::from(""),
        section("Reading"),
        key("j/k or Up/Down", "Scroll one row"),
        key("Space/PgDn, PgUp", "Scroll one page"),
        key("g / G", "Jump to top / bottom"),
        key("Tab/Shift+Tab", "Switch dashboard"),
        Line::from(""),
        section("Charts and scenarios in view"),
        key("1-9", "Highlight, toggle or pick"),
        key("n / p", "Next / previous selection"),
        key("0 or Esc", "Clear selection"),
        key("h/l or Left/Right", "Move the tooltip period"),
        Line::from(""),
        section("General"),
        key("m", "Toggle reduced motion"),
        key("r", "Re-check config file"),
        key("?", "Toggle this help"),
        key("q / Ctrl+C", "Quit"),
        Line::from(""),
        Line::from(Span::styled("Press Esc or ? to close", styles::text_hint())),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .title_style(styles::heading())
                .borders(Borders::ALL)
                .border_style(styles::border_focused())
                .style(styles::modal_content_bg()),
        )
        .alignment(Alignment::Left);

    frame.render_widget(help, popup_area);
}

/// Create a centered rect of fixed size
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
