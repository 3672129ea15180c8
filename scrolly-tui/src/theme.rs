//! Design tokens.
//!
//! One immutable palette shared by every dashboard: warm paper background,
//! near-black ink, and a handful of semantic accents. Dashboards only add
//! their series colors on top of these.

use ratatui::style::Color;

/// Shared color tokens
pub mod colors {
    use super::Color;

    // === Surfaces ===
    /// Paper - page background
    pub const BG: Color = Color::Rgb(0xFA, 0xFA, 0xF7);
    /// Card and table surfaces
    pub const SURFACE: Color = Color::Rgb(0xFF, 0xFF, 0xFF);
    /// Alternate surface for panels and the tab bar
    pub const SURFACE_ALT: Color = Color::Rgb(0xF3, 0xF1, 0xEC);
    /// Background of dark feature sections
    pub const SURFACE_DARK: Color = Color::Rgb(0x1A, 0x1A, 0x18);

    // === Ink ===
    /// Primary text
    pub const INK: Color = Color::Rgb(0x1A, 0x1A, 0x18);
    /// Body copy
    pub const INK_MUTED: Color = Color::Rgb(0x6B, 0x69, 0x61);
    /// Captions, sources, hints
    pub const INK_LIGHT: Color = Color::Rgb(0x9C, 0x98, 0x89);
    /// Text on dark sections
    pub const INK_INVERSE: Color = Color::Rgb(0xFF, 0xFF, 0xFF);

    // === Accents ===
    pub const ACCENT: Color = Color::Rgb(0xE8, 0x54, 0x3E);
    pub const COOL: Color = Color::Rgb(0x2D, 0x6A, 0x8A);
    pub const CAUTION: Color = Color::Rgb(0xD4, 0x92, 0x0B);
    pub const GROWTH: Color = Color::Rgb(0x3A, 0x8A, 0x5C);
    pub const DECLINE: Color = Color::Rgb(0xC4, 0x38, 0x2A);

    // === Lines ===
    pub const BORDER: Color = Color::Rgb(0xE5, 0xE2, 0xDA);
}

/// Blend `color` towards `background`. Opacity 1 keeps the color, 0 yields
/// the background. Non-RGB colors are returned unchanged.
pub fn fade(color: Color, background: Color, opacity: f32) -> Color {
    let t = opacity.clamp(0.0, 1.0);
    match (color, background) {
        (Color::Rgb(r, g, b), Color::Rgb(br, bg, bb)) => {
            let mix = |c: u8, base: u8| -> u8 {
                (f32::from(base) + (f32::from(c) - f32::from(base)) * t).round() as u8
            };
            Color::Rgb(mix(r, br), mix(g, bg), mix(b, bb))
        }
        _ => color,
    }
}

/// Semantic styling helpers
pub mod styles {
    use ratatui::style::{Modifier, Style};

    use super::colors;

    /// Style for primary text
    pub fn text() -> Style {
        Style::default().fg(colors::INK)
    }

    /// Style for body copy
    pub fn text_muted() -> Style {
        Style::default().fg(colors::INK_MUTED)
    }

    /// Style for captions and sources
    pub fn text_hint() -> Style {
        Style::default().fg(colors::INK_LIGHT)
    }

    /// Mono-caps kicker above a section heading
    pub fn kicker() -> Style {
        Style::default()
            .fg(colors::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// Section heading
    pub fn heading() -> Style {
        Style::default()
            .fg(colors::INK)
            .add_modifier(Modifier::BOLD)
    }

    /// Dashboard title
    pub fn title() -> Style {
        Style::default()
            .fg(colors::INK)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    /// Large count-up figure
    pub fn figure() -> Style {
        Style::default()
            .fg(colors::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for tab titles (active)
    pub fn tab_active() -> Style {
        Style::default()
            .fg(colors::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for tab titles (inactive)
    pub fn tab_inactive() -> Style {
        Style::default().fg(colors::INK_LIGHT)
    }

    /// Borders of cards and tables
    pub fn border() -> Style {
        Style::default().fg(colors::BORDER)
    }

    /// Borders of the focused interactive block
    pub fn border_focused() -> Style {
        Style::default().fg(colors::INK_MUTED)
    }

    /// Struck-through "then" column
    pub fn struck() -> Style {
        Style::default()
            .fg(colors::INK_LIGHT)
            .add_modifier(Modifier::CROSSED_OUT)
    }

    /// "Now" column
    pub fn now_column() -> Style {
        Style::default().fg(colors::ACCENT)
    }


    /// Neutral placeholder for charts that cannot be drawn
    pub fn placeholder() -> Style {
        Style::default()
            .fg(colors::INK_LIGHT)
            .bg(colors::SURFACE_ALT)
            .add_modifier(Modifier::ITALIC)
    }

    /// Log pane levels
    pub fn success() -> Style {
        Style::default().fg(colors::GROWTH)
    }

    pub fn warning() -> Style {
        Style::default().fg(colors::CAUTION)
    }

    pub fn error() -> Style {
        Style::default().fg(colors::DECLINE)
    }

    pub fn info() -> Style {
        Style::default().fg(colors::COOL)
    }

    /// Selector button, active
    pub fn button_active(color: super::Color) -> Style {
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    /// Selector button, inactive
    pub fn button() -> Style {
        Style::default().fg(colors::INK_LIGHT)
    }

    /// Style for modal content background
    pub fn modal_content_bg() -> Style {
        Style::default().bg(colors::SURFACE_ALT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_endpoints() {
        assert_eq!(fade(colors::ACCENT, colors::BG, 1.0), colors::ACCENT);
        assert_eq!(fade(colors::ACCENT, colors::BG, 0.0), colors::BG);
    }

    #[test]
    fn test_fade_midpoint() {
        let mid = fade(Color::Rgb(0, 100, 200), Color::Rgb(100, 100, 100), 0.5);
        assert_eq!(mid, Color::Rgb(50, 100, 150));
    }

    #[test]
    fn test_fade_ignores_indexed_colors() {
        assert_eq!(fade(Color::Red, colors::BG, 0.2), Color::Red);
    }
}
