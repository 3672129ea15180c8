//! Reveal styling: a pure mapping from visibility to appearance.

use std::time::Duration;

use crate::count_up::{ease_out_cubic, progress};

/// Default fade/slide duration.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(600);
/// Default downward offset, in rows, of a section that has not been revealed.
pub const DEFAULT_OFFSET: u16 = 2;

/// Opacity and downward row offset of a section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Appearance {
    pub opacity: f32,
    pub offset: u16,
}

impl Appearance {
    pub const SHOWN: Appearance = Appearance {
        opacity: 1.0,
        offset: 0,
    };

    pub fn hidden(offset: u16) -> Self {
        Self {
            opacity: 0.0,
            offset,
        }
    }

    /// Interpolate towards `to` by eased fraction `t`.
    fn lerp(self, to: Appearance, t: f64) -> Appearance {
        let t = t.clamp(0.0, 1.0);
        let opacity = f64::from(self.opacity) + (f64::from(to.opacity) - f64::from(self.opacity)) * t;
        let offset = f64::from(self.offset) + (f64::from(to.offset) - f64::from(self.offset)) * t;
        Appearance {
            opacity: opacity as f32,
            offset: offset.round() as u16,
        }
    }
}

/// Eased transition into a style, starting from `from`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub duration: Duration,
    pub from: Appearance,
}

/// Target appearance plus how to get there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealStyle {
    pub target: Appearance,
    pub transition: Option<Transition>,
}

impl RevealStyle {
    /// Appearance `elapsed` after the style took effect. Without a
    /// transition, or without a start time, this is the target itself.
    pub fn appearance(&self, elapsed: Option<Duration>) -> Appearance {
        match (self.transition, elapsed) {
            (Some(transition), Some(elapsed)) => {
                let t = ease_out_cubic(progress(elapsed, transition.duration));
                transition.from.lerp(self.target, t)
            }
            _ => self.target,
        }
    }
}

/// Reveal parameters shared by every section of a view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reveal {
    pub duration: Duration,
    pub offset: u16,
}

impl Default for Reveal {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            offset: DEFAULT_OFFSET,
        }
    }
}

impl Reveal {
    pub fn new(duration: Duration, offset: u16) -> Self {
        Self { duration, offset }
    }
}

/// With reduced motion content is always fully shown with no transition;
/// otherwise hidden until visible, then eased in.
pub fn reveal_style(visible: bool, reduced_motion: bool, reveal: &Reveal) -> RevealStyle {
    if reduced_motion {
        return RevealStyle {
            target: Appearance::SHOWN,
            transition: None,
        };
    }
    let hidden = Appearance::hidden(reveal.offset);
    let transition = Some(Transition {
        duration: reveal.duration,
        from: hidden,
    });
    if visible {
        RevealStyle {
            target: Appearance::SHOWN,
            transition,
        }
    } else {
        RevealStyle {
            target: hidden,
            transition,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduced_motion_always_shows() {
        for visible in [false, true] {
            let style = reveal_style(visible, true, &Reveal::default());
            assert_eq!(style.target, Appearance::SHOWN);
            assert!(style.transition.is_none());
            assert_eq!(style.appearance(Some(Duration::ZERO)), Appearance::SHOWN);
        }
    }

    #[test]
    fn test_hidden_until_visible() {
        let style = reveal_style(false, false, &Reveal::default());
        assert_eq!(style.target, Appearance::hidden(DEFAULT_OFFSET));
        assert_eq!(style.appearance(None).opacity, 0.0);
        assert_eq!(style.appearance(Some(Duration::from_secs(5))).opacity, 0.0);
    }

    #[test]
    fn test_visible_eases_in() {
        let style = reveal_style(true, false, &Reveal::default());
        assert_eq!(style.target, Appearance::SHOWN);
        assert!(style.transition.is_some());

        let start = style.appearance(Some(Duration::ZERO));
        assert_eq!(start, Appearance::hidden(DEFAULT_OFFSET));

        let mid = style.appearance(Some(Duration::from_millis(300)));
        assert!(mid.opacity > 0.5 && mid.opacity < 1.0);

        let end = style.appearance(Some(DEFAULT_DURATION));
        assert_eq!(end, Appearance::SHOWN);
    }

    #[test]
    fn test_custom_offset_and_duration() {
        let reveal = Reveal::new(Duration::from_millis(100), 4);
        let style = reveal_style(true, false, &reveal);
        assert_eq!(style.appearance(Some(Duration::ZERO)).offset, 4);
        assert_eq!(style.appearance(Some(Duration::from_millis(100))).offset, 0);
    }
}
