//! Application state and event handling.
//!
//! Elm-style: one `App` holds all host state, keys and watcher messages
//! update it, and `ui::render` draws it. Exactly one dashboard view is
//! mounted at a time; switching tabs drops the old view, which cancels
//! every frame callback and timer it scheduled.

use std::time::Instant;

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::content::{self, DashboardId};
use crate::frames::FrameLoop;
use crate::motion::{MotionEvent, MotionPreference, MotionSource, WatchCommand};
use crate::view::{DashboardView, ViewSettings};

/// Rows of the tab bar
pub const TAB_BAR_HEIGHT: u16 = 3;
/// Rows of the status line
pub const STATUS_HEIGHT: u16 = 1;
/// Rows of the log pane
pub const LOG_HEIGHT: u16 = 5;

/// Log entry for the message area
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub message: String,
    pub level: LogLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl LogEntry {
    fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now(),
            message: message.into(),
            level,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Error, message)
    }
}

/// Main application state
#[derive(Debug)]
pub struct App {
    /// Whether the application should quit
    pub should_quit: bool,

    /// Dashboard of the active tab
    pub active: DashboardId,

    /// The mounted view; created on the first tick, once the size is known
    view: Option<DashboardView>,

    /// Host frame loop shared by every view
    frames: FrameLoop,

    settings: ViewSettings,
    motion: MotionPreference,

    /// Log messages
    pub logs: Vec<LogEntry>,
    /// Maximum number of log entries to keep
    max_logs: usize,

    /// Show help overlay
    pub show_help: bool,

    /// Frame counter
    pub frame_count: u64,

    /// Last known page area (width, height)
    page: Option<(u16, u16)>,
}

impl App {
    pub fn new(active: DashboardId, settings: ViewSettings, motion: MotionPreference) -> Self {
        let mut app = Self {
            should_quit: false,
            active,
            view: None,
            frames: FrameLoop::new(),
            settings,
            motion,
            logs: Vec::new(),
            max_logs: 100,
            show_help: false,
            frame_count: 0,
            page: None,
        };
        app.log(LogEntry::info(format!(
            "Reduced motion {} ({})",
            if motion.reduced { "on" } else { "off" },
            motion.source.name()
        )));
        app
    }

    /// Add a log entry
    pub fn log(&mut self, entry: LogEntry) {
        self.logs.push(entry);
        if self.logs.len() > self.max_logs {
            self.logs.remove(0);
        }
    }

    pub fn view(&self) -> Option<&DashboardView> {
        self.view.as_ref()
    }

    pub fn reduced_motion(&self) -> bool {
        self.motion.reduced
    }

    /// Callbacks waiting in the frame loop
    pub fn pending_frames(&self) -> usize {
        self.frames.pending()
    }

    /// Page area left for the dashboard in a terminal of `width` x `height`.
    pub fn page_size(width: u16, height: u16) -> (u16, u16) {
        (
            width,
            height.saturating_sub(TAB_BAR_HEIGHT + STATUS_HEIGHT + LOG_HEIGHT),
        )
    }

    fn mount(&mut self, now: Instant) {
        let Some((width, height)) = self.page else {
            return;
        };
        let view = DashboardView::mount(
            content::load(self.active),
            self.settings,
            self.motion.reduced,
            width,
            height,
            now,
            &mut self.frames,
        );
        for chart in &view.dashboard().charts {
            if let Err(e) = &chart.data {
                self.log(LogEntry::warning(format!("{}: {}", chart.title, e)));
            }
        }
        self.view = Some(view);
    }

    /// Tear down the current view and mount `id`.
    pub fn switch_to(&mut self, id: DashboardId, now: Instant) {
        if id == self.active && self.view.is_some() {
            return;
        }
        tracing::info!(from = self.active.name(), to = id.name(), "switching dashboard");
        self.view = None;
        self.active = id;
        self.mount(now);
        self.log(LogEntry::info(format!("Opened {}", id.name())));
    }

    /// Advance one frame: update the view with its viewport, then run the
    /// frame loop.
    pub fn tick(&mut self, now: Instant, width: u16, height: u16) {
        self.frame_count = self.frame_count.wrapping_add(1);

        let page = Self::page_size(width, height);
        if self.page != Some(page) {
            self.page = Some(page);
            match self.view.as_mut() {
                Some(view) => view.resize(page.0, page.1),
                None => self.mount(now),
            }
        }

        let revealed = match self.view.as_mut() {
            Some(view) => view.update(now, &mut self.frames),
            None => Vec::new(),
        };
        for id in revealed {
            self.log(LogEntry::info(format!("Revealed {}", id)));
        }

        self.frames.run(now);
    }

    /// Apply a motion preference change from any source.
    pub fn set_reduced_motion(&mut self, reduced: bool, source: MotionSource, now: Instant) {
        if reduced == self.motion.reduced {
            return;
        }
        self.motion = MotionPreference { reduced, source };
        if let Some(view) = self.view.as_mut() {
            view.set_reduced_motion(reduced, now, &mut self.frames);
        }
        self.log(LogEntry::success(format!(
            "Reduced motion {} ({})",
            if reduced { "on" } else { "off" },
            source.name()
        )));
    }

    /// Handle a message from the config watcher
    pub fn handle_motion_event(&mut self, event: MotionEvent, now: Instant) {
        match event {
            MotionEvent::ReducedMotion(reduced) => {
                self.set_reduced_motion(reduced, MotionSource::Config, now)
            }
            MotionEvent::Error(message) => {
                tracing::warn!(%message, "config reload failed");
                self.log(LogEntry::error(format!("Config reload failed: {}", message)));
            }
        }
    }

    /// Handle a key press. Returns a command for the config watcher, if any.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Option<WatchCommand> {
        // Handle help overlay
        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter) {
                self.show_help = false;
            }
            return None;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
                return Some(WatchCommand::Shutdown);
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return Some(WatchCommand::Shutdown);
            }
            KeyCode::Char('?') => {
                self.show_help = true;
                return None;
            }
            KeyCode::Tab => {
                self.switch_to(self.active.next(), now);
                return None;
            }
            KeyCode::BackTab => {
                self.switch_to(self.active.previous(), now);
                return None;
            }
            KeyCode::Char('m') => {
                self.set_reduced_motion(!self.motion.reduced, MotionSource::Cli, now);
                return None;
            }
            KeyCode::Char('r') => {
                self.log(LogEntry::info("Checking config..."));
                return Some(WatchCommand::Check);
            }
            _ => {}
        }

        let Some(view) = self.view.as_mut() else {
            return None;
        };
        let message = match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                view.scroll_by(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                view.scroll_by(-1);
                None
            }
            KeyCode::PageDown | KeyCode::Char(' ') => {
                view.page_down();
                None
            }
            KeyCode::PageUp => {
                view.page_up();
                None
            }
            KeyCode::Char('g') | KeyCode::Home => {
                view.scroll_to_top();
                None
            }
            KeyCode::Char('G') | KeyCode::End => {
                view.scroll_to_bottom();
                None
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = c.to_digit(10).map_or(0, |d| d as usize - 1);
                view.select(index)
            }
            KeyCode::Char('n') => view.cycle(true),
            KeyCode::Char('p') => view.cycle(false),
            KeyCode::Char('0') | KeyCode::Esc => view.clear(),
            KeyCode::Left | KeyCode::Char('h') => {
                view.move_cursor(-1);
                None
            }
            KeyCode::Right | KeyCode::Char('l') => {
                view.move_cursor(1);
                None
            }
            _ => None,
        };
        if let Some(message) = message {
            self.log(LogEntry::info(message));
        }
        None
    }

    /// Get the status bar text
    pub fn status_text(&self) -> String {
        let position = self
            .view
            .as_ref()
            .map(|v| {
                let max = v.layout().max_scroll(v.viewport().height);
                let percent = if max == 0 {
                    100
                } else {
                    u32::from(v.scroll()) * 100 / u32::from(max)
                };
                format!("{}%", percent)
            })
            .unwrap_or_default();
        let motion = if self.motion.reduced {
            "reduced motion"
        } else {
            "full motion"
        };
        let animating = match self.pending_frames() {
            0 => String::new(),
            n => format!("{} animating | ", n),
        };
        format!(
            "{} | {} | {}{} | ?: Help | m: Motion | Tab: Switch | q: Quit",
            self.active.name(),
            position,
            animating,
            motion
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app(id: DashboardId, reduced: bool) -> App {
        App::new(
            id,
            ViewSettings::default(),
            MotionPreference {
                reduced,
                source: MotionSource::Default,
            },
        )
    }

    #[test]
    fn test_first_tick_mounts_the_view() {
        let mut app = app(DashboardId::Loneliness, false);
        assert!(app.view().is_none());
        app.tick(Instant::now(), 100, 40);
        let view = app.view().unwrap();
        assert_eq!(view.dashboard().id, DashboardId::Loneliness);
        assert_eq!(view.viewport().height, 40 - 9);
    }

    #[test]
    fn test_tab_switch_cancels_old_callbacks() {
        let now = Instant::now();
        let mut app = app(DashboardId::Friction, false);
        // a one-row page keeps everything but the hero out of view
        app.tick(now, 80, 10);
        assert!(app.pending_frames() > 0);

        app.handle_key(key(KeyCode::BackTab), now);
        assert_eq!(app.active, DashboardId::Degrees);
        assert_eq!(app.pending_frames(), 0);
        assert!(app.view().unwrap().is_revealed("hero"));
    }

    #[test]
    fn test_switch_restarts_view_state() {
        let now = Instant::now();
        let mut app = app(DashboardId::Friction, false);
        app.tick(now, 80, 10);
        app.tick(now + std::time::Duration::from_secs(1), 80, 10);
        assert!(app.view().unwrap().is_struck());

        app.handle_key(key(KeyCode::Tab), now);
        app.handle_key(key(KeyCode::BackTab), now);
        assert_eq!(app.active, DashboardId::Friction);
        assert!(!app.view().unwrap().is_struck());
    }

    #[test]
    fn test_quit_shuts_down_watcher() {
        let mut app = app(DashboardId::Degrees, false);
        assert_eq!(
            app.handle_key(key(KeyCode::Char('q')), Instant::now()),
            Some(WatchCommand::Shutdown)
        );
        assert!(app.should_quit);
    }

    #[test]
    fn test_help_swallows_keys() {
        let now = Instant::now();
        let mut app = app(DashboardId::Degrees, false);
        app.tick(now, 80, 40);
        app.handle_key(key(KeyCode::Char('?')), now);
        assert!(app.show_help);
        assert_eq!(app.handle_key(key(KeyCode::Char('q')), now), None);
        assert!(!app.should_quit);
        app.handle_key(key(KeyCode::Esc), now);
        assert!(!app.show_help);
    }

    #[test]
    fn test_motion_event_reaches_the_view() {
        let now = Instant::now();
        let mut app = app(DashboardId::Friction, false);
        app.tick(now, 80, 40);
        app.handle_motion_event(MotionEvent::ReducedMotion(true), now);
        assert!(app.reduced_motion());
        assert!(app.view().unwrap().reduced_motion());

        app.handle_key(key(KeyCode::Char('m')), now);
        assert!(!app.reduced_motion());
        assert!(!app.view().unwrap().reduced_motion());
    }

    #[test]
    fn test_watcher_errors_are_logged() {
        let mut app = app(DashboardId::Degrees, false);
        app.handle_motion_event(MotionEvent::Error("bad toml".to_string()), Instant::now());
        let last = app.logs.last().unwrap();
        assert_eq!(last.level, LogLevel::Error);
        assert!(last.message.contains("bad toml"));
    }

    #[test]
    fn test_status_shows_pending_animations() {
        let now = Instant::now();
        let mut app = app(DashboardId::Friction, false);
        app.tick(now, 80, 10);
        assert!(app.status_text().contains("animating"));

        app.tick(now + std::time::Duration::from_secs(5), 80, 10);
        assert_eq!(app.pending_frames(), 0);
        assert!(!app.status_text().contains("animating"));
    }

    #[test]
    fn test_log_is_capped() {
        let mut app = app(DashboardId::Degrees, false);
        for i in 0..150 {
            app.log(LogEntry::info(format!("entry {}", i)));
        }
        assert_eq!(app.logs.len(), 100);
        assert_eq!(app.logs.last().unwrap().message, "entry 149");
    }

    #[test]
    fn test_scroll_keys_move_the_page() {
        let now = Instant::now();
        let mut app = app(DashboardId::Degrees, false);
        app.tick(now, 80, 30);
        app.handle_key(key(KeyCode::Char('j')), now);
        assert_eq!(app.view().unwrap().scroll(), 1);
        app.handle_key(key(KeyCode::Char('G')), now);
        let view = app.view().unwrap();
        assert_eq!(view.scroll(), view.layout().max_scroll(view.viewport().height));
        app.handle_key(key(KeyCode::Char('g')), now);
        assert_eq!(app.view().unwrap().scroll(), 0);
    }
}
