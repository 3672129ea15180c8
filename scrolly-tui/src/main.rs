//! scrolly - data stories in the terminal.
//!
//! Three scrollytelling dashboards with scroll-triggered reveals, count-up
//! figures, highlightable charts and scenario selectors. Honors a
//! reduced-motion preference from the command line, the environment or a
//! watched config file.

mod app;
mod config;
mod content;
mod count_up;
mod dataset;
mod error;
mod frames;
mod highlight;
mod layout;
mod logging;
mod motion;
mod reveal;
mod theme;
mod tooltip;
mod ui;
mod view;
mod visibility;

use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tokio::sync::mpsc;

use app::{App, LogEntry};
use config::Config;
use content::DashboardId;
use motion::{ConfigWatcher, MotionEvent, WatchCommand};

#[derive(Parser, Debug)]
#[command(name = "scrolly", version, about = "Scrollytelling data dashboards in the terminal")]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Show final states without animation
    #[arg(long)]
    reduced_motion: bool,

    /// Dashboard to open first
    #[arg(short, long, value_enum, default_value_t = DashboardId::Degrees)]
    dashboard: DashboardId,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

/// Main entry point
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install().ok();

    let cli = Cli::parse();
    let (config, config_path) = Config::load(cli.config.as_deref()).context("Failed to load config")?;

    let mut startup: Vec<LogEntry> = Vec::new();
    let _guard = match config.log_dir() {
        Some(dir) => match logging::init(&dir, &config.log.level, cli.verbose) {
            Ok(guard) => Some(guard),
            Err(e) => {
                startup.push(LogEntry::warning(format!("File logging disabled: {:#}", e)));
                None
            }
        },
        None => None,
    };

    let env = std::env::var(motion::ENV_VAR).ok();
    let preference = motion::resolve(cli.reduced_motion, env.as_deref(), &config);
    tracing::info!(
        config = ?config_path,
        reduced_motion = preference.reduced,
        source = preference.source.name(),
        "starting"
    );
    if let Some(path) = &config_path {
        startup.push(LogEntry::info(format!("Config {}", path.display())));
    }

    let mut app = App::new(cli.dashboard, config.view_settings(), preference);
    for entry in startup {
        app.log(entry);
    }

    run_tui(app, &config, motion::watch_path(config_path, &preference)).await
}

/// Run the TUI application
async fn run_tui(mut app: App, config: &Config, watch: Option<PathBuf>) -> Result<()> {
    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    // Create communication channels
    let (event_tx, mut event_rx) = mpsc::channel::<MotionEvent>(16);
    let (cmd_tx, cmd_rx) = mpsc::channel::<WatchCommand>(16);

    // Only a preference that follows the config file can change at runtime
    let watcher_task = watch.map(|path| {
        let watcher = ConfigWatcher::new(path, app.reduced_motion());
        tokio::spawn(motion::run_watcher(watcher, event_tx, cmd_rx, motion::POLL_INTERVAL))
    });

    // Main event loop
    let result = run_event_loop(
        &mut terminal,
        &mut app,
        &mut event_rx,
        &cmd_tx,
        config.frame_duration(),
    )
    .await;

    // Cleanup
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    // Stop the watcher
    cmd_tx.send(WatchCommand::Shutdown).await.ok();
    if let Some(task) = watcher_task {
        task.abort();
    }
    tracing::info!("exiting");

    result
}

/// Run the main event loop
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_rx: &mut mpsc::Receiver<MotionEvent>,
    cmd_tx: &mpsc::Sender<WatchCommand>,
    frame_duration: Duration,
) -> Result<()> {
    loop {
        let now = Instant::now();

        // Check for watcher messages (non-blocking)
        while let Ok(event) = event_rx.try_recv() {
            app.handle_motion_event(event, now);
        }

        // Update visibility and animations
        let size = terminal.size()?;
        app.tick(now, size.width, size.height);

        // Render the UI
        terminal.draw(|frame| ui::render(frame, app, now))?;

        // Handle input events with timeout for animation
        if event::poll(frame_duration)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (not release)
                if key.kind == KeyEventKind::Press {
                    if let Some(cmd) = app.handle_key(key, Instant::now()) {
                        cmd_tx.send(cmd).await.ok();
                    }
                }
            }
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    Ok(())
}
