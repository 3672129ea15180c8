//! Reduced-motion preference.
//!
//! The preference comes from the first of: the `--reduced-motion` flag, the
//! `SCROLLY_REDUCED_MOTION` environment variable, the config file. When it
//! comes from the config file a background task polls the file and reports
//! changes, so the preference can flip while the app runs.

use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use tokio::sync::mpsc;

use crate::config::{self, Config};

pub const ENV_VAR: &str = "SCROLLY_REDUCED_MOTION";
/// How often the watcher checks the config file.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Where the preference was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionSource {
    Cli,
    Env,
    Config,
    Default,
}

impl MotionSource {
    pub fn name(&self) -> &'static str {
        match self {
            MotionSource::Cli => "command line",
            MotionSource::Env => ENV_VAR,
            MotionSource::Config => "config file",
            MotionSource::Default => "default",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionPreference {
    pub reduced: bool,
    pub source: MotionSource,
}

impl MotionPreference {
    /// Whether config-file changes can still move the preference.
    pub fn follows_config(&self) -> bool {
        matches!(self.source, MotionSource::Config | MotionSource::Default)
    }
}

/// `1`, `true`, `yes`, `on` and their negatives, case-insensitively.
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Combine the sources. An unparseable environment value is ignored.
pub fn resolve(cli: bool, env: Option<&str>, config: &Config) -> MotionPreference {
    if cli {
        return MotionPreference {
            reduced: true,
            source: MotionSource::Cli,
        };
    }
    if let Some(reduced) = env.and_then(parse_flag) {
        return MotionPreference {
            reduced,
            source: MotionSource::Env,
        };
    }
    if config.motion.reduced {
        MotionPreference {
            reduced: true,
            source: MotionSource::Config,
        }
    } else {
        MotionPreference {
            reduced: false,
            source: MotionSource::Default,
        }
    }
}

/// File the watcher follows: the loaded config, or the default location even
/// before anything exists there. `None` when the preference is pinned by the
/// command line or the environment.
pub fn watch_path(loaded: Option<PathBuf>, preference: &MotionPreference) -> Option<PathBuf> {
    if !preference.follows_config() {
        return None;
    }
    loaded.or_else(config::default_path)
}

/// Messages sent from the watcher to the UI thread
#[derive(Debug, Clone, PartialEq)]
pub enum MotionEvent {
    /// The config file now asks for (or no longer asks for) reduced motion
    ReducedMotion(bool),
    /// The config file changed but could not be used
    Error(String),
}

/// Commands sent from the UI thread to the watcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchCommand {
    /// Re-read the file now
    Check,
    /// Stop watching
    Shutdown,
}

/// Polls one config file for changes to `motion.reduced`.
#[derive(Debug)]
pub struct ConfigWatcher {
    path: PathBuf,
    modified: Option<SystemTime>,
    reduced: bool,
}

impl ConfigWatcher {
    pub fn new(path: PathBuf, reduced: bool) -> Self {
        let modified = std::fs::metadata(&path).and_then(|m| m.modified()).ok();
        Self {
            path,
            modified,
            reduced,
        }
    }

    /// Check the file. Returns an event when the preference changed or the
    /// changed file is invalid; an unchanged file yields nothing.
    pub async fn poll(&mut self) -> Option<MotionEvent> {
        let modified = tokio::fs::metadata(&self.path)
            .await
            .and_then(|m| m.modified())
            .ok();
        if modified == self.modified {
            return None;
        }
        self.modified = modified;

        // a deleted file falls back to defaults
        let config = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => match Config::parse(&content, &self.path) {
                Ok(config) => config,
                Err(e) => return Some(MotionEvent::Error(e.to_string())),
            },
            Err(_) => Config::default(),
        };

        if config.motion.reduced == self.reduced {
            return None;
        }
        self.reduced = config.motion.reduced;
        tracing::debug!(path = %self.path.display(), reduced = self.reduced, "config changed");
        Some(MotionEvent::ReducedMotion(self.reduced))
    }
}

/// Run the watcher task until shutdown or until the UI goes away.
pub async fn run_watcher(
    mut watcher: ConfigWatcher,
    tx: mpsc::Sender<MotionEvent>,
    mut rx: mpsc::Receiver<WatchCommand>,
    interval: Duration,
) {
    let mut ticker = tokio::time::interval(interval);
    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            cmd = rx.recv() => match cmd {
                Some(WatchCommand::Check) => {}
                Some(WatchCommand::Shutdown) | None => break,
            },
        }
        if let Some(event) = watcher.poll().await {
            if tx.send(event).await.is_err() {
                break;
            }
        }
    }
    tracing::debug!("config watcher stopped");
}
