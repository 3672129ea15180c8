//! TOML configuration.
//!
//! Looked up at `--config <path>` or, failing that, `config.toml` in the
//! platform config directory:
//! - Linux: `~/.config/scrolly/config.toml`
//! - macOS: `~/Library/Application Support/scrolly/config.toml`
//! - Windows: `%APPDATA%\scrolly\config.toml`
//!
//! A missing default file means defaults; a missing explicit file is an error.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::reveal::Reveal;
use crate::view::ViewSettings;

const APP_NAME: &str = "scrolly";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub motion: MotionConfig,
    pub viewport: ViewportConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MotionConfig {
    /// Prefer reduced motion. Watched while the app runs.
    pub reduced: bool,
    pub count_up_ms: u64,
    pub reveal_ms: u64,
    /// Rows a hidden section sits below its final position.
    pub reveal_offset: u16,
    pub strike_delay_ms: u64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            reduced: false,
            count_up_ms: 1200,
            reveal_ms: 600,
            reveal_offset: 2,
            strike_delay_ms: 400,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewportConfig {
    /// Fraction of a section that must be on screen to reveal it.
    pub threshold: f64,
    pub frame_ms: u64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            frame_ms: 33,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    pub level: String,
    /// Where `scrolly.log` is written. Defaults to the platform data dir.
    pub directory: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

impl Config {
    /// Parse and validate TOML `content` read from `path`.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.viewport.threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::Invalid {
                key: "viewport.threshold",
                reason: format!("{} is not between 0 and 1", threshold),
            });
        }
        if self.viewport.frame_ms == 0 {
            return Err(ConfigError::Invalid {
                key: "viewport.frame_ms",
                reason: "must be greater than 0".to_string(),
            });
        }
        if self.log.level.parse::<tracing::Level>().is_err() {
            return Err(ConfigError::Invalid {
                key: "log.level",
                reason: format!("unknown level '{}'", self.log.level),
            });
        }
        Ok(())
    }

    /// Load from `explicit`, else from the default location. Returns the
    /// config and the file it came from, if any.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        if let Some(path) = explicit {
            return Self::load_file(path).map(|c| (c, Some(path.to_path_buf())));
        }
        match default_path() {
            Some(path) if path.exists() => {
                let config = Self::load_file(&path)?;
                Ok((config, Some(path)))
            }
            _ => Ok((Self::default(), None)),
        }
    }

    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_millis(self.viewport.frame_ms)
    }

    pub fn view_settings(&self) -> ViewSettings {
        ViewSettings {
            threshold: self.viewport.threshold,
            reveal: Reveal::new(
                Duration::from_millis(self.motion.reveal_ms),
                self.motion.reveal_offset,
            ),
            count_up: Duration::from_millis(self.motion.count_up_ms),
            strike_delay: Duration::from_millis(self.motion.strike_delay_ms),
        }
    }

    /// Directory for the log file.
    pub fn log_dir(&self) -> Option<PathBuf> {
        self.log.directory.clone().or_else(default_log_dir)
    }
}

pub fn default_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

pub fn default_log_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.data_local_dir().to_path_buf())
}
