//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Smooth-scroll driver settings.
    pub smooth_scroll: SmoothScrollConfig,

    /// Headless playback defaults.
    pub playback: PlaybackConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Damped scrolling parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothScrollConfig {
    /// Time for the smoothed offset to reach a new target (seconds).
    pub duration_secs: f64,

    /// Easing curve name (e.g. "expo.out", "power2.out", "none").
    pub easing: String,

    /// Scale applied to wheel deltas.
    pub wheel_multiplier: f64,

    /// Scale applied to touch deltas.
    pub touch_multiplier: f64,

    /// When false, wheel input jumps straight to the target.
    pub smooth_wheel: bool,
}

/// Defaults for headless playback and simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Target frame rate.
    pub fps: u32,

    /// Viewport height in CSS pixels.
    pub viewport_height: f64,

    /// Document height expressed in viewport heights.
    pub pages: f64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "cinescroll=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            smooth_scroll: SmoothScrollConfig::default(),
            playback: PlaybackConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for SmoothScrollConfig {
    fn default() -> Self {
        Self {
            duration_secs: 1.2,
            easing: "expo.out".to_string(),
            wheel_multiplier: 1.0,
            touch_multiplier: 2.0,
            smooth_wheel: true,
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            fps: 60,
            viewport_height: 900.0,
            pages: 5.0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl PlaybackConfig {
    /// Total document height in pixels.
    pub fn document_height(&self) -> f64 {
        self.viewport_height * self.pages.max(1.0)
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", config_path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("cinescroll").join("config.json")
}
