//! Cadence configuration system
//!
//! This crate loads runner settings from `cadence.toml`, with `CADENCE_*`
//! environment variables as overrides.

use log::warn;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default configuration file name, resolved against the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "cadence.toml";

/// Errors from reading or parsing a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct CadenceConfig {
    /// What to play and how to step time
    pub playback: PlaybackConfig,
    /// Units used when rendering style output
    pub style: StyleConfig,
    /// Raster frame output
    pub effects: EffectsConfig,
    pub logging: LoggingConfig,
}

/// Playback configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Element the animation is attached to
    pub element_id: String,
    /// Catalog transition to play (fade, slide-up, blur, ...)
    pub transition: Option<String>,
    /// JSON animation definition; takes precedence over `transition`
    pub definition: Option<PathBuf>,
    /// "in" or "out"
    pub direction: String,
    pub duration_ms: f64,
    /// Easing name (linear, ease-out, ease-in-out-cubic, ...)
    pub easing: String,
    /// Effect strength 0-100; the catalog default applies when unset
    pub intensity: Option<f64>,
    /// Simulated time between frames
    pub frame_interval_ms: f64,
    /// Upper bound on frames, guards against looping definitions
    pub max_frames: u32,
}

/// Units appended to rendered style values
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StyleConfig {
    pub translate: String,
    pub rotate: String,
    pub skew: String,
    pub blur: String,
    pub hue_rotate: String,
    /// Unit for grayscale, invert and sepia
    pub percentage: String,
}

/// Raster effect output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EffectsConfig {
    /// Source image for raster transitions (blur, pixelate, wave)
    pub input: Option<PathBuf>,
    /// Directory that receives rendered PNG frames
    pub output_dir: PathBuf,
    /// Write every n-th frame
    pub sample_every: u32,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// env_logger filter, e.g. "info" or "cadence_motion=trace"
    pub filter: String,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            element_id: "preview".to_string(),
            transition: Some("fade".to_string()),
            definition: None,
            direction: "in".to_string(),
            duration_ms: 600.0,
            easing: "ease-out".to_string(),
            intensity: None,
            frame_interval_ms: 16.0,
            max_frames: 600,
        }
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            translate: "px".to_string(),
            rotate: "deg".to_string(),
            skew: "deg".to_string(),
            blur: "px".to_string(),
            hue_rotate: "deg".to_string(),
            percentage: "%".to_string(),
        }
    }
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            input: None,
            output_dir: PathBuf::from("frames"),
            sample_every: 4,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

fn parse_flag<T: std::str::FromStr>(name: &str, value: &str) -> Option<T> {
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!("Ignoring {}={:?}: not a valid value", name, value);
            None
        }
    }
}

impl CadenceConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path` if it exists, otherwise defaults
    ///
    /// Unlike [`load_from_path_or_default`](Self::load_from_path_or_default),
    /// a broken file is returned as an error and nothing is logged.
    pub fn load_if_exists<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    /// Load `path` if it exists, otherwise defaults
    ///
    /// A file that exists but cannot be read or parsed is reported with a
    /// warning and replaced by defaults.
    pub fn load_from_path_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::load_if_exists(path).unwrap_or_else(|err| {
            warn!("{}; using defaults", err);
            Self::default()
        })
    }

    /// Load configuration from the default location (cadence.toml in the current directory)
    /// or return default configuration if the file doesn't exist
    pub fn load_or_default() -> Self {
        Self::load_from_path_or_default(DEFAULT_CONFIG_FILE)
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    pub fn merge_with_env(&mut self) {
        self.merge_with(|name| std::env::var(name).ok());
    }

    /// Apply overrides from any `CADENCE_*` lookup
    pub fn merge_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // Playback settings
        if let Some(id) = lookup("CADENCE_ELEMENT_ID") {
            self.playback.element_id = id;
        }
        if let Some(transition) = lookup("CADENCE_TRANSITION") {
            self.playback.transition = Some(transition);
        }
        if let Some(path) = lookup("CADENCE_DEFINITION") {
            self.playback.definition = Some(PathBuf::from(path));
        }
        if let Some(direction) = lookup("CADENCE_DIRECTION") {
            self.playback.direction = direction;
        }
        if let Some(val) = lookup("CADENCE_DURATION_MS") {
            if let Some(duration) = parse_flag("CADENCE_DURATION_MS", &val) {
                self.playback.duration_ms = duration;
            }
        }
        if let Some(easing) = lookup("CADENCE_EASING") {
            self.playback.easing = easing;
        }
        if let Some(val) = lookup("CADENCE_INTENSITY") {
            if let Some(intensity) = parse_flag("CADENCE_INTENSITY", &val) {
                self.playback.intensity = Some(intensity);
            }
        }
        if let Some(val) = lookup("CADENCE_FRAME_INTERVAL_MS") {
            if let Some(interval) = parse_flag("CADENCE_FRAME_INTERVAL_MS", &val) {
                self.playback.frame_interval_ms = interval;
            }
        }
        if let Some(val) = lookup("CADENCE_MAX_FRAMES") {
            if let Some(max) = parse_flag("CADENCE_MAX_FRAMES", &val) {
                self.playback.max_frames = max;
            }
        }

        // Effects settings
        if let Some(path) = lookup("CADENCE_INPUT") {
            self.effects.input = Some(PathBuf::from(path));
        }
        if let Some(path) = lookup("CADENCE_OUTPUT_DIR") {
            self.effects.output_dir = PathBuf::from(path);
        }
        if let Some(val) = lookup("CADENCE_SAMPLE_EVERY") {
            if let Some(every) = parse_flag("CADENCE_SAMPLE_EVERY", &val) {
                self.effects.sample_every = every;
            }
        }

        // Logging settings
        if let Some(filter) = lookup("CADENCE_LOG") {
            self.logging.filter = filter;
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// 1. Load from cadence.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}
