//! ThreadEvents configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::num::NonZeroU64;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::recorder::Recorder;

/// Longest startup interval a config file may ask for (one day)
pub const MAX_INTERVAL_SECS: u64 = 24 * 60 * 60;

/// Main configuration
///
/// Without a config file every value equals the built-in startup constants.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Record generation settings
    pub generation: GenerationConfig,

    /// Sink and verbosity settings
    pub recording: RecordingConfig,

    /// Diagnostic log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,
}

impl Config {
    /// Validate configuration before use
    pub fn validate(&self) -> Result<()> {
        if self.generation.interval_secs == 0 {
            return Err(eyre::eyre!("generation.interval-secs must be at least 1"));
        }
        if self.generation.interval_secs > MAX_INTERVAL_SECS {
            return Err(eyre::eyre!(
                "generation.interval-secs ({}) must be at most {}",
                self.generation.interval_secs,
                MAX_INTERVAL_SECS
            ));
        }
        if self.generation.pause_poll_ms == 0 {
            return Err(eyre::eyre!("generation.pause-poll-ms must be at least 1"));
        }
        if self.generation.sample_min > self.generation.sample_max {
            return Err(eyre::eyre!(
                "generation.sample-min ({}) is greater than generation.sample-max ({})",
                self.generation.sample_min,
                self.generation.sample_max
            ));
        }
        Ok(())
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        Ok(Self::load_first(&Self::fallback_paths()))
    }

    /// Read only the log level, before logging is set up
    ///
    /// Failures are ignored here; the full `load` reports them once logging
    /// is running.
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        let config = match config_path {
            Some(path) => Self::load_from_file(path).ok()?,
            None => Self::fallback_paths()
                .iter()
                .filter(|path| path.exists())
                .find_map(|path| Self::load_from_file(path).ok())?,
        };
        config.log_level
    }

    /// Project-local config, then user config
    fn fallback_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(".threadevents.yml")];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("threadevents").join("threadevents.yml"));
        }
        paths
    }

    /// First candidate that exists and parses; a broken one falls through to the next
    fn load_first(paths: &[PathBuf]) -> Self {
        for path in paths.iter().filter(|path| path.exists()) {
            match Self::load_from_file(path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                    eprintln!("Warning: Failed to load config from {}: {:#}", path.display(), e);
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Self::default()
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Record generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Seconds between records at startup
    #[serde(rename = "interval-secs")]
    pub interval_secs: u64,

    /// How often a paused generator re-checks its flags
    #[serde(rename = "pause-poll-ms")]
    pub pause_poll_ms: u64,

    /// Smallest sample value
    #[serde(rename = "sample-min")]
    pub sample_min: i32,

    /// Largest sample value
    #[serde(rename = "sample-max")]
    pub sample_max: i32,
}

impl GenerationConfig {
    /// Startup interval; zero (rejected by `validate`) falls back to one second
    pub fn interval(&self) -> NonZeroU64 {
        NonZeroU64::new(self.interval_secs).unwrap_or(NonZeroU64::MIN)
    }

    pub fn pause_poll(&self) -> Duration {
        Duration::from_millis(self.pause_poll_ms)
    }

    pub fn samples(&self) -> RangeInclusive<i32> {
        self.sample_min..=self.sample_max
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            interval_secs: crate::DEFAULT_INTERVAL_SECS,
            pause_poll_ms: crate::DEFAULT_PAUSE_POLL_MS,
            sample_min: crate::DEFAULT_SAMPLE_MIN,
            sample_max: crate::DEFAULT_SAMPLE_MAX,
        }
    }
}

/// Sink and verbosity settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordingConfig {
    /// Recorder selected at startup
    pub verbosity: Recorder,

    /// Append-only file the writer records to
    #[serde(rename = "sink-path")]
    pub sink_path: PathBuf,
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            verbosity: Recorder::Detailed,
            sink_path: PathBuf::from("threadevents.log"),
        }
    }
}
