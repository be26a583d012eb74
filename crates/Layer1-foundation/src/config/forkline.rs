//! forkline config
//!
//! Merged settings for logging and the CLI runner

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::store::ConfigSource;

/// Config file name
pub const FORKLINE_CONFIG_FILE: &str = "config.toml";

// ============================================================================
// Forkline Config
// ============================================================================

/// Top-level forkline settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ForklineConfig {
    /// Schema version (for migrations)
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub log: LogConfig,

    #[serde(default)]
    pub runner: RunnerConfig,

    /// Layers that contributed, lowest precedence first
    #[serde(skip)]
    pub sources: Vec<ConfigSource>,
}

impl Default for ForklineConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            log: LogConfig::default(),
            runner: RunnerConfig::default(),
            sources: Vec::new(),
        }
    }
}

impl ForklineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Load
    // ========================================================================

    /// Global + project merged load
    pub fn load() -> Result<Self> {
        Self::load_from(ConfigSource::defaults()?)
    }

    /// Merged load with an explicit file taking precedence over both layers
    pub fn load_with_override(path: Option<&Path>) -> Result<Self> {
        let mut sources = ConfigSource::defaults()?;
        sources.extend(path.map(ConfigSource::explicit));
        Self::load_from(sources)
    }

    /// Apply each source on top of the defaults, then validate the result
    ///
    /// Every key a layer sets wins over earlier layers, including keys set
    /// back to their default value.
    pub fn load_from(sources: impl IntoIterator<Item = ConfigSource>) -> Result<Self> {
        let mut config = Self::new();
        for source in sources {
            if let Some(layer) = source.read::<ConfigLayer>()? {
                config.apply(layer);
                config.sources.push(source);
            }
        }
        config.validate()?;
        Ok(config)
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    // ========================================================================
    // Validation / Layering
    // ========================================================================

    pub fn validate(&self) -> Result<()> {
        if self.runner.reject_exit_code == 0 {
            return Err(Error::Config(
                "runner.reject_exit_code must be non-zero".to_string(),
            ));
        }
        if self.log.level.trim().is_empty() {
            return Err(Error::Config("log.level must not be empty".to_string()));
        }
        Ok(())
    }

    fn apply(&mut self, layer: ConfigLayer) {
        if let Some(version) = layer.version {
            self.version = version;
        }
        self.log.apply(layer.log);
        self.runner.apply(layer.runner);
    }
}

// ============================================================================
// Layers
// ============================================================================

/// One config file as written: only the keys it actually contains
#[derive(Debug, Default, Deserialize)]
struct ConfigLayer {
    version: Option<u32>,
    #[serde(default)]
    log: LogLayer,
    #[serde(default)]
    runner: RunnerLayer,
}

#[derive(Debug, Default, Deserialize)]
struct LogLayer {
    level: Option<String>,
    with_target: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct RunnerLayer {
    reject_exit_code: Option<i32>,
    async_delay_ms: Option<u64>,
}

// ============================================================================
// Log Config
// ============================================================================

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default filter directive when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Include the event target in output
    #[serde(default)]
    pub with_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            with_target: false,
        }
    }
}

impl LogConfig {
    fn apply(&mut self, layer: LogLayer) {
        if let Some(level) = layer.level {
            self.level = level;
        }
        if let Some(with_target) = layer.with_target {
            self.with_target = with_target;
        }
    }
}

// ============================================================================
// Runner Config
// ============================================================================

/// Settings for the outermost fork performed by the CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Process exit status after a rejection
    #[serde(default = "default_reject_exit_code")]
    pub reject_exit_code: i32,

    /// Delay used by the asynchronous demo step
    #[serde(default = "default_async_delay_ms")]
    pub async_delay_ms: u64,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            reject_exit_code: default_reject_exit_code(),
            async_delay_ms: default_async_delay_ms(),
        }
    }
}

impl RunnerConfig {
    fn apply(&mut self, layer: RunnerLayer) {
        if let Some(code) = layer.reject_exit_code {
            self.reject_exit_code = code;
        }
        if let Some(delay) = layer.async_delay_ms {
            self.async_delay_ms = delay;
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn default_version() -> u32 {
    1
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_reject_exit_code() -> i32 {
    1
}

fn default_async_delay_ms() -> u64 {
    50
}
