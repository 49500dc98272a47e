//! Engine configuration, loadable from TOML
//!
//! `EngineConfig::load` reads `settings.toml` from the platform config
//! directory (e.g. ~/.config/tetris-engine/settings.toml) and falls back to
//! defaults.

use crate::error::{ConfigError, MIN_DISPLAY_SIZE, MIN_FIELD_SIDE};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Everything needed to construct a [`GameMaster`](crate::GameMaster)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Field rows
    pub height: usize,
    /// Field columns
    pub width: usize,
    /// Length of the next-piece preview
    pub num_nexts: usize,
    /// Side of each next-piece display block
    pub next_size: usize,
    /// Side of the hold display block
    pub hold_size: usize,
    /// Ghost piece visibility
    pub enable_ghost: bool,
    /// Inject garbage rows from below
    pub enable_garbage: bool,
    /// Randomizer seed; a random one is drawn when unset
    pub seed: Option<u64>,
    /// Gameplay timing
    pub timing: TimingSettings,
    /// Garbage injection policy
    pub garbage: GarbageSettings,
}

/// Gravity, lock delay and auto-shift settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingSettings {
    /// Level the gravity curve starts from
    pub start_level: u32,
    /// Grace period on the stack before a piece locks, in milliseconds
    pub lock_delay_ms: u64,
    /// Moves/rotations on the stack that may restart the lock delay
    pub max_lock_resets: u8,
    /// Delayed Auto Shift in milliseconds
    pub das_ms: u64,
    /// Auto Repeat Rate in milliseconds
    pub arr_ms: u64,
}

/// When garbage rows come in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GarbageSettings {
    /// One garbage row per this many locked pieces that clear nothing
    pub interval: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            height: 20,
            width: 10,
            num_nexts: 6,
            next_size: 4,
            hold_size: 4,
            enable_ghost: true,
            enable_garbage: true,
            seed: None,
            timing: TimingSettings::default(),
            garbage: GarbageSettings::default(),
        }
    }
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            start_level: 1,
            lock_delay_ms: 500,
            max_lock_resets: 15,
            das_ms: 170,
            arr_ms: 50,
        }
    }
}

impl Default for GarbageSettings {
    fn default() -> Self {
        Self { interval: 8 }
    }
}

impl TimingSettings {
    pub fn lock_delay(&self) -> Duration {
        Duration::from_millis(self.lock_delay_ms)
    }

    pub fn das(&self) -> Duration {
        Duration::from_millis(self.das_ms)
    }

    pub fn arr(&self) -> Duration {
        Duration::from_millis(self.arr_ms)
    }
}

impl EngineConfig {
    /// Config with the seven construction parameters, everything else default
    pub fn new(
        height: usize,
        width: usize,
        num_nexts: usize,
        next_size: usize,
        hold_size: usize,
        enable_ghost: bool,
        enable_garbage: bool,
    ) -> Self {
        Self {
            height,
            width,
            num_nexts,
            next_size,
            hold_size,
            enable_ghost,
            enable_garbage,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check that an engine can run with this configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_FIELD_SIDE || self.height < MIN_FIELD_SIDE {
            return Err(ConfigError::FieldTooSmall {
                width: self.width,
                height: self.height,
            });
        }
        if self.num_nexts == 0 {
            return Err(ConfigError::NoNextPieces);
        }
        if self.next_size < MIN_DISPLAY_SIZE {
            return Err(ConfigError::DisplayTooSmall {
                area: "next",
                size: self.next_size,
            });
        }
        if self.hold_size < MIN_DISPLAY_SIZE {
            return Err(ConfigError::DisplayTooSmall {
                area: "hold",
                size: self.hold_size,
            });
        }
        if self.enable_garbage && self.garbage.interval == 0 {
            return Err(ConfigError::ZeroGarbageInterval);
        }
        Ok(())
    }

    /// Parse settings from TOML text; missing keys take their defaults
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Read settings from a TOML file
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Get the settings file path
    pub fn settings_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "tetris-engine", "tetris-engine")
            .map(|dirs| dirs.config_dir().join("settings.toml"))
    }

    /// Load settings from the config directory, or fall back to defaults
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring settings file: {}", e);
                Self::default()
            }
        }
    }

    /// Render as TOML
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
