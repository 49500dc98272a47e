//! Errors raised while building an engine from its configuration

use std::fmt;
use std::path::PathBuf;

/// Smallest field width and height; the I piece needs four cells
pub const MIN_FIELD_SIDE: usize = 4;
/// Smallest next/hold display area side; every piece box fits in four cells
pub const MIN_DISPLAY_SIZE: usize = 4;

/// Configuration problems, reported before the engine starts
#[derive(Debug)]
pub enum ConfigError {
    FieldTooSmall { width: usize, height: usize },
    NoNextPieces,
    DisplayTooSmall { area: &'static str, size: usize },
    ZeroGarbageInterval,
    Io { path: PathBuf, source: std::io::Error },
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldTooSmall { width, height } => write!(
                f,
                "field is {width}x{height}, both sides must be at least {MIN_FIELD_SIDE}"
            ),
            Self::NoNextPieces => write!(f, "next queue must hold at least one piece"),
            Self::DisplayTooSmall { area, size } => write!(
                f,
                "{area} display size is {size}, must be at least {MIN_DISPLAY_SIZE}"
            ),
            Self::ZeroGarbageInterval => write!(f, "garbage interval must be at least 1"),
            Self::Io { path, source } => {
                write!(f, "could not read {}: {}", path.display(), source)
            }
            Self::Parse(e) => write!(f, "invalid settings: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Parse(e)
    }
}
