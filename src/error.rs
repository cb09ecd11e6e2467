//! Startup errors
//!
//! Everything here is reported before the first tick. The simulation itself
//! has no failure paths.

use std::fmt;

/// Palette string could not be resolved into 16 colors
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PaletteError {
    WrongLength { actual: usize, expected: usize },
    InvalidHex { index: usize, chunk: String },
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongLength { actual, expected } => write!(
                f,
                "palette string has {actual} characters, expected {expected}"
            ),
            Self::InvalidHex { index, chunk } => {
                write!(f, "palette color {index} is not a hex triplet: {chunk:?}")
            }
        }
    }
}

impl std::error::Error for PaletteError {}

/// Settings could not be loaded or are unusable
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Palette(PaletteError),
    InvalidScreen { width: f32, height: f32 },
    InvalidWave { index: usize, reason: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read settings: {e}"),
            Self::Parse(e) => write!(f, "failed to parse settings: {e}"),
            Self::Palette(e) => write!(f, "invalid palette: {e}"),
            Self::InvalidScreen { width, height } => {
                write!(f, "invalid screen size: {width}x{height}")
            }
            Self::InvalidWave { index, reason } => write!(f, "wave {index}: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Palette(e) => Some(e),
            Self::InvalidScreen { .. } | Self::InvalidWave { .. } => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

impl From<PaletteError> for ConfigError {
    fn from(e: PaletteError) -> Self {
        Self::Palette(e)
    }
}
