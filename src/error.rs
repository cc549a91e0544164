use std::fmt;

/// Reasons a `GameConfig` is rejected before a session starts.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Screen too small to hold the pipe-gap and spawn ranges.
    ScreenTooSmall { width: f32, height: f32, min_height: f32 },
    /// The pipe gap shrinks to nothing (or below) at some reachable level.
    NonPositiveGap { level: u32, gap: f32 },
    ZeroMaxLevels,
    ZeroLives,
    ZeroTickRate,
    /// NaN or infinite value where a real number is required.
    NonFinite { field: &'static str, value: f32 },
    /// A physics or size constant that must be strictly positive is not.
    NonPositive { field: &'static str, value: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ScreenTooSmall {
                width,
                height,
                min_height,
            } => write!(
                f,
                "screen {width}x{height} is too small (height must be at least {min_height})"
            ),
            Self::NonPositiveGap { level, gap } => {
                write!(f, "pipe gap at level {level} is {gap}, must be positive")
            }
            Self::ZeroMaxLevels => write!(f, "max_levels must be at least 1"),
            Self::ZeroLives => write!(f, "starting lives must be at least 1"),
            Self::ZeroTickRate => write!(f, "tick rate must be at least 1 per second"),
            Self::NonFinite { field, value } => {
                write!(f, "{field} must be a finite number, got {value}")
            }
            Self::NonPositive { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
